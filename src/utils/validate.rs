use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Result, RosterError};

/// 名称最大长度（按字符计）
pub const MAX_NAME_LENGTH: usize = 100;
/// 描述类文本最大长度
pub const MAX_TEXT_LENGTH: usize = 500;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ()-]{4,19}$").expect("Invalid phone regex"));

pub fn validate_name(field: &str, value: &str) -> Result<()> {
    // 名称不能为空白
    if value.trim().is_empty() {
        return Err(RosterError::validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(RosterError::validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_optional_text(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(text) if text.chars().count() > MAX_TEXT_LENGTH => Err(RosterError::validation(
            format!("{field} must be at most {MAX_TEXT_LENGTH} characters"),
        )),
        _ => Ok(()),
    }
}

pub fn validate_phone(phone: &str) -> Result<()> {
    // 电话格式：数字开头（可带 +），允许空格、括号与连字符
    if !PHONE_RE.is_match(phone) {
        return Err(RosterError::validation("phone format is invalid"));
    }
    Ok(())
}

pub fn validate_id(field: &str, id: i64) -> Result<()> {
    if id <= 0 {
        return Err(RosterError::validation(format!(
            "{field} must be a positive integer, got {id}"
        )));
    }
    Ok(())
}

/// 校验批量操作的目标 ID 列表
///
/// 列表必须非空、不超过 `max_batch_size`、全部为正数且不重复。
/// 任一条件不满足时整个调用被拒绝，不会执行任何条目。
pub fn validate_target_ids(field: &str, ids: &[i64], max_batch_size: usize) -> Result<()> {
    if ids.is_empty() {
        return Err(RosterError::validation(format!("{field} must not be empty")));
    }
    if ids.len() > max_batch_size {
        return Err(RosterError::validation(format!(
            "{field} contains {} ids, the maximum batch size is {max_batch_size}",
            ids.len()
        )));
    }

    let mut seen = HashSet::with_capacity(ids.len());
    for &id in ids {
        validate_id(field, id)?;
        if !seen.insert(id) {
            return Err(RosterError::validation(format!(
                "{field} contains duplicate id {id}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_rules() {
        assert!(validate_name("name", "Math 101").is_ok());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"x".repeat(MAX_NAME_LENGTH)).is_ok());
        assert!(validate_name("name", &"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_phone_rules() {
        assert!(validate_phone("+86 138-0000-0000").is_ok());
        assert!(validate_phone("(020) 1234567").is_err());
        assert!(validate_phone("12345").is_ok());
        assert!(validate_phone("abc-1234").is_err());
    }

    #[test]
    fn test_id_must_be_positive() {
        assert!(validate_id("class_id", 1).is_ok());
        let err = validate_id("class_id", 0).unwrap_err();
        assert_eq!(err.error_kind(), "ValidationError");
        assert!(validate_id("class_id", -3).is_err());
    }

    #[test]
    fn test_target_ids() {
        assert!(validate_target_ids("class_ids", &[1, 2, 3], 10).is_ok());

        let empty = validate_target_ids("class_ids", &[], 10).unwrap_err();
        assert!(empty.message().contains("must not be empty"));

        let dup = validate_target_ids("class_ids", &[1, 2, 1], 10).unwrap_err();
        assert!(dup.message().contains("duplicate id 1"));

        let negative = validate_target_ids("class_ids", &[4, -1], 10).unwrap_err();
        assert!(negative.message().contains("-1"));

        let too_many = validate_target_ids("class_ids", &[1, 2, 3], 2).unwrap_err();
        assert!(too_many.message().contains("maximum batch size is 2"));
    }
}
