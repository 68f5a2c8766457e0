//! 批量操作结果
//!
//! 计数约定：`already_assigned` 与 `not_member` 属于非错误状态，计入 `success_count`；
//! 只有 `not_found` 与 `error` 计入 `failure_count`。

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use ts_rs::TS;

/// 单个目标的处理结果
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/bulk.ts")]
pub enum ItemOutcome {
    Success,
    AlreadyAssigned,
    NotMember,
    NotFound,
    Error,
}

impl ItemOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ItemOutcome::NotFound | ItemOutcome::Error)
    }
}

/// 批量操作类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/bulk.ts")]
pub enum BulkOperation {
    AssignTeacher,
    AssignStudents,
    RemoveStudents,
    DeleteClasses,
    DeleteTeachers,
    DeleteStudents,
}

impl fmt::Display for BulkOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BulkOperation::AssignTeacher => "assign_teacher",
            BulkOperation::AssignStudents => "assign_students",
            BulkOperation::RemoveStudents => "remove_students",
            BulkOperation::DeleteClasses => "delete_classes",
            BulkOperation::DeleteTeachers => "delete_teachers",
            BulkOperation::DeleteStudents => "delete_students",
        };
        f.write_str(name)
    }
}

/// 按输入顺序记录的 目标ID -> 结果 映射，序列化为 JSON 对象且保持插入顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemResults(Vec<(i64, ItemOutcome)>);

impl ItemResults {
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, target_id: i64, outcome: ItemOutcome) {
        self.0.push((target_id, outcome));
    }

    pub fn get(&self, target_id: i64) -> Option<ItemOutcome> {
        self.0
            .iter()
            .find(|(id, _)| *id == target_id)
            .map(|(_, outcome)| *outcome)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(i64, ItemOutcome)> {
        self.0.iter()
    }

    pub fn target_ids(&self) -> Vec<i64> {
        self.0.iter().map(|(id, _)| *id).collect()
    }
}

impl Serialize for ItemResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, outcome) in &self.0 {
            map.serialize_entry(id, outcome)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ItemResults {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ItemResultsVisitor;

        impl<'de> Visitor<'de> for ItemResultsVisitor {
            type Value = ItemResults;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map from target id to item outcome")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut results = ItemResults::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, outcome)) = access.next_entry::<i64, ItemOutcome>()? {
                    results.push(id, outcome);
                }
                Ok(results)
            }
        }

        deserializer.deserialize_map(ItemResultsVisitor)
    }
}

/// 非致命告警（例如外部钩子失败），不影响条目的成功状态
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/bulk.ts")]
pub struct BulkWarning {
    pub target_id: i64,
    pub error_kind: String,
    pub message: String,
}

/// 批量操作汇总结果，`success_count + failure_count == requested`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/bulk.ts")]
pub struct BulkResult {
    pub operation: BulkOperation,
    pub requested: usize,
    pub success_count: usize,
    pub failure_count: usize,
    #[ts(type = "Record<string, ItemOutcome>")]
    pub item_results: ItemResults,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<BulkWarning>,
}

impl BulkResult {
    pub fn new(operation: BulkOperation, requested: usize) -> Self {
        Self {
            operation,
            requested,
            success_count: 0,
            failure_count: 0,
            item_results: ItemResults::with_capacity(requested),
            warnings: Vec::new(),
        }
    }

    /// 记录一个目标的结果并更新计数
    pub fn record(&mut self, target_id: i64, outcome: ItemOutcome) {
        if outcome.is_failure() {
            self.failure_count += 1;
        } else {
            self.success_count += 1;
        }
        self.item_results.push(target_id, outcome);
    }

    pub fn warn(&mut self, target_id: i64, error_kind: &str, message: impl Into<String>) {
        self.warnings.push(BulkWarning {
            target_id,
            error_kind: error_kind.to_string(),
            message: message.into(),
        });
    }

    pub fn is_complete_success(&self) -> bool {
        self.failure_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_policy() {
        let mut result = BulkResult::new(BulkOperation::AssignStudents, 5);
        result.record(1, ItemOutcome::Success);
        result.record(2, ItemOutcome::AlreadyAssigned);
        result.record(3, ItemOutcome::NotMember);
        result.record(4, ItemOutcome::NotFound);
        result.record(5, ItemOutcome::Error);

        assert_eq!(result.success_count, 3);
        assert_eq!(result.failure_count, 2);
        assert_eq!(result.success_count + result.failure_count, result.requested);
        assert!(!result.is_complete_success());
    }

    #[test]
    fn test_item_results_serialize_in_input_order() {
        let mut result = BulkResult::new(BulkOperation::AssignTeacher, 3);
        result.record(10, ItemOutcome::Success);
        result.record(2, ItemOutcome::NotFound);
        result.record(7, ItemOutcome::Success);

        let json = serde_json::to_string(&result.item_results).unwrap();
        assert_eq!(json, r#"{"10":"success","2":"not_found","7":"success"}"#);
    }

    #[test]
    fn test_bulk_result_json_roundtrip_keeps_order() {
        let mut result = BulkResult::new(BulkOperation::RemoveStudents, 2);
        result.record(11, ItemOutcome::NotMember);
        result.record(3, ItemOutcome::Success);
        result.warn(3, "ExternalHookError", "grant service unavailable");

        let json = serde_json::to_string(&result).unwrap();
        let parsed: BulkResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
        assert_eq!(parsed.item_results.target_ids(), vec![11, 3]);
    }

    #[test]
    fn test_warnings_omitted_when_empty() {
        let result = BulkResult::new(BulkOperation::DeleteClasses, 0);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("warnings").is_none());
    }
}
