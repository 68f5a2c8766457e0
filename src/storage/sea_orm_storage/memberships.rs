//! 班级学生成员关系存储操作

use super::SeaOrmStorage;
use crate::entity::class_students::{ActiveModel, Column, Entity as ClassStudents};
use crate::errors::{Result, RosterError};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 是否存在成员关系
    pub async fn has_membership_impl(&self, student_id: i64, class_id: i64) -> Result<bool> {
        let count = ClassStudents::find()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::ClassId.eq(class_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("查询成员关系失败: {e}")))?;

        Ok(count > 0)
    }

    /// 插入成员关系
    ///
    /// 依赖 (student_id, class_id) 唯一索引做 `ON CONFLICT DO NOTHING`，
    /// 并发插入同一对时只有一个会返回 true。
    pub async fn add_membership_impl(&self, student_id: i64, class_id: i64) -> Result<bool> {
        let model = ActiveModel {
            student_id: Set(student_id),
            class_id: Set(class_id),
            joined_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let inserted = ClassStudents::insert(model)
            .on_conflict(
                OnConflict::columns([Column::StudentId, Column::ClassId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("添加成员关系失败: {e}")))?;

        Ok(inserted > 0)
    }

    /// 删除成员关系
    pub async fn remove_membership_impl(&self, student_id: i64, class_id: i64) -> Result<bool> {
        let result = ClassStudents::delete_many()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::ClassId.eq(class_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("删除成员关系失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 班级成员数量
    pub async fn count_class_members_impl(&self, class_id: i64) -> Result<u64> {
        ClassStudents::find()
            .filter(Column::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("查询班级成员数量失败: {e}")))
    }
}
