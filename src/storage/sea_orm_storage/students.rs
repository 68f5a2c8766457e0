//! 学生存储操作

use super::{SeaOrmStorage, contains_pattern};
use crate::entity::class_students::{Column as MembershipColumn, Entity as ClassStudents};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, RosterError};
use crate::models::{
    CascadeReport, EntityKind,
    common::{PaginatedResponse, normalize_page},
    students::{
        entities::{Student, StudentStatus},
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();
        let status = req.status.unwrap_or(StudentStatus::Active);

        let model = ActiveModel {
            name: Set(req.name),
            status: Set(status.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("创建学生失败: {e}")))?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, student_id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 学生是否存在
    pub async fn student_exists_impl(&self, student_id: i64) -> Result<bool> {
        let count = Students::find()
            .filter(Column::Id.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("查询学生失败: {e}")))?;

        Ok(count > 0)
    }

    /// 分页列出学生（可按状态、所在班级、姓名筛选）
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Students::find();

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 班级筛选：student_id IN (SELECT student_id FROM class_students WHERE class_id = ?)
        if let Some(class_id) = query.class_id {
            select = select.filter(
                Column::Id.in_subquery(
                    Query::select()
                        .column(MembershipColumn::StudentId)
                        .from(ClassStudents)
                        .and_where(MembershipColumn::ClassId.eq(class_id))
                        .to_owned(),
                ),
            );
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::Name.like(contains_pattern(search.trim())));
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| RosterError::store(format!("查询学生总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| RosterError::store(format!("查询学生页数失败: {e}")))?;
        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| RosterError::store(format!("查询学生列表失败: {e}")))?;

        Ok(PaginatedResponse::new(
            students.into_iter().map(|m| m.into_student()).collect(),
            page,
            size,
            total,
            pages,
        ))
    }

    /// 更新学生信息
    pub async fn update_student_impl(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if !self.student_exists_impl(student_id).await? {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(student_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("更新学生失败: {e}")))?;

        Ok(Some(result.into_student()))
    }

    /// 更新学生状态
    pub async fn update_student_status_impl(
        &self,
        student_id: i64,
        status: StudentStatus,
    ) -> Result<Option<Student>> {
        if !self.student_exists_impl(student_id).await? {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(student_id),
            status: Set(status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("更新学生状态失败: {e}")))?;

        Ok(Some(result.into_student()))
    }

    /// 删除学生
    ///
    /// 同一事务内删除该学生的全部成员关系，再删除学生本身。
    pub async fn delete_student_impl(&self, student_id: i64) -> Result<Option<CascadeReport>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RosterError::store(format!("开启事务失败: {e}")))?;

        let existing = Students::find_by_id(student_id)
            .one(&txn)
            .await
            .map_err(|e| RosterError::store(format!("查询学生失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let memberships = ClassStudents::delete_many()
            .filter(MembershipColumn::StudentId.eq(student_id))
            .exec(&txn)
            .await
            .map_err(|e| RosterError::store(format!("删除学生成员关系失败: {e}")))?;

        Students::delete_by_id(student_id)
            .exec(&txn)
            .await
            .map_err(|e| RosterError::store(format!("删除学生失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| RosterError::store(format!("提交事务失败: {e}")))?;

        debug!(
            "Deleted student {} with {} memberships",
            student_id, memberships.rows_affected
        );

        Ok(Some(CascadeReport {
            entity: EntityKind::Student,
            id: student_id,
            classes_cleared: 0,
            memberships_removed: memberships.rows_affected,
        }))
    }

    /// 学生总数
    pub async fn count_students_impl(&self) -> Result<u64> {
        Students::find()
            .count(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("查询学生总数失败: {e}")))
    }
}
