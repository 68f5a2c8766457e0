//! 班级存储操作

use super::{SeaOrmStorage, contains_pattern};
use crate::entity::class_students::{Column as MembershipColumn, Entity as ClassStudents};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::errors::{Result, RosterError};
use crate::models::{
    CascadeReport, EntityKind,
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
    },
    common::{PaginatedResponse, normalize_page},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            teacher_id: Set(req.teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 班级是否存在
    pub async fn class_exists_impl(&self, class_id: i64) -> Result<bool> {
        let count = Classes::find()
            .filter(Column::Id.eq(class_id))
            .count(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("查询班级失败: {e}")))?;

        Ok(count > 0)
    }

    /// 分页列出班级
    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassListQuery,
    ) -> Result<PaginatedResponse<Class>> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Classes::find();

        // 教师筛选
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        // 仅列出未分配教师的班级
        if query.unassigned == Some(true) {
            select = select.filter(Column::TeacherId.is_null());
        }

        // 搜索条件
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
            .map_err(|e| RosterError::store(format!("查询班级总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| RosterError::store(format!("查询班级页数失败: {e}")))?;
        let classes = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| RosterError::store(format!("查询班级列表失败: {e}")))?;

        Ok(PaginatedResponse::new(
            classes.into_iter().map(|m| m.into_class()).collect(),
            page,
            size,
            total,
            pages,
        ))
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        // 先检查班级是否存在
        if !self.class_exists_impl(class_id).await? {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("更新班级失败: {e}")))?;

        Ok(Some(result.into_class()))
    }

    /// 设置班级教师
    ///
    /// 单条 `UPDATE classes SET teacher_id = ? WHERE id = ?`，影响行数为 0 说明班级不存在。
    pub async fn set_class_teacher_impl(
        &self,
        class_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Option<Class>> {
        let result = Classes::update_many()
            .col_expr(Column::TeacherId, Expr::value(teacher_id))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(class_id))
            .exec(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("设置班级教师失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_class_by_id_impl(class_id).await
    }

    /// 删除班级
    ///
    /// 同一事务内删除该班级的全部成员关系，再删除班级本身。
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<Option<CascadeReport>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RosterError::store(format!("开启事务失败: {e}")))?;

        let existing = Classes::find_by_id(class_id)
            .one(&txn)
            .await
            .map_err(|e| RosterError::store(format!("查询班级失败: {e}")))?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let memberships = ClassStudents::delete_many()
            .filter(MembershipColumn::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| RosterError::store(format!("删除班级成员关系失败: {e}")))?;

        Classes::delete_by_id(class_id)
            .exec(&txn)
            .await
            .map_err(|e| RosterError::store(format!("删除班级失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| RosterError::store(format!("提交事务失败: {e}")))?;

        debug!(
            "Deleted class {} with {} memberships",
            class_id, memberships.rows_affected
        );

        Ok(Some(CascadeReport {
            entity: EntityKind::Class,
            id: class_id,
            classes_cleared: u64::from(existing.teacher_id.is_some()),
            memberships_removed: memberships.rows_affected,
        }))
    }

    /// 班级总数
    pub async fn count_classes_impl(&self) -> Result<u64> {
        Classes::find()
            .count(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("查询班级总数失败: {e}")))
    }
}
