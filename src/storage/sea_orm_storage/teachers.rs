//! 教师存储操作

use super::{SeaOrmStorage, contains_pattern};
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{Result, RosterError};
use crate::models::{
    CascadeReport, EntityKind,
    common::{PaginatedResponse, normalize_page},
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
    },
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 创建教师
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            display_name: Set(req.display_name),
            specialty: Set(req.specialty),
            phone: Set(req.phone),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("创建教师失败: {e}")))?;

        Ok(result.into_teacher())
    }

    /// 通过 ID 获取教师
    pub async fn get_teacher_by_id_impl(&self, teacher_id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(teacher_id)
            .one(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 教师是否存在
    pub async fn teacher_exists_impl(&self, teacher_id: i64) -> Result<bool> {
        let count = Teachers::find()
            .filter(Column::Id.eq(teacher_id))
            .count(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("查询教师失败: {e}")))?;

        Ok(count > 0)
    }

    /// 分页列出教师
    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: TeacherListQuery,
    ) -> Result<PaginatedResponse<Teacher>> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Teachers::find();

        // 搜索条件（显示名称）
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::DisplayName.like(contains_pattern(search.trim())));
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| RosterError::store(format!("查询教师总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| RosterError::store(format!("查询教师页数失败: {e}")))?;
        let teachers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| RosterError::store(format!("查询教师列表失败: {e}")))?;

        Ok(PaginatedResponse::new(
            teachers.into_iter().map(|m| m.into_teacher()).collect(),
            page,
            size,
            total,
            pages,
        ))
    }

    /// 更新教师信息
    pub async fn update_teacher_impl(
        &self,
        teacher_id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        if !self.teacher_exists_impl(teacher_id).await? {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(teacher_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(display_name) = update.display_name {
            model.display_name = Set(display_name);
        }
        if let Some(specialty) = update.specialty {
            model.specialty = Set(Some(specialty));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("更新教师失败: {e}")))?;

        Ok(Some(result.into_teacher()))
    }

    /// 删除教师
    ///
    /// 在同一事务内把所有引用该教师的班级 teacher_id 置空，然后删除教师记录。
    pub async fn delete_teacher_impl(&self, teacher_id: i64) -> Result<Option<CascadeReport>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RosterError::store(format!("开启事务失败: {e}")))?;

        let existing = Teachers::find_by_id(teacher_id)
            .one(&txn)
            .await
            .map_err(|e| RosterError::store(format!("查询教师失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let cleared = Classes::update_many()
            .col_expr(ClassColumn::TeacherId, Expr::value(Option::<i64>::None))
            .col_expr(
                ClassColumn::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(ClassColumn::TeacherId.eq(teacher_id))
            .exec(&txn)
            .await
            .map_err(|e| RosterError::store(format!("清空班级教师失败: {e}")))?;

        Teachers::delete_by_id(teacher_id)
            .exec(&txn)
            .await
            .map_err(|e| RosterError::store(format!("删除教师失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| RosterError::store(format!("提交事务失败: {e}")))?;

        debug!(
            "Deleted teacher {} and cleared {} classes",
            teacher_id, cleared.rows_affected
        );

        Ok(Some(CascadeReport {
            entity: EntityKind::Teacher,
            id: teacher_id,
            classes_cleared: cleared.rows_affected,
            memberships_removed: 0,
        }))
    }

    /// 教师总数
    pub async fn count_teachers_impl(&self) -> Result<u64> {
        Teachers::find()
            .count(&self.db)
            .await
            .map_err(|e| RosterError::store(format!("查询教师总数失败: {e}")))
    }
}
