//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod classes;
mod memberships;
mod students;
mod teachers;

use crate::config::AppConfig;
use crate::errors::{Result, RosterError};
use migration::{Migrator, MigratorTrait};
use sea_orm::sea_query::LikeExpr;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 使用已有连接创建存储实例并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| RosterError::store(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// 内存 SQLite 实例（单连接，连接关闭即销毁）
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| RosterError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| RosterError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Self::from_connection(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool)).await
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| RosterError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| RosterError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| RosterError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(RosterError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 构造包含子串匹配的 LIKE 表达式，转义 `%` `_` `\`
pub(crate) fn contains_pattern(search: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(search.len());
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    LikeExpr::new(format!("%{escaped}%")).escape('\\')
}

// Storage trait 实现
use crate::models::{
    CascadeReport,
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
    },
    common::PaginatedResponse,
    students::{
        entities::{Student, StudentStatus},
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 教师模块
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher> {
        self.create_teacher_impl(teacher).await
    }

    async fn get_teacher_by_id(&self, teacher_id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(teacher_id).await
    }

    async fn teacher_exists(&self, teacher_id: i64) -> Result<bool> {
        self.teacher_exists_impl(teacher_id).await
    }

    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<PaginatedResponse<Teacher>> {
        self.list_teachers_with_pagination_impl(query).await
    }

    async fn update_teacher(
        &self,
        teacher_id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_impl(teacher_id, update).await
    }

    async fn delete_teacher(&self, teacher_id: i64) -> Result<Option<CascadeReport>> {
        self.delete_teacher_impl(teacher_id).await
    }

    async fn count_teachers(&self) -> Result<u64> {
        self.count_teachers_impl().await
    }

    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn class_exists(&self, class_id: i64) -> Result<bool> {
        self.class_exists_impl(class_id).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<PaginatedResponse<Class>> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn set_class_teacher(
        &self,
        class_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Option<Class>> {
        self.set_class_teacher_impl(class_id, teacher_id).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<Option<CascadeReport>> {
        self.delete_class_impl(class_id).await
    }

    async fn count_classes(&self) -> Result<u64> {
        self.count_classes_impl().await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(student_id).await
    }

    async fn student_exists(&self, student_id: i64) -> Result<bool> {
        self.student_exists_impl(student_id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(student_id, update).await
    }

    async fn update_student_status(
        &self,
        student_id: i64,
        status: StudentStatus,
    ) -> Result<Option<Student>> {
        self.update_student_status_impl(student_id, status).await
    }

    async fn delete_student(&self, student_id: i64) -> Result<Option<CascadeReport>> {
        self.delete_student_impl(student_id).await
    }

    async fn count_students(&self) -> Result<u64> {
        self.count_students_impl().await
    }

    // 成员关系模块
    async fn has_membership(&self, student_id: i64, class_id: i64) -> Result<bool> {
        self.has_membership_impl(student_id, class_id).await
    }

    async fn add_membership(&self, student_id: i64, class_id: i64) -> Result<bool> {
        self.add_membership_impl(student_id, class_id).await
    }

    async fn remove_membership(&self, student_id: i64, class_id: i64) -> Result<bool> {
        self.remove_membership_impl(student_id, class_id).await
    }

    async fn list_class_members(
        &self,
        class_id: i64,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        self.list_students_with_pagination_impl(StudentListQuery {
            class_id: Some(class_id),
            ..query
        })
        .await
    }

    async fn count_class_members(&self, class_id: i64) -> Result<u64> {
        self.count_class_members_impl(class_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityKind;
    use crate::models::students::entities::StudentStatus;

    async fn storage() -> SeaOrmStorage {
        SeaOrmStorage::new_in_memory().await.unwrap()
    }

    fn teacher(name: &str) -> CreateTeacherRequest {
        CreateTeacherRequest {
            display_name: name.to_string(),
            specialty: None,
            phone: None,
        }
    }

    fn class(name: &str, teacher_id: Option<i64>) -> CreateClassRequest {
        CreateClassRequest {
            name: name.to_string(),
            description: None,
            teacher_id,
        }
    }

    fn student(name: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            name: name.to_string(),
            status: None,
        }
    }

    #[tokio::test]
    async fn test_add_membership_is_insert_if_absent() {
        let storage = storage().await;
        let c = storage.create_class(class("Math", None)).await.unwrap();
        let s = storage.create_student(student("Ann")).await.unwrap();

        assert!(storage.add_membership(s.id, c.id).await.unwrap());
        assert!(!storage.add_membership(s.id, c.id).await.unwrap());
        assert!(storage.has_membership(s.id, c.id).await.unwrap());
        assert_eq!(storage.count_class_members(c.id).await.unwrap(), 1);

        assert!(storage.remove_membership(s.id, c.id).await.unwrap());
        assert!(!storage.remove_membership(s.id, c.id).await.unwrap());
        assert_eq!(storage.count_class_members(c.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_set_class_teacher_reports_missing_class() {
        let storage = storage().await;
        let t = storage.create_teacher(teacher("Mr. Li")).await.unwrap();
        let c = storage.create_class(class("Math", None)).await.unwrap();

        let updated = storage.set_class_teacher(c.id, Some(t.id)).await.unwrap();
        assert_eq!(updated.unwrap().teacher_id, Some(t.id));

        let cleared = storage.set_class_teacher(c.id, None).await.unwrap();
        assert_eq!(cleared.unwrap().teacher_id, None);

        assert!(storage.set_class_teacher(999, Some(t.id)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_teacher_clears_classes() {
        let storage = storage().await;
        let t = storage.create_teacher(teacher("Ms. Wang")).await.unwrap();
        let a = storage.create_class(class("A", Some(t.id))).await.unwrap();
        let b = storage.create_class(class("B", Some(t.id))).await.unwrap();

        let report = storage.delete_teacher(t.id).await.unwrap().unwrap();
        assert_eq!(report.entity, EntityKind::Teacher);
        assert_eq!(report.classes_cleared, 2);

        for id in [a.id, b.id] {
            let class = storage.get_class_by_id(id).await.unwrap().unwrap();
            assert_eq!(class.teacher_id, None);
        }
        assert!(!storage.teacher_exists(t.id).await.unwrap());
        assert!(storage.delete_teacher(t.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_class_removes_memberships() {
        let storage = storage().await;
        let t = storage.create_teacher(teacher("Mr. Zhao")).await.unwrap();
        let c = storage.create_class(class("Physics", Some(t.id))).await.unwrap();
        let other = storage.create_class(class("Chem", None)).await.unwrap();
        let s1 = storage.create_student(student("A")).await.unwrap();
        let s2 = storage.create_student(student("B")).await.unwrap();
        storage.add_membership(s1.id, c.id).await.unwrap();
        storage.add_membership(s2.id, c.id).await.unwrap();
        storage.add_membership(s1.id, other.id).await.unwrap();

        let report = storage.delete_class(c.id).await.unwrap().unwrap();
        assert_eq!(report.classes_cleared, 1);
        assert_eq!(report.memberships_removed, 2);

        assert!(!storage.class_exists(c.id).await.unwrap());
        assert_eq!(storage.count_class_members(c.id).await.unwrap(), 0);
        assert!(storage.has_membership(s1.id, other.id).await.unwrap());
        assert!(storage.teacher_exists(t.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_student_removes_memberships() {
        let storage = storage().await;
        let a = storage.create_class(class("A", None)).await.unwrap();
        let b = storage.create_class(class("B", None)).await.unwrap();
        let s = storage.create_student(student("C")).await.unwrap();
        storage.add_membership(s.id, a.id).await.unwrap();
        storage.add_membership(s.id, b.id).await.unwrap();

        let report = storage.delete_student(s.id).await.unwrap().unwrap();
        assert_eq!(report.memberships_removed, 2);
        assert_eq!(storage.count_class_members(a.id).await.unwrap(), 0);
        assert_eq!(storage.count_class_members(b.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_students_filters() {
        let storage = storage().await;
        let c = storage.create_class(class("A", None)).await.unwrap();
        let ann = storage.create_student(student("Ann")).await.unwrap();
        let bob = storage.create_student(student("Bob")).await.unwrap();
        storage.create_student(student("Annie_2")).await.unwrap();
        storage.add_membership(bob.id, c.id).await.unwrap();
        storage
            .update_student_status(ann.id, StudentStatus::Inactive)
            .await
            .unwrap();

        let members = storage
            .list_class_members(c.id, StudentListQuery::default())
            .await
            .unwrap();
        assert_eq!(members.items.len(), 1);
        assert_eq!(members.items[0].id, bob.id);

        let inactive = storage
            .list_students_with_pagination(StudentListQuery {
                status: Some(StudentStatus::Inactive),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(inactive.pagination.total, 1);
        assert_eq!(inactive.items[0].id, ann.id);

        let searched = storage
            .list_students_with_pagination(StudentListQuery {
                search: Some("Ann".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(searched.pagination.total, 2);

        // `_` 按字面匹配
        let literal = storage
            .list_students_with_pagination(StudentListQuery {
                search: Some("e_".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(literal.pagination.total, 1);
    }

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("roster.db").unwrap(),
            "sqlite://roster.db?mode=rwc"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://u@h/db").is_ok());
        assert!(SeaOrmStorage::build_database_url("ftp://x").is_err());
    }
}
