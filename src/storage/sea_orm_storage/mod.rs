//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod courses;
mod enrollments;
mod files;
mod grades;
mod materials;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{CourseHubError, Result};
use migration::{Migrator, MigratorTrait};
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

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CourseHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CourseHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CourseHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CourseHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::Assignment,
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    },
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::RosterEntry,
    },
    enrollments::entities::Enrollment,
    files::entities::File,
    materials::{
        entities::Material,
        requests::{CreateMaterialRequest, UpdateMaterialRequest},
    },
    submissions::{
        entities::{Submission, SubmissionGrade},
        requests::NewSubmission,
    },
    users::{entities::User, requests::RegisterRequest},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: RegisterRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 文件模块
    async fn upload_file(
        &self,
        download_token: &str,
        file_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File> {
        self.upload_file_impl(download_token, file_name, file_size, file_type, user_id)
            .await
    }

    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>> {
        self.get_file_by_token_impl(token).await
    }

    async fn delete_file_by_token(&self, token: &str) -> Result<bool> {
        self.delete_file_by_token_impl(token).await
    }

    // 课程模块
    async fn create_course(
        &self,
        instructor_id: i64,
        course: CreateCourseRequest,
    ) -> Result<Course> {
        self.create_course_impl(instructor_id, course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>> {
        self.get_course_by_code_impl(code).await
    }

    async fn get_courses_by_ids(&self, ids: &[i64]) -> Result<Vec<Course>> {
        self.get_courses_by_ids_impl(ids).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<(Vec<Course>, PaginationInfo)> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    // 选课模块
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<Enrollment> {
        self.enroll_student_impl(course_id, student_id).await
    }

    async fn unenroll_student(&self, course_id: i64, student_id: i64) -> Result<bool> {
        self.unenroll_student_impl(course_id, student_id).await
    }

    async fn is_enrolled(&self, course_id: i64, student_id: i64) -> Result<bool> {
        self.is_enrolled_impl(course_id, student_id).await
    }

    async fn list_course_roster(&self, course_id: i64) -> Result<Vec<RosterEntry>> {
        self.list_course_roster_impl(course_id).await
    }

    async fn list_courses_by_student(&self, student_id: i64) -> Result<Vec<Course>> {
        self.list_courses_by_student_impl(student_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        created_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(created_by, assignment).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn get_assignments_by_ids(&self, ids: &[i64]) -> Result<Vec<Assignment>> {
        self.get_assignments_by_ids_impl(ids).await
    }

    async fn list_assignments_by_course(&self, course_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_by_course_impl(course_id).await
    }

    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(assignment_id, update).await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    // 提交模块
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission> {
        self.create_submission_impl(submission).await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_by_assignment_and_student_impl(assignment_id, student_id)
            .await
    }

    async fn list_submissions_by_assignment(&self, assignment_id: i64) -> Result<Vec<Submission>> {
        self.list_submissions_by_assignment_impl(assignment_id).await
    }

    async fn list_submissions_by_student(&self, student_id: i64) -> Result<Vec<Submission>> {
        self.list_submissions_by_student_impl(student_id).await
    }

    async fn list_submissions_by_assignments(
        &self,
        assignment_ids: &[i64],
        student_id: Option<i64>,
    ) -> Result<Vec<Submission>> {
        self.list_submissions_by_assignments_impl(assignment_ids, student_id)
            .await
    }

    async fn delete_submission(&self, submission_id: i64) -> Result<bool> {
        self.delete_submission_impl(submission_id).await
    }

    // 评分模块
    async fn upsert_grade(
        &self,
        submission_id: i64,
        grader_id: i64,
        score: f64,
        feedback: String,
    ) -> Result<SubmissionGrade> {
        self.upsert_grade_impl(submission_id, grader_id, score, feedback)
            .await
    }

    // 资料模块
    async fn create_material(
        &self,
        uploaded_by: i64,
        material: CreateMaterialRequest,
        file_name: String,
        file_type: String,
    ) -> Result<Material> {
        self.create_material_impl(uploaded_by, material, file_name, file_type)
            .await
    }

    async fn get_material_by_id(&self, material_id: i64) -> Result<Option<Material>> {
        self.get_material_by_id_impl(material_id).await
    }

    async fn list_materials_by_course(&self, course_id: i64) -> Result<Vec<Material>> {
        self.list_materials_by_course_impl(course_id).await
    }

    async fn update_material(
        &self,
        material_id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>> {
        self.update_material_impl(material_id, update).await
    }

    async fn delete_material(&self, material_id: i64) -> Result<bool> {
        self.delete_material_impl(material_id).await
    }
}
