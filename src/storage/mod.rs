use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: RegisterRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 批量获取用户信息，用于组装列表响应中的关联用户
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 文件管理方法
    // 上传文件
    async fn upload_file(
        &self,
        download_token: &str,
        file_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File>;
    // 通过唯一 token 获取文件信息
    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>>;
    // 删除文件记录
    async fn delete_file_by_token(&self, token: &str) -> Result<bool>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, instructor_id: i64, course: CreateCourseRequest)
    -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 通过选课码获取课程信息
    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>>;
    // 批量获取课程信息
    async fn get_courses_by_ids(&self, ids: &[i64]) -> Result<Vec<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<(Vec<Course>, PaginationInfo)>;
    // 更新课程信息
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程
    async fn delete_course(&self, course_id: i64) -> Result<bool>;

    /// 选课管理方法
    // 学生选课，(course_id, student_id) 唯一约束由数据库保证
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<Enrollment>;
    // 学生退课
    async fn unenroll_student(&self, course_id: i64, student_id: i64) -> Result<bool>;
    // 查询学生是否在课程中
    async fn is_enrolled(&self, course_id: i64, student_id: i64) -> Result<bool>;
    // 课程名册，按选课时间排序
    async fn list_course_roster(&self, course_id: i64) -> Result<Vec<RosterEntry>>;
    // 学生已选的全部课程
    async fn list_courses_by_student(&self, student_id: i64) -> Result<Vec<Course>>;

    /// 作业管理方法
    // 发布作业
    async fn create_assignment(
        &self,
        created_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业信息
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 批量获取作业信息
    async fn get_assignments_by_ids(&self, ids: &[i64]) -> Result<Vec<Assignment>>;
    // 列出课程内作业
    async fn list_assignments_by_course(&self, course_id: i64) -> Result<Vec<Assignment>>;
    // 更新作业信息
    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 删除作业
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;

    /// 提交管理方法
    // 创建提交，(assignment_id, student_id) 唯一约束由数据库保证
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission>;
    // 通过ID获取提交（含评分）
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 获取学生在某作业下的提交
    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出作业下全部提交
    async fn list_submissions_by_assignment(&self, assignment_id: i64) -> Result<Vec<Submission>>;
    // 列出学生的全部提交
    async fn list_submissions_by_student(&self, student_id: i64) -> Result<Vec<Submission>>;
    // 批量列出多个作业下的提交，可按学生过滤，用于成绩汇总
    async fn list_submissions_by_assignments(
        &self,
        assignment_ids: &[i64],
        student_id: Option<i64>,
    ) -> Result<Vec<Submission>>;
    // 删除提交
    async fn delete_submission(&self, submission_id: i64) -> Result<bool>;

    /// 评分管理方法
    // 写入或覆盖评分，每个提交至多一条
    async fn upsert_grade(
        &self,
        submission_id: i64,
        grader_id: i64,
        score: f64,
        feedback: String,
    ) -> Result<SubmissionGrade>;

    /// 资料管理方法
    // 上传课程资料
    async fn create_material(
        &self,
        uploaded_by: i64,
        material: CreateMaterialRequest,
        file_name: String,
        file_type: String,
    ) -> Result<Material>;
    // 通过ID获取资料信息
    async fn get_material_by_id(&self, material_id: i64) -> Result<Option<Material>>;
    // 列出课程内资料
    async fn list_materials_by_course(&self, course_id: i64) -> Result<Vec<Material>>;
    // 更新资料信息
    async fn update_material(
        &self,
        material_id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>>;
    // 删除资料
    async fn delete_material(&self, material_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
