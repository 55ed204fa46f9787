//! 业务模型定义
//!
//! 与 entity 模块的数据库模型分离，服务层和路由层只接触这里的类型。

pub mod assignments;
pub mod auth;
pub mod common;
pub mod courses;
pub mod enrollments;
pub mod files;
pub mod grades;
pub mod materials;
pub mod submissions;
pub mod system;
pub mod users;

pub use common::{ApiResponse, PaginationInfo};

// 程序启动时间，注册为 app_data 供状态接口计算运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

// 统一业务错误码，响应体 code 字段取值
// 约定：HTTP 状态码 * 100 + 两位序号，0 表示成功
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 400 参数与业务校验
    BadRequest = 40000,
    InvalidCourseCode = 40001,
    CourseCodeAlreadyExists = 40002,
    AlreadyEnrolled = 40003,
    SubmissionAlreadyExists = 40004,
    GradeOutOfRange = 40005,
    UserNameInvalid = 40006,
    UserEmailInvalid = 40007,
    UserPasswordInvalid = 40008,
    FileSizeExceeded = 40009,
    FileTypeNotAllowed = 40010,
    MultifileUploadNotAllowed = 40011,

    // 401 认证
    Unauthorized = 40100,
    AuthFailed = 40101,
    UserSuspended = 40102,

    // 403 授权
    Forbidden = 40300,
    CoursePermissionDenied = 40301,
    NotEnrolled = 40302,
    AssignmentPermissionDenied = 40303,
    SubmissionPermissionDenied = 40304,
    MaterialPermissionDenied = 40305,

    // 404 资源不存在
    NotFound = 40400,
    CourseNotFound = 40401,
    AssignmentNotFound = 40402,
    SubmissionNotFound = 40403,
    MaterialNotFound = 40404,
    FileNotFound = 40405,

    // 409 注册冲突
    UserNameAlreadyExists = 40900,
    UserEmailAlreadyExists = 40901,

    // 429 限流
    RateLimitExceeded = 42900,

    // 500 服务端
    InternalServerError = 50000,
    RegisterFailed = 50001,
    CourseCreationFailed = 50002,
    EnrollFailed = 50003,
    SubmissionFailed = 50004,
    GradeFailed = 50005,
    MaterialCreationFailed = 50006,
    FileUploadFailed = 50007,
}
