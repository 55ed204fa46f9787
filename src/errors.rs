//! 进程内部错误类型
//!
//! 对外 API 的数字错误码在 `models::ErrorCode`，这里只负责服务内部的
//! 错误传递与日志展示。

use std::fmt;

/// 生成错误枚举：每个变体携带一条描述信息，
/// 同时生成 snake_case 的便捷构造函数与类别展示名。
macro_rules! coursehub_errors {
    ($( $variant:ident => $label:literal ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CourseHubError {
            $($variant(String),)*
        }

        impl CourseHubError {
            /// 错误类别的展示名
            pub fn label(&self) -> &'static str {
                match self {
                    $(CourseHubError::$variant(_) => $label,)*
                }
            }

            /// 详情文本
            pub fn message(&self) -> &str {
                match self {
                    $(CourseHubError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl CourseHubError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CourseHubError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

coursehub_errors! {
    CacheConnection => "cache connection error",
    CachePluginNotFound => "cache plugin not found",
    DatabaseConfig => "database configuration error",
    DatabaseConnection => "database connection error",
    DatabaseOperation => "database operation error",
    FileOperation => "file operation error",
    Serialization => "serialization error",
    Validation => "validation error",
}

impl fmt::Display for CourseHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.message())
    }
}

impl std::error::Error for CourseHubError {}

impl From<sea_orm::DbErr> for CourseHubError {
    fn from(err: sea_orm::DbErr) -> Self {
        CourseHubError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CourseHubError {
    fn from(err: std::io::Error) -> Self {
        CourseHubError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CourseHubError {
    fn from(err: serde_json::Error) -> Self {
        CourseHubError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CourseHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_sets_variant_and_message() {
        let err = CourseHubError::validation("标题不能为空");
        assert_eq!(err.label(), "validation error");
        assert_eq!(err.message(), "标题不能为空");
    }

    #[test]
    fn display_includes_label_and_message() {
        let err = CourseHubError::database_operation("insert failed");
        let text = err.to_string();
        assert!(text.contains("database operation error"));
        assert!(text.contains("insert failed"));
    }

    #[test]
    fn from_db_err_maps_to_database_operation() {
        let err: CourseHubError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.label(), "database operation error");
    }
}
