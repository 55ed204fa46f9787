//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

use chrono::{DateTime, Utc};

// 库里统一存 epoch 秒，非法值退回零值时间戳
pub(crate) fn datetime_from_epoch(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

pub mod assignments;
pub mod courses;
pub mod enrollments;
pub mod files;
pub mod grades;
pub mod materials;
pub mod submissions;
pub mod users;
