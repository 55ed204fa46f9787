//! CourseHub 课程管理平台的后端服务。
//!
//! 请求处理链：`routes` 注册路由并挂中间件（`middlewares` 负责认证与
//! 限流），业务流程在 `services` 里完成；细粒度授权判定集中在
//! `policy`，数据读写经 `storage` 的 trait 落到 SeaORM 实体
//! （`entity`），热点数据走 `cache`。`models` 定义 API 出入参与
//! 错误码，`config`、`errors`、`runtime`、`utils` 提供横切支撑。

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod policy;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
