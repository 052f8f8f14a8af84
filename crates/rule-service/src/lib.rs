//! 规则服务
//!
//! 将规则引擎以 REST API 形式对外提供：创建、查询、删除、组合和评估规则。
//!
//! ## 模块结构
//!
//! - `config`: 分层配置加载
//! - `observability`: 日志初始化
//! - `dto`: 请求和响应的数据传输对象
//! - `error`: 错误类型及 HTTP 映射
//! - `handlers`: HTTP 请求处理器
//! - `routes`: 路由配置
//! - `state`: 应用状态

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::{Result, ServiceError};
pub use routes::app;
pub use state::AppState;
