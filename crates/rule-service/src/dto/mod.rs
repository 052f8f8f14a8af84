//! 数据传输对象
//!
//! 请求和响应的 DTO 定义

pub mod request;
pub mod response;

pub use request::{CombineRulesRequest, CreateRuleRequest, EvaluateRuleRequest};
pub use response::{ApiResponse, CombinedRuleDto, EvaluationDto, RuleDto};
