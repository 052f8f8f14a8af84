//! 请求 DTO 定义
//!
//! 字段使用 camelCase，同时兼容 snake_case 写法（如 `rule_ast`）。

use rule_engine::LogicalOperator;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

/// 创建规则请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRuleRequest {
    #[validate(length(min = 1, max = 10000, message = "规则文本长度必须在1-10000个字符之间"))]
    pub rule: String,
}

/// 组合规则请求
///
/// `rules` 中每一项可以是已存储规则的 ID，也可以是规则文本。
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CombineRulesRequest {
    #[validate(length(max = 100, message = "单次最多组合100条规则"))]
    pub rules: Vec<String>,
    #[serde(default)]
    pub operator: LogicalOperator,
}

/// 评估规则请求
///
/// `ruleAst` 与 `ruleId` 二选一，同时提供时以 `ruleAst` 为准。
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRuleRequest {
    #[serde(default, alias = "rule_ast")]
    pub rule_ast: Option<Value>,
    #[serde(default, alias = "rule_id")]
    pub rule_id: Option<String>,
    pub data: Value,
    #[serde(default)]
    pub trace: bool,
}
