//! 响应 DTO 定义

use chrono::{DateTime, Utc};
use rule_engine::{EvaluationResult, StoredRule, WireNode, to_wire};
use serde::{Deserialize, Serialize};

/// API 统一响应
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }

    /// 创建成功响应（无数据）
    pub fn success_empty() -> ApiResponse<()> {
        ApiResponse {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: None,
        }
    }
}

/// 规则详情
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDto {
    pub rule_id: String,
    pub rule_string: String,
    pub ast: WireNode,
    pub created_at: DateTime<Utc>,
}

impl From<StoredRule> for RuleDto {
    fn from(rule: StoredRule) -> Self {
        Self {
            ast: to_wire(&rule.root),
            rule_id: rule.id,
            rule_string: rule.rule_string,
            created_at: rule.created_at,
        }
    }
}

/// 组合规则结果
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedRuleDto {
    pub ast: WireNode,
    pub rule_count: usize,
}

/// 评估结果
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationDto {
    pub result: bool,
    pub matched_conditions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<String>>,
    pub evaluation_time_ms: i64,
}

impl EvaluationDto {
    pub fn from_result(result: EvaluationResult, include_trace: bool) -> Self {
        Self {
            result: result.matched,
            matched_conditions: result.matched_conditions,
            trace: include_trace.then_some(result.evaluation_trace),
            evaluation_time_ms: result.evaluation_time_ms,
        }
    }
}
