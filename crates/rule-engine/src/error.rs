//! 规则引擎错误类型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("不支持的比较操作符: '{0}' 中未找到 >、< 或 =")]
    UnsupportedOperator(String),

    #[error("条件格式错误: {0}")]
    MalformedCondition(String),

    #[error("括号不匹配: {0}")]
    UnbalancedParentheses(String),

    #[error("表达式为空")]
    EmptyExpression,

    #[error("单引号字面量未闭合: {0}")]
    UnterminatedLiteral(String),

    #[error("规则嵌套过深: 深度 {depth} 超过上限 {max}")]
    DepthLimitExceeded { depth: usize, max: usize },

    #[error("至少需要两条规则才能组合, 实际 {0} 条")]
    InsufficientRules(usize),

    #[error("无效的传输格式: {0}")]
    MalformedWireFormat(String),

    #[error("类型不匹配: 期望 {expected}, 实际 {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("规则未找到: {0}")]
    RuleNotFound(String),

    #[error("JSON 序列化错误: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl RuleError {
    /// 获取错误码（用于 API 响应）
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedOperator(_) => "UNSUPPORTED_OPERATOR",
            Self::MalformedCondition(_) => "MALFORMED_CONDITION",
            Self::UnbalancedParentheses(_) => "UNBALANCED_PARENTHESES",
            Self::EmptyExpression => "EMPTY_EXPRESSION",
            Self::UnterminatedLiteral(_) => "UNTERMINATED_LITERAL",
            Self::DepthLimitExceeded { .. } => "DEPTH_LIMIT_EXCEEDED",
            Self::InsufficientRules(_) => "INSUFFICIENT_RULES",
            Self::MalformedWireFormat(_) => "MALFORMED_WIRE_FORMAT",
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
            Self::RuleNotFound(_) => "RULE_NOT_FOUND",
            Self::JsonError(_) => "JSON_ERROR",
        }
    }

    /// 是否由调用方输入导致（规则文本、AST 或数据记录有误）
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::RuleNotFound(_) | Self::JsonError(_))
    }
}

pub type Result<T> = std::result::Result<T, RuleError>;
