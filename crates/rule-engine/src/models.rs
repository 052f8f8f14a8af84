//! 规则引擎领域模型

use crate::error::{Result, RuleError};
use crate::operators::LogicalOperator;
use crate::wire::WireNode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// 语法树允许的最大深度（单个叶子为 1）
///
/// 传输格式每一层对应一层 JSON 嵌套，需低于 serde_json 的 128 层递归上限，
/// 并为外层请求体留出余量。
pub const MAX_DEPTH: usize = 100;

/// 规则语法树节点（操作数或逻辑操作符）
///
/// 每个节点独占其子节点，不存在父引用，因此树结构不可能成环。
/// 序列化时统一走 [`WireNode`] 传输格式。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireNode", try_from = "WireNode")]
pub enum RuleNode {
    /// 叶子节点，保存未解析的原始条件文本（如 `age > 30`），评估时才解析
    Operand { value: String },
    /// 逻辑节点，恰好两个子节点
    Operator {
        op: LogicalOperator,
        left: Box<RuleNode>,
        right: Box<RuleNode>,
    },
}

impl RuleNode {
    pub fn operand(value: impl Into<String>) -> Self {
        Self::Operand {
            value: value.into(),
        }
    }

    pub fn operator(op: LogicalOperator, left: RuleNode, right: RuleNode) -> Self {
        Self::Operator {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: RuleNode, right: RuleNode) -> Self {
        Self::operator(LogicalOperator::And, left, right)
    }

    pub fn or(left: RuleNode, right: RuleNode) -> Self {
        Self::operator(LogicalOperator::Or, left, right)
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Self::Operand { .. })
    }

    /// 按从左到右的顺序收集所有叶子条件文本
    pub fn conditions(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_conditions(&mut out);
        out
    }

    fn collect_conditions<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Operand { value } => out.push(value),
            Self::Operator { left, right, .. } => {
                left.collect_conditions(out);
                right.collect_conditions(out);
            }
        }
    }

    /// 叶子节点数量
    pub fn operand_count(&self) -> usize {
        match self {
            Self::Operand { .. } => 1,
            Self::Operator { left, right, .. } => left.operand_count() + right.operand_count(),
        }
    }

    /// 逻辑节点数量
    pub fn operator_count(&self) -> usize {
        match self {
            Self::Operand { .. } => 0,
            Self::Operator { left, right, .. } => {
                1 + left.operator_count() + right.operator_count()
            }
        }
    }

    /// 树深度（单个叶子为 1）
    pub fn depth(&self) -> usize {
        match self {
            Self::Operand { .. } => 1,
            Self::Operator { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

impl fmt::Display for RuleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operand { value } => f.write_str(value),
            Self::Operator { op, left, right } => write!(f, "({} {} {})", left, op, right),
        }
    }
}

/// 评估数据记录 - 字段名到标量值的映射
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    data: Map<String, Value>,
}

impl Record {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// 从 JSON 字符串创建，顶层必须是对象
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::try_from(value)
    }

    /// 获取字段值
    ///
    /// 优先按完整字段名查找；找不到时按点号路径逐级下钻
    /// （如 "user.profile.age"，数组支持下标 "items.0.price"）。
    pub fn get_field(&self, path: &str) -> Option<&Value> {
        if let Some(v) = self.data.get(path) {
            return Some(v);
        }

        let mut parts = path.split('.');
        let mut current = self.data.get(parts.next()?)?;

        for part in parts {
            match current {
                Value::Object(map) => {
                    current = map.get(part)?;
                }
                Value::Array(arr) => {
                    let index: usize = part.parse().ok()?;
                    current = arr.get(index)?;
                }
                _ => return None,
            }
        }

        Some(current)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(field.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 获取底层数据
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}

impl TryFrom<Value> for Record {
    type Error = RuleError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(data) => Ok(Self { data }),
            other => Err(RuleError::TypeMismatch {
                expected: "object".to_string(),
                actual: crate::evaluator::type_name(&other).to_string(),
            }),
        }
    }
}

/// 带追踪信息的评估结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct EvaluationResult {
    pub matched: bool,
    pub matched_conditions: Vec<String>,
    pub evaluation_trace: Vec<String>,
    pub evaluation_time_ms: i64,
}
