//! 规则语法树传输格式
//!
//! 语法树以嵌套的 `{type, value, left, right}` 结构存储和传输，
//! 这是规则引擎唯一需要保持稳定的持久化格式。

use crate::error::{Result, RuleError};
use crate::models::{MAX_DEPTH, RuleNode};
use crate::operators::LogicalOperator;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const OPERAND_TYPE: &str = "operand";
pub const OPERATOR_TYPE: &str = "operator";

/// 传输格式节点
///
/// `node_type` 保留为字符串而非枚举，非法取值才能报告为
/// [`RuleError::MalformedWireFormat`] 而不是笼统的 JSON 错误。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireNode {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub left: Option<Box<WireNode>>,
    #[serde(default)]
    pub right: Option<Box<WireNode>>,
}

/// 语法树转传输格式
pub fn to_wire(node: &RuleNode) -> WireNode {
    match node {
        RuleNode::Operand { value } => WireNode {
            node_type: OPERAND_TYPE.to_string(),
            value: Some(value.clone()),
            left: None,
            right: None,
        },
        RuleNode::Operator { op, left, right } => WireNode {
            node_type: OPERATOR_TYPE.to_string(),
            value: Some(op.to_string()),
            left: Some(Box::new(to_wire(left))),
            right: Some(Box::new(to_wire(right))),
        },
    }
}

/// 传输格式转语法树
pub fn from_wire(wire: WireNode) -> Result<RuleNode> {
    from_wire_at(wire, "root", 1)
}

/// 从任意 JSON 值解析传输格式，结构错误统一报告为 MalformedWireFormat
pub fn from_wire_json(value: &Value) -> Result<RuleNode> {
    let wire = WireNode::deserialize(value)
        .map_err(|e| RuleError::MalformedWireFormat(format!("root: {}", e)))?;
    from_wire(wire)
}

fn from_wire_at(wire: WireNode, path: &str, depth: usize) -> Result<RuleNode> {
    if depth > MAX_DEPTH {
        return Err(RuleError::DepthLimitExceeded {
            depth,
            max: MAX_DEPTH,
        });
    }

    match wire.node_type.as_str() {
        OPERAND_TYPE => {
            if wire.left.is_some() || wire.right.is_some() {
                return Err(RuleError::MalformedWireFormat(format!(
                    "{}: operand 节点不能包含子节点",
                    path
                )));
            }
            let value = wire.value.ok_or_else(|| {
                RuleError::MalformedWireFormat(format!("{}: operand 节点缺少 value", path))
            })?;
            Ok(RuleNode::Operand { value })
        }
        OPERATOR_TYPE => {
            let op = match wire.value.as_deref() {
                Some(s) => s.parse::<LogicalOperator>().map_err(|e| {
                    RuleError::MalformedWireFormat(format!("{}: {}", path, e))
                })?,
                None => {
                    return Err(RuleError::MalformedWireFormat(format!(
                        "{}: operator 节点缺少 value",
                        path
                    )));
                }
            };

            let (left, right) = match (wire.left, wire.right) {
                (Some(left), Some(right)) => (left, right),
                _ => {
                    return Err(RuleError::MalformedWireFormat(format!(
                        "{}: operator 节点必须同时包含 left 和 right",
                        path
                    )));
                }
            };

            let left = from_wire_at(*left, &format!("{}.left", path), depth + 1)?;
            let right = from_wire_at(*right, &format!("{}.right", path), depth + 1)?;
            Ok(RuleNode::operator(op, left, right))
        }
        other => Err(RuleError::MalformedWireFormat(format!(
            "{}: 未知的节点类型 '{}'",
            path, other
        ))),
    }
}

impl From<RuleNode> for WireNode {
    fn from(node: RuleNode) -> Self {
        to_wire(&node)
    }
}

impl From<&RuleNode> for WireNode {
    fn from(node: &RuleNode) -> Self {
        to_wire(node)
    }
}

impl TryFrom<WireNode> for RuleNode {
    type Error = RuleError;

    fn try_from(wire: WireNode) -> Result<Self> {
        from_wire(wire)
    }
}
