//! 规则组合器
//!
//! 将多条规则按指定逻辑操作符左折叠成一棵左倾树：
//! `[r1, r2, r3]` 组合为 `((r1 OP r2) OP r3)`，评估时按规则顺序短路。

use crate::error::{Result, RuleError};
use crate::models::{MAX_DEPTH, RuleNode};
use crate::operators::LogicalOperator;

/// 组合多条规则
///
/// 至少需要两条规则。输入按值传入，组合结果独占所有子树。
/// 结果深度超过 [`MAX_DEPTH`] 时返回 [`RuleError::DepthLimitExceeded`]。
pub fn combine(
    rules: impl IntoIterator<Item = RuleNode>,
    operator: LogicalOperator,
) -> Result<RuleNode> {
    let rules: Vec<RuleNode> = rules.into_iter().collect();
    if rules.len() < 2 {
        return Err(RuleError::InsufficientRules(rules.len()));
    }

    let mut iter = rules.into_iter();
    let mut combined = iter.next().ok_or(RuleError::InsufficientRules(0))?;
    let mut depth = check_depth(combined.depth())?;

    for rule in iter {
        depth = check_depth(1 + depth.max(rule.depth()))?;
        combined = RuleNode::operator(operator, combined, rule);
    }

    Ok(combined)
}

fn check_depth(depth: usize) -> Result<usize> {
    if depth > MAX_DEPTH {
        return Err(RuleError::DepthLimitExceeded {
            depth,
            max: MAX_DEPTH,
        });
    }
    Ok(depth)
}

/// 以默认的 AND 组合规则
pub fn combine_all(rules: impl IntoIterator<Item = RuleNode>) -> Result<RuleNode> {
    combine(rules, LogicalOperator::default())
}
