//! 规则执行器
//!
//! 在 [`evaluate`](crate::evaluator::evaluate) 的基础上记录匹配条件和评估追踪，
//! 用于规则调试和接口返回。

use crate::condition::parse_condition;
use crate::error::Result;
use crate::evaluator::ConditionEvaluator;
use crate::models::{EvaluationResult, Record, RuleNode};
use crate::operators::LogicalOperator;
use std::time::Instant;

/// 规则执行器
pub struct RuleExecutor {
    /// 是否记录详细评估追踪
    trace_enabled: bool,
}

impl RuleExecutor {
    pub fn new() -> Self {
        Self {
            trace_enabled: false,
        }
    }

    /// 启用评估追踪
    pub fn with_trace(mut self) -> Self {
        self.trace_enabled = true;
        self
    }

    /// 执行规则评估
    pub fn execute(&self, root: &RuleNode, record: &Record) -> Result<EvaluationResult> {
        let start = Instant::now();

        let mut result = EvaluationResult::default();
        let matched = self.evaluate_node(root, record, &mut result, "root")?;

        result.matched = matched;
        result.evaluation_time_ms = start.elapsed().as_millis() as i64;

        Ok(result)
    }

    fn evaluate_node(
        &self,
        node: &RuleNode,
        record: &Record,
        result: &mut EvaluationResult,
        path: &str,
    ) -> Result<bool> {
        match node {
            RuleNode::Operand { value } => self.evaluate_operand(value, record, result, path),
            RuleNode::Operator { op, left, right } => {
                self.evaluate_operator(*op, left, right, record, result, path)
            }
        }
    }

    fn evaluate_operand(
        &self,
        text: &str,
        record: &Record,
        result: &mut EvaluationResult,
        path: &str,
    ) -> Result<bool> {
        let cond = parse_condition(text)?;
        let field_value = record.get_field(&cond.field);

        let matched = ConditionEvaluator::evaluate(field_value, cond.comparator, &cond.literal)?;

        if self.trace_enabled {
            let outcome = match (field_value, matched) {
                (None, _) => "FIELD_MISSING",
                (Some(_), true) => "MATCHED",
                (Some(_), false) => "NOT_MATCHED",
            };
            result
                .evaluation_trace
                .push(format!("{}: {} => {}", path, cond, outcome));
        }

        if matched {
            result.matched_conditions.push(cond.to_string());
        }

        Ok(matched)
    }

    /// 评估逻辑节点（短路求值）
    fn evaluate_operator(
        &self,
        op: LogicalOperator,
        left: &RuleNode,
        right: &RuleNode,
        record: &Record,
        result: &mut EvaluationResult,
        path: &str,
    ) -> Result<bool> {
        let left_matched = self.evaluate_node(left, record, result, &format!("{}.left", path))?;

        let short_circuit = match op {
            LogicalOperator::And => !left_matched,
            LogicalOperator::Or => left_matched,
        };

        if short_circuit {
            if self.trace_enabled {
                result
                    .evaluation_trace
                    .push(format!("{}: {} 短路 - 跳过右子树", path, op));
            }
            return Ok(left_matched);
        }

        let matched = self.evaluate_node(right, record, result, &format!("{}.right", path))?;

        if self.trace_enabled {
            result.evaluation_trace.push(format!(
                "{}: {} => {}",
                path,
                op,
                if matched { "MATCHED" } else { "NOT_MATCHED" }
            ));
        }

        Ok(matched)
    }
}

impl Default for RuleExecutor {
    fn default() -> Self {
        Self::new()
    }
}
