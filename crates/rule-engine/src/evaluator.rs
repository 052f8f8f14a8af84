//! 规则评估器
//!
//! 叶子条件在评估时才解析；字段缺失视为不匹配而非错误，
//! 类型不符（如对字符串字段使用 `>`）报告为类型不匹配，不做隐式转换。

use crate::condition::Literal;
use crate::error::{Result, RuleError};
use crate::executor::RuleExecutor;
use crate::models::{Record, RuleNode};
use crate::operators::Comparator;
use serde_json::Value;
use std::cmp::Ordering;

/// 针对数据记录评估规则树
///
/// 先评估左子树，仅在逻辑操作符仍需要时才评估右子树；
/// 左子树出错时直接返回该错误。遍历逻辑统一由 [`RuleExecutor`] 实现。
pub fn evaluate(node: &RuleNode, record: &Record) -> Result<bool> {
    RuleExecutor::new()
        .execute(node, record)
        .map(|result| result.matched)
}

/// 条件评估器
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// 评估条件
    ///
    /// # Arguments
    /// * `field_value` - 从数据记录中获取的字段值
    /// * `comparator` - 比较符
    /// * `literal` - 规则中定义的字面量
    pub fn evaluate(
        field_value: Option<&Value>,
        comparator: Comparator,
        literal: &Literal,
    ) -> Result<bool> {
        let field_value = match field_value {
            Some(v) => v,
            None => return Ok(false),
        };

        match comparator {
            Comparator::Gt => Self::compare(field_value, literal).map(|o| o == Ordering::Greater),
            Comparator::Lt => Self::compare(field_value, literal).map(|o| o == Ordering::Less),
            Comparator::Eq => Ok(Self::eq(field_value, literal)),
        }
    }

    /// 按字面量类型做结构相等比较
    fn eq(field: &Value, literal: &Literal) -> bool {
        match (field, literal) {
            (Value::String(s), Literal::Text(expected)) => s == expected,
            (Value::Number(n), Literal::Integer(expected)) => n.as_i64() == Some(*expected),
            _ => false,
        }
    }

    /// 数值比较，两侧都必须是数字
    fn compare(field: &Value, literal: &Literal) -> Result<Ordering> {
        let expected = match literal {
            Literal::Integer(n) => *n,
            Literal::Text(_) => {
                return Err(RuleError::TypeMismatch {
                    expected: "number".to_string(),
                    actual: "string".to_string(),
                });
            }
        };

        let n = match field {
            Value::Number(n) => n,
            other => {
                return Err(RuleError::TypeMismatch {
                    expected: "number".to_string(),
                    actual: type_name(other).to_string(),
                });
            }
        };

        // 整数精确比较，浮点数或超出 i64 范围的值按 f64 比较
        if let Some(i) = n.as_i64() {
            return Ok(i.cmp(&expected));
        }

        n.as_f64()
            .and_then(|f| f.partial_cmp(&(expected as f64)))
            .ok_or_else(|| RuleError::TypeMismatch {
                expected: "comparable number".to_string(),
                actual: n.to_string(),
            })
    }
}

/// 获取值的类型名称
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::try_from(value).unwrap()
    }

    #[test]
    fn test_numeric_comparisons() {
        let text = |s: &str| Literal::Text(s.to_string());

        assert!(ConditionEvaluator::evaluate(Some(&json!(35)), Comparator::Gt, &Literal::Integer(30)).unwrap());
        assert!(!ConditionEvaluator::evaluate(Some(&json!(30)), Comparator::Gt, &Literal::Integer(30)).unwrap());
        assert!(ConditionEvaluator::evaluate(Some(&json!(25)), Comparator::Lt, &Literal::Integer(30)).unwrap());
        assert!(ConditionEvaluator::evaluate(Some(&json!(30.5)), Comparator::Gt, &Literal::Integer(30)).unwrap());
        assert!(ConditionEvaluator::evaluate(Some(&json!(u64::MAX)), Comparator::Gt, &Literal::Integer(30)).unwrap());
        assert!(ConditionEvaluator::evaluate(Some(&json!(35)), Comparator::Gt, &text("30")).is_err());
    }

    #[test]
    fn test_eq_strings() {
        let sales = Literal::Text("Sales".to_string());

        assert!(ConditionEvaluator::evaluate(Some(&json!("Sales")), Comparator::Eq, &sales).unwrap());
        assert!(!ConditionEvaluator::evaluate(Some(&json!("Marketing")), Comparator::Eq, &sales).unwrap());
    }

    #[test]
    fn test_eq_is_structural() {
        let literal = Literal::Text("30".to_string());
        assert!(!ConditionEvaluator::evaluate(Some(&json!(30)), Comparator::Eq, &literal).unwrap());
        assert!(ConditionEvaluator::evaluate(Some(&json!(30)), Comparator::Eq, &Literal::Integer(30)).unwrap());
    }

    #[test]
    fn test_type_mismatch() {
        let result = ConditionEvaluator::evaluate(Some(&json!("Sales")), Comparator::Gt, &Literal::Integer(30));
        assert!(matches!(result, Err(RuleError::TypeMismatch { .. })));

        // 数字字符串不做隐式转换
        let result = ConditionEvaluator::evaluate(Some(&json!("35")), Comparator::Gt, &Literal::Integer(30));
        assert!(matches!(result, Err(RuleError::TypeMismatch { .. })));
    }

    #[test]
    fn test_missing_field() {
        assert!(!ConditionEvaluator::evaluate(None, Comparator::Gt, &Literal::Integer(30)).unwrap());
    }

    #[test]
    fn test_evaluate_and_rule() {
        let node = parse_expression("age > 30 AND department = 'Sales'").unwrap();

        assert!(evaluate(&node, &record(json!({"age": 35, "department": "Sales", "salary": 60000}))).unwrap());
        assert!(!evaluate(&node, &record(json!({"age": 25, "department": "Sales"}))).unwrap());
    }

    #[test]
    fn test_evaluate_missing_field_is_false() {
        let node = parse_expression("age > 30").unwrap();
        assert!(!evaluate(&node, &record(json!({"department": "Sales"}))).unwrap());
    }

    #[test]
    fn test_and_short_circuits_right_error() {
        // 右侧条件格式错误，但左侧为 false 时不会被评估
        let node = parse_expression("age > 30 AND age >> 1").unwrap();
        assert!(!evaluate(&node, &record(json!({"age": 20}))).unwrap());
        assert!(matches!(
            evaluate(&node, &record(json!({"age": 40}))),
            Err(RuleError::MalformedCondition(_))
        ));
    }

    #[test]
    fn test_or_short_circuits_right_error() {
        let node = parse_expression("age > 30 OR department > 5").unwrap();
        assert!(evaluate(&node, &record(json!({"age": 40, "department": "Sales"}))).unwrap());
        assert!(matches!(
            evaluate(&node, &record(json!({"age": 20, "department": "Sales"}))),
            Err(RuleError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_left_error_surfaces_first() {
        let node = parse_expression("department > 5 OR age >> 1").unwrap();
        assert!(matches!(
            evaluate(&node, &record(json!({"department": "Sales"}))),
            Err(RuleError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_nested_field_path() {
        let node = parse_expression("user.level > 2 AND user.team = 'core'").unwrap();
        let data = record(json!({"user": {"level": 3, "team": "core"}}));
        assert!(evaluate(&node, &data).unwrap());
    }

    #[test]
    fn test_evaluate_agrees_with_traced_executor() {
        let node = parse_expression("(age > 30 OR vip = 'yes') AND department = 'Sales'").unwrap();
        let traced = RuleExecutor::new().with_trace();

        for data in [
            json!({"age": 35, "department": "Sales"}),
            json!({"age": 20, "vip": "yes", "department": "Sales"}),
            json!({"age": 20, "department": "Sales"}),
            json!({"age": 40, "department": "Marketing"}),
        ] {
            let record = record(data);
            assert_eq!(
                evaluate(&node, &record).unwrap(),
                traced.execute(&node, &record).unwrap().matched
            );
        }
    }
}
