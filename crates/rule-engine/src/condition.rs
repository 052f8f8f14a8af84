//! 条件解析器
//!
//! 将单个比较子句（如 `age > 30`、`department = 'Sales'`）解析为
//! 字段、比较符、字面量三元组。

use crate::error::{Result, RuleError};
use crate::operators::Comparator;
use serde::Serialize;
use std::fmt;

/// 条件字面量
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Integer(i64),
    Text(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "'{}'", s),
        }
    }
}

/// 解析后的条件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedCondition {
    pub field: String,
    pub comparator: Comparator,
    pub literal: Literal,
}

impl fmt::Display for ParsedCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.comparator, self.literal)
    }
}

/// 解析单个比较子句
///
/// 子句中只能出现 `>`、`<`、`=` 中的一种比较符，在其第一次出现处切分；
/// 混用多种比较符（如 `x = y > 3`）视为格式错误。
pub fn parse_condition(text: &str) -> Result<ParsedCondition> {
    let text = strip_enclosing_parens(text.trim());

    let mut found = text
        .char_indices()
        .filter_map(|(i, c)| Comparator::from_symbol(c).map(|cmp| (i, cmp)));

    let (pos, comparator) = found
        .next()
        .ok_or_else(|| RuleError::UnsupportedOperator(text.to_string()))?;

    if let Some((_, other)) = found.find(|(_, cmp)| *cmp != comparator) {
        return Err(RuleError::MalformedCondition(format!(
            "'{}' 同时包含比较符 {} 和 {}",
            text, comparator, other
        )));
    }

    let field = text[..pos].trim();
    let raw_value = text[pos + 1..].trim();

    if field.is_empty() {
        return Err(RuleError::MalformedCondition(format!(
            "'{}' 缺少字段名",
            text
        )));
    }

    let literal = match comparator {
        Comparator::Gt | Comparator::Lt => {
            let n = raw_value.parse::<i64>().map_err(|_| {
                RuleError::MalformedCondition(format!(
                    "'{}' 中 {} 右侧必须是整数, 实际为 '{}'",
                    text, comparator, raw_value
                ))
            })?;
            Literal::Integer(n)
        }
        Comparator::Eq => Literal::Text(strip_single_quotes(raw_value).to_string()),
    };

    Ok(ParsedCondition {
        field: field.to_string(),
        comparator,
        literal,
    })
}

/// 去掉一层外围括号（首尾同时存在时）
fn strip_enclosing_parens(text: &str) -> &str {
    match text.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => inner.trim(),
        None => text,
    }
}

/// 去掉一层外围单引号
fn strip_single_quotes(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
