//! 规则表达式解析器
//!
//! 将完整的规则文本（可含 `AND` / `OR` 与括号）解析为语法树。
//! 优先级从低到高依次为 `OR`、`AND`、括号；同级操作符左结合。
//!
//! 解析器只负责结构切分，叶子条件保留原文，评估时才交给
//! [`parse_condition`](crate::condition::parse_condition) 解析。
//! 紧跟比较符的单引号字面量内的括号和关键字不参与切分（如 `name = 'A OR B'`），
//! 值中间的撇号（如 `O'Brien`）不影响切分。括号嵌套和树深度均受
//! [`MAX_DEPTH`] 限制。

use crate::combiner::combine;
use crate::condition::parse_condition;
use crate::error::{Result, RuleError};
use crate::models::{MAX_DEPTH, RuleNode};
use crate::operators::LogicalOperator;

/// 按优先级从低到高排列的逻辑操作符
const PRECEDENCE: [LogicalOperator; 2] = [LogicalOperator::Or, LogicalOperator::And];

/// 解析规则表达式（叶子条件延迟解析）
pub fn parse_expression(text: &str) -> Result<RuleNode> {
    let text = text.trim();
    if text.is_empty() {
        return Err(RuleError::EmptyExpression);
    }

    check_balanced(text)?;
    parse_balanced(text)
}

/// 解析规则表达式并立即校验每个叶子条件
///
/// 创建规则时使用，格式错误的条件在创建阶段即被拒绝。
pub fn parse_rule(text: &str) -> Result<RuleNode> {
    let root = parse_expression(text)?;

    for condition in root.conditions() {
        parse_condition(condition)?;
    }

    Ok(root)
}

/// 输入已保证括号平衡且嵌套不超过上限
fn parse_balanced(text: &str) -> Result<RuleNode> {
    let mut text = text.trim();

    while let Some(inner) = strip_outer_group(text) {
        text = inner.trim();
    }

    if text.is_empty() {
        return Err(RuleError::EmptyExpression);
    }

    for op in PRECEDENCE {
        let segments = split_top_level(text, op.keyword());
        if segments.len() > 1 {
            let nodes = segments
                .into_iter()
                .map(parse_balanced)
                .collect::<Result<Vec<_>>>()?;
            return combine(nodes, op);
        }
    }

    Ok(RuleNode::operand(text))
}

/// 单引号字面量跟踪
///
/// 只有紧跟比较符（忽略空白）的 `'` 才开启字面量，字面量遇到下一个 `'` 结束；
/// 其他位置的 `'`（如 `O'Brien`）按普通字符处理。
#[derive(Default)]
struct QuoteState {
    in_literal: bool,
    last_significant: u8,
}

impl QuoteState {
    /// 输入一个字节，返回该字节是否位于字面量之外
    fn feed(&mut self, b: u8) -> bool {
        if self.in_literal {
            if b == b'\'' {
                self.in_literal = false;
                self.last_significant = b;
            }
            return false;
        }

        if b == b'\'' && matches!(self.last_significant, b'>' | b'<' | b'=') {
            self.in_literal = true;
            return false;
        }

        if !b.is_ascii_whitespace() {
            self.last_significant = b;
        }
        true
    }
}

/// 校验括号平衡、嵌套深度和字面量闭合
fn check_balanced(text: &str) -> Result<()> {
    let mut depth = 0usize;
    let mut quote = QuoteState::default();

    for (i, b) in text.bytes().enumerate() {
        if !quote.feed(b) {
            continue;
        }
        match b {
            b'(' => {
                depth += 1;
                if depth > MAX_DEPTH {
                    return Err(RuleError::DepthLimitExceeded {
                        depth,
                        max: MAX_DEPTH,
                    });
                }
            }
            b')' => {
                if depth == 0 {
                    return Err(RuleError::UnbalancedParentheses(format!(
                        "'{}' 第 {} 个字节处出现多余的 ')'",
                        text, i
                    )));
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    if quote.in_literal {
        return Err(RuleError::UnterminatedLiteral(text.to_string()));
    }

    if depth != 0 {
        return Err(RuleError::UnbalancedParentheses(format!(
            "'{}' 缺少 {} 个 ')'",
            text, depth
        )));
    }

    Ok(())
}

/// 整个文本被一对括号包围时返回括号内的内容
///
/// `(a > 1) AND (b > 2)` 首尾虽是括号，但并非同一对，不剥离。
fn strip_outer_group(text: &str) -> Option<&str> {
    if !text.starts_with('(') || !text.ends_with(')') {
        return None;
    }

    let mut depth = 0usize;
    let mut quote = QuoteState::default();

    for (i, b) in text.bytes().enumerate() {
        if !quote.feed(b) {
            continue;
        }
        match b {
            b'(' => depth += 1,
            b')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return (i == text.len() - 1).then(|| &text[1..i]);
                }
            }
            _ => {}
        }
    }

    None
}

/// 在括号深度为 0 且不在字面量内的位置，按关键字切分
fn split_top_level<'a>(text: &'a str, keyword: &str) -> Vec<&'a str> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut quote = QuoteState::default();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if quote.feed(bytes[i]) {
            match bytes[i] {
                b'(' => depth += 1,
                b')' => depth = depth.saturating_sub(1),
                _ if depth == 0 && is_keyword_at(bytes, i, keyword) => {
                    segments.push(&text[start..i]);
                    for &b in &bytes[i + 1..i + keyword.len()] {
                        quote.feed(b);
                    }
                    i += keyword.len();
                    start = i;
                    continue;
                }
                _ => {}
            }
        }
        i += 1;
    }

    segments.push(&text[start..]);
    segments
}

/// 关键字两侧必须是单词边界，`ANDroid`、`ORDER_ID` 不会被误判
fn is_keyword_at(bytes: &[u8], i: usize, keyword: &str) -> bool {
    if !bytes[i..].starts_with(keyword.as_bytes()) {
        return false;
    }

    let before_ok = i == 0 || !is_word_byte(bytes[i - 1]);
    let end = i + keyword.len();
    let after_ok = end == bytes.len() || !is_word_byte(bytes[end]);

    before_ok && after_ok
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || !b.is_ascii()
}
