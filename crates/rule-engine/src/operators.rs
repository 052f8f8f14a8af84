//! 规则操作符定义

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 条件比较符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "=")]
    Eq,
}

impl Comparator {
    /// 所有支持的比较符
    pub const ALL: [Comparator; 3] = [Comparator::Gt, Comparator::Lt, Comparator::Eq];

    pub fn symbol(&self) -> char {
        match self {
            Self::Gt => '>',
            Self::Lt => '<',
            Self::Eq => '=',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '>' => Some(Self::Gt),
            '<' => Some(Self::Lt),
            '=' => Some(Self::Eq),
            _ => None,
        }
    }

    /// 是否为数值比较（两侧都必须是数字）
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Gt | Self::Lt)
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// 逻辑操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

impl LogicalOperator {
    /// 规则文本中的关键字
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for LogicalOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            other => Err(format!("未知的逻辑操作符: '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_operator_parse() {
        assert_eq!("AND".parse::<LogicalOperator>(), Ok(LogicalOperator::And));
        assert_eq!("OR".parse::<LogicalOperator>(), Ok(LogicalOperator::Or));
        assert!("and".parse::<LogicalOperator>().is_err());
        assert!("XOR".parse::<LogicalOperator>().is_err());
    }

    #[test]
    fn test_logical_operator_serde() {
        assert_eq!(
            serde_json::to_string(&LogicalOperator::Or).unwrap(),
            "\"OR\""
        );
        let op: LogicalOperator = serde_json::from_str("\"AND\"").unwrap();
        assert_eq!(op, LogicalOperator::And);
        assert_eq!(LogicalOperator::default(), LogicalOperator::And);
    }

    #[test]
    fn test_comparator_symbol() {
        for cmp in Comparator::ALL {
            assert_eq!(Comparator::from_symbol(cmp.symbol()), Some(cmp));
        }
        assert_eq!(Comparator::from_symbol('!'), None);
        assert!(Comparator::Gt.is_numeric());
        assert!(!Comparator::Eq.is_numeric());
    }
}
