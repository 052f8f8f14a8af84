//! 规则引擎
//!
//! 提供基于文本规则的评估能力，支持：
//! - 规则文本解析为语法树（`AND` / `OR` / 括号）
//! - 多条规则组合
//! - 针对数据记录的短路求值
//! - 语法树与传输格式互转

pub mod combiner;
pub mod condition;
pub mod error;
pub mod evaluator;
pub mod executor;
pub mod models;
pub mod operators;
pub mod parser;
pub mod store;
pub mod wire;

pub use combiner::{combine, combine_all};
pub use condition::{Literal, ParsedCondition, parse_condition};
pub use error::{Result, RuleError};
pub use evaluator::{ConditionEvaluator, evaluate};
pub use executor::RuleExecutor;
pub use models::{EvaluationResult, MAX_DEPTH, Record, RuleNode};
pub use operators::{Comparator, LogicalOperator};
pub use parser::{parse_expression, parse_rule};
pub use store::{RuleStore, StoredRule};
pub use wire::{WireNode, from_wire, from_wire_json, to_wire};
