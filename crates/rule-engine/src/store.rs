//! 规则存储管理
//!
//! 使用 DashMap 提供线程安全的规则缓存，规则以生成的 UUID 为键，
//! 同时保存原始规则文本和解析后的语法树。

use crate::error::{Result, RuleError};
use crate::models::RuleNode;
use crate::parser::parse_rule;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// 已存储的规则
#[derive(Debug, Clone, Serialize)]
pub struct StoredRule {
    pub id: String,
    pub rule_string: String,
    pub root: RuleNode,
    pub created_at: DateTime<Utc>,
}

/// 规则存储
#[derive(Clone, Default)]
pub struct RuleStore {
    rules: Arc<DashMap<String, StoredRule>>,
}

impl RuleStore {
    /// 创建新的规则存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取当前存储的规则数量
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// 检查存储是否为空
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 解析规则文本并存储，返回分配了 ID 的规则
    #[instrument(skip(self))]
    pub fn create(&self, rule_string: &str) -> Result<StoredRule> {
        let root = parse_rule(rule_string)?;

        let rule = StoredRule {
            id: Uuid::new_v4().to_string(),
            rule_string: rule_string.trim().to_string(),
            root,
            created_at: Utc::now(),
        };

        self.rules.insert(rule.id.clone(), rule.clone());

        info!(rule_id = %rule.id, conditions = rule.root.operand_count(), "规则已创建");
        Ok(rule)
    }

    /// 删除规则
    #[instrument(skip(self))]
    pub fn delete(&self, rule_id: &str) -> Result<()> {
        if self.rules.remove(rule_id).is_some() {
            info!("规则已删除: {}", rule_id);
            Ok(())
        } else {
            warn!("删除不存在的规则: {}", rule_id);
            Err(RuleError::RuleNotFound(rule_id.to_string()))
        }
    }

    /// 获取规则
    pub fn get(&self, rule_id: &str) -> Option<StoredRule> {
        self.rules.get(rule_id).map(|r| r.clone())
    }

    /// 检查规则是否存在
    pub fn contains(&self, rule_id: &str) -> bool {
        self.rules.contains_key(rule_id)
    }

    /// 获取所有规则（按创建时间排序）
    pub fn list_all(&self) -> Vec<StoredRule> {
        let mut rules: Vec<StoredRule> = self.rules.iter().map(|r| r.value().clone()).collect();
        rules.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        rules
    }

    /// 清空所有规则
    #[instrument(skip(self))]
    pub fn clear(&self) {
        let count = self.rules.len();
        self.rules.clear();
        info!("已清空 {} 条规则", count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rule() {
        let store = RuleStore::new();
        let rule = store.create("age > 30 AND department = 'Sales'").unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.contains(&rule.id));
        assert!(Uuid::parse_str(&rule.id).is_ok());
        assert_eq!(rule.root.operand_count(), 2);
    }

    #[test]
    fn test_create_rejects_malformed_rule() {
        let store = RuleStore::new();

        assert!(matches!(
            store.create("age >> 30"),
            Err(RuleError::MalformedCondition(_))
        ));
        assert!(matches!(
            store.create("(age > 30"),
            Err(RuleError::UnbalancedParentheses(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_rule() {
        let store = RuleStore::new();
        let created = store.create("  salary > 50000 ").unwrap();

        let rule = store.get(&created.id).unwrap();
        assert_eq!(rule.rule_string, "salary > 50000");
        assert_eq!(rule.root, RuleNode::operand("salary > 50000"));
    }

    #[test]
    fn test_get_nonexistent_rule() {
        let store = RuleStore::new();
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_delete_rule() {
        let store = RuleStore::new();
        let rule = store.create("age > 30").unwrap();

        store.delete(&rule.id).unwrap();

        assert!(!store.contains(&rule.id));
        assert!(matches!(store.delete(&rule.id), Err(RuleError::RuleNotFound(_))));
    }

    #[test]
    fn test_list_all() {
        let store = RuleStore::new();
        store.create("age > 30").unwrap();
        store.create("experience > 5").unwrap();

        let rules = store.list_all();
        assert_eq!(rules.len(), 2);
        assert!(rules[0].created_at <= rules[1].created_at);
    }

    #[test]
    fn test_clear() {
        let store = RuleStore::new();
        store.create("age > 30").unwrap();
        store.create("experience > 5").unwrap();

        store.clear();

        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_access() {
        use std::thread;

        let store = RuleStore::new();
        let store_clone = store.clone();

        let handle = thread::spawn(move || {
            for i in 0..100 {
                store_clone.create(&format!("age > {}", i)).unwrap();
            }
        });

        for i in 100..200 {
            store.create(&format!("salary > {}", i)).unwrap();
        }

        handle.join().unwrap();

        assert_eq!(store.len(), 200);
    }
}
