//! 应用状态定义

use rule_engine::RuleStore;

/// Axum 应用共享状态
///
/// 规则存储内部基于 `Arc<DashMap>`，克隆开销很小
#[derive(Clone, Default)]
pub struct AppState {
    pub store: RuleStore,
}

impl AppState {
    pub fn new(store: RuleStore) -> Self {
        Self { store }
    }
}
