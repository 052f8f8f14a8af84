//! 路由配置模块

use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

/// 规则相关路由
pub fn rule_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/rules",
            get(handlers::rule::list_rules).post(handlers::rule::create_rule),
        )
        .route("/rules/combine", post(handlers::rule::combine_rules))
        .route("/rules/evaluate", post(handlers::rule::evaluate_rule))
        .route(
            "/rules/{id}",
            get(handlers::rule::get_rule).delete(handlers::rule::delete_rule),
        )
}

/// 构建完整应用路由
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", rule_routes())
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 存活探针
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "rule-service"
    }))
}
