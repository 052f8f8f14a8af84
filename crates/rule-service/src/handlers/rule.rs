//! 规则 API 处理器
//!
//! 实现规则的创建、查询、删除、组合与评估。

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rule_engine::{
    Record, RuleError, RuleExecutor, RuleNode, combine, from_wire_json, parse_rule, to_wire,
};
use tracing::{debug, info};
use validator::Validate;

use crate::{
    dto::{
        ApiResponse, CombineRulesRequest, CombinedRuleDto, CreateRuleRequest, EvaluateRuleRequest,
        EvaluationDto, RuleDto,
    },
    error::{Result, ServiceError},
    state::AppState,
};

/// 创建规则
///
/// POST /api/rules
pub async fn create_rule(
    State(state): State<AppState>,
    Json(req): Json<CreateRuleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RuleDto>>)> {
    req.validate()?;

    let rule = state.store.create(&req.rule)?;
    info!(rule_id = %rule.id, "Rule created");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(rule.into()))))
}

/// 获取全部规则（按创建时间排序）
///
/// GET /api/rules
pub async fn list_rules(State(state): State<AppState>) -> Json<ApiResponse<Vec<RuleDto>>> {
    let rules = state
        .store
        .list_all()
        .into_iter()
        .map(RuleDto::from)
        .collect();
    Json(ApiResponse::success(rules))
}

/// 获取单条规则
///
/// GET /api/rules/{id}
pub async fn get_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RuleDto>>> {
    let rule = state
        .store
        .get(&id)
        .ok_or(RuleError::RuleNotFound(id))?;
    Ok(Json(ApiResponse::success(rule.into())))
}

/// 删除规则
///
/// DELETE /api/rules/{id}
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state.store.delete(&id)?;
    info!(rule_id = %id, "Rule deleted");
    Ok(Json(ApiResponse::<()>::success_empty()))
}

/// 组合多条规则
///
/// POST /api/rules/combine
///
/// 每一项优先按规则 ID 查找存储，找不到时作为规则文本解析。
pub async fn combine_rules(
    State(state): State<AppState>,
    Json(req): Json<CombineRulesRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CombinedRuleDto>>)> {
    req.validate()?;

    let rules = req
        .rules
        .iter()
        .map(|entry| match state.store.get(entry) {
            Some(stored) => Ok(stored.root),
            None => parse_rule(entry),
        })
        .collect::<std::result::Result<Vec<RuleNode>, RuleError>>()?;

    let rule_count = rules.len();
    let root = combine(rules, req.operator)?;
    info!(rule_count, operator = %req.operator, "Rules combined");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CombinedRuleDto {
            ast: to_wire(&root),
            rule_count,
        })),
    ))
}

/// 评估规则
///
/// POST /api/rules/evaluate
pub async fn evaluate_rule(
    State(state): State<AppState>,
    Json(req): Json<EvaluateRuleRequest>,
) -> Result<Json<ApiResponse<EvaluationDto>>> {
    req.validate()?;

    let root = match (&req.rule_ast, &req.rule_id) {
        (Some(ast), _) => from_wire_json(ast)?,
        (None, Some(id)) => {
            state
                .store
                .get(id)
                .ok_or_else(|| RuleError::RuleNotFound(id.clone()))?
                .root
        }
        (None, None) => {
            return Err(ServiceError::Validation(
                "ruleAst 与 ruleId 必须提供其一".to_string(),
            ));
        }
    };

    let record = Record::try_from(req.data)?;

    let executor = if req.trace {
        RuleExecutor::new().with_trace()
    } else {
        RuleExecutor::new()
    };
    let result = executor.execute(&root, &record)?;
    debug!(matched = result.matched, "Rule evaluated");

    Ok(Json(ApiResponse::success(EvaluationDto::from_result(
        result, req.trace,
    ))))
}
