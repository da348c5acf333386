//! Medical chatbot service: symptom matching and condition lookup over the knowledge base.

use axum::{
    extract::{rejection::JsonRejection, Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use medcalc_core::{
    numbered_advice, render_chat_response, ConditionId, KnowledgeBase, MatchResult,
    CONDITION_NOT_FOUND, DISCLAIMER,
};

use crate::error::ApiError;
use crate::health::HealthService;
use crate::types::{
    ChatReq, ChatRes, ChatbotHealthRes, ConditionDetailRes, ConditionNotFoundRes, ConditionsRes,
    ErrorRes, ServiceInfoRes,
};

/// Application state for the chatbot service
///
/// The knowledge base is loaded once at startup and shared read-only by every request.
#[derive(Clone)]
pub struct ChatbotState {
    knowledge: Arc<KnowledgeBase>,
}

#[derive(OpenApi)]
#[openapi(
    paths(root, health, chat, list_conditions, condition_info),
    components(schemas(
        ChatReq,
        ChatRes,
        ChatbotHealthRes,
        ConditionDetailRes,
        ConditionNotFoundRes,
        ConditionsRes,
        ErrorRes,
        ServiceInfoRes,
    ))
)]
struct ChatbotApiDoc;

/// Build the chatbot router over a loaded knowledge base.
pub fn chatbot_router(knowledge: Arc<KnowledgeBase>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/conditions", get(list_conditions))
        .route("/condition/:name", get(condition_info))
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ChatbotApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(ChatbotState { knowledge })
}

fn display_names<'a>(ids: impl IntoIterator<Item = &'a ConditionId>) -> Vec<String> {
    ids.into_iter().map(ConditionId::display_name).collect()
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service metadata", body = ServiceInfoRes)
    )
)]
/// Welcome message listing the chatbot endpoints.
#[axum::debug_handler]
async fn root(State(_state): State<ChatbotState>) -> Json<ServiceInfoRes> {
    let endpoints = BTreeMap::from([
        (
            "POST /chat".to_string(),
            "Send symptoms or condition to get advice".to_string(),
        ),
        (
            "GET /conditions".to_string(),
            "List all known conditions".to_string(),
        ),
        (
            "GET /condition/{condition_name}".to_string(),
            "Get detailed info for one condition".to_string(),
        ),
    ]);

    Json(ServiceInfoRes {
        message: "Welcome to the Simple Medical Chatbot API 💊".into(),
        status: "running".into(),
        endpoints,
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = ChatbotHealthRes)
    )
)]
/// Health check endpoint for the chatbot
///
/// Reports healthy and whether the knowledge base holds any conditions.
#[axum::debug_handler]
async fn health(State(state): State<ChatbotState>) -> Json<ChatbotHealthRes> {
    Json(HealthService::check_chatbot_health(state.knowledge.len()))
}

#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatReq,
    responses(
        (status = 200, description = "Formatted advice or a list of known conditions", body = ChatRes),
        (status = 400, description = "Malformed request body", body = ErrorRes)
    )
)]
/// Match free text against the knowledge base
///
/// A condition named in the text is returned directly; otherwise the condition with the most
/// matching symptom phrases is used. The reply is pre-formatted multi-line text.
///
/// # Errors
/// Returns `400 Bad Request` if the body is not `{ "user_input": string }`.
#[axum::debug_handler]
async fn chat(
    State(state): State<ChatbotState>,
    payload: Result<Json<ChatReq>, JsonRejection>,
) -> Result<Json<ChatRes>, ApiError> {
    let Json(req) = payload?;
    let result = state.knowledge.matcher().match_input(&req.user_input);

    match &result {
        MatchResult::Matched(found) => tracing::info!(
            "chat matched condition {} ({})",
            found.condition_id(),
            found
                .confidence_label()
                .unwrap_or_else(|| "named directly".into())
        ),
        MatchResult::Unmatched { .. } => tracing::info!("chat input matched no condition"),
    }

    Ok(Json(ChatRes {
        response: render_chat_response(&result),
    }))
}

#[utoipa::path(
    get,
    path = "/conditions",
    responses(
        (status = 200, description = "All known conditions in title case", body = ConditionsRes)
    )
)]
/// List all conditions known by the chatbot.
#[axum::debug_handler]
async fn list_conditions(State(state): State<ChatbotState>) -> Json<ConditionsRes> {
    Json(ConditionsRes {
        conditions: display_names(state.knowledge.list_ids()),
    })
}

#[utoipa::path(
    get,
    path = "/condition/{name}",
    params(
        ("name" = String, Path, description = "Condition name, any case, spaces or underscores")
    ),
    responses(
        (status = 200, description = "Condition details", body = ConditionDetailRes),
        (status = 404, description = "Unknown condition", body = ConditionNotFoundRes)
    )
)]
/// Detailed symptoms, advice and prevention for one condition
///
/// The name is lowercased and spaces become underscores before lookup, so `Common Cold`,
/// `common cold` and `common_cold` all resolve to the same condition.
///
/// # Errors
/// Returns `404 Not Found` with the list of available conditions if the name is unknown.
#[axum::debug_handler]
async fn condition_info(
    State(state): State<ChatbotState>,
    AxumPath(name): AxumPath<String>,
) -> Result<Json<ConditionDetailRes>, (StatusCode, Json<ConditionNotFoundRes>)> {
    let key = ConditionId::normalise(&name);

    match state.knowledge.lookup(&key) {
        Some(condition) => Ok(Json(ConditionDetailRes {
            condition: condition.id.display_name(),
            symptoms: condition.symptoms().map(str::to_string).collect(),
            advice: numbered_advice(condition),
            prevention: condition.prevention().map(str::to_string).collect(),
            disclaimer: DISCLAIMER.to_string(),
        })),
        None => {
            tracing::warn!("condition lookup miss: {:?}", name);
            Err((
                StatusCode::NOT_FOUND,
                Json(ConditionNotFoundRes {
                    error: CONDITION_NOT_FOUND.to_string(),
                    available_conditions: display_names(state.knowledge.list_ids()),
                }),
            ))
        }
    }
}
