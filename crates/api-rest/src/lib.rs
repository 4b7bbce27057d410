//! # API REST
//!
//! REST API for the CDS translation engine.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, error status codes)
//!
//! Translation itself lives in `cds-core`; handlers only decode requests, call it, and map
//! its errors onto HTTP responses.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use cds_core::{
    config::{flag_from_env_value, load_interaction_codes},
    constants::{DEFAULT_BASE_URL, DEFAULT_CARE_PLAN_TITLE},
    create_card, create_preferences_card, parse_preferences, translate, CardOptions,
    CardResponse, CdsError, CdsResult, MedicationCatalogue, PreferenceCardOptions, Translation,
    TranslatorConfig,
};
use cds_types::PatientId;
use fhir::{InteractionCodeTable, Parameters};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

/// Default listen address of the REST server.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Application state shared by all handlers.
#[derive(Clone)]
struct AppState {
    config: Arc<TranslatorConfig>,
    catalogue: Arc<MedicationCatalogue>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Body of `POST /translate`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateReq {
    pub patient: String,
    /// TMR document: `{ "guidelineGroup": { ... } }`
    #[schema(value_type = Object)]
    pub aggregated_form: serde_json::Value,
}

/// Body of `POST /cards`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardReq {
    pub patient: String,
    /// Accepted for client compatibility; not used by the card.
    #[serde(default)]
    pub encounter_id: Option<String>,
    #[serde(default)]
    pub cig_id: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[schema(value_type = Object)]
    pub aggregated_form: serde_json::Value,
}

/// Body of `POST /preferences`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesReq {
    pub patient: String,
    #[serde(default)]
    pub cig_id: Option<String>,
    /// SNOMED CT code of the assessed GOLD 2017 COPD group
    pub assessed_group: u64,
    /// Ranked medication codes per group: `{ "groupA": [["Saba"], ...], ... }`
    #[schema(value_type = Object)]
    pub preferences: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: ErrorDetail,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, translate_document, create_cards, create_preference_cards),
    components(schemas(HealthRes, TranslateReq, CardReq, PreferencesReq, ErrorRes, ErrorDetail))
)]
struct ApiDoc;

/// Build the REST router around a resolved configuration.
pub fn router(config: TranslatorConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
        catalogue: Arc::new(MedicationCatalogue::default()),
    };

    Router::new()
        .route("/health", get(health))
        .route("/translate", post(translate_document))
        .route("/cards", post(create_cards))
        .route("/preferences", post(create_preference_cards))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Resolve the translator configuration from `CDS_*` environment variables.
///
/// Intended to be called once at startup by the server binaries.
pub fn translator_config_from_env() -> CdsResult<TranslatorConfig> {
    let base_url = std::env::var("CDS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
    let interaction_codes = match std::env::var("CDS_INTERACTION_CODES") {
        Ok(path) if !path.trim().is_empty() => load_interaction_codes(Path::new(path.trim()))?,
        _ => InteractionCodeTable::default(),
    };
    let strict_references =
        flag_from_env_value(std::env::var("CDS_STRICT_REFERENCES").ok(), true)?;
    let emit_full_urls = flag_from_env_value(std::env::var("CDS_EMIT_FULL_URLS").ok(), false)?;
    let care_plan_title = std::env::var("CDS_CARE_PLAN_TITLE")
        .unwrap_or_else(|_| DEFAULT_CARE_PLAN_TITLE.into());

    TranslatorConfig::new(
        base_url,
        interaction_codes,
        strict_references,
        emit_full_urls,
        care_plan_title,
    )
}

/// Error returned by the handlers, rendered as `{ "error": { kind, message } }`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Cds(CdsError),
}

impl From<CdsError> for ApiError {
    fn from(err: CdsError) -> Self {
        Self::Cds(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Cds(err) if !err.is_input_error() => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Cds(CdsError::Tmr(_) | CdsError::Json(_)) => StatusCode::BAD_REQUEST,
            Self::Cds(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad-request",
            Self::Cds(err) => err.kind(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::BadRequest(msg) => msg.clone(),
            Self::Cds(err) => err.to_string(),
        };
        if status.is_server_error() {
            tracing::error!("Translation error: {}", message);
        } else {
            tracing::warn!("Rejected request ({}): {}", status, message);
        }

        let body = ErrorRes {
            error: ErrorDetail {
                kind: self.kind().to_owned(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "CDS REST API is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/translate",
    request_body = TranslateReq,
    responses(
        (status = 200, description = "Translated resources: { entries, requestReferences }"),
        (status = 400, description = "Malformed request or TMR values", body = ErrorRes),
        (status = 422, description = "TMR document fails validation", body = ErrorRes),
        (status = 500, description = "Internal error", body = ErrorRes)
    )
)]
/// Translate a TMR guideline group into FHIR resources
///
/// # Errors
/// Returns `422 Unprocessable Entity` when a required field is missing or a shape is wrong,
/// `400 Bad Request` when the body is not valid JSON or a value is out of vocabulary.
#[axum::debug_handler]
async fn translate_document(
    State(state): State<AppState>,
    body: Result<Json<TranslateReq>, JsonRejection>,
) -> Result<Json<Translation>, ApiError> {
    let Json(req) = body?;
    let patient = PatientId::new(&req.patient).map_err(CdsError::from)?;
    let translation = translate(&patient, &req.aggregated_form, &state.config)?;
    Ok(Json(translation))
}

#[utoipa::path(
    post,
    path = "/cards",
    request_body = CardReq,
    responses(
        (status = 200, description = "Advisory card wrapping the translated bundle"),
        (status = 400, description = "Malformed request or TMR values", body = ErrorRes),
        (status = 422, description = "TMR document fails validation", body = ErrorRes),
        (status = 500, description = "Internal error", body = ErrorRes)
    )
)]
/// Translate a TMR guideline group and wrap it into an advisory card
#[axum::debug_handler]
async fn create_cards(
    State(state): State<AppState>,
    body: Result<Json<CardReq>, JsonRejection>,
) -> Result<Json<CardResponse>, ApiError> {
    let Json(req) = body?;
    tracing::debug!(
        "Card request for patient {} (encounter {:?}, guideline group {:?})",
        req.patient,
        req.encounter_id,
        req.cig_id
    );

    let patient = PatientId::new(&req.patient).map_err(CdsError::from)?;
    let options = CardOptions {
        birth_date: req.birth_date,
        ..CardOptions::default()
    };
    let card = create_card(
        &patient,
        req.cig_id.as_deref(),
        &req.aggregated_form,
        &options,
        &state.config,
    )?;
    Ok(Json(card))
}

#[utoipa::path(
    post,
    path = "/preferences",
    request_body = PreferencesReq,
    responses(
        (status = 200, description = "Card carrying the COPD medication preferences"),
        (status = 400, description = "Malformed request", body = ErrorRes),
        (status = 422, description = "Unknown group or medication code", body = ErrorRes)
    )
)]
/// Build the COPD medication-preference card
#[axum::debug_handler]
async fn create_preference_cards(
    State(state): State<AppState>,
    body: Result<Json<PreferencesReq>, JsonRejection>,
) -> Result<Json<CardResponse<Parameters>>, ApiError> {
    let Json(req) = body?;
    let patient = PatientId::new(&req.patient).map_err(CdsError::from)?;
    let preferences = parse_preferences(&req.preferences)?;
    let card = create_preferences_card(
        &patient,
        req.cig_id.as_deref(),
        req.assessed_group,
        &preferences,
        &PreferenceCardOptions::default(),
        &state.catalogue,
    )?;
    Ok(Json(card))
}
