//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use super::AppState;
use super::types::{
    CalculateProposalRequest, CalculateProposalResponse, ComponentsResponse, ConfigResponse,
    ErrorResponse, HealthResponse, QuickQuoteResponse, TestCalculationResponse,
};
use crate::error::{CatalogError, ProposalError, QuickQuoteError};
use crate::kit::KitSpecification;
use crate::pricing::compare_systems;
use crate::quick_quote::{QuickQuoteRequest, generate_quick_quote};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn proposal_error(e: &ProposalError) -> ApiError {
    error(StatusCode::UNPROCESSABLE_ENTITY, e)
}

fn no_catalog() -> ApiError {
    error(StatusCode::SERVICE_UNAVAILABLE, "component catalog not loaded")
}

/// `GET /health` → 200
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Prices and ranks the submitted kits.
///
/// `POST /calculate-proposal` → 200 + ranked proposals
/// - malformed body or empty `systems_data` → 400
/// - kit or policy precondition violation → 422
pub async fn calculate_proposal(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CalculateProposalRequest>, JsonRejection>,
) -> Result<Json<CalculateProposalResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| error(StatusCode::BAD_REQUEST, e.body_text()))?;
    if request.systems_data.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "no systems provided"));
    }

    let overrides = request.parameters.as_ref();
    let parameters_used = state
        .calculator
        .effective_policy(overrides)
        .map_err(|e| proposal_error(&e))?;
    let proposals = compare_systems(&state.calculator, &request.systems_data, overrides)
        .map_err(|e| proposal_error(&e))?;

    Ok(Json(CalculateProposalResponse {
        success: true,
        client_data: request.client_data,
        proposals,
        parameters_used,
    }))
}

/// Sizes and prices a kit from the loaded catalog.
///
/// `POST /quick-quote` → 200, 400 without consumption or bill, 503 without a
/// usable catalog.
pub async fn quick_quote(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QuickQuoteRequest>, JsonRejection>,
) -> Result<Json<QuickQuoteResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| error(StatusCode::BAD_REQUEST, e.body_text()))?;
    let catalog = state.catalog.as_ref().ok_or_else(no_catalog)?;

    match generate_quick_quote(catalog, &state.calculator, &request) {
        Ok(proposal) => Ok(Json(QuickQuoteResponse {
            success: true,
            proposal,
        })),
        Err(e) => {
            let status = match &e {
                QuickQuoteError::MissingConsumption | QuickQuoteError::InvalidConsumption(_) => {
                    StatusCode::BAD_REQUEST
                }
                QuickQuoteError::Catalog(CatalogError::NoModules | CatalogError::NoInverters) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                _ => StatusCode::UNPROCESSABLE_ENTITY,
            };
            tracing::warn!(error = %e, "quick quote rejected");
            Err(error(status, e))
        }
    }
}

/// `GET /components` → 200 + catalog, 503 when none is loaded.
pub async fn components(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ComponentsResponse>, ApiError> {
    let components = state.catalog.clone().ok_or_else(no_catalog)?;
    Ok(Json(ComponentsResponse {
        success: true,
        components,
    }))
}

/// `GET /config` → 200 + the base pricing policy requests are merged onto.
pub async fn config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        success: true,
        config: *state.calculator.policy(),
    })
}

/// `POST /test-calculation` → 200 + the sample kit's proposal.
pub async fn test_calculation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TestCalculationResponse>, ApiError> {
    let test_proposal = state
        .calculator
        .calculate(&KitSpecification::sample(), None)
        .map_err(|e| proposal_error(&e))?;
    Ok(Json(TestCalculationResponse {
        success: true,
        test_proposal,
    }))
}
