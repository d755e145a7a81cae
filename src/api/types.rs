//! API request and response bodies.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::kit::KitSpecification;
use crate::policy::{PolicyOverrides, PricingPolicy};
use crate::pricing::{Proposal, RankedProposal};
use crate::quick_quote::QuickQuote;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `POST /calculate-proposal` body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CalculateProposalRequest {
    /// Opaque client details, echoed back untouched.
    pub client_data: serde_json::Value,
    pub systems_data: Vec<KitSpecification>,
    /// Per-request policy overrides.
    pub parameters: Option<PolicyOverrides>,
}

#[derive(Debug, Serialize)]
pub struct CalculateProposalResponse {
    pub success: bool,
    pub client_data: serde_json::Value,
    pub proposals: Vec<RankedProposal>,
    pub parameters_used: PricingPolicy,
}

#[derive(Debug, Serialize)]
pub struct QuickQuoteResponse {
    pub success: bool,
    pub proposal: QuickQuote,
}

#[derive(Debug, Serialize)]
pub struct ComponentsResponse {
    pub success: bool,
    pub components: Catalog,
}

/// `GET /config` body: the server's base policy.
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub success: bool,
    pub config: PricingPolicy,
}

#[derive(Debug, Serialize)]
pub struct TestCalculationResponse {
    pub success: bool,
    pub test_proposal: Proposal,
}

/// Error body returned for every non-2xx answer.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
