//! Batch comparison and ranking of proposals.

use serde::Serialize;

use crate::error::ProposalError;
use crate::kit::KitSpecification;
use crate::policy::PolicyOverrides;

use super::calculator::{Proposal, ProposalCalculator, calculate_with_policy};

/// Proposal with its position in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedProposal {
    #[serde(flatten)]
    pub proposal: Proposal,
    /// 1-based position after sorting by payback.
    pub rank: usize,
    /// `true` only for rank 1.
    pub is_recommended: bool,
}

/// Prices every kit and ranks the proposals by payback, shortest first.
///
/// The sort is stable, so equal paybacks keep input order; unbounded
/// paybacks rank after every finite one. An empty input yields an empty
/// output.
///
/// # Errors
///
/// Returns the first `ProposalError` raised by the merged policy or by a kit.
pub fn compare_systems(
    calculator: &ProposalCalculator,
    kits: &[KitSpecification],
    overrides: Option<&PolicyOverrides>,
) -> Result<Vec<RankedProposal>, ProposalError> {
    if kits.is_empty() {
        return Ok(Vec::new());
    }

    let policy = calculator.effective_policy(overrides)?;
    let mut proposals = kits
        .iter()
        .map(|kit| calculate_with_policy(kit, &policy))
        .collect::<Result<Vec<_>, _>>()?;

    proposals.sort_by(|a, b| a.payback().rank_cmp(&b.payback()));

    let ranked: Vec<RankedProposal> = proposals
        .into_iter()
        .enumerate()
        .map(|(i, proposal)| RankedProposal {
            proposal,
            rank: i + 1,
            is_recommended: i == 0,
        })
        .collect();

    if let Some(best) = ranked.first() {
        tracing::info!(
            candidates = ranked.len(),
            recommended = %best.proposal.kit_info.name,
            payback = %best.proposal.payback(),
            "systems compared"
        );
    }

    Ok(ranked)
}
