//! Error types shared across the pricing engine.

use std::path::PathBuf;

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"policy.payback_min"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

/// Component catalog loading and selection errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("cannot read catalog \"{path}\": {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog document is not valid JSON or misses a section.
    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// No module with a positive power and price is available.
    #[error("empty catalog: no usable modules")]
    NoModules,

    /// No inverter is available.
    #[error("empty catalog: no inverters")]
    NoInverters,

    /// The requested system power cannot be built.
    #[error("required power must be a positive number of kWp, got {0}")]
    InvalidRequiredPower(f64),
}

/// Proposal calculation precondition violations.
#[derive(Debug, thiserror::Error)]
pub enum ProposalError {
    /// A kit field is missing its value or out of range.
    #[error("invalid kit \"{kit}\": {field} {message}")]
    InvalidKit {
        kit: String,
        field: &'static str,
        message: &'static str,
    },

    /// The merged policy does not pass validation.
    #[error("invalid pricing policy: {}", join_errors(.0))]
    InvalidPolicy(Vec<ConfigError>),
}

/// Quick-quote errors.
#[derive(Debug, thiserror::Error)]
pub enum QuickQuoteError {
    /// Neither monthly consumption nor bill value was given.
    #[error("either monthly consumption or bill value must be provided")]
    MissingConsumption,

    /// Consumption (given or derived from the bill) is not a positive number.
    #[error("monthly consumption must be a positive number of kWh, got {0}")]
    InvalidConsumption(f64),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Proposal(#[from] ProposalError),
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display_has_field_and_message() {
        let e = ConfigError {
            field: "policy.hsp".into(),
            message: "must be > 0".into(),
        };
        assert_eq!(e.to_string(), "config error: policy.hsp: must be > 0");
    }

    #[test]
    fn invalid_policy_lists_every_error() {
        let e = ProposalError::InvalidPolicy(vec![
            ConfigError {
                field: "policy.a".into(),
                message: "x".into(),
            },
            ConfigError {
                field: "policy.b".into(),
                message: "y".into(),
            },
        ]);
        let text = e.to_string();
        assert!(text.contains("policy.a: x"));
        assert!(text.contains("policy.b: y"));
    }
}
