//! Pricing policy: defaults, per-call overrides, and file loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Immutable set of parameters governing margin, payback window, tariff and
/// payment-plan rates.
///
/// Percent fields are expressed in percent (`40.0` means 40 %). Build a
/// per-call variant with [`PricingPolicy::with_overrides`]; the original value
/// is never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingPolicy {
    /// Target margin applied on top of total cost (%).
    pub margin_target: f64,
    /// Effective solar hours per day.
    pub hsp: f64,
    /// Energy tariff (currency per kWh).
    pub tariff: f64,
    /// Share of generation consumed while it is produced (%).
    pub simultaneity_factor: f64,
    /// Yearly energy price inflation (%). Reported only.
    pub energy_inflation: f64,
    /// Overall system efficiency (%).
    pub system_efficiency: f64,
    /// Share of generation billed as savings (%).
    pub consumption_factor: f64,
    /// Average days per month.
    pub days_per_month: f64,
    /// Lower payback bound (months).
    pub payback_min: f64,
    /// Upper payback bound (months).
    pub payback_max: f64,
    /// Discount for paying in full (%).
    pub discount_cash: f64,
    /// Surcharge of the 18-installment financed plan (%).
    pub financing_rate: f64,
    /// Markup of the 12-installment no-interest reference price (%).
    pub markup_no_discount: f64,
    /// Markup of the struck-through anchor price over the no-discount price (%).
    pub markup_crossed_price: f64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            margin_target: 40.0,
            hsp: 5.25,
            tariff: 1.10,
            simultaneity_factor: 30.0,
            energy_inflation: 4.8,
            system_efficiency: 75.0,
            consumption_factor: 65.0,
            days_per_month: 365.0 / 12.0,
            payback_min: 16.0,
            payback_max: 20.0,
            discount_cash: 10.0,
            financing_rate: 15.5,
            markup_no_discount: 10.0,
            markup_crossed_price: 15.5,
        }
    }
}

/// Partial policy: every set key replaces the matching [`PricingPolicy`] field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_target: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tariff: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simultaneity_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_inflation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_efficiency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumption_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_per_month: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_cash: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financing_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup_no_discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup_crossed_price: Option<f64>,
}

impl PolicyOverrides {
    /// Returns `true` when no key is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Accepted policy file layouts: the mapping nested under
/// `calculation_params` (other top-level keys ignored), or a flat mapping.
#[derive(Deserialize)]
#[serde(untagged)]
enum PolicyDocument {
    Nested { calculation_params: PolicyOverrides },
    Flat(PolicyOverrides),
}

impl PolicyDocument {
    fn into_overrides(self) -> PolicyOverrides {
        match self {
            Self::Nested { calculation_params } => calculation_params,
            Self::Flat(overrides) => overrides,
        }
    }
}

impl PricingPolicy {
    /// Returns a new snapshot with every key set in `overrides` replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use solar_quote::policy::{PolicyOverrides, PricingPolicy};
    ///
    /// let base = PricingPolicy::default();
    /// let merged = base.with_overrides(&PolicyOverrides {
    ///     tariff: Some(0.95),
    ///     ..PolicyOverrides::default()
    /// });
    /// assert_eq!(merged.tariff, 0.95);
    /// assert_eq!(merged.hsp, base.hsp);
    /// ```
    #[must_use]
    pub fn with_overrides(&self, overrides: &PolicyOverrides) -> Self {
        let pick = |value: Option<f64>, current: f64| value.unwrap_or(current);
        Self {
            margin_target: pick(overrides.margin_target, self.margin_target),
            hsp: pick(overrides.hsp, self.hsp),
            tariff: pick(overrides.tariff, self.tariff),
            simultaneity_factor: pick(overrides.simultaneity_factor, self.simultaneity_factor),
            energy_inflation: pick(overrides.energy_inflation, self.energy_inflation),
            system_efficiency: pick(overrides.system_efficiency, self.system_efficiency),
            consumption_factor: pick(overrides.consumption_factor, self.consumption_factor),
            days_per_month: pick(overrides.days_per_month, self.days_per_month),
            payback_min: pick(overrides.payback_min, self.payback_min),
            payback_max: pick(overrides.payback_max, self.payback_max),
            discount_cash: pick(overrides.discount_cash, self.discount_cash),
            financing_rate: pick(overrides.financing_rate, self.financing_rate),
            markup_no_discount: pick(overrides.markup_no_discount, self.markup_no_discount),
            markup_crossed_price: pick(overrides.markup_crossed_price, self.markup_crossed_price),
        }
    }

    /// Reads a policy file, merging its keys over the built-in defaults.
    ///
    /// Files ending in `.toml` are parsed as TOML, everything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read, does not parse, or
    /// names an unknown parameter.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "policy".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Parses a JSON policy document.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the JSON is invalid or contains unknown keys.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let document: PolicyDocument = serde_json::from_str(s).map_err(|e| ConfigError {
            field: "json".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::default().with_overrides(&document.into_overrides()))
    }

    /// Parses a TOML policy document.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown keys.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let document: PolicyDocument = toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::default().with_overrides(&document.into_overrides()))
    }

    /// Loads a policy file, falling back to the defaults on any failure.
    ///
    /// Read, parse and validation failures are reported as `warn` events and
    /// never abort the caller.
    pub fn load_or_default(path: &Path) -> Self {
        let policy = match Self::from_file(path) {
            Ok(policy) => policy,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "using default pricing policy");
                return Self::default();
            }
        };

        let errors = policy.validate();
        if errors.is_empty() {
            tracing::debug!(path = %path.display(), "pricing policy loaded");
            policy
        } else {
            for e in &errors {
                tracing::warn!(path = %path.display(), error = %e, "invalid pricing policy");
            }
            Self::default()
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Percent fields are not range-checked. Returns an empty vector if the
    /// policy is usable.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let fields = [
            ("margin_target", self.margin_target),
            ("hsp", self.hsp),
            ("tariff", self.tariff),
            ("simultaneity_factor", self.simultaneity_factor),
            ("energy_inflation", self.energy_inflation),
            ("system_efficiency", self.system_efficiency),
            ("consumption_factor", self.consumption_factor),
            ("days_per_month", self.days_per_month),
            ("payback_min", self.payback_min),
            ("payback_max", self.payback_max),
            ("discount_cash", self.discount_cash),
            ("financing_rate", self.financing_rate),
            ("markup_no_discount", self.markup_no_discount),
            ("markup_crossed_price", self.markup_crossed_price),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                errors.push(ConfigError {
                    field: format!("policy.{name}"),
                    message: "must be a finite number".into(),
                });
            }
        }

        if self.days_per_month <= 0.0 {
            errors.push(ConfigError {
                field: "policy.days_per_month".into(),
                message: "must be > 0".into(),
            });
        }
        if self.payback_min < 0.0 {
            errors.push(ConfigError {
                field: "policy.payback_min".into(),
                message: "must be >= 0".into(),
            });
        }
        if self.payback_min > self.payback_max {
            errors.push(ConfigError {
                field: "policy.payback_min".into(),
                message: "must be <= policy.payback_max".into(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_policy_valid() {
        let errors = PricingPolicy::default().validate();
        assert!(errors.is_empty(), "defaults should be valid: {errors:?}");
    }

    #[test]
    fn overrides_win_per_key() {
        let base = PricingPolicy::default();
        let merged = base.with_overrides(&PolicyOverrides {
            hsp: Some(4.5),
            payback_max: Some(24.0),
            ..PolicyOverrides::default()
        });
        assert_eq!(merged.hsp, 4.5);
        assert_eq!(merged.payback_max, 24.0);
        assert_eq!(merged.tariff, base.tariff);
        assert_eq!(merged.margin_target, base.margin_target);
        // base snapshot untouched
        assert_eq!(base.hsp, 5.25);
    }

    #[test]
    fn empty_overrides_are_identity() {
        let base = PricingPolicy::default();
        assert!(PolicyOverrides::default().is_empty());
        assert_eq!(base.with_overrides(&PolicyOverrides::default()), base);
    }

    #[test]
    fn flat_json_parses() {
        let policy = PricingPolicy::from_json_str(r#"{"tariff": 0.9, "payback_min": 12}"#);
        assert!(policy.is_ok(), "flat JSON should parse: {:?}", policy.err());
        let policy = policy.ok();
        assert_eq!(policy.map(|p| p.tariff), Some(0.9));
        assert_eq!(policy.map(|p| p.payback_min), Some(12.0));
        assert_eq!(policy.map(|p| p.hsp), Some(5.25));
    }

    #[test]
    fn nested_json_ignores_other_sections() {
        let json = r#"{
            "branding": {"company": "Acme"},
            "calculation_params": {"margin_target": 35}
        }"#;
        let policy = PricingPolicy::from_json_str(json).ok();
        assert_eq!(policy.map(|p| p.margin_target), Some(35.0));
    }

    #[test]
    fn unknown_flat_key_rejected() {
        let result = PricingPolicy::from_json_str(r#"{"tarif": 0.9}"#);
        assert!(result.is_err());
    }

    #[test]
    fn toml_parses() {
        let toml = r"
hsp = 4.8
discount_cash = 5.0
";
        let policy = PricingPolicy::from_toml_str(toml).ok();
        assert_eq!(policy.map(|p| p.hsp), Some(4.8));
        assert_eq!(policy.map(|p| p.discount_cash), Some(5.0));
    }

    #[test]
    fn validation_catches_inverted_window() {
        let policy = PricingPolicy {
            payback_min: 30.0,
            ..PricingPolicy::default()
        };
        let errors = policy.validate();
        assert!(errors.iter().any(|e| e.field == "policy.payback_min"));
    }

    #[test]
    fn validation_catches_nan() {
        let policy = PricingPolicy {
            tariff: f64::NAN,
            ..PricingPolicy::default()
        };
        let errors = policy.validate();
        assert!(errors.iter().any(|e| e.field == "policy.tariff"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let policy = PricingPolicy::load_or_default(Path::new("/nonexistent/policy.json"));
        assert_eq!(policy, PricingPolicy::default());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("tempfile");
        write!(file, "{{ not json").expect("write");
        let policy = PricingPolicy::load_or_default(file.path());
        assert_eq!(policy, PricingPolicy::default());
    }

    #[test]
    fn invalid_window_in_file_falls_back_to_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("tempfile");
        write!(file, r#"{{"payback_min": 25, "payback_max": 20}}"#).expect("write");
        let policy = PricingPolicy::load_or_default(file.path());
        assert_eq!(policy, PricingPolicy::default());
    }

    #[test]
    fn toml_file_loaded_by_extension() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("tempfile");
        writeln!(file, "[calculation_params]\ntariff = 0.8").expect("write");
        let policy = PricingPolicy::load_or_default(file.path());
        assert_eq!(policy.tariff, 0.8);
    }
}
