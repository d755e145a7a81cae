//! Candidate solar kit descriptions.

use serde::{Deserialize, Serialize};

/// Inverter topology of a kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InverterType {
    /// Central string inverter.
    #[default]
    String,
    /// Per-module microinverters.
    Micro,
}

impl InverterType {
    /// Classifies a free-text inverter description.
    pub fn from_description(description: &str) -> Self {
        if description.to_lowercase().contains("micro") {
            Self::Micro
        } else {
            Self::String
        }
    }
}

/// One candidate system as quoted by a supplier or built by the selector.
///
/// `equipment_cost` and `power_kwp` are mandatory; deserialization fails
/// without them. The remaining fields default the way supplier quotes do:
/// freight included, nothing else known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitSpecification {
    /// Supplier or kit label.
    #[serde(default)]
    pub name: String,
    /// Raw equipment cost.
    #[serde(alias = "vcusto_raw")]
    pub equipment_cost: f64,
    /// Nameplate power (kWp).
    #[serde(alias = "power")]
    pub power_kwp: f64,
    #[serde(default)]
    pub modules_count: u32,
    #[serde(default)]
    pub modules_desc: String,
    #[serde(default)]
    pub inverter_desc: String,
    #[serde(default)]
    pub inverter_type: InverterType,
    /// Whether the quoted cost already covers freight.
    #[serde(default = "freight_included_default")]
    pub freight_included: bool,
    /// Freight charged on top of the equipment cost when not included.
    #[serde(default)]
    pub freight_value: f64,
}

const fn freight_included_default() -> bool {
    true
}

impl KitSpecification {
    /// Freight actually charged on top of the equipment cost.
    pub fn freight_cost(&self) -> f64 {
        if self.freight_included {
            0.0
        } else {
            self.freight_value
        }
    }

    /// Equipment cost plus charged freight.
    pub fn total_cost(&self) -> f64 {
        self.equipment_cost + self.freight_cost()
    }

    /// Built-in sample kit: 50 kWp string system at 50 000, freight included.
    pub fn sample() -> Self {
        Self {
            name: "Sample system".to_string(),
            equipment_cost: 50_000.0,
            power_kwp: 50.0,
            modules_count: 84,
            modules_desc: "84x Solar panel 600Wp".to_string(),
            inverter_desc: "String inverter 50kW".to_string(),
            inverter_type: InverterType::String,
            freight_included: true,
            freight_value: 0.0,
        }
    }
}
