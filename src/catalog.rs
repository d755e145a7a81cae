//! Component catalog: modules, inverters and installation cost rates.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::kit::InverterType;

/// Catalog parsed from a JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub modules: Vec<ModuleEntry>,
    pub inverters: Vec<InverterEntry>,
    pub structure: StructureCosts,
    pub installation: InstallationCosts,
    pub additional_costs: AdditionalCosts,
}

/// Solar module offered per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub name: String,
    /// Nameplate power per module (Wp).
    pub power_wp: f64,
    pub price_per_unit: f64,
}

impl ModuleEntry {
    /// Watts-peak bought per currency unit.
    pub fn watts_per_currency(&self) -> f64 {
        self.power_wp / self.price_per_unit
    }

    /// Whether the entry can be priced at all.
    pub fn is_usable(&self) -> bool {
        self.power_wp.is_finite()
            && self.power_wp > 0.0
            && self.price_per_unit.is_finite()
            && self.price_per_unit > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InverterEntry {
    pub name: String,
    /// Rated power (kW).
    pub power_kw: f64,
    pub price: f64,
    /// Topology; guessed from the name when absent.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<InverterType>,
}

impl InverterEntry {
    pub fn inverter_type(&self) -> InverterType {
        self.kind
            .unwrap_or_else(|| InverterType::from_description(&self.name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureCosts {
    pub cost_per_module: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstallationCosts {
    pub cost_per_kwp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerKwpCost {
    pub cost_per_kwp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedCost {
    pub fixed_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdditionalCosts {
    pub electrical_protection: PerKwpCost,
    pub project_approval: FixedCost,
    pub transportation: PerKwpCost,
}

impl Catalog {
    /// Reads a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            modules = catalog.modules.len(),
            inverters = catalog.inverters.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parses a catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the JSON is invalid or a section is missing.
    pub fn from_json_str(s: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE_CATALOG: &str = r#"{
        "modules": [
            {"name": "Module A 600W", "power_wp": 600, "price_per_unit": 300},
            {"name": "Module B 550W", "power_wp": 550, "price_per_unit": 250}
        ],
        "inverters": [
            {"name": "String 5kW", "power_kw": 5.0, "price": 4000, "type": "string"},
            {"name": "String 10kW", "power_kw": 10.0, "price": 7000, "type": "string"},
            {"name": "Microinverter 2kW", "power_kw": 2.0, "price": 1500}
        ],
        "structure": {"cost_per_module": 100},
        "installation": {"cost_per_kwp": 400},
        "additional_costs": {
            "electrical_protection": {"cost_per_kwp": 50},
            "project_approval": {"fixed_cost": 800},
            "transportation": {"cost_per_kwp": 30}
        }
    }"#;

    #[test]
    fn sample_catalog_parses() {
        let catalog = Catalog::from_json_str(SAMPLE_CATALOG).expect("sample catalog parses");
        assert_eq!(catalog.modules.len(), 2);
        assert_eq!(catalog.inverters.len(), 3);
        assert_eq!(catalog.additional_costs.project_approval.fixed_cost, 800.0);
    }

    #[test]
    fn inverter_type_guessed_from_name() {
        let catalog = Catalog::from_json_str(SAMPLE_CATALOG).expect("sample catalog parses");
        assert_eq!(catalog.inverters[2].inverter_type(), InverterType::Micro);
        assert_eq!(catalog.inverters[0].inverter_type(), InverterType::String);
    }

    #[test]
    fn missing_section_rejected() {
        let result = Catalog::from_json_str(r#"{"modules": [], "inverters": []}"#);
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn unreadable_file_reported() {
        let result = Catalog::from_file(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(result, Err(CatalogError::Read { .. })));
    }

    #[test]
    fn unusable_modules_detected() {
        let free = ModuleEntry {
            name: "free".into(),
            power_wp: 500.0,
            price_per_unit: 0.0,
        };
        assert!(!free.is_usable());
    }
}
