//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use solar_quote::catalog::Catalog;
use solar_quote::kit::KitSpecification;

/// Kit with freight included and no component details.
pub fn kit(name: &str, equipment_cost: f64, power_kwp: f64) -> KitSpecification {
    KitSpecification {
        name: name.to_string(),
        equipment_cost,
        power_kwp,
        ..KitSpecification::sample()
    }
}

/// Three kits of distinct payback under the default policy.
///
/// Under defaults a 50 kWp kit saves about 4281.62 per month and a 25 kWp
/// kit about 2140.81. The 15 000 kit (25 kWp, 9.8 months) is raised to the
/// 16-month floor, the 50 000 kit (16.3 months) stays inside the window and
/// the 90 000 kit (29.4 months) is lowered to the 20-month ceiling.
pub fn default_kits() -> Vec<KitSpecification> {
    vec![
        kit("Lowered", 90_000.0, 50.0),
        kit("Raised", 15_000.0, 25.0),
        kit("Accepted", 50_000.0, 50.0),
    ]
}

pub const CATALOG_JSON: &str = r#"{
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

pub fn catalog() -> Catalog {
    Catalog::from_json_str(CATALOG_JSON).unwrap()
}
