//! Catalog-driven component selection for a required system power.

use serde::Serialize;

use crate::catalog::{Catalog, InverterEntry, ModuleEntry};
use crate::error::CatalogError;
use crate::kit::KitSpecification;

/// Cable allowance charged per module.
pub const CABLE_COST_PER_MODULE: f64 = 20.0;
/// Accepted inverter rating relative to the achieved system power.
pub const INVERTER_RATIO_RANGE: (f64, f64) = (0.8, 1.2);

/// Source of synthetic kits meeting a required power.
pub trait ComponentSelector {
    /// Selects components for at least `required_kwp`.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if no kit can be built.
    fn select(&self, required_kwp: f64) -> Result<SelectedSystem, CatalogError>;
}

/// Cost lines of a synthetic kit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub modules: f64,
    pub inverter: f64,
    pub structure: f64,
    pub installation: f64,
    pub electrical_protection: f64,
    pub project: f64,
    pub transportation: f64,
    pub cables: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.modules
            + self.inverter
            + self.structure
            + self.installation
            + self.electrical_protection
            + self.project
            + self.transportation
            + self.cables
    }
}

/// Synthetic kit and the catalog entries it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedSystem {
    pub kit: KitSpecification,
    pub cost_breakdown: CostBreakdown,
    pub module: ModuleEntry,
    pub inverter: InverterEntry,
}

impl ComponentSelector for Catalog {
    fn select(&self, required_kwp: f64) -> Result<SelectedSystem, CatalogError> {
        if !(required_kwp.is_finite() && required_kwp > 0.0) {
            return Err(CatalogError::InvalidRequiredPower(required_kwp));
        }

        let module = best_module(&self.modules).ok_or(CatalogError::NoModules)?;
        let modules_count = (required_kwp * 1000.0 / module.power_wp).ceil();
        let achieved_kwp = modules_count * module.power_wp / 1000.0;
        let inverter = best_inverter(&self.inverters, achieved_kwp).ok_or(CatalogError::NoInverters)?;

        tracing::info!(
            module = %module.name,
            power_wp = module.power_wp,
            price = module.price_per_unit,
            "module selected"
        );
        tracing::info!(
            inverter = %inverter.name,
            power_kw = inverter.power_kw,
            price = inverter.price,
            "inverter selected"
        );

        let cost_breakdown = CostBreakdown {
            modules: modules_count * module.price_per_unit,
            inverter: inverter.price,
            structure: modules_count * self.structure.cost_per_module,
            installation: achieved_kwp * self.installation.cost_per_kwp,
            electrical_protection: achieved_kwp
                * self.additional_costs.electrical_protection.cost_per_kwp,
            project: self.additional_costs.project_approval.fixed_cost,
            transportation: achieved_kwp * self.additional_costs.transportation.cost_per_kwp,
            cables: modules_count * CABLE_COST_PER_MODULE,
        };

        // ceil of a positive finite quotient; saturates on absurd requests
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let modules_count = modules_count as u32;

        let kit = KitSpecification {
            name: format!("Quick quote - {achieved_kwp:.2} kWp"),
            equipment_cost: cost_breakdown.total(),
            power_kwp: achieved_kwp,
            modules_count,
            modules_desc: format!("{modules_count}x {}", module.name),
            inverter_desc: inverter.name.clone(),
            inverter_type: inverter.inverter_type(),
            freight_included: true,
            freight_value: 0.0,
        };

        Ok(SelectedSystem {
            kit,
            cost_breakdown,
            module: module.clone(),
            inverter: inverter.clone(),
        })
    }
}

/// Usable module with the most watts-peak per currency unit; first wins ties.
fn best_module(modules: &[ModuleEntry]) -> Option<&ModuleEntry> {
    modules
        .iter()
        .filter(|m| m.is_usable())
        .fold(None, |best: Option<&ModuleEntry>, m| match best {
            Some(b) if b.watts_per_currency() >= m.watts_per_currency() => Some(b),
            _ => Some(m),
        })
}

/// Cheapest inverter rated within range of `system_kwp`, else the closest
/// rating with price breaking ties.
fn best_inverter(inverters: &[InverterEntry], system_kwp: f64) -> Option<&InverterEntry> {
    let (low, high) = INVERTER_RATIO_RANGE;
    let in_range = inverters
        .iter()
        .filter(|inv| inv.power_kw >= system_kwp * low && inv.power_kw <= system_kwp * high)
        .min_by(|a, b| a.price.total_cmp(&b.price));

    in_range.or_else(|| {
        inverters.iter().min_by(|a, b| {
            let da = (a.power_kw - system_kwp).abs();
            let db = (b.power_kw - system_kwp).abs();
            da.total_cmp(&db).then(a.price.total_cmp(&b.price))
        })
    })
}
