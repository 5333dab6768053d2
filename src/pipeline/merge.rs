use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::table::Table;
use super::{backfill::{check_area, density_of}, derive::log_density_of};

/// Folds one territory's record into another's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryMergeRule {
    pub absorbing_code: String,
    pub absorbed_code: String,
}

impl Default for TerritoryMergeRule {
    /// Western Sahara into Morocco.
    fn default() -> Self { Self::new("MAR", "ESH") }
}

impl TerritoryMergeRule {
    pub fn new(absorbing_code: impl Into<String>, absorbed_code: impl Into<String>) -> Self {
        Self { absorbing_code: absorbing_code.into(), absorbed_code: absorbed_code.into() }
    }
}

/// Apply `rule`: sum populations and area into the absorbing record, recompute its density
/// from the summed totals, and drop the absorbed record. The table shrinks by exactly one.
pub(crate) fn merge_territories(table: &mut Table, rule: &TerritoryMergeRule) -> Result<()> {
    let TerritoryMergeRule { absorbing_code, absorbed_code } = rule;
    if absorbing_code == absorbed_code {
        return Err(PipelineError::Data(format!("cannot merge {absorbing_code} into itself")));
    }

    let absorbing = table.get(absorbing_code)
        .ok_or_else(|| PipelineError::Data(format!("merge target {absorbing_code} not found")))?;
    let absorbed = table.get(absorbed_code)
        .ok_or_else(|| PipelineError::Data(format!("merge source {absorbed_code} not found")))?;

    check_area(absorbing.area_km2, absorbing_code)?;
    check_area(absorbed.area_km2, absorbed_code)?;
    let area = match (absorbing.area_km2, absorbed.area_km2) {
        (Some(a), Some(b)) => a + b,
        _ => return Err(PipelineError::Data(format!("cannot merge {absorbed_code} into {absorbing_code}: area missing"))),
    };

    let mut population = absorbing.population;
    for (total, extra) in population.iter_mut().zip(absorbed.population) {
        *total = total.checked_add(extra)
            .ok_or_else(|| PipelineError::Data(format!("population overflow merging {absorbed_code} into {absorbing_code}")))?;
    }

    let density = density_of(population[population.len() - 1], Some(area), absorbing_code)?;

    table.remove(absorbed_code);
    let record = table.get_mut(absorbing_code)
        .ok_or_else(|| PipelineError::Data(format!("merge target {absorbing_code} not found")))?;
    record.population = population;
    record.area_km2 = Some(area);
    record.density_per_km2 = Some(density);
    record.log_density = Some(log_density_of(density));
    Ok(())
}
