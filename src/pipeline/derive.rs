use crate::error::{PipelineError, Result};
use crate::table::Table;

/// `log10(density + 1)`, defined and finite for every density >= 0.
#[inline]
pub(crate) fn log_density_of(density: f64) -> f64 {
    (density + 1.0).log10()
}

/// Recompute the log-scaled density of every record.
pub(crate) fn derive_log_density(table: &mut Table) -> Result<()> {
    for record in table.records_mut() {
        let density = record.density_per_km2
            .ok_or_else(|| PipelineError::Data(format!("{}: density missing before log derivation", record.iso3_code)))?;
        record.log_density = Some(log_density_of(density));
    }
    Ok(())
}
