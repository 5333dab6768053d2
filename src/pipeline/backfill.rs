use crate::error::{PipelineError, Result};
use crate::table::Table;

/// Present areas must be finite and positive.
pub(crate) fn check_area(area_km2: Option<f64>, code: &str) -> Result<()> {
    match area_km2 {
        Some(area) if !area.is_finite() || area <= 0.0 => {
            Err(PipelineError::Data(format!("{code}: invalid area {area} km²")))
        }
        _ => Ok(()),
    }
}

/// Density of a territory with the given population and area.
/// Area must be present, finite and positive.
pub(crate) fn density_of(population: u64, area_km2: Option<f64>, code: &str) -> Result<f64> {
    check_area(area_km2, code)?;
    match area_km2 {
        Some(area) => Ok(population as f64 / area),
        None => Err(PipelineError::Data(format!("{code}: area is missing, cannot compute density"))),
    }
}

/// Fill every absent density with the latest population divided by area.
/// Returns the number of records filled.
pub(crate) fn backfill_density(table: &mut Table) -> Result<usize> {
    let mut filled = 0;
    for record in table.records_mut() {
        check_area(record.area_km2, &record.iso3_code)?;
        let current = record.density_per_km2;
        match current {
            Some(density) if density.is_finite() && density >= 0.0 => {}
            Some(density) => {
                return Err(PipelineError::Data(format!("{}: invalid density {density}", record.iso3_code)));
            }
            None => {
                record.density_per_km2 = Some(density_of(record.latest_population(), record.area_km2, &record.iso3_code)?);
                filled += 1;
            }
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_record as record;

    #[test]
    fn fills_only_missing_densities() {
        let mut given = record("AAA", "Alpha", "Asia", 5000);
        given.density_per_km2 = Some(3.5);
        let mut missing = record("BBB", "Beta", "Asia", 5000);
        missing.area_km2 = Some(250.0);
        let mut table = Table::from_records(vec![given, missing]).unwrap();

        assert_eq!(backfill_density(&mut table).unwrap(), 1);
        assert_eq!(table.get("AAA").unwrap().density_per_km2, Some(3.5));
        assert_eq!(table.get("BBB").unwrap().density_per_km2, Some(20.0));
        assert!(table.iter().all(|r| r.density_per_km2.is_some()));
    }

    #[test]
    fn zero_area_is_data_error() {
        let mut r = record("AAA", "Alpha", "Asia", 5000);
        r.area_km2 = Some(0.0);
        let mut table = Table::from_records(vec![r]).unwrap();
        assert!(matches!(backfill_density(&mut table), Err(PipelineError::Data(_))));
    }

    #[test]
    fn missing_area_is_data_error_only_when_needed() {
        let mut needs = record("AAA", "Alpha", "Asia", 5000);
        needs.area_km2 = None;
        let mut table = Table::from_records(vec![needs.clone()]).unwrap();
        assert!(matches!(backfill_density(&mut table), Err(PipelineError::Data(_))));

        needs.density_per_km2 = Some(1.0);
        let mut table = Table::from_records(vec![needs]).unwrap();
        assert_eq!(backfill_density(&mut table).unwrap(), 0);
    }

    #[test]
    fn invalid_area_is_data_error_even_with_density() {
        for area in [-200_000.0, 0.0, f64::NAN, f64::INFINITY] {
            let mut r = record("AAA", "Alpha", "Asia", 5000);
            r.area_km2 = Some(area);
            r.density_per_km2 = Some(5.0);
            let mut table = Table::from_records(vec![r]).unwrap();
            let err = backfill_density(&mut table).unwrap_err();
            assert!(matches!(err, PipelineError::Data(ref msg) if msg.contains("invalid area")), "{area}: {err}");
        }
    }

    #[test]
    fn negative_density_is_data_error() {
        let mut r = record("AAA", "Alpha", "Asia", 5000);
        r.density_per_km2 = Some(-1.0);
        let mut table = Table::from_records(vec![r]).unwrap();
        assert!(matches!(backfill_density(&mut table), Err(PipelineError::Data(_))));
    }
}
