//! The population table pipeline: load, backfill, merge, derive.
//!
//! Each step consumes the pipeline and returns it at the next stage, so a failed step
//! leaves nothing behind to resume from. Stages only move forward:
//!
//! `Loaded -> Backfilled -> Merged -> Derived -> Ready`

mod backfill;
mod derive;
mod load;
mod merge;

use std::path::Path;

use serde::Serialize;

use crate::error::{PipelineError, Result};
use crate::table::Table;

pub use merge::TerritoryMergeRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Stage {
    Loaded,
    Backfilled,
    Merged,
    Derived,
    Ready,
}

#[derive(Debug)]
pub struct Pipeline {
    table: Table,
    stage: Stage,
    verbose: u8,
}

impl Pipeline {
    /// Start from an already-built table.
    pub fn from_table(table: Table, verbose: u8) -> Self {
        Self { table, stage: Stage::Loaded, verbose }
    }

    /// Load the CSV at `path`.
    pub fn load_path(path: &Path, verbose: u8) -> Result<Self> {
        if verbose > 0 { eprintln!("[pipeline] loading {}", path.display()) }
        let pipeline = Self::from_table(load::load_path(path)?, verbose);
        pipeline.log_loaded();
        Ok(pipeline)
    }

    /// Load CSV text.
    pub fn load_str(csv: &str, verbose: u8) -> Result<Self> {
        let pipeline = Self::from_table(load::load_str(csv)?, verbose);
        pipeline.log_loaded();
        Ok(pipeline)
    }

    fn log_loaded(&self) {
        if self.verbose > 0 { eprintln!("[pipeline] loaded {} records", self.table.len()) }
    }

    #[inline] pub fn stage(&self) -> Stage { self.stage }

    /// The table at whatever stage the pipeline has reached.
    #[inline] pub fn current(&self) -> &Table { &self.table }

    fn expect_stage(&self, expected: Stage) -> Result<()> {
        if self.stage != expected {
            return Err(PipelineError::Stage { expected, found: self.stage });
        }
        Ok(())
    }

    /// Fill every absent density from the latest population and area.
    pub fn backfill(mut self) -> Result<Self> {
        self.expect_stage(Stage::Loaded)?;
        let filled = backfill::backfill_density(&mut self.table)?;
        if self.verbose > 0 { eprintln!("[pipeline::backfill] filled {filled} missing densities") }
        self.stage = Stage::Backfilled;
        Ok(self)
    }

    /// Fold `rule.absorbed_code` into `rule.absorbing_code`.
    pub fn merge_territories(mut self, rule: &TerritoryMergeRule) -> Result<Self> {
        self.expect_stage(Stage::Backfilled)?;
        merge::merge_territories(&mut self.table, rule)?;
        if self.verbose > 0 {
            eprintln!("[pipeline::merge] merged {} into {} ({} records remain)",
                rule.absorbed_code, rule.absorbing_code, self.table.len());
        }
        self.stage = Stage::Merged;
        Ok(self)
    }

    /// Advance past the merge step without merging anything.
    pub fn skip_merge(mut self) -> Result<Self> {
        self.expect_stage(Stage::Backfilled)?;
        if self.verbose > 1 { eprintln!("[pipeline::merge] no merge rule, skipping") }
        self.stage = Stage::Merged;
        Ok(self)
    }

    /// Recompute `log_density` for every record. Running it again on a derived or ready
    /// table changes nothing and keeps the stage.
    pub fn derive(mut self) -> Result<Self> {
        if self.stage < Stage::Merged {
            return Err(PipelineError::Stage { expected: Stage::Merged, found: self.stage });
        }
        derive::derive_log_density(&mut self.table)?;
        if self.verbose > 1 { eprintln!("[pipeline::derive] log density derived for {} records", self.table.len()) }
        self.stage = self.stage.max(Stage::Derived);
        Ok(self)
    }

    /// Check the finished-table invariants and mark the table ready for queries.
    pub fn finish(mut self) -> Result<Self> {
        self.expect_stage(Stage::Derived)?;
        for record in self.table.iter() {
            match (record.density_per_km2, record.log_density) {
                (Some(d), Some(l)) if d.is_finite() && d >= 0.0 && l.is_finite() => {}
                _ => return Err(PipelineError::Data(format!("{}: density not derived", record.iso3_code))),
            }
        }
        self.stage = Stage::Ready;
        Ok(self)
    }

    /// Run every remaining step from `Loaded` to `Ready`.
    pub fn run(self, rule: Option<&TerritoryMergeRule>) -> Result<Self> {
        let pipeline = self.backfill()?;
        let pipeline = match rule {
            Some(rule) => pipeline.merge_territories(rule)?,
            None => pipeline.skip_merge()?,
        };
        pipeline.derive()?.finish()
    }

    /// The finished table.
    pub fn table(&self) -> Result<&Table> {
        self.expect_stage(Stage::Ready)?;
        Ok(&self.table)
    }

    /// Take ownership of the finished table.
    pub fn into_table(self) -> Result<Table> {
        self.expect_stage(Stage::Ready)?;
        Ok(self.table)
    }
}

/// Load `path` and run the whole pipeline, returning the finished table.
pub fn prepare_table(path: &Path, rule: Option<&TerritoryMergeRule>, verbose: u8) -> Result<Table> {
    Pipeline::load_path(path, verbose)?.run(rule)?.into_table()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_record as record;

    fn loaded() -> Pipeline {
        let mut mar = record("MAR", "Morocco", "Africa", 37_000_000);
        mar.area_km2 = Some(446_550.0);
        let mut esh = record("ESH", "Western Sahara", "Africa", 600_000);
        esh.area_km2 = Some(266_000.0);
        Pipeline::from_table(Table::from_records(vec![mar, esh]).unwrap(), 0)
    }

    #[test]
    fn stages_advance_in_order() {
        let p = loaded();
        assert_eq!(p.stage(), Stage::Loaded);
        let p = p.backfill().unwrap();
        assert_eq!(p.stage(), Stage::Backfilled);
        let p = p.merge_territories(&TerritoryMergeRule::default()).unwrap();
        assert_eq!(p.stage(), Stage::Merged);
        let p = p.derive().unwrap();
        assert_eq!(p.stage(), Stage::Derived);
        let p = p.finish().unwrap();
        assert_eq!(p.stage(), Stage::Ready);
        assert_eq!(p.table().unwrap().len(), 1);
    }

    #[test]
    fn merge_before_backfill_is_stage_error() {
        let err = loaded().merge_territories(&TerritoryMergeRule::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Stage { expected: Stage::Backfilled, found: Stage::Loaded }));
    }

    #[test]
    fn backfill_twice_is_stage_error() {
        let err = loaded().backfill().unwrap().backfill().unwrap_err();
        assert!(matches!(err, PipelineError::Stage { expected: Stage::Loaded, found: Stage::Backfilled }));
    }

    #[test]
    fn derive_before_merge_is_stage_error() {
        let err = loaded().backfill().unwrap().derive().unwrap_err();
        assert!(matches!(err, PipelineError::Stage { .. }));
    }

    #[test]
    fn table_requires_ready() {
        let p = loaded().backfill().unwrap();
        assert!(matches!(p.table(), Err(PipelineError::Stage { expected: Stage::Ready, .. })));
        assert_eq!(p.current().len(), 2);
    }

    #[test]
    fn derive_on_ready_table_is_unchanged() {
        let ready = loaded().run(Some(&TerritoryMergeRule::default())).unwrap();
        let before = ready.table().unwrap().records().to_vec();
        let again = ready.derive().unwrap();
        assert_eq!(again.stage(), Stage::Ready);
        assert_eq!(again.table().unwrap().records(), before.as_slice());
    }

    #[test]
    fn run_without_merge_keeps_every_record() {
        let table = loaded().run(None).unwrap().into_table().unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.iter().all(|r| r.density_per_km2.is_some() && r.log_density.is_some()));
    }
}
