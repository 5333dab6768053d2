use ahash::AHashMap;

use crate::error::{PipelineError, Result};
use super::CountryRecord;

/// Ordered collection of country records, unique by `iso3_code`.
#[derive(Debug, Clone, Default)]
pub struct Table {
    records: Vec<CountryRecord>,
    index: AHashMap<String, u32>, // Map between iso3 codes and positions in `records`.
}

impl Table {
    pub fn new() -> Self { Self::default() }

    /// Build a table, failing on the first repeated code.
    pub fn from_records(records: Vec<CountryRecord>) -> Result<Self> {
        let mut table = Self { records: Vec::with_capacity(records.len()), index: AHashMap::new() };
        for record in records { table.push(record)? }
        Ok(table)
    }

    /// Append a record at the end of the table.
    pub fn push(&mut self, record: CountryRecord) -> Result<()> {
        if self.index.contains_key(&record.iso3_code) {
            return Err(PipelineError::Data(format!("duplicate country code {}", record.iso3_code)));
        }
        self.index.insert(record.iso3_code.clone(), self.records.len() as u32);
        self.records.push(record);
        Ok(())
    }

    #[inline] pub fn len(&self) -> usize { self.records.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.records.is_empty() }

    #[inline] pub fn records(&self) -> &[CountryRecord] { &self.records }

    #[inline] pub fn iter(&self) -> impl Iterator<Item = &CountryRecord> + '_ { self.records.iter() }

    #[inline] pub fn contains(&self, code: &str) -> bool { self.index.contains_key(code) }

    /// Position of the record with the given code.
    #[inline]
    pub fn position(&self, code: &str) -> Option<usize> {
        self.index.get(code).map(|&i| i as usize)
    }

    /// Record with the given code.
    pub fn get(&self, code: &str) -> Option<&CountryRecord> {
        self.position(code).map(|i| &self.records[i])
    }

    pub(crate) fn get_mut(&mut self, code: &str) -> Option<&mut CountryRecord> {
        self.position(code).map(|i| &mut self.records[i])
    }

    /// Mutable access to the records. Codes must not be changed through this slice.
    pub(crate) fn records_mut(&mut self) -> &mut [CountryRecord] { &mut self.records }

    /// Remove the record with the given code, preserving the order of the rest.
    pub(crate) fn remove(&mut self, code: &str) -> Option<CountryRecord> {
        let pos = self.position(code)?;
        let record = self.records.remove(pos);
        self.index.remove(code);
        for i in self.index.values_mut() {
            if *i as usize > pos { *i -= 1 }
        }
        Some(record)
    }
}
