//! Column naming for the population CSV.
//!
//! Headers are normalized before lookup: surrounding whitespace is trimmed and every run
//! of inner whitespace becomes a single `_`, so `"2022 Population"` is read as
//! `"2022_Population"` and `"Area (km²)"` as `"Area_(km²)"`.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Joiner substituted for whitespace in column names.
pub(crate) const COLUMN_JOINER: &str = "_";

pub(crate) const COUNTRY_COLUMNS: &[&str] = &["Country", "Country/Territory"];
pub(crate) const CONTINENT_COLUMNS: &[&str] = &["Continent"];
pub(crate) const CODE_COLUMNS: &[&str] = &["CCA3", "ISO3"];
pub(crate) const AREA_COLUMNS: &[&str] = &["Area_(km²)", "Area_(km2)", "Area"];
pub(crate) const DENSITY_COLUMNS: &[&str] = &["Density_(per_km²)", "Density_(per_km2)", "Density"];

/// Normalize a raw header into its canonical form.
pub(crate) fn normalize_column_name(name: &str) -> String {
    WHITESPACE.replace_all(name.trim(), COLUMN_JOINER).into_owned()
}

/// Canonical name of the population column for `year`.
pub(crate) fn population_column(year: u16) -> String {
    format!("{year}{COLUMN_JOINER}Population")
}

/// First alias in `aliases` that is present in `columns`.
pub(crate) fn resolve_column<'a>(columns: &[String], aliases: &[&'a str]) -> Option<&'a str> {
    aliases.iter()
        .copied()
        .find(|alias| columns.iter().any(|c| c == alias))
}
