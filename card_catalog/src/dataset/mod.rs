//! Card catalog dataset: parsing, derivation, and the in-memory snapshot.
//!
//! This module loads the static card dataset from CSV and prepares everything
//! the browse views need:
//! - One [`CatalogEntry`] per card, keyed by its unique full-name string
//! - A derived release year (first four-digit run in the release date) and a
//!   `"<year> - <set>"` display label per entry
//! - Distinct, sorted option lists (set labels, illustrators) for filter widgets
//! - A deduplicated search pool over card names, set names, and card numbers,
//!   in that order
//!
//! Key behaviors:
//! - Rows with a duplicate full name are dropped, keeping the first occurrence.
//! - A row with an empty full name is an error; the key joins catalog entries
//!   to stored card flags and cannot be blank.
//! - Empty optional cells (categories) are treated as absent.
//!
//! Entrypoints:
//! - Parse from any reader: [`load_dataset_reader`]
//! - Parse from a file path: [`load_dataset_path`]
//!
//! The loaded snapshot is immutable; [`install_catalog`] publishes it process-wide
//! for cheap concurrent reads.

mod cache;

pub use cache::{clear_catalog_cache, install_catalog, snapshot};

use std::collections::{BTreeSet, HashSet};
use std::io;
use std::path::Path;

use anyhow::{Context, bail};
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// One card in the static catalog dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Unique full-name string; the stable key joining this entry to stored card flags.
    pub full_name: String,
    /// Display name of the card.
    pub name: String,
    /// Set the card belongs to.
    pub set_name: String,
    /// Collector number within the set; may be empty.
    pub number: String,
    /// Illustrator credit; may be empty.
    pub illustrator: String,
    /// Raw release date text as it appears in the dataset.
    pub release_date: String,
    /// Card image URL; may be empty.
    pub image_url: String,
    /// Optional visual category (scene descriptor).
    pub visual_category: Option<String>,
    /// Optional ambiance color category.
    pub color_category: Option<String>,
    /// First four-digit year found in the release date, if any.
    pub release_year: Option<String>,
    /// Display label `"<year> - <set>"`; the year prefix is empty when unknown.
    pub set_label: String,
}

/// Raw CSV row shape. Header names are part of the dataset contract.
#[derive(Debug, Deserialize)]
struct DatasetRow {
    full_name: String,
    name: String,
    #[serde(rename = "set")]
    set_name: String,
    #[serde(default)]
    number: Option<String>,
    #[serde(default)]
    illustrator: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    visual_category: Option<String>,
    #[serde(default)]
    color_category: Option<String>,
}

/// Summary of changes performed while loading a dataset.
///
/// All counters are additive for the processed file.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of catalog entries kept.
    pub rows_loaded: usize,
    /// Count of rows dropped because their full name was already seen.
    pub duplicate_keys_dropped: usize,
    /// Count of kept rows whose release date held no four-digit year.
    pub rows_missing_year: usize,
}

/// Immutable, fully derived view of one loaded dataset.
///
/// Built once by [`CatalogSnapshot::from_entries`]; afterwards only accessors
/// exist, so a published snapshot can be shared freely across threads.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    entries: Vec<CatalogEntry>,
    set_labels: Vec<String>,
    illustrators: Vec<String>,
    search_pool: Vec<String>,
}

impl CatalogSnapshot {
    /// Builds a snapshot from already-parsed entries, deriving the option
    /// lists and the search pool.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut set_labels = BTreeSet::new();
        let mut illustrators = BTreeSet::new();

        for entry in &entries {
            if !entry.set_name.is_empty() {
                set_labels.insert(entry.set_label.clone());
            }
            if !entry.illustrator.is_empty() {
                illustrators.insert(entry.illustrator.clone());
            }
        }

        // Pool order matters for tie-breaking in fuzzy lookup: all card names,
        // then set names, then collector numbers.
        let mut pool: IndexSet<String> = IndexSet::new();
        for entry in &entries {
            if !entry.name.is_empty() {
                pool.insert(entry.name.clone());
            }
        }
        for entry in &entries {
            if !entry.set_name.is_empty() {
                pool.insert(entry.set_name.clone());
            }
        }
        for entry in &entries {
            if !entry.number.is_empty() {
                pool.insert(entry.number.clone());
            }
        }

        Self {
            entries,
            set_labels: set_labels.into_iter().collect(),
            illustrators: illustrators.into_iter().collect(),
            search_pool: pool.into_iter().collect(),
        }
    }

    /// All catalog entries in dataset order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Distinct `"<year> - <set>"` labels, sorted, for the set filter widget.
    pub fn set_labels(&self) -> &[String] {
        &self.set_labels
    }

    /// Distinct illustrator credits, sorted, for the illustrator filter widget.
    pub fn illustrators(&self) -> &[String] {
        &self.illustrators
    }

    /// Deduplicated fuzzy-lookup candidates: names, then sets, then numbers.
    pub fn search_pool(&self) -> &[String] {
        &self.search_pool
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the snapshot holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").expect("valid year pattern"));

/// Extracts the first four-digit run from a release date string.
fn release_year(release_date: &str) -> Option<&str> {
    YEAR_RE.find(release_date).map(|m| m.as_str())
}

/// Builds the `"<year> - <set>"` display label; empty year prefix when unknown.
fn set_label(year: Option<&str>, set_name: &str) -> String {
    format!("{} - {}", year.unwrap_or(""), set_name)
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse a dataset from any CSV reader.
///
/// Steps:
/// - Deserialize each row; the header row is required, with columns
///   `full_name, name, set, number, illustrator, release_date, image_url,
///   visual_category, color_category` (the last six may be empty)
/// - Drop duplicate full names, keeping the first occurrence
/// - Derive release year and set label per entry
///
/// Errors:
/// - CSV parse failures (bad quoting, wrong field count, missing headers)
/// - A row whose full name is empty after trimming
pub fn load_dataset_reader<R: io::Read>(reader: R) -> anyhow::Result<(CatalogSnapshot, LoadReport)> {
    let mut report = LoadReport::default();
    let mut entries = Vec::new();
    let mut seen_keys: HashSet<String> = HashSet::new();

    let mut csv_reader = csv::Reader::from_reader(reader);
    for (idx, row) in csv_reader.deserialize::<DatasetRow>().enumerate() {
        let row = row.with_context(|| format!("parse dataset row {}", idx + 1))?;

        let full_name = row.full_name.trim().to_string();
        if full_name.is_empty() {
            bail!("dataset row {} has an empty full_name", idx + 1);
        }
        if !seen_keys.insert(full_name.clone()) {
            report.duplicate_keys_dropped += 1;
            continue;
        }

        let release_date = row.release_date.unwrap_or_default();
        let year = release_year(&release_date).map(str::to_owned);
        if year.is_none() {
            report.rows_missing_year += 1;
        }

        let set_name = row.set_name.trim().to_string();
        let label = set_label(year.as_deref(), &set_name);

        entries.push(CatalogEntry {
            full_name,
            name: row.name.trim().to_string(),
            set_name,
            number: row.number.map(|s| s.trim().to_string()).unwrap_or_default(),
            illustrator: row
                .illustrator
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            release_date,
            image_url: row.image_url.unwrap_or_default(),
            visual_category: clean_optional(row.visual_category),
            color_category: clean_optional(row.color_category),
            release_year: year,
            set_label: label,
        });
        report.rows_loaded += 1;
    }

    Ok((CatalogSnapshot::from_entries(entries), report))
}

/// Read a dataset CSV file from disk and parse it.
///
/// See [`load_dataset_reader`] for details on parsing and derivation.
pub fn load_dataset_path(
    path: impl AsRef<Path>,
) -> anyhow::Result<(CatalogSnapshot, LoadReport)> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("open dataset file {}", path.as_ref().display()))?;
    load_dataset_reader(io::BufReader::new(file))
}
