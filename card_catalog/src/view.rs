//! Derived browse views over the catalog.
//!
//! The pipeline is pure and allocation-light: annotate catalog entries with a
//! profile's stored flags, filter by widget selections and text, optionally
//! sort the collection sheet, then slice one page for display. Source data is
//! never mutated; every step yields a fresh view over borrowed entries.
//!
//! Order of operations mirrors the browse screen: set labels, illustrators,
//! text, then the ownership mode. Filtering preserves catalog order; with no
//! active predicate the input passes through unchanged.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use anyhow::bail;

use crate::dataset::CatalogEntry;
use crate::models::CardPreference;
use crate::search::normalize;

/// Which ownership slice of the catalog to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Every catalog entry.
    #[default]
    All,
    /// Cards flagged wanted and not owned; the shopping list.
    Wishlist,
    /// Cards flagged owned; the collection sheet.
    Owned,
}

/// Display/parse for CLI ergonomics (`"all"`, `"wishlist"`, `"owned"`)
impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViewMode::All => "all",
            ViewMode::Wishlist => "wishlist",
            ViewMode::Owned => "owned",
        };
        f.write_str(s)
    }
}

impl FromStr for ViewMode {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ViewMode::All),
            "wishlist" => Ok(ViewMode::Wishlist),
            "owned" => Ok(ViewMode::Owned),
            _ => bail!("unknown view mode: {s}"),
        }
    }
}

/// Sort dimension for the collection sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Group by visual category (scene descriptor).
    VisualCategory,
    /// Group by ambiance color category.
    ColorCategory,
}

/// Display/parse for CLI ergonomics (`"visual"`, `"color"`)
impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortKey::VisualCategory => "visual",
            SortKey::ColorCategory => "color",
        };
        f.write_str(s)
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "visual" => Ok(SortKey::VisualCategory),
            "color" => Ok(SortKey::ColorCategory),
            _ => bail!("unknown sort key: {s}"),
        }
    }
}

/// Filter selections for one render of the browse screen.
///
/// Every field is optional; the default query selects the whole catalog.
#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    /// Keep only cards whose set label is in this list; empty means no constraint.
    pub set_labels: Vec<String>,
    /// Keep only cards whose illustrator is in this list; empty means no constraint.
    pub illustrators: Vec<String>,
    /// Accent-insensitive substring matched against card name, set name, and number.
    pub text: Option<String>,
    /// Which ownership slice of the catalog to show.
    pub mode: ViewMode,
}

/// One catalog entry annotated with the active profile's flags.
#[derive(Debug, Clone)]
pub struct CardView<'a> {
    /// Catalog entry backing this row.
    pub entry: &'a CatalogEntry,
    /// True when the profile wants this card.
    pub wanted: bool,
    /// True when the profile owns this card.
    pub owned: bool,
}

/// Joins catalog entries with stored card flags, in catalog order.
///
/// Entries without a stored row default to not-wanted/not-owned. Stored rows
/// whose key matches no catalog entry are ignored.
pub fn annotate<'a>(
    entries: &'a [CatalogEntry],
    preferences: &[CardPreference],
) -> Vec<CardView<'a>> {
    let flags: HashMap<&str, (bool, bool)> = preferences
        .iter()
        .map(|p| (p.card_key.as_str(), (p.wanted, p.owned)))
        .collect();

    entries
        .iter()
        .map(|entry| {
            let (wanted, owned) = flags
                .get(entry.full_name.as_str())
                .copied()
                .unwrap_or((false, false));
            CardView {
                entry,
                wanted,
                owned,
            }
        })
        .collect()
}

/// Applies the query's predicates in screen order, preserving card order.
///
/// Selection lists use exact membership; the text predicate uses the folded
/// substring match from [`crate::search::normalize`] over name, set, and
/// number. Text that folds to an empty string is no constraint at all.
pub fn filter_cards<'a>(mut cards: Vec<CardView<'a>>, query: &ViewQuery) -> Vec<CardView<'a>> {
    if !query.set_labels.is_empty() {
        let allowed: HashSet<&str> = query.set_labels.iter().map(String::as_str).collect();
        cards.retain(|c| allowed.contains(c.entry.set_label.as_str()));
    }

    if !query.illustrators.is_empty() {
        let allowed: HashSet<&str> = query.illustrators.iter().map(String::as_str).collect();
        cards.retain(|c| allowed.contains(c.entry.illustrator.as_str()));
    }

    if let Some(text) = query.text.as_deref() {
        let needle = normalize(text);
        if !needle.is_empty() {
            cards.retain(|c| {
                normalize(&c.entry.name).contains(&needle)
                    || normalize(&c.entry.set_name).contains(&needle)
                    || normalize(&c.entry.number).contains(&needle)
            });
        }
    }

    match query.mode {
        ViewMode::All => {}
        ViewMode::Wishlist => cards.retain(|c| c.wanted && !c.owned),
        ViewMode::Owned => cards.retain(|c| c.owned),
    }

    cards
}

/// Sorts the collection sheet by the given keys, applied left to right.
///
/// The sort is stable, so equal cards keep their catalog order. With no keys
/// the slice is left untouched.
pub fn sort_for_collection(cards: &mut [CardView<'_>], keys: &[SortKey]) {
    if keys.is_empty() {
        return;
    }

    cards.sort_by(|a, b| {
        for &key in keys {
            let ord = compare_optional(key_text(a, key), key_text(b, key));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

fn key_text<'v>(card: &'v CardView<'_>, key: SortKey) -> Option<&'v str> {
    match key {
        SortKey::VisualCategory => card.entry.visual_category.as_deref(),
        SortKey::ColorCategory => card.entry.color_category.as_deref(),
    }
}

// Uncategorized cards sort after categorized ones.
fn compare_optional(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Number of pages needed for `total` items; never less than one.
///
/// An empty result still renders as a single empty page.
pub fn page_count(total: usize, page_size: NonZeroUsize) -> usize {
    total.div_ceil(page_size.get()).max(1)
}

/// Returns the slice for the 1-based `page_number`.
///
/// A page past the end is empty; page 0 is treated as page 1. Callers are
/// expected to validate page numbers against [`page_count`] before rendering.
pub fn paginate<T>(items: &[T], page_size: NonZeroUsize, page_number: usize) -> &[T] {
    let size = page_size.get();
    let start = page_number
        .saturating_sub(1)
        .saturating_mul(size)
        .min(items.len());
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}
