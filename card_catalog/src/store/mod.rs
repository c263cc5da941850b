//! Profile + card preference repository (SQLite).
//!
//! The store keeps two kinds of state: collector profiles ([`crate::models::UserProfile`])
//! and per-profile card flags ([`crate::models::CardPreference`]). Card flags are keyed
//! by `(user_id, card_key)` where `card_key` is the card's unique full-name string in
//! the catalog dataset; writes are upserts so flipping a flag twice is idempotent.

use crate::models::{CardPreference, UserProfile};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while interacting with the preference store.
pub enum StoreError {
    #[error("invalid profile: {reason}")]
    /// Raised when profile fields fail validation; nothing is written.
    InvalidProfile {
        /// Which field was rejected and why.
        reason: String,
    },
}

/// Result type used throughout the preference store for fallible operations.
pub type StoreResult<T> = anyhow::Result<T>;

/// A profile to be created, borrowed from caller-owned data.
#[derive(Debug, Clone)]
pub struct NewProfile<'a> {
    /// Given name; must be non-empty after trimming.
    pub first_name: &'a str,
    /// Family name; must be non-empty after trimming.
    pub last_name: &'a str,
    /// Collector age in years.
    pub age: i32,
    /// Optional portrait image bytes, stored verbatim.
    pub portrait: Option<&'a [u8]>,
}

/// Portable surface, SQLite implementation lives in `repo.rs`.
pub trait CollectionRepo {
    /// Validates and inserts a new profile, returning its identifier.
    ///
    /// Fails with [`StoreError::InvalidProfile`] (and writes nothing) when a
    /// name field is empty after trimming.
    fn create_profile(
        &self,
        conn: &mut diesel::SqliteConnection,
        profile: &NewProfile<'_>,
    ) -> StoreResult<i64>;

    /// Fetches a single profile by identifier; `None` when it does not exist.
    fn find_profile(
        &self,
        conn: &mut diesel::SqliteConnection,
        profile_id: i64,
    ) -> StoreResult<Option<UserProfile>>;

    /// Lists all profiles in creation order.
    fn list_profiles(&self, conn: &mut diesel::SqliteConnection) -> StoreResult<Vec<UserProfile>>;

    /// Deletes a profile and, via FK cascade, all of its card flags.
    ///
    /// Deleting an id that no longer exists is a silent no-op.
    fn delete_profile(
        &self,
        conn: &mut diesel::SqliteConnection,
        profile_id: i64,
    ) -> StoreResult<()>;

    /// Returns every card flag row recorded for the given profile.
    fn preferences(
        &self,
        conn: &mut diesel::SqliteConnection,
        profile_id: i64,
    ) -> StoreResult<Vec<CardPreference>>;

    /// Inserts or overwrites both flags for `(profile_id, card_key)`.
    fn set_preference(
        &self,
        conn: &mut diesel::SqliteConnection,
        profile_id: i64,
        card_key: &str,
        wanted: bool,
        owned: bool,
    ) -> StoreResult<()>;

    /// Sets only the wanted flag, preserving the owned flag on an existing row.
    fn set_wanted(
        &self,
        conn: &mut diesel::SqliteConnection,
        profile_id: i64,
        card_key: &str,
        value: bool,
    ) -> StoreResult<()>;

    /// Sets only the owned flag, preserving the wanted flag on an existing row.
    fn set_owned(
        &self,
        conn: &mut diesel::SqliteConnection,
        profile_id: i64,
        card_key: &str,
        value: bool,
    ) -> StoreResult<()>;
}

pub mod repo;

pub use repo::SqliteRepo;
