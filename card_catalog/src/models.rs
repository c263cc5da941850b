//! Diesel models mapping to the database schema.
//!
//! These types mirror the tables defined in the embedded migrations and in
//! [`crate::schema`] for use with Diesel’s Queryable/Insertable APIs:
//! - [`crate::schema::users`]: collector profiles
//! - [`crate::schema::card_preferences`]: per-user wanted/owned flags keyed by card
//!
//! See migrations for constraints (composite primary key on `card_preferences`
//! and the `ON DELETE CASCADE` FK back to `users`).

use crate::schema::*;
use diesel::prelude::*;

/// A row in [`crate::schema::users`]: one collector profile.
///
/// Used for SELECT operations (Queryable, Identifiable, Selectable).
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable)]
#[diesel(table_name = users, check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserProfile {
    /// Database primary key (SQLite INTEGER PRIMARY KEY rowid). Populated by the DB.
    pub id: i32,
    /// Given name; non-empty after trimming.
    pub first_name: String,
    /// Family name; non-empty after trimming.
    pub last_name: String,
    /// Collector age in years.
    pub age: i32,
    /// Optional portrait image bytes, stored verbatim.
    pub portrait_bytes: Option<Vec<u8>>,
}

/// Insertable form of [`UserProfile`] for creating new rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserProfile<'a> {
    /// Given name; non-empty after trimming.
    pub first_name: &'a str,
    /// Family name; non-empty after trimming.
    pub last_name: &'a str,
    /// Collector age in years.
    pub age: i32,
    /// Optional portrait image bytes, stored verbatim.
    pub portrait_bytes: Option<&'a [u8]>,
}

/// A row in [`crate::schema::card_preferences`]: one user's flags for one card.
///
/// Keyed by `(user_id, card_key)`; cleaned up via FK `ON DELETE CASCADE`.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Associations, Selectable)]
#[diesel(table_name = card_preferences, check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(primary_key(user_id, card_key))]
#[diesel(belongs_to(UserProfile, foreign_key = user_id))]
pub struct CardPreference {
    /// FK to [`UserProfile::id`].
    pub user_id: i32,
    /// Card identifier: the card's unique full-name string from the catalog dataset.
    pub card_key: String,
    /// Whether the user wants this card.
    pub wanted: bool,
    /// Whether the user owns this card.
    pub owned: bool,
}

/// Insertable form of [`CardPreference`].
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = card_preferences)]
pub struct NewCardPreference<'a> {
    /// FK to [`UserProfile::id`].
    pub user_id: i32,
    /// Card identifier: the card's unique full-name string from the catalog dataset.
    pub card_key: &'a str,
    /// Whether the user wants this card.
    pub wanted: bool,
    /// Whether the user owns this card.
    pub owned: bool,
}
