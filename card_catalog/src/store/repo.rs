//! SQLite implementation of [`CollectionRepo`].

use diesel::prelude::*;
use tracing::debug;

use crate::{
    models::{CardPreference, NewCardPreference, NewUserProfile, UserProfile},
    store::{CollectionRepo, NewProfile, StoreError, StoreResult},
};

use crate::schema::card_preferences::dsl as cp;
use crate::schema::users::dsl as u;

/// Repository for managing collector profiles and card flags in a SQLite database.
pub struct SqliteRepo;

impl SqliteRepo {
    /// Creates a stateless repository handle; connections are passed per call.
    pub fn new() -> Self {
        Self
    }
}

fn validate_profile(profile: &NewProfile<'_>) -> Result<(), StoreError> {
    if profile.first_name.trim().is_empty() {
        return Err(StoreError::InvalidProfile {
            reason: "first name must not be empty".into(),
        });
    }
    if profile.last_name.trim().is_empty() {
        return Err(StoreError::InvalidProfile {
            reason: "last name must not be empty".into(),
        });
    }
    Ok(())
}

impl CollectionRepo for SqliteRepo {
    fn create_profile(
        &self,
        conn: &mut diesel::SqliteConnection,
        profile: &NewProfile<'_>,
    ) -> StoreResult<i64> {
        // Validation happens before any write so a rejected profile leaves no row.
        validate_profile(profile)?;

        let row = NewUserProfile {
            first_name: profile.first_name,
            last_name: profile.last_name,
            age: profile.age,
            portrait_bytes: profile.portrait,
        };

        // INSERT .. RETURNING id (SQLite 3.35+)
        let profile_id_i32: i32 = diesel::insert_into(u::users)
            .values(&row)
            .returning(u::id)
            .get_result(conn)?;

        debug!(profile_id = profile_id_i32, "profile created");
        Ok(profile_id_i32 as i64)
    }

    fn find_profile(
        &self,
        conn: &mut diesel::SqliteConnection,
        profile_id: i64,
    ) -> StoreResult<Option<UserProfile>> {
        let profile = u::users
            .find(profile_id as i32)
            .select(UserProfile::as_select())
            .first(conn)
            .optional()?;

        Ok(profile)
    }

    fn list_profiles(&self, conn: &mut diesel::SqliteConnection) -> StoreResult<Vec<UserProfile>> {
        let profiles = u::users
            .order(u::id.asc())
            .select(UserProfile::as_select())
            .load(conn)?;

        Ok(profiles)
    }

    fn delete_profile(
        &self,
        conn: &mut diesel::SqliteConnection,
        profile_id: i64,
    ) -> StoreResult<()> {
        let uid = profile_id as i32;

        // The FK cascade already covers flags on tuned connections; delete them
        // explicitly as well so a plain connection cannot leave orphan rows.
        conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
            diesel::delete(cp::card_preferences.filter(cp::user_id.eq(uid))).execute(conn)?;
            let removed = diesel::delete(u::users.filter(u::id.eq(uid))).execute(conn)?;
            debug!(profile_id, removed, "profile delete");
            Ok(())
        })?;

        Ok(())
    }

    fn preferences(
        &self,
        conn: &mut diesel::SqliteConnection,
        profile_id: i64,
    ) -> StoreResult<Vec<CardPreference>> {
        let rows = cp::card_preferences
            .filter(cp::user_id.eq(profile_id as i32))
            .select(CardPreference::as_select())
            .load(conn)?;

        Ok(rows)
    }

    fn set_preference(
        &self,
        conn: &mut diesel::SqliteConnection,
        profile_id: i64,
        card_key: &str,
        wanted: bool,
        owned: bool,
    ) -> StoreResult<()> {
        let row = NewCardPreference {
            user_id: profile_id as i32,
            card_key,
            wanted,
            owned,
        };

        // INSERT .. ON CONFLICT (user_id, card_key) DO UPDATE: last write wins.
        diesel::insert_into(cp::card_preferences)
            .values(&row)
            .on_conflict((cp::user_id, cp::card_key))
            .do_update()
            .set((cp::wanted.eq(wanted), cp::owned.eq(owned)))
            .execute(conn)?;

        debug!(profile_id, card_key, wanted, owned, "card flags upserted");
        Ok(())
    }

    fn set_wanted(
        &self,
        conn: &mut diesel::SqliteConnection,
        profile_id: i64,
        card_key: &str,
        value: bool,
    ) -> StoreResult<()> {
        // Fresh rows start with owned=false; on conflict only wanted changes.
        let row = NewCardPreference {
            user_id: profile_id as i32,
            card_key,
            wanted: value,
            owned: false,
        };

        diesel::insert_into(cp::card_preferences)
            .values(&row)
            .on_conflict((cp::user_id, cp::card_key))
            .do_update()
            .set(cp::wanted.eq(value))
            .execute(conn)?;

        debug!(profile_id, card_key, value, "wanted flag set");
        Ok(())
    }

    fn set_owned(
        &self,
        conn: &mut diesel::SqliteConnection,
        profile_id: i64,
        card_key: &str,
        value: bool,
    ) -> StoreResult<()> {
        // Fresh rows start with wanted=false; on conflict only owned changes.
        let row = NewCardPreference {
            user_id: profile_id as i32,
            card_key,
            wanted: false,
            owned: value,
        };

        diesel::insert_into(cp::card_preferences)
            .values(&row)
            .on_conflict((cp::user_id, cp::card_key))
            .do_update()
            .set(cp::owned.eq(value))
            .execute(conn)?;

        debug!(profile_id, card_key, value, "owned flag set");
        Ok(())
    }
}
