use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::profile::models::{Profile, ProfileForm, Template};
use crate::profile::reader::{read_profile, read_template};

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Profile documents keyed by the identity provider's user id.
///
/// `fetch` hands back the raw document: records written by older clients may
/// still be in a legacy shape, so callers go through the dual-shape reader.
/// Carried in `AppState` as `Arc<dyn ProfileStore>`.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch(&self, uid: &str) -> Result<Option<Value>, AppError>;

    /// Replaces the whole document.
    async fn upsert(&self, uid: &str, profile: &Profile) -> Result<(), AppError>;

    /// Updates only `selectedTemplate`, creating the record if absent.
    async fn set_template(&self, uid: &str, template: Template) -> Result<(), AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL JSONB store
// ────────────────────────────────────────────────────────────────────────────

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn fetch(&self, uid: &str) -> Result<Option<Value>, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT uid, data, created_at, updated_at FROM profiles WHERE uid = $1",
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| {
            debug!(
                uid = %row.uid,
                created_at = %row.created_at,
                updated_at = %row.updated_at,
                "fetched profile row"
            );
            row.data
        }))
    }

    async fn upsert(&self, uid: &str, profile: &Profile) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (uid, data)
            VALUES ($1, $2)
            ON CONFLICT (uid)
            DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()
            "#,
        )
        .bind(uid)
        .bind(Json(profile))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_template(&self, uid: &str, template: Template) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (uid, data)
            VALUES ($1, jsonb_build_object('selectedTemplate', $2::text))
            ON CONFLICT (uid)
            DO UPDATE SET
                data = jsonb_set(profiles.data, '{selectedTemplate}', to_jsonb($2::text)),
                updated_at = NOW()
            "#,
        )
        .bind(uid)
        .bind(template.id())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Load / save
// ────────────────────────────────────────────────────────────────────────────

/// Loads a profile in canonical shape, whatever shape it was stored in.
pub async fn load_profile(store: &dyn ProfileStore, uid: &str) -> Result<Option<Profile>, AppError> {
    match store.fetch(uid).await? {
        Some(doc) => Ok(Some(read_profile(&doc)?)),
        None => Ok(None),
    }
}

/// Normalizes a submitted form and writes it as the user's whole profile.
/// The stored template survives a form that does not choose one.
pub async fn save_form(
    store: &dyn ProfileStore,
    uid: &str,
    form: &ProfileForm,
) -> Result<Profile, AppError> {
    let current = match form.selected_template {
        Some(template) => template,
        None => match store.fetch(uid).await? {
            Some(doc) => read_template(doc.get("selectedTemplate"))?,
            None => Template::default(),
        },
    };

    let profile = form.normalize(current);
    store.upsert(uid, &profile).await?;
    info!(uid, template = profile.selected_template.id(), "saved profile");
    Ok(profile)
}
