//! Axum route handlers for the Profile API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::profile::models::{Profile, ProfileForm, Template};
use crate::profile::normalize::form_from_document;
use crate::profile::store::{load_profile, save_form};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: String,
}

impl UserIdQuery {
    pub(crate) fn uid(&self) -> Result<&str, AppError> {
        let uid = self.user_id.trim();
        if uid.is_empty() {
            return Err(AppError::Validation("user_id must not be empty".to_string()));
        }
        Ok(uid)
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Profile,
    pub form: ProfileForm,
}

#[derive(Debug, Serialize)]
pub struct SaveProfileResponse {
    pub message: String,
    pub profile: Profile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRequest {
    pub selected_template: Template,
}

#[derive(Debug, Deserialize)]
pub struct PortfolioQuery {
    pub template: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub template: Template,
    pub profile: Profile,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProfileResponse>, AppError> {
    let uid = params.uid()?;
    let profile = load_profile(state.store.as_ref(), uid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile for user {uid} not found")))?;
    let form = ProfileForm::from_profile(&profile);
    Ok(Json(ProfileResponse { profile, form }))
}

/// POST /api/v1/profile
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(form): Json<ProfileForm>,
) -> Result<Json<SaveProfileResponse>, AppError> {
    let uid = params.uid()?;
    let profile = save_form(state.store.as_ref(), uid, &form).await?;
    Ok(Json(SaveProfileResponse {
        message: "Profile saved successfully".to_string(),
        profile,
    }))
}

/// POST /api/v1/profile/preview
pub async fn handle_preview_profile(Json(form): Json<ProfileForm>) -> Json<Profile> {
    Json(form.normalize(Template::default()))
}

/// POST /api/v1/profile/form
pub async fn handle_profile_form(Json(doc): Json<Value>) -> Result<Json<ProfileForm>, AppError> {
    Ok(Json(form_from_document(&doc)?))
}

/// PATCH /api/v1/profile/template
pub async fn handle_set_template(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(req): Json<TemplateRequest>,
) -> Result<StatusCode, AppError> {
    let uid = params.uid()?;
    state.store.set_template(uid, req.selected_template).await?;
    info!(uid, template = req.selected_template.id(), "selected template");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/portfolio/:user_id
pub async fn handle_get_portfolio(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<PortfolioQuery>,
) -> Result<Json<PortfolioResponse>, AppError> {
    let profile = load_profile(state.store.as_ref(), &user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Portfolio for user {user_id} not found")))?;
    let template = params
        .template
        .as_deref()
        .map(Template::from_id)
        .unwrap_or(profile.selected_template);
    Ok(Json(PortfolioResponse { template, profile }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::store::tests::MemoryProfileStore;
    use crate::state::tests::test_state;
    use serde_json::json;
    use std::sync::Arc;

    fn query(uid: &str) -> Query<UserIdQuery> {
        Query(UserIdQuery {
            user_id: uid.to_string(),
        })
    }

    #[tokio::test]
    async fn test_get_profile_not_found() {
        let state = test_state(Arc::new(MemoryProfileStore::default()));
        let err = handle_get_profile(State(state), query("ghost")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_blank_user_id_rejected() {
        let state = test_state(Arc::new(MemoryProfileStore::default()));
        let err = handle_get_profile(State(state), query("  ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_save_then_get_returns_form_view() {
        let state = test_state(Arc::new(MemoryProfileStore::default()));
        let form = ProfileForm {
            name: "Ada".into(),
            skills: "Languages: Rust, Go".into(),
            ..Default::default()
        };
        let Json(saved) = handle_save_profile(State(state.clone()), query("u1"), Json(form))
            .await
            .unwrap();
        assert_eq!(saved.profile.skills[0].items, vec!["Rust", "Go"]);

        let Json(loaded) = handle_get_profile(State(state), query("u1")).await.unwrap();
        assert_eq!(loaded.profile, saved.profile);
        assert_eq!(loaded.form.skills, "Languages: Rust, Go");
    }

    #[tokio::test]
    async fn test_portfolio_template_override() {
        let store = MemoryProfileStore::with_doc(
            "u1",
            json!({"name": "Ada", "selectedTemplate": "Template2"}),
        );
        let state = test_state(Arc::new(store));

        let Json(stored) = handle_get_portfolio(
            State(state.clone()),
            Path("u1".to_string()),
            Query(PortfolioQuery { template: None }),
        )
        .await
        .unwrap();
        assert_eq!(stored.template, Template::SidebarClassic);

        let Json(overridden) = handle_get_portfolio(
            State(state),
            Path("u1".to_string()),
            Query(PortfolioQuery {
                template: Some("PortfolioModern".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(overridden.template, Template::AdvancedPortfolio);
    }

    #[tokio::test]
    async fn test_set_template_updates_only_template() {
        let store = Arc::new(MemoryProfileStore::with_doc(
            "u1",
            json!({"name": "Ada", "skills": "Rust"}),
        ));
        let state = test_state(store.clone());
        let status = handle_set_template(
            State(state),
            query("u1"),
            Json(TemplateRequest {
                selected_template: Template::CardPortfolio,
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(
            store.doc("u1").unwrap(),
            json!({"name": "Ada", "skills": "Rust", "selectedTemplate": "Template3"})
        );
    }

    #[tokio::test]
    async fn test_profile_form_rejects_wrong_types() {
        let err = handle_profile_form(Json(json!({"projects": 42}))).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
