//! Axum route handler for resume import.

use aws_sdk_s3::primitives::ByteStream;
use axum::extract::{Multipart, Query, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::profile::handlers::UserIdQuery;
use crate::profile::models::{Profile, ProfileForm};
use crate::profile::reader::read_profile;
use crate::resume::extract::extract_text;
use crate::resume::sections::{parse_resume, ParsedResume};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    /// Raw importer output, before normalization.
    pub parsed: ParsedResume,
    pub profile: Profile,
    pub form: ProfileForm,
}

/// Pulls the `resume` file out of a multipart body, ignoring other fields.
async fn read_resume_field(mp: &mut Multipart, max_bytes: usize) -> Result<Bytes, AppError> {
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read resume upload: {e}")))?;
        if data.is_empty() {
            return Err(AppError::Validation("Resume upload is empty".to_string()));
        }
        if data.len() > max_bytes {
            return Err(AppError::Validation(format!(
                "Resume exceeds the {max_bytes} byte limit"
            )));
        }
        return Ok(data);
    }
    Err(AppError::Validation(format!(
        "Multipart field '{RESUME_FIELD}' is required"
    )))
}

/// POST /api/v1/resume/parse
///
/// Extracts and parses the uploaded PDF, stores the file, and returns the
/// result as a normalized profile plus its form view. Nothing is saved to
/// the profile; the user reviews the form first.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    mut mp: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let uid = params.uid()?;
    let pdf = read_resume_field(&mut mp, state.config.max_resume_bytes).await?;

    let text = extract_text(pdf.clone()).await?;
    let parsed = parse_resume(&text);

    let key = format!("resumes/{}/{}.pdf", uid, Uuid::new_v4());
    state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(&key)
        .body(ByteStream::from(pdf))
        .content_type("application/pdf")
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Resume upload failed: {e}")))?;

    info!("Uploaded resume to s3://{}/{}", state.config.s3_bucket, key);

    let mut profile = read_profile(&parsed.document())?;
    profile.resume = state.config.object_url(&key);
    let form = ProfileForm::from_profile(&profile);

    Ok(Json(ParseResumeResponse {
        parsed,
        profile,
        form,
    }))
}
