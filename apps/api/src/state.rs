use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use crate::config::Config;
use crate::profile::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Profile documents. Default: `PgProfileStore`.
    pub store: Arc<dyn ProfileStore>,
    /// Uploaded resume files.
    pub s3: S3Client,
    pub config: Config,
}
