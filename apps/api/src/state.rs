use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::chat::CandidateSuggester;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Object store for uploaded CVs.
    pub s3: S3Client,
    pub config: Config,
    /// Chat backend. Default: the workflow webhook client.
    pub suggester: Arc<dyn CandidateSuggester>,
}
