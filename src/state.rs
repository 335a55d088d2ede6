//! Shared application state for ordering-helper-backend.

use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::external::oidc::JwksCache;

/// Cloned into every request handler; every field is itself cheap to clone
/// (pool, reqwest client, and AWS client are all internally `Arc`-backed).
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub http: reqwest::Client,
    pub s3: S3Client,
    pub config: Arc<Config>,
    /// Google's public signing keys for OIDC verification (C8 `process_task`), refreshed lazily.
    pub jwks: Arc<RwLock<JwksCache>>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let pool = PgPool::connect(&config.database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let s3 = S3Client::from_conf(
            aws_sdk_s3::config::Builder::from(&aws_config)
                .endpoint_url(&config.object_storage_endpoint)
                .force_path_style(true)
                .region(aws_sdk_s3::config::Region::new(config.gcs_region.clone()))
                .build(),
        );

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(240))
            .build()?;

        Ok(Self {
            pool,
            http,
            s3,
            config: Arc::new(config),
            jwks: Arc::new(RwLock::new(JwksCache::empty())),
        })
    }
}
