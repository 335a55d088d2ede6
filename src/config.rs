//! Service configuration, loaded once from the environment at startup.

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub environment: String,

    pub vision_api_key: String,
    pub vision_endpoint: String,
    pub translation_api_key: String,
    pub tts_api_key: String,
    pub tts_endpoint: String,

    pub line_channel_access_token: String,
    pub line_channel_secret: String,

    pub gcs_bucket_name: String,
    pub gcs_region: String,
    /// S3-interop endpoint used to reach the GCS bucket (see DESIGN.md §B.5).
    pub object_storage_endpoint: String,
    pub base_url: String,

    pub tasks_invoker_service_account: String,
    pub cloud_run_service_url: String,

    pub voice_scratch_dir: String,
    pub voice_file_max_age_mins: i64,

    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            vision_api_key: std::env::var("VISION_API_KEY").unwrap_or_default(),
            vision_endpoint: std::env::var("VISION_ENDPOINT")
                .unwrap_or_else(|_| "https://vision.googleapis.com/v1/images:annotate".into()),
            translation_api_key: std::env::var("TRANSLATION_API_KEY").unwrap_or_default(),
            tts_api_key: std::env::var("TTS_API_KEY").unwrap_or_default(),
            tts_endpoint: std::env::var("TTS_ENDPOINT")
                .unwrap_or_else(|_| "https://texttospeech.googleapis.com/v1/text:synthesize".into()),

            line_channel_access_token: std::env::var("LINE_CHANNEL_ACCESS_TOKEN")
                .unwrap_or_default(),
            line_channel_secret: std::env::var("LINE_CHANNEL_SECRET").unwrap_or_default(),

            gcs_bucket_name: std::env::var("GCS_BUCKET_NAME")
                .unwrap_or_else(|_| "ordering-helper-voice-files".into()),
            gcs_region: std::env::var("GCS_REGION").unwrap_or_else(|_| "asia-east1".into()),
            object_storage_endpoint: std::env::var("OBJECT_STORAGE_ENDPOINT")
                .unwrap_or_else(|_| "https://storage.googleapis.com".into()),
            base_url: std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into()),

            tasks_invoker_service_account: std::env::var("TASKS_INVOKER_SERVICE_ACCOUNT")
                .unwrap_or_default(),
            cloud_run_service_url: std::env::var("CLOUD_RUN_SERVICE_URL").unwrap_or_default(),

            voice_scratch_dir: std::env::var("VOICE_SCRATCH_DIR")
                .unwrap_or_else(|_| "/tmp/voices".into()),
            voice_file_max_age_mins: std::env::var("VOICE_FILE_MAX_AGE_MINS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),

            cors_allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_default(),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
