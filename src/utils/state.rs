use crate::config::Config;
use crate::storage::dynamodb::DynamoHistoryStore;
use crate::storage::history::HistoryStore;
use crate::storage::localfs::LocalFsObjectStore;
use crate::storage::memory::MemoryHistoryStore;
use crate::storage::object::ObjectStore;
use crate::storage::s3::S3ObjectStore;
use aws_config::Region;
use std::sync::Arc;

/// Shared handles for the pipeline services. Backends are chosen once from
/// the config and injected everywhere as trait objects.
#[derive(Clone)]
pub struct AppState {
    pub object_store: Arc<dyn ObjectStore>,
    pub history: Arc<dyn HistoryStore>,
    pub http: reqwest::Client,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> Self {
        let aws_conf = load_aws_config(&config).await;

        let object_store: Arc<dyn ObjectStore> = match config.object_store.as_str() {
            "FILESYSTEM" => Arc::new(LocalFsObjectStore::new(&config.root_dir)),
            _ => Arc::new(S3ObjectStore::new(&aws_conf, config.region.clone())),
        };
        let history: Arc<dyn HistoryStore> = match config.history_store.as_str() {
            "MEMORY" => Arc::new(MemoryHistoryStore::new()),
            _ => Arc::new(DynamoHistoryStore::new(&aws_conf, config.table.clone())),
        };

        Self::with_backends(config, object_store, history)
    }

    pub fn with_backends(
        config: Config,
        object_store: Arc<dyn ObjectStore>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            object_store,
            history,
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }
}

async fn load_aws_config(config: &Config) -> aws_config::SdkConfig {
    let mut loader = aws_config::ConfigLoader::default()
        .credentials_provider(aws_config::environment::EnvironmentVariableCredentialsProvider::new())
        .region(Region::new(config.region.clone()));
    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }
    loader.load().await
}
