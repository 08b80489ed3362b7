use crate::agents::InferenceClient;
use crate::config::Config;
use crate::db::ReviewStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: ReviewStore,
    pub inference: Arc<InferenceClient>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn from_config(
        config: Arc<Config>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let store = ReviewStore::open(&config.database_path).await?;
        let inference = Arc::new(InferenceClient::new(&config)?);

        Ok(Self {
            store,
            inference,
            config,
        })
    }
}
