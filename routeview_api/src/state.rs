use std::sync::Arc;

use routeview_datasets::{
    cache::DocumentCache,
    error::DatasetError,
    registry::{DatasetQuery, DatasetRegistry, RegistryConfig},
};
use routeview_geometry::route_geometry::PrecisionPolicy;
use routeview_live::hub::BroadcastHub;
use serde_json::Value;

pub struct AppState {
    pub registry: DatasetRegistry,
    pub cache: DocumentCache,
    pub hub: BroadcastHub,
    pub precision_policy: PrecisionPolicy,
}

impl AppState {
    pub fn new(registry: RegistryConfig, precision_policy: PrecisionPolicy) -> Self {
        AppState {
            registry: DatasetRegistry::new(registry),
            cache: DocumentCache::new(),
            hub: BroadcastHub::new(),
            precision_policy,
        }
    }

    pub async fn load_document(&self, query: &DatasetQuery) -> Result<Arc<Value>, DatasetError> {
        let path = self.registry.resolve(query).await?;
        self.cache.load(&path).await
    }
}
