use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{ChatService, MarkerStore, SourceHostService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub source_host: Arc<dyn SourceHostService>,
    pub chat: Arc<dyn ChatService>,
    pub markers: Arc<dyn MarkerStore>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        source_host: Arc<dyn SourceHostService>,
        chat: Arc<dyn ChatService>,
        markers: Arc<dyn MarkerStore>,
    ) -> Self {
        Self {
            config,
            source_host,
            chat,
            markers,
        }
    }
}
