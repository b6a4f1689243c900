//! Shared application state handed to every route group.

use crate::config::Config;
use crate::security::TokenKeys;
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: &Config) -> Self {
        Self {
            store,
            tokens: Arc::new(TokenKeys::from_config(config)),
        }
    }
}
