use std::sync::Arc;

use crate::auth::TokenService;
use crate::database::Store;

/// Shared, immutable per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, tokens: TokenService) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
        }
    }
}
