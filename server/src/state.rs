use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::store::Store;

/// Shared handles every request handler can reach. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, tokens: TokenVerifier) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
        }
    }
}
