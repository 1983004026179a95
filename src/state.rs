//! Shared application state for all routes.

use crate::service::CampRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn CampRepository>,
}

impl AppState {
    pub fn new<R: CampRepository + 'static>(repo: R) -> Self {
        Self { repo: Arc::new(repo) }
    }
}
