pub mod faq;
pub mod forms;
pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::{search::FaqSearchService, state::SubmissionStore};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SubmissionStore>,
    pub faq: Arc<FaqSearchService>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn SubmissionStore>, faq: Arc<FaqSearchService>) -> Self {
        Self {
            store,
            faq,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
