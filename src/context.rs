use std::sync::Arc;

use crate::services::{BoardService, BugTrackerService, TokenSource};

#[derive(Clone)]
pub struct AppContext {
    pub board: Arc<dyn BoardService>,
    pub tracker: Arc<dyn BugTrackerService>,
    pub token_source: Arc<dyn TokenSource>,
}

impl AppContext {
    pub fn new(
        board: Arc<dyn BoardService>,
        tracker: Arc<dyn BugTrackerService>,
        token_source: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            board,
            tracker,
            token_source,
        }
    }
}
