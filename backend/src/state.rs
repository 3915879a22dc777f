use std::sync::Arc;

use tokio::sync::Mutex;

use crate::services::Console;

#[derive(Clone)]
pub struct AppState {
    pub console: Arc<Mutex<Console>>,
}

impl AppState {
    pub fn new(console: Console) -> Self {
        Self {
            console: Arc::new(Mutex::new(console)),
        }
    }
}
