use crate::cycle_log::CycleLog;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub log: Arc<Mutex<CycleLog>>,
}

impl AppState {
    pub fn new(log: CycleLog) -> Self {
        Self {
            log: Arc::new(Mutex::new(log)),
        }
    }
}
