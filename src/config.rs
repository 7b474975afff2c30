use std::time::Duration;

use kyc::DEFAULT_PAGE_SIZE;

/// Tunables for the interactive console.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Rows per page when the console opens.
    pub page_size: u32,
    /// Target render interval (10 FPS).
    pub render_interval: Duration,
    /// Maximum log lines retained in the log panel.
    pub log_capacity: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            render_interval: Duration::from_millis(100),
            log_capacity: 500,
        }
    }
}
