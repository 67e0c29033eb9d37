use crate::config::Config;
use crate::layout::{PageConfig, PaginationOptions};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    #[allow(dead_code)]
    pub config: Config,
    /// Page geometry and font metrics for the configured paper size.
    pub page_config: PageConfig,
    /// Server-wide overflow policy; requests may override `overflow`.
    pub options: PaginationOptions,
}
