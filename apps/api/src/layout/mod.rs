// Two-column resume pagination.
// Content is flattened into measured units, each column is filled page by page,
// then the per-page slices are assembled for the renderer.
// Pagination is CPU-bound and runs inside tokio::task::spawn_blocking from handlers.

pub mod assembler;
pub mod engine;
pub mod handlers;
pub mod height;
pub mod page_config;
pub mod paginator;
pub mod units;
pub mod validator;

pub use engine::{paginate_resume, OverflowPolicy, PaginationOptions};
pub use page_config::{default_page_config, PageConfig, PaperSize};
pub use units::Column;
