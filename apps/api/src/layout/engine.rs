//! Pagination pipeline: units → column passes → assembled pages, with the
//! page-limit overflow policy applied on top.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::LayoutError;
use crate::layout::assembler::{assemble_pages, PageContent};
use crate::layout::height::{estimate_header_height, estimate_summary_height};
use crate::layout::page_config::PageConfig;
use crate::layout::paginator::{
    paginate_columns, ColumnsOutcome, FillSettings, PageBudgets, PageHeader, PaginationObserver,
};
use crate::layout::units::{build_content_units, split_columns, Column};
use crate::models::resume::ResumeData;

// ────────────────────────────────────────────────────────────────────────────
// Options
// ────────────────────────────────────────────────────────────────────────────

/// What to do when a column needs more than `max_pages_per_column` pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Keep the pages that fit, drop the rest and log a warning.
    #[default]
    Truncate,
    /// Fail with `LayoutError::PageLimitExceeded`.
    Error,
    /// Shrink every font step by step and re-run; truncate once the minimum scale is reached.
    RetryWithSmallerFont,
}

impl std::str::FromStr for OverflowPolicy {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truncate" => Ok(OverflowPolicy::Truncate),
            "error" => Ok(OverflowPolicy::Error),
            "retry-with-smaller-font" | "retry" => Ok(OverflowPolicy::RetryWithSmallerFont),
            other => Err(LayoutError::InvalidConfig(format!(
                "unknown overflow policy '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationOptions {
    pub overflow: OverflowPolicy,
    /// Font scale multiplier applied per retry.
    pub font_step: f32,
    /// Smallest font scale a retry may reach.
    pub min_font_scale: f32,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        PaginationOptions {
            overflow: OverflowPolicy::Truncate,
            font_step: 0.9,
            min_font_scale: 0.7,
        }
    }
}

impl PaginationOptions {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.font_step > 0.0 && self.font_step < 1.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "font_step must be in (0, 1), got {}",
                self.font_step
            )));
        }
        if !(self.min_font_scale > 0.0 && self.min_font_scale <= 1.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "min_font_scale must be in (0, 1], got {}",
                self.min_font_scale
            )));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Result
// ────────────────────────────────────────────────────────────────────────────

/// A column whose content did not fit within the page limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruncatedColumn {
    pub column: Column,
    pub dropped_units: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResume {
    pub pages: Vec<PageContent>,
    /// Empty unless content was dropped at the page limit.
    pub truncated: Vec<TruncatedColumn>,
    /// 1.0 unless a smaller-font retry was needed.
    pub font_scale: f32,
    pub budgets: PageBudgets,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Column budgets for `resume`: page 0 loses the full-width header and summary.
pub fn page_budgets(resume: &ResumeData, config: &PageConfig) -> PageBudgets {
    let later_pages = config.content_height();
    let above_columns = estimate_header_height(&resume.basics, config)
        + estimate_summary_height(&resume.basics.summary, config);
    PageBudgets {
        first_page: (later_pages - above_columns).max(0.0),
        later_pages,
    }
}

/// Paginates `resume` onto two-column pages.
///
/// Synchronous and pure apart from observer callbacks; safe to call from any thread.
pub fn paginate_resume(
    resume: &ResumeData,
    config: &PageConfig,
    options: &PaginationOptions,
    observer: &dyn PaginationObserver,
) -> Result<PaginatedResume, LayoutError> {
    config.validate()?;
    options.validate()?;

    let mut scale = 1.0_f32;
    loop {
        let scaled = if scale < 1.0 {
            config.scaled(scale)
        } else {
            config.clone()
        };
        let budgets = page_budgets(resume, &scaled);
        let outcome = run_columns(resume, &scaled, budgets, observer);
        let truncated = truncated_columns(&outcome);
        debug!(
            scale,
            pages = outcome.pages.len(),
            left_pages = outcome.left.pages_used,
            right_pages = outcome.right.pages_used,
            "Pagination: columns filled"
        );

        if truncated.is_empty() {
            return Ok(finish(outcome, truncated, scale, budgets));
        }

        match options.overflow {
            OverflowPolicy::Truncate => {
                return Ok(finish(outcome, truncated, scale, budgets));
            }
            OverflowPolicy::Error => {
                let first = truncated[0];
                return Err(LayoutError::PageLimitExceeded {
                    column: first.column,
                    limit: config.max_pages_per_column,
                    dropped_units: first.dropped_units,
                });
            }
            OverflowPolicy::RetryWithSmallerFont => {
                let next = scale * options.font_step;
                if next + f32::EPSILON < options.min_font_scale {
                    warn!(
                        scale,
                        min = options.min_font_scale,
                        "Pagination: still over the page limit at minimum font scale, truncating"
                    );
                    return Ok(finish(outcome, truncated, scale, budgets));
                }
                info!(
                    from = scale,
                    to = next,
                    "Pagination: over the page limit, retrying with smaller font"
                );
                scale = next;
            }
        }
    }
}

fn run_columns(
    resume: &ResumeData,
    config: &PageConfig,
    budgets: PageBudgets,
    observer: &dyn PaginationObserver,
) -> ColumnsOutcome {
    let (left, right) = split_columns(build_content_units(resume, config));
    let settings = FillSettings {
        budgets,
        safety_margin: config.fill_safety_margin,
        max_pages: config.max_pages_per_column,
    };
    paginate_columns(
        &left,
        &right,
        PageHeader::from_basics(&resume.basics),
        settings,
        observer,
    )
}

fn truncated_columns(outcome: &ColumnsOutcome) -> Vec<TruncatedColumn> {
    [(Column::Left, outcome.left), (Column::Right, outcome.right)]
        .into_iter()
        .filter(|(_, report)| report.dropped_units > 0)
        .map(|(column, report)| TruncatedColumn {
            column,
            dropped_units: report.dropped_units,
        })
        .collect()
}

fn finish(
    outcome: ColumnsOutcome,
    truncated: Vec<TruncatedColumn>,
    font_scale: f32,
    budgets: PageBudgets,
) -> PaginatedResume {
    PaginatedResume {
        pages: assemble_pages(outcome.pages),
        truncated,
        font_scale,
        budgets,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
