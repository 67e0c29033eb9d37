//! One-page fit check, a coarse advisory estimate for the editor UI.
//!
//! Unlike the paginator this ignores the column split: every section is summed as
//! if stacked on a single page. The result only drives guidance text ("your resume
//! may need N pages"); nothing is rejected and thresholds are soft limits.

use serde::{Deserialize, Serialize};

use crate::layout::height::{
    body_text_height, estimate_education_height, estimate_entry_block_height,
    estimate_header_height, estimate_skill_group_height, estimate_summary_height,
};
use crate::layout::page_config::PageConfig;
use crate::models::resume::ResumeData;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub page_count: u32,
    pub content_height: f32,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Recommended maximum lengths, in characters unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationLimits {
    pub name: usize,
    pub label: usize,
    pub summary: usize,
    pub highlight: usize,
    /// Highlights per work or project entry.
    pub highlights_per_entry: usize,
    pub project_description: usize,
    /// Keywords per skill group.
    pub keywords_per_group: usize,
    pub list_item: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        ValidationLimits {
            name: 40,
            label: 60,
            summary: 400,
            highlight: 150,
            highlights_per_entry: 5,
            project_description: 200,
            keywords_per_group: 12,
            list_item: 120,
        }
    }
}

/// Estimates whether `resume` fits on one page and reports over-long fields.
pub fn validate_resume(
    resume: &ResumeData,
    config: &PageConfig,
    limits: &ValidationLimits,
) -> ValidationReport {
    let mut report = Findings::default();
    check_field_lengths(resume, limits, &mut report);

    let content_height = estimate_content_height(resume, config);
    let page_height = config.content_height();
    let page_count = ((content_height / page_height).ceil() as u32).max(1);
    let is_valid = content_height <= page_height;

    if !is_valid {
        report.warn(
            format!(
                "Estimated content height {content_height:.0}px exceeds the {page_height:.0}px page; \
                 your resume may need {page_count} pages"
            ),
            "Trim older entries or shorten highlights to fit everything on one page",
        );
    }

    ValidationReport {
        is_valid,
        page_count,
        content_height,
        warnings: report.warnings,
        suggestions: report.suggestions,
    }
}

/// Sum of every block's estimated height, stacked in one column at full width.
pub fn estimate_content_height(resume: &ResumeData, config: &PageConfig) -> f32 {
    let width = config.content_width();
    let title = config.blocks.section_title;
    let section = |non_empty: bool| if non_empty { title } else { 0.0 };

    let header = estimate_header_height(&resume.basics, config)
        + estimate_summary_height(&resume.basics.summary, config);

    let work: f32 = resume
        .work
        .iter()
        .map(|w| estimate_entry_block_height(&w.highlights, config))
        .sum();

    let projects: f32 = resume
        .projects
        .iter()
        .map(|p| {
            let description = p
                .description
                .as_deref()
                .map(|d| body_text_height(d, width, config))
                .unwrap_or(0.0);
            estimate_entry_block_height(&p.highlights, config) + description
        })
        .sum();

    let education: f32 = resume
        .education
        .iter()
        .map(|e| estimate_education_height(e, width, config))
        .sum();

    let skills: f32 = resume
        .skills
        .iter()
        .map(|g| estimate_skill_group_height(g, width, config))
        .sum();

    let lists: f32 = resume
        .achievements
        .iter()
        .chain(resume.certifications.iter())
        .map(|t| body_text_height(t, width, config) + config.blocks.list_item_spacing)
        .sum();

    header
        + section(!resume.work.is_empty())
        + work
        + section(!resume.projects.is_empty())
        + projects
        + section(!resume.education.is_empty())
        + education
        + section(!resume.skills.is_empty())
        + skills
        + section(!resume.achievements.is_empty())
        + section(!resume.certifications.is_empty())
        + lists
}

#[derive(Default)]
struct Findings {
    warnings: Vec<String>,
    suggestions: Vec<String>,
}

impl Findings {
    /// Records a warning; identical suggestions are only listed once.
    fn warn(&mut self, warning: String, suggestion: &str) {
        self.warnings.push(warning);
        if !self.suggestions.iter().any(|s| s == suggestion) {
            self.suggestions.push(suggestion.to_string());
        }
    }
}

fn char_len(s: &str) -> usize {
    s.trim().chars().count()
}

fn check_field_lengths(resume: &ResumeData, limits: &ValidationLimits, out: &mut Findings) {
    let basics = &resume.basics;

    if char_len(&basics.name) > limits.name {
        out.warn(
            format!(
                "Name is {} characters (recommended max {})",
                char_len(&basics.name),
                limits.name
            ),
            "Use the name you go by professionally; drop middle names if space is tight",
        );
    }
    if char_len(&basics.label) > limits.label {
        out.warn(
            format!(
                "Headline is {} characters (recommended max {})",
                char_len(&basics.label),
                limits.label
            ),
            "Keep the headline to a short role title",
        );
    }
    if char_len(&basics.summary) > limits.summary {
        out.warn(
            format!(
                "Summary is {} characters (recommended max {})",
                char_len(&basics.summary),
                limits.summary
            ),
            "Cut the summary to two or three sentences",
        );
    }

    let entries = resume
        .work
        .iter()
        .map(|w| (w.company.as_str(), &w.highlights))
        .chain(resume.projects.iter().map(|p| (p.name.as_str(), &p.highlights)));

    for (owner, highlights) in entries {
        if highlights.len() > limits.highlights_per_entry {
            out.warn(
                format!(
                    "'{owner}' has {} highlights (recommended max {})",
                    highlights.len(),
                    limits.highlights_per_entry
                ),
                "Keep only the highlights most relevant to the role you are applying for",
            );
        }
        for (i, text) in highlights.iter().enumerate() {
            if char_len(text) > limits.highlight {
                out.warn(
                    format!(
                        "Highlight {} of '{owner}' is {} characters (recommended max {})",
                        i + 1,
                        char_len(text),
                        limits.highlight
                    ),
                    "Rewrite long highlights to a single line stating the action and its result",
                );
            }
        }
    }

    for project in &resume.projects {
        if let Some(description) = project.description.as_deref() {
            if char_len(description) > limits.project_description {
                out.warn(
                    format!(
                        "Description of '{}' is {} characters (recommended max {})",
                        project.name,
                        char_len(description),
                        limits.project_description
                    ),
                    "Move project details from the description into highlights",
                );
            }
        }
    }

    for group in &resume.skills {
        if group.keywords.len() > limits.keywords_per_group {
            out.warn(
                format!(
                    "Skill group '{}' lists {} keywords (recommended max {})",
                    group.name,
                    group.keywords.len(),
                    limits.keywords_per_group
                ),
                "Split large skill groups or list only your strongest skills",
            );
        }
    }

    let lists = [
        ("Achievement", &resume.achievements),
        ("Certification", &resume.certifications),
    ];
    for (kind, items) in lists {
        for (i, text) in items.iter().enumerate() {
            if char_len(text) > limits.list_item {
                out.warn(
                    format!(
                        "{kind} {} is {} characters (recommended max {})",
                        i + 1,
                        char_len(text),
                        limits.list_item
                    ),
                    "Shorten list items to a single line",
                );
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::page_config::{default_page_config, PaperSize};
    use crate::models::resume::{Basics, EducationItem, SkillGroup, WorkItem};

    fn config() -> PageConfig {
        default_page_config(PaperSize::A4)
    }

    fn validate(resume: &ResumeData) -> ValidationReport {
        validate_resume(resume, &config(), &ValidationLimits::default())
    }

    fn job(company: &str, highlights: usize, text: &str) -> WorkItem {
        WorkItem {
            company: company.to_string(),
            highlights: vec![text.to_string(); highlights],
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_resume_is_valid_single_page() {
        let report = validate(&ResumeData::default());
        assert!(report.is_valid);
        assert_eq!(report.page_count, 1);
        assert_eq!(report.content_height, 0.0);
        assert!(report.warnings.is_empty());
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_short_resume_fits() {
        let resume = ResumeData {
            basics: Basics {
                name: "Ada Lovelace".to_string(),
                summary: "Engineer.".to_string(),
                ..Default::default()
            },
            work: vec![job("Acme", 3, "Cut costs by 30%")],
            ..Default::default()
        };
        let report = validate(&resume);
        assert!(report.is_valid);
        assert_eq!(report.page_count, 1);
        assert!(report.content_height > 0.0);
    }

    #[test]
    fn test_long_resume_needs_several_pages() {
        let resume = ResumeData {
            work: (0..12)
                .map(|i| job(&format!("Co{i}"), 5, "Shipped a thing"))
                .collect(),
            ..Default::default()
        };
        let report = validate(&resume);
        assert!(!report.is_valid);
        assert!(report.page_count >= 2);
        let expected = (report.content_height / config().content_height()).ceil() as u32;
        assert_eq!(report.page_count, expected);
        assert!(report.warnings.iter().any(|w| w.contains("may need")));
    }

    #[test]
    fn test_field_limits_produce_warnings_not_rejection() {
        let resume = ResumeData {
            basics: Basics {
                name: "N".repeat(60),
                summary: "S".repeat(500),
                ..Default::default()
            },
            work: vec![job("Acme", 7, &"x".repeat(200))],
            skills: vec![SkillGroup {
                name: "Everything".to_string(),
                keywords: (0..20).map(|i| format!("k{i}")).collect(),
            }],
            ..Default::default()
        };
        let report = validate(&resume);
        assert!(report.warnings.iter().any(|w| w.starts_with("Name is 60")));
        assert!(report.warnings.iter().any(|w| w.starts_with("Summary is 500")));
        assert!(report.warnings.iter().any(|w| w.contains("has 7 highlights")));
        assert!(report.warnings.iter().any(|w| w.contains("lists 20 keywords")));
        let highlight_warnings = report
            .warnings
            .iter()
            .filter(|w| w.starts_with("Highlight"))
            .count();
        assert_eq!(highlight_warnings, 7);
    }

    #[test]
    fn test_suggestions_are_deduplicated() {
        let resume = ResumeData {
            work: vec![job("Acme", 3, &"x".repeat(200))],
            ..Default::default()
        };
        let report = validate(&resume);
        assert_eq!(report.warnings.len(), 3);
        assert_eq!(report.suggestions.len(), 1);
    }

    #[test]
    fn test_education_gpa_measured_with_label() {
        // 108 chars per full-width body line: the bare GPA fits one line,
        // "GPA: " pushes it onto a second.
        let cfg = config();
        let resume = ResumeData {
            education: vec![EducationItem {
                institution: "MIT".to_string(),
                gpa: Some("9".repeat(105)),
                ..Default::default()
            }],
            ..Default::default()
        };
        let line = cfg.fonts.body * cfg.body_line_height;
        let expected = cfg.blocks.section_title + cfg.blocks.education_base + 2.0 * line;
        let height = estimate_content_height(&resume, &cfg);
        assert!((height - expected).abs() < 1e-3, "expected {expected}, got {height}");
    }

    #[test]
    fn test_custom_limits() {
        let resume = ResumeData {
            achievements: vec!["Won the regional hackathon".to_string()],
            ..Default::default()
        };
        let strict = ValidationLimits {
            list_item: 10,
            ..Default::default()
        };
        let report = validate_resume(&resume, &config(), &strict);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("Achievement 1"));
    }
}
