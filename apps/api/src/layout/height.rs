//! Heuristic text-height estimation.
//!
//! Every glyph is assumed to be `char_width_factor × font_size` wide, so a block of
//! text wraps after `width / (font_size × factor)` characters. Word boundaries,
//! kerning and proportional widths are ignored; estimates drift for variable-width
//! fonts and non-Latin scripts.

use crate::layout::page_config::PageConfig;
use crate::models::resume::{Basics, EducationItem, SkillGroup};

/// Default average glyph width, as a fraction of font size.
pub const AVG_CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Estimated rendered height of `text` wrapped in a box `width` px wide.
///
/// Returns 0 for empty or whitespace-only text.
#[allow(dead_code)]
pub fn estimate_text_height(text: &str, font_size: f32, line_height: f32, width: f32) -> f32 {
    estimate_text_height_with(text, font_size, line_height, width, AVG_CHAR_WIDTH_FACTOR)
}

/// Same as [`estimate_text_height`] with an explicit average-character-width factor.
pub fn estimate_text_height_with(
    text: &str,
    font_size: f32,
    line_height: f32,
    width: f32,
    char_width_factor: f32,
) -> f32 {
    let lines = estimate_line_count(text, font_size, width, char_width_factor);
    lines as f32 * font_size * line_height
}

/// Number of wrapped lines `text` occupies.
pub fn estimate_line_count(text: &str, font_size: f32, width: f32, char_width_factor: f32) -> u32 {
    let text = text.trim();
    if text.is_empty() {
        return 0;
    }
    let chars = text.chars().count() as f32;
    let per_line = chars_per_line(font_size, width, char_width_factor);
    (chars / per_line).ceil() as u32
}

fn chars_per_line(font_size: f32, width: f32, char_width_factor: f32) -> f32 {
    let glyph = (font_size * char_width_factor).max(f32::EPSILON);
    (width / glyph).max(1.0)
}

/// Body-text height for a block of `text` at the config's body font.
pub fn body_text_height(text: &str, width: f32, config: &PageConfig) -> f32 {
    estimate_text_height_with(
        text,
        config.fonts.body,
        config.body_line_height,
        width,
        config.char_width_factor,
    )
}

/// Height of a highlight bullet inside the left column, including its bottom gap.
pub fn estimate_highlight_height(text: &str, config: &PageConfig) -> f32 {
    let width = config.left_column_width() - config.bullet_indent_px;
    body_text_height(text, width, config) + config.blocks.highlight_spacing
}

/// Work/project block: fixed header plus one body line per highlight.
///
/// Coarser than summing [`estimate_highlight_height`]; the validator uses it for
/// a quick whole-resume total.
pub fn estimate_entry_block_height(highlights: &[String], config: &PageConfig) -> f32 {
    let line = config.fonts.body * config.body_line_height + config.blocks.highlight_spacing;
    config.blocks.entry_header + highlights.len() as f32 * line
}

/// Skill group: category label row plus as many rows of keyword chips as the width needs.
///
/// Chips are packed greedily left to right; each chip is its keyword's estimated
/// width plus horizontal padding, separated by `chip_gap_px`.
pub fn estimate_skill_group_height(group: &SkillGroup, width: f32, config: &PageConfig) -> f32 {
    let rows = chip_rows(&group.keywords, width, config);
    let label = if group.name.trim().is_empty() {
        0.0
    } else {
        config.blocks.skill_label
    };
    label + rows as f32 * config.blocks.chip_row + config.blocks.skill_group_spacing
}

fn chip_rows(keywords: &[String], width: f32, config: &PageConfig) -> u32 {
    let glyph = config.fonts.chip * config.char_width_factor;
    let mut rows = 0u32;
    let mut row_width = 0.0_f32;

    for keyword in keywords.iter().filter(|k| !k.trim().is_empty()) {
        // A chip wider than the column still occupies exactly one row.
        let chip = (keyword.chars().count() as f32 * glyph + config.chip_padding_px).min(width);
        if rows == 0 {
            rows = 1;
            row_width = chip;
        } else if row_width + config.chip_gap_px + chip > width {
            rows += 1;
            row_width = chip;
        } else {
            row_width += config.chip_gap_px + chip;
        }
    }
    rows
}

/// Institution and degree rows, plus one line each for GPA and note when present.
pub fn estimate_education_height(item: &EducationItem, width: f32, config: &PageConfig) -> f32 {
    let mut height = config.blocks.education_base;
    if let Some(gpa) = item.gpa.as_deref().filter(|g| !g.trim().is_empty()) {
        height += body_text_height(&format!("GPA: {gpa}"), width, config);
    }
    if let Some(note) = item.note.as_deref() {
        height += body_text_height(note, width, config);
    }
    height
}

/// Full-width summary paragraph including its bottom gap. 0 when the summary is empty.
pub fn estimate_summary_height(summary: &str, config: &PageConfig) -> f32 {
    let text = estimate_text_height_with(
        summary,
        config.fonts.summary,
        config.body_line_height,
        config.content_width(),
        config.char_width_factor,
    );
    if text == 0.0 {
        0.0
    } else {
        text + config.blocks.summary_spacing
    }
}

/// Full-width header block: name, label, contact row and profile row.
pub fn estimate_header_height(basics: &Basics, config: &PageConfig) -> f32 {
    let width = config.content_width();
    let heading = |text: &str, size: f32| {
        estimate_text_height_with(
            text,
            size,
            config.heading_line_height,
            width,
            config.char_width_factor,
        )
    };

    let contact = [
        Some(basics.email.as_str()),
        Some(basics.phone.as_str()),
        basics.url.as_deref(),
        basics.location.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.trim().is_empty())
    .collect::<Vec<_>>()
    .join("  ·  ");

    let profiles = basics
        .profiles
        .iter()
        .map(|p| format!("{}: {}", p.network, p.username))
        .collect::<Vec<_>>()
        .join("  ·  ");

    let body = heading(&basics.name, config.fonts.name)
        + heading(&basics.label, config.fonts.label)
        + heading(&contact, config.fonts.contact)
        + heading(&profiles, config.fonts.contact);

    if body == 0.0 {
        0.0
    } else {
        body + config.blocks.header_spacing
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::page_config::{default_page_config, PaperSize};
    use crate::models::resume::Profile;

    fn config() -> PageConfig {
        default_page_config(PaperSize::A4)
    }

    #[test]
    fn test_empty_text_has_zero_height() {
        assert_eq!(estimate_text_height("", 11.0, 1.5, 300.0), 0.0);
        assert_eq!(estimate_text_height("   ", 11.0, 1.5, 300.0), 0.0);
    }

    #[test]
    fn test_single_line_height() {
        // 10px font, 0.6 factor → 6px per glyph → 100 chars per 600px line
        let h = estimate_text_height("hello", 10.0, 1.5, 600.0);
        assert!((h - 15.0).abs() < 1e-4, "one line should be 15px, got {h}");
    }

    #[test]
    fn test_wraps_by_character_count() {
        // 100 chars per line; 250 chars → 3 lines
        let text = "x".repeat(250);
        let h = estimate_text_height(&text, 10.0, 1.0, 600.0);
        assert!((h - 30.0).abs() < 1e-4, "expected 3 lines (30px), got {h}");
    }

    #[test]
    fn test_fractional_chars_per_line_are_kept() {
        // 11px × 0.6 = 6.6px glyphs → 60.6 chars per 400px line; 121 chars → 2 lines
        let text = "x".repeat(121);
        let h = estimate_text_height(&text, 11.0, 1.0, 400.0);
        assert!((h - 22.0).abs() < 1e-3, "expected 2 lines (22px), got {h}");
        assert_eq!(estimate_line_count(&"x".repeat(122), 11.0, 400.0, 0.6), 3);
    }

    #[test]
    fn test_narrow_width_still_fits_one_char_per_line() {
        assert_eq!(estimate_line_count("abc", 10.0, 1.0, 0.6), 3);
    }

    #[test]
    fn test_non_ascii_counts_chars_not_bytes() {
        let ascii = estimate_line_count(&"e".repeat(100), 10.0, 600.0, 0.6);
        let accented = estimate_line_count(&"é".repeat(100), 10.0, 600.0, 0.6);
        assert_eq!(ascii, accented);
    }

    #[test]
    fn test_entry_block_grows_one_line_per_highlight() {
        let cfg = config();
        let none = estimate_entry_block_height(&[], &cfg);
        let two = estimate_entry_block_height(&["a".to_string(), "b".to_string()], &cfg);
        assert!((none - cfg.blocks.entry_header).abs() < 1e-4);
        let line = cfg.fonts.body * cfg.body_line_height + cfg.blocks.highlight_spacing;
        assert!((two - none - 2.0 * line).abs() < 1e-3);
    }

    #[test]
    fn test_skill_group_wraps_chips_into_rows() {
        let cfg = config();
        let width = cfg.right_column_width();
        let few = SkillGroup {
            name: "Languages".to_string(),
            keywords: vec!["Rust".to_string(), "Go".to_string()],
        };
        let many = SkillGroup {
            name: "Languages".to_string(),
            keywords: (0..30).map(|i| format!("Keyword{i}")).collect(),
        };
        let h_few = estimate_skill_group_height(&few, width, &cfg);
        let h_many = estimate_skill_group_height(&many, width, &cfg);
        let expected_few =
            cfg.blocks.skill_label + cfg.blocks.chip_row + cfg.blocks.skill_group_spacing;
        assert!((h_few - expected_few).abs() < 1e-3, "two short chips fit one row");
        assert!(h_many > h_few + cfg.blocks.chip_row, "30 chips need several rows");
    }

    #[test]
    fn test_summary_height_zero_when_empty() {
        let cfg = config();
        assert_eq!(estimate_summary_height("", &cfg), 0.0);
        assert!(estimate_summary_height("Backend engineer.", &cfg) > cfg.blocks.summary_spacing);
    }

    #[test]
    fn test_header_height_includes_profiles_row() {
        let cfg = config();
        let mut basics = Basics {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        };
        let without = estimate_header_height(&basics, &cfg);
        basics.profiles.push(Profile {
            network: "GitHub".to_string(),
            username: "ada".to_string(),
            url: None,
        });
        let with = estimate_header_height(&basics, &cfg);
        assert!(with > without);
        assert_eq!(estimate_header_height(&Basics::default(), &cfg), 0.0);
    }
}
