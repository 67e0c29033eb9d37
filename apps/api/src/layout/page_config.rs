//! Page geometry and typography constants for the two-column resume template.
//!
//! All lengths are CSS pixels at 96 dpi, the unit the preview renderer works in.
//! Font sizes and the fixed block heights derived from them scale together
//! (see `PageConfig::scaled`); page size, padding and the column split never do.

use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;
use crate::layout::height::AVG_CHAR_WIDTH_FACTOR;

// ────────────────────────────────────────────────────────────────────────────
// Paper sizes
// ────────────────────────────────────────────────────────────────────────────

/// Supported page canvases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperSize {
    /// ISO A4, 210 × 297 mm.
    #[default]
    A4,
    /// US letter, 8.5 × 11 in.
    Letter,
}

impl PaperSize {
    /// Page dimensions `(width, height)` in px.
    pub fn dimensions_px(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (794.0, 1123.0),
            PaperSize::Letter => (816.0, 1056.0),
        }
    }
}

impl std::str::FromStr for PaperSize {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PaperSize::A4),
            "letter" | "us-letter" => Ok(PaperSize::Letter),
            other => Err(LayoutError::InvalidConfig(format!(
                "unknown paper size '{other}' (expected 'a4' or 'letter')"
            ))),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Config structs
// ────────────────────────────────────────────────────────────────────────────

/// Per-element font sizes in px.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSizes {
    pub name: f32,
    pub label: f32,
    pub contact: f32,
    pub summary: f32,
    pub section_title: f32,
    pub body: f32,
    pub chip: f32,
}

/// Fixed heights of blocks whose size does not depend on their text length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockHeights {
    /// Section heading plus its rule and bottom margin.
    pub section_title: f32,
    /// Work/project header: title line, meta line (dates, location) and spacing.
    pub entry_header: f32,
    /// Vertical gap below each highlight bullet.
    pub highlight_spacing: f32,
    /// Education entry without optional lines (institution + degree rows).
    pub education_base: f32,
    /// Vertical gap below achievement/certification list items.
    pub list_item_spacing: f32,
    /// Skill category label row.
    pub skill_label: f32,
    /// One row of keyword chips.
    pub chip_row: f32,
    /// Gap below a skill group.
    pub skill_group_spacing: f32,
    /// Gap below the full-width header block.
    pub header_spacing: f32,
    /// Gap below the summary block.
    pub summary_spacing: f32,
}

/// Layout parameters for a single resume page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub paper: PaperSize,
    pub page_width_px: f32,
    pub page_height_px: f32,
    /// Page padding applied on all four sides.
    pub padding_px: f32,
    pub column_gap_px: f32,
    /// Share of the usable width (after the gap) given to the left column.
    pub left_column_ratio: f32,
    pub fonts: FontSizes,
    pub body_line_height: f32,
    pub heading_line_height: f32,
    pub blocks: BlockHeights,
    /// Left indent of highlight bullets inside the left column.
    pub bullet_indent_px: f32,
    /// Horizontal padding inside one keyword chip.
    pub chip_padding_px: f32,
    pub chip_gap_px: f32,
    /// Average glyph width as a fraction of the font size.
    pub char_width_factor: f32,
    /// A column stops accepting units once it has used this share of its budget.
    pub fill_safety_margin: f32,
    pub max_pages_per_column: usize,
}

/// Returns the default two-column template for the given paper size.
///
/// Assumes: 40px padding, 24px column gap, 62/38 column split, 11px body text.
pub fn default_page_config(paper: PaperSize) -> PageConfig {
    let (page_width_px, page_height_px) = paper.dimensions_px();
    PageConfig {
        paper,
        page_width_px,
        page_height_px,
        padding_px: 40.0,
        column_gap_px: 24.0,
        left_column_ratio: 0.62,
        fonts: FontSizes {
            name: 28.0,
            label: 14.0,
            contact: 11.0,
            summary: 12.0,
            section_title: 15.0,
            body: 11.0,
            chip: 10.0,
        },
        body_line_height: 1.45,
        heading_line_height: 1.25,
        blocks: BlockHeights {
            section_title: 28.0,
            entry_header: 44.0,
            highlight_spacing: 3.0,
            education_base: 48.0,
            list_item_spacing: 4.0,
            skill_label: 18.0,
            chip_row: 22.0,
            skill_group_spacing: 8.0,
            header_spacing: 16.0,
            summary_spacing: 12.0,
        },
        bullet_indent_px: 14.0,
        chip_padding_px: 12.0,
        chip_gap_px: 6.0,
        char_width_factor: AVG_CHAR_WIDTH_FACTOR,
        fill_safety_margin: 0.95,
        max_pages_per_column: 10,
    }
}

impl PageConfig {
    /// Usable width inside the page padding.
    pub fn content_width(&self) -> f32 {
        self.page_width_px - 2.0 * self.padding_px
    }

    /// Usable height inside the page padding. This is the budget of every page after the first.
    pub fn content_height(&self) -> f32 {
        self.page_height_px - 2.0 * self.padding_px
    }

    pub fn left_column_width(&self) -> f32 {
        (self.content_width() - self.column_gap_px) * self.left_column_ratio
    }

    pub fn right_column_width(&self) -> f32 {
        self.content_width() - self.column_gap_px - self.left_column_width()
    }

    /// Returns a copy with every font size and text-derived block height multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> PageConfig {
        let mut cfg = self.clone();
        let f = &mut cfg.fonts;
        for size in [
            &mut f.name,
            &mut f.label,
            &mut f.contact,
            &mut f.summary,
            &mut f.section_title,
            &mut f.body,
            &mut f.chip,
        ] {
            *size *= factor;
        }
        let b = &mut cfg.blocks;
        for height in [
            &mut b.section_title,
            &mut b.entry_header,
            &mut b.education_base,
            &mut b.skill_label,
            &mut b.chip_row,
        ] {
            *height *= factor;
        }
        cfg
    }

    /// Rejects geometry the paginator cannot work with.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.content_width() <= self.column_gap_px {
            return Err(LayoutError::InvalidConfig(
                "page width leaves no room for two columns".to_string(),
            ));
        }
        if self.content_height() <= 0.0 {
            return Err(LayoutError::InvalidConfig(
                "page padding exceeds page height".to_string(),
            ));
        }
        if !(self.left_column_ratio > 0.0 && self.left_column_ratio < 1.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "left_column_ratio must be in (0, 1), got {}",
                self.left_column_ratio
            )));
        }
        if !(self.fill_safety_margin > 0.0 && self.fill_safety_margin <= 1.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "fill_safety_margin must be in (0, 1], got {}",
                self.fill_safety_margin
            )));
        }
        if self.char_width_factor <= 0.0 || self.fonts.body <= 0.0 {
            return Err(LayoutError::InvalidConfig(
                "font metrics must be positive".to_string(),
            ));
        }
        if self.max_pages_per_column == 0 {
            return Err(LayoutError::InvalidConfig(
                "max_pages_per_column must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_config_sanity() {
        let config = default_page_config(PaperSize::A4);
        assert_eq!(config.paper, PaperSize::A4);
        assert!((config.content_width() - 714.0).abs() < 1e-3);
        assert!((config.content_height() - 1043.0).abs() < 1e-3);
        assert!((config.char_width_factor - 0.6).abs() < 1e-6);
        assert_eq!(config.max_pages_per_column, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_columns_split_usable_width() {
        let config = default_page_config(PaperSize::Letter);
        let total = config.left_column_width() + config.right_column_width() + config.column_gap_px;
        assert!((total - config.content_width()).abs() < 1e-3);
        assert!(config.left_column_width() > config.right_column_width());
    }

    #[test]
    fn test_scaled_shrinks_fonts_but_not_page() {
        let config = default_page_config(PaperSize::A4);
        let small = config.scaled(0.5);
        assert!((small.fonts.body - 5.5).abs() < 1e-4);
        assert!((small.blocks.entry_header - 22.0).abs() < 1e-4);
        assert_eq!(small.page_height_px, config.page_height_px);
        assert_eq!(small.padding_px, config.padding_px);
    }

    #[test]
    fn test_paper_size_from_str() {
        assert_eq!("A4".parse::<PaperSize>().unwrap(), PaperSize::A4);
        assert_eq!(" letter ".parse::<PaperSize>().unwrap(), PaperSize::Letter);
        assert!("tabloid".parse::<PaperSize>().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_ratio() {
        let mut config = default_page_config(PaperSize::A4);
        config.left_column_ratio = 1.2;
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_page_limit() {
        let mut config = default_page_config(PaperSize::A4);
        config.max_pages_per_column = 0;
        assert!(config.validate().is_err());
    }
}
