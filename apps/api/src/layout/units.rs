//! Content units, the atomic pieces the paginator schedules.
//!
//! `build_content_units` flattens a resume into one ordered list: the left column
//! (work, then projects) followed by the right column (education, skills,
//! achievements, certifications). Within a column the list order is the
//! scheduling order. A unit is never split; a long highlight stays on one page.

use std::fmt;

use serde::Serialize;

use crate::layout::height::{
    body_text_height, estimate_education_height, estimate_highlight_height,
    estimate_skill_group_height,
};
use crate::layout::page_config::PageConfig;
use crate::models::resume::{EducationItem, ProjectItem, ResumeData, SkillGroup, WorkItem};

// ────────────────────────────────────────────────────────────────────────────
// Tags
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Left,
    Right,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Left => f.write_str("left"),
            Column::Right => f.write_str("right"),
        }
    }
}

/// The logical section a unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Work,
    Project,
    Education,
    Skills,
    Achievements,
    Certifications,
}

impl SectionType {
    pub fn column(self) -> Column {
        match self {
            SectionType::Work | SectionType::Project => Column::Left,
            _ => Column::Right,
        }
    }

    /// Heading text shown above the section.
    pub fn title(self) -> &'static str {
        match self {
            SectionType::Work => "Experience",
            SectionType::Project => "Projects",
            SectionType::Education => "Education",
            SectionType::Skills => "Skills",
            SectionType::Achievements => "Achievements",
            SectionType::Certifications => "Certifications",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitType {
    SectionTitle,
    WorkHeader,
    WorkHighlight,
    ProjectHeader,
    ProjectHighlight,
    EducationItem,
    SkillGroup,
    AchievementItem,
    CertificationItem,
}

impl UnitType {
    pub fn is_highlight(self) -> bool {
        matches!(self, UnitType::WorkHighlight | UnitType::ProjectHighlight)
    }
}

/// Identifier unique within one pagination run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UnitId(pub usize);

/// Hands out sequential unit ids. One generator per run; never shared between calls.
#[derive(Debug, Default)]
pub struct UnitIdGen {
    next: usize,
}

impl UnitIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> UnitId {
        self.next += 1;
        UnitId(self.next)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Unit
// ────────────────────────────────────────────────────────────────────────────

/// The payload a unit carries into the page it lands on.
///
/// Header payloads carry their item with `highlights` emptied; the highlights
/// travel as separate units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UnitContent {
    Title(String),
    Work(WorkItem),
    Project(ProjectItem),
    Highlight(String),
    Education(EducationItem),
    Skill(SkillGroup),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentUnit {
    pub id: UnitId,
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    pub section_type: SectionType,
    pub column: Column,
    /// Estimated rendered height in px.
    pub height: f32,
    /// Always false: units are the smallest separable piece.
    pub breakable: bool,
    /// For highlights, the id of the owning work/project header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<UnitId>,
    pub content: UnitContent,
}

impl ContentUnit {
    fn new(
        id: UnitId,
        unit_type: UnitType,
        section_type: SectionType,
        height: f32,
        content: UnitContent,
    ) -> Self {
        ContentUnit {
            id,
            unit_type,
            section_type,
            column: section_type.column(),
            height,
            breakable: false,
            parent_id: None,
            content,
        }
    }

    fn with_parent(mut self, parent: UnitId) -> Self {
        self.parent_id = Some(parent);
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Builder
// ────────────────────────────────────────────────────────────────────────────

/// Flattens `resume` into ordered content units with a fresh id generator.
pub fn build_content_units(resume: &ResumeData, config: &PageConfig) -> Vec<ContentUnit> {
    let mut ids = UnitIdGen::new();
    build_content_units_with(resume, config, &mut ids)
}

/// Flattens `resume` into ordered content units, drawing ids from `ids`.
///
/// Empty sections contribute nothing, not even a title.
pub fn build_content_units_with(
    resume: &ResumeData,
    config: &PageConfig,
    ids: &mut UnitIdGen,
) -> Vec<ContentUnit> {
    let mut units = Vec::new();

    // Left column
    if !resume.work.is_empty() {
        push_title(&mut units, ids, SectionType::Work, config);
        for item in &resume.work {
            let header_id = ids.next_id();
            let header = WorkItem {
                highlights: Vec::new(),
                ..item.clone()
            };
            units.push(ContentUnit::new(
                header_id,
                UnitType::WorkHeader,
                SectionType::Work,
                config.blocks.entry_header,
                UnitContent::Work(header),
            ));
            push_highlights(
                &mut units,
                ids,
                &item.highlights,
                header_id,
                UnitType::WorkHighlight,
                SectionType::Work,
                config,
            );
        }
    }

    if !resume.projects.is_empty() {
        push_title(&mut units, ids, SectionType::Project, config);
        for item in &resume.projects {
            let header_id = ids.next_id();
            let description = item
                .description
                .as_deref()
                .map(|d| body_text_height(d, config.left_column_width(), config))
                .unwrap_or(0.0);
            let header = ProjectItem {
                highlights: Vec::new(),
                ..item.clone()
            };
            units.push(ContentUnit::new(
                header_id,
                UnitType::ProjectHeader,
                SectionType::Project,
                config.blocks.entry_header + description,
                UnitContent::Project(header),
            ));
            push_highlights(
                &mut units,
                ids,
                &item.highlights,
                header_id,
                UnitType::ProjectHighlight,
                SectionType::Project,
                config,
            );
        }
    }

    // Right column
    let right_width = config.right_column_width();

    if !resume.education.is_empty() {
        push_title(&mut units, ids, SectionType::Education, config);
        for item in &resume.education {
            units.push(ContentUnit::new(
                ids.next_id(),
                UnitType::EducationItem,
                SectionType::Education,
                estimate_education_height(item, right_width, config),
                UnitContent::Education(item.clone()),
            ));
        }
    }

    if !resume.skills.is_empty() {
        push_title(&mut units, ids, SectionType::Skills, config);
        for group in &resume.skills {
            units.push(ContentUnit::new(
                ids.next_id(),
                UnitType::SkillGroup,
                SectionType::Skills,
                estimate_skill_group_height(group, right_width, config),
                UnitContent::Skill(group.clone()),
            ));
        }
    }

    for (section, unit_type, entries) in [
        (
            SectionType::Achievements,
            UnitType::AchievementItem,
            &resume.achievements,
        ),
        (
            SectionType::Certifications,
            UnitType::CertificationItem,
            &resume.certifications,
        ),
    ] {
        if entries.is_empty() {
            continue;
        }
        push_title(&mut units, ids, section, config);
        for text in entries {
            let height =
                body_text_height(text, right_width, config) + config.blocks.list_item_spacing;
            units.push(ContentUnit::new(
                ids.next_id(),
                unit_type,
                section,
                height,
                UnitContent::Text(text.clone()),
            ));
        }
    }

    units
}

/// Splits a unit list into its `(left, right)` queues, preserving order.
pub fn split_columns(units: Vec<ContentUnit>) -> (Vec<ContentUnit>, Vec<ContentUnit>) {
    units.into_iter().partition(|u| u.column == Column::Left)
}

fn push_title(
    units: &mut Vec<ContentUnit>,
    ids: &mut UnitIdGen,
    section: SectionType,
    config: &PageConfig,
) {
    units.push(ContentUnit::new(
        ids.next_id(),
        UnitType::SectionTitle,
        section,
        config.blocks.section_title,
        UnitContent::Title(section.title().to_string()),
    ));
}

fn push_highlights(
    units: &mut Vec<ContentUnit>,
    ids: &mut UnitIdGen,
    highlights: &[String],
    parent: UnitId,
    unit_type: UnitType,
    section: SectionType,
    config: &PageConfig,
) {
    for text in highlights {
        units.push(
            ContentUnit::new(
                ids.next_id(),
                unit_type,
                section,
                estimate_highlight_height(text, config),
                UnitContent::Highlight(text.clone()),
            )
            .with_parent(parent),
        );
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
