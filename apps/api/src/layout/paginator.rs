//! Dual-column paginator: greedy bin-packing of content units into pages.
//!
//! # Algorithm
//! The left and right queues are filled by the same routine (`fill_column`), run
//! once per column with independent page counters. Both runs write into one
//! shared `PageMap` (pages are created lazily by whichever column reaches them
//! first) and consult one shared `SectionTitles` record, so a section title is
//! rendered once per document and later pages get continuation flags.
//!
//! Per page: units are taken from the front of the queue while
//! `used + height <= budget` and `used < budget × fill_safety_margin`.
//! Page 0 has the smaller `first_page` budget (the full-width header and summary
//! sit above the columns); every later page gets `later_pages`.
//!
//! # Guarantees
//! - Queue order is never changed, so output is deterministic.
//! - A section title is only placed if the unit after it is admitted on the same
//!   page right behind it.
//! - A unit too tall for any page is placed alone on a fresh page instead of
//!   stalling the loop. A forced section title always takes its first item along.
//! - A column never spans more than `max_pages` pages; what is left is reported
//!   as dropped and handled by the caller's overflow policy.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, warn};

use crate::layout::units::{Column, ContentUnit, SectionType, UnitContent, UnitId, UnitType};
use crate::models::resume::{Basics, EducationItem, ProjectItem, SkillGroup, WorkItem};

// ────────────────────────────────────────────────────────────────────────────
// Page records
// ────────────────────────────────────────────────────────────────────────────

/// A work or project entry as it appears on one page.
///
/// `continued` is true on the copy that carries highlights spilled from an
/// earlier page; its header fields repeat the original entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedEntry<T> {
    #[serde(skip)]
    pub source: UnitId,
    pub continued: bool,
    #[serde(flatten)]
    pub entry: T,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeftColumn {
    pub work: Vec<PagedEntry<WorkItem>>,
    pub projects: Vec<PagedEntry<ProjectItem>>,
    pub work_continuation: bool,
    pub projects_continuation: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RightColumn {
    pub education: Vec<EducationItem>,
    pub skills: Vec<SkillGroup>,
    pub achievements: Vec<String>,
    pub certifications: Vec<String>,
    pub education_continuation: bool,
    pub skills_continuation: bool,
    pub achievements_continuation: bool,
    pub certifications_continuation: bool,
}

impl LeftColumn {
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.work.is_empty() && self.projects.is_empty()
    }
}

impl RightColumn {
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.education.is_empty()
            && self.skills.is_empty()
            && self.achievements.is_empty()
            && self.certifications.is_empty()
    }
}

/// A page under construction, keyed by its 0-based index in the page map.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialPage {
    pub index: usize,
    pub header: Option<Basics>,
    pub summary: Option<String>,
    pub left: LeftColumn,
    pub right: RightColumn,
}

/// Full-width content attached to page 0 when it is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageHeader {
    pub basics: Basics,
    pub summary: Option<String>,
}

impl PageHeader {
    pub fn from_basics(basics: &Basics) -> Self {
        let summary = Some(basics.summary.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        PageHeader {
            basics: basics.clone(),
            summary,
        }
    }
}

/// Pages shared by both column passes, created on first use.
#[derive(Debug, Clone)]
pub struct PageMap {
    pages: BTreeMap<usize, PartialPage>,
    header: PageHeader,
}

impl PageMap {
    pub fn new(header: PageHeader) -> Self {
        PageMap {
            pages: BTreeMap::new(),
            header,
        }
    }

    /// Returns page `index`, creating it if neither column has touched it yet.
    /// Header and summary are attached only when page 0 is created.
    pub fn page_mut(&mut self, index: usize) -> &mut PartialPage {
        let header = &self.header;
        self.pages.entry(index).or_insert_with(|| PartialPage {
            index,
            header: (index == 0).then(|| header.basics.clone()),
            summary: if index == 0 {
                header.summary.clone()
            } else {
                None
            },
            left: LeftColumn::default(),
            right: RightColumn::default(),
        })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Consumes the map, yielding pages in ascending index order.
    pub fn into_pages(self) -> impl Iterator<Item = PartialPage> {
        self.pages.into_values()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared section-title state
// ────────────────────────────────────────────────────────────────────────────

/// Records, per section, the page on which its title was rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionTitles {
    shown: HashMap<SectionType, usize>,
}

impl SectionTitles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the section's title as rendered on `page`. Returns false if it already was.
    pub fn mark_shown(&mut self, section: SectionType, page: usize) -> bool {
        if self.shown.contains_key(&section) {
            return false;
        }
        self.shown.insert(section, page);
        true
    }

    pub fn is_shown(&self, section: SectionType) -> bool {
        self.shown.contains_key(&section)
    }

    /// True when the title was rendered on a page before `page`.
    pub fn shown_before(&self, section: SectionType, page: usize) -> bool {
        self.shown.get(&section).is_some_and(|&p| p < page)
    }

    #[allow(dead_code)]
    pub fn page_of(&self, section: SectionType) -> Option<usize> {
        self.shown.get(&section).copied()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Diagnostics
// ────────────────────────────────────────────────────────────────────────────

/// Receives diagnostics from the fill loop. All methods default to no-ops.
pub trait PaginationObserver {
    fn page_started(&self, _column: Column, _page_index: usize, _budget: f32) {}

    /// The column hit its page limit; `dropped_units` units were not placed.
    fn page_limit_reached(&self, _column: Column, _limit: usize, _dropped_units: usize) {}

    /// A unit could not be placed (wrong column, or a highlight without a known parent).
    fn unit_skipped(&self, _unit: UnitId, _reason: &str) {}
}

/// Observer that forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PaginationObserver for TracingObserver {
    fn page_started(&self, column: Column, page_index: usize, budget: f32) {
        debug!(%column, page = page_index, budget, "Pagination: filling page");
    }

    fn page_limit_reached(&self, column: Column, limit: usize, dropped_units: usize) {
        warn!(
            %column,
            limit,
            dropped = dropped_units,
            "Pagination: column exceeded page limit, remaining content dropped"
        );
    }

    fn unit_skipped(&self, unit: UnitId, reason: &str) {
        warn!(unit = unit.0, reason, "Pagination: unit skipped");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Column accessors
// ────────────────────────────────────────────────────────────────────────────

/// One column of a page, as seen by the fill loop.
pub trait PageColumn {
    /// Appends the item carried by a non-title, non-highlight unit.
    /// Returns false if the unit does not belong to this column.
    fn push_item(&mut self, unit: &ContentUnit) -> bool;

    /// Appends `text` to the last entry of `section` if that entry came from `parent`.
    fn push_highlight(&mut self, section: SectionType, parent: UnitId, text: &str) -> bool;

    /// Appends a continued copy of the entry carried by `header`.
    fn push_continued(&mut self, header: &ContentUnit) -> bool;

    fn set_continuation(&mut self, section: SectionType);
}

impl PageColumn for LeftColumn {
    fn push_item(&mut self, unit: &ContentUnit) -> bool {
        push_left_entry(self, unit, false)
    }

    fn push_highlight(&mut self, section: SectionType, parent: UnitId, text: &str) -> bool {
        let last = match section {
            SectionType::Work => self
                .work
                .last_mut()
                .filter(|e| e.source == parent)
                .map(|e| &mut e.entry.highlights),
            SectionType::Project => self
                .projects
                .last_mut()
                .filter(|e| e.source == parent)
                .map(|e| &mut e.entry.highlights),
            _ => None,
        };
        match last {
            Some(highlights) => {
                highlights.push(text.to_string());
                true
            }
            None => false,
        }
    }

    fn push_continued(&mut self, header: &ContentUnit) -> bool {
        push_left_entry(self, header, true)
    }

    fn set_continuation(&mut self, section: SectionType) {
        match section {
            SectionType::Work => self.work_continuation = true,
            SectionType::Project => self.projects_continuation = true,
            _ => {}
        }
    }
}

fn push_left_entry(column: &mut LeftColumn, unit: &ContentUnit, continued: bool) -> bool {
    match &unit.content {
        UnitContent::Work(item) => column.work.push(PagedEntry {
            source: unit.id,
            continued,
            entry: item.clone(),
        }),
        UnitContent::Project(item) => column.projects.push(PagedEntry {
            source: unit.id,
            continued,
            entry: item.clone(),
        }),
        _ => return false,
    }
    true
}

impl PageColumn for RightColumn {
    fn push_item(&mut self, unit: &ContentUnit) -> bool {
        match (&unit.content, unit.unit_type) {
            (UnitContent::Education(item), _) => self.education.push(item.clone()),
            (UnitContent::Skill(group), _) => self.skills.push(group.clone()),
            (UnitContent::Text(text), UnitType::AchievementItem) => {
                self.achievements.push(text.clone())
            }
            (UnitContent::Text(text), UnitType::CertificationItem) => {
                self.certifications.push(text.clone())
            }
            _ => return false,
        }
        true
    }

    fn push_highlight(&mut self, _section: SectionType, _parent: UnitId, _text: &str) -> bool {
        false
    }

    fn push_continued(&mut self, _header: &ContentUnit) -> bool {
        false
    }

    fn set_continuation(&mut self, section: SectionType) {
        match section {
            SectionType::Education => self.education_continuation = true,
            SectionType::Skills => self.skills_continuation = true,
            SectionType::Achievements => self.achievements_continuation = true,
            SectionType::Certifications => self.certifications_continuation = true,
            _ => {}
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fill loop
// ────────────────────────────────────────────────────────────────────────────

/// Height budgets for the first and the following pages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBudgets {
    pub first_page: f32,
    pub later_pages: f32,
}

impl PageBudgets {
    pub fn for_page(&self, index: usize) -> f32 {
        if index == 0 {
            self.first_page
        } else {
            self.later_pages
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillSettings {
    pub budgets: PageBudgets,
    pub safety_margin: f32,
    pub max_pages: usize,
}

/// Outcome of one column pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReport {
    pub pages_used: usize,
    pub dropped_units: usize,
}

/// Outcome of both column passes.
#[derive(Debug, Clone)]
pub struct ColumnsOutcome {
    pub pages: PageMap,
    #[allow(dead_code)]
    pub titles: SectionTitles,
    pub left: ColumnReport,
    pub right: ColumnReport,
}

/// Runs the fill loop for both columns against a shared page map.
///
/// Page 0 always exists afterwards, so an empty resume still yields one page.
pub fn paginate_columns(
    left: &[ContentUnit],
    right: &[ContentUnit],
    header: PageHeader,
    settings: FillSettings,
    observer: &dyn PaginationObserver,
) -> ColumnsOutcome {
    let mut pages = PageMap::new(header);
    let mut titles = SectionTitles::new();

    let left_report = fill_column(
        left,
        Column::Left,
        &settings,
        &mut pages,
        &mut titles,
        observer,
        |page| &mut page.left,
    );
    let right_report = fill_column(
        right,
        Column::Right,
        &settings,
        &mut pages,
        &mut titles,
        observer,
        |page| &mut page.right,
    );

    pages.page_mut(0);

    ColumnsOutcome {
        pages,
        titles,
        left: left_report,
        right: right_report,
    }
}

/// Greedily packs one column's units into consecutive pages.
///
/// `access` selects this column's half of a page record.
pub fn fill_column<C, F>(
    units: &[ContentUnit],
    column: Column,
    settings: &FillSettings,
    pages: &mut PageMap,
    titles: &mut SectionTitles,
    observer: &dyn PaginationObserver,
    access: F,
) -> ColumnReport
where
    C: PageColumn,
    F: Fn(&mut PartialPage) -> &mut C,
{
    let parents: HashMap<UnitId, &ContentUnit> = units
        .iter()
        .filter(|u| matches!(u.unit_type, UnitType::WorkHeader | UnitType::ProjectHeader))
        .map(|u| (u.id, u))
        .collect();

    let mut next = 0usize;
    let mut page_index = 0usize;

    while next < units.len() {
        if page_index >= settings.max_pages {
            let dropped = units.len() - next;
            observer.page_limit_reached(column, settings.max_pages, dropped);
            return ColumnReport {
                pages_used: page_index,
                dropped_units: dropped,
            };
        }

        let budget = settings.budgets.for_page(page_index);
        // Nothing gets more room on a later page than on this one.
        let full_size_page = budget >= settings.budgets.later_pages;
        observer.page_started(column, page_index, budget);

        let page = access(pages.page_mut(page_index));
        let mut used = 0.0_f32;
        let mut placed = 0usize;

        let admits = |used: f32, height: f32| {
            used + height <= budget && used < budget * settings.safety_margin
        };

        while let Some(unit) = units.get(next) {
            if unit.unit_type != UnitType::SectionTitle {
                if !admits(used, unit.height) && !(placed == 0 && full_size_page) {
                    break;
                }
                place_unit(page, unit, page_index, titles, &parents, observer);
                used += unit.height;
                placed += 1;
                next += 1;
                continue;
            }

            if titles.is_shown(unit.section_type) {
                next += 1;
                continue;
            }

            // The title is admitted only if its first item is admitted right after it.
            let first_item = units
                .get(next + 1)
                .filter(|n| n.unit_type != UnitType::SectionTitle);
            let fits = admits(used + unit.height, first_item.map_or(0.0, |n| n.height));
            let forced = !fits && placed == 0 && full_size_page;
            if !fits && !forced {
                break;
            }

            titles.mark_shown(unit.section_type, page_index);
            used += unit.height;
            placed += 1;
            next += 1;

            if forced {
                if let Some(item) = first_item {
                    place_unit(page, item, page_index, titles, &parents, observer);
                    used += item.height;
                    placed += 1;
                    next += 1;
                }
            }
        }

        page_index += 1;
    }

    ColumnReport {
        pages_used: page_index,
        dropped_units: 0,
    }
}

fn place_unit<C: PageColumn>(
    column: &mut C,
    unit: &ContentUnit,
    page_index: usize,
    titles: &SectionTitles,
    parents: &HashMap<UnitId, &ContentUnit>,
    observer: &dyn PaginationObserver,
) {
    let section = unit.section_type;

    let placed = if unit.unit_type.is_highlight() {
        match (unit.parent_id, &unit.content) {
            (Some(parent), UnitContent::Highlight(text)) => {
                column.push_highlight(section, parent, text)
                    || (parents
                        .get(&parent)
                        .is_some_and(|header| column.push_continued(header))
                        && column.push_highlight(section, parent, text))
            }
            _ => false,
        }
    } else {
        column.push_item(unit)
    };

    if !placed {
        let reason = if unit.unit_type.is_highlight() {
            "highlight has no parent entry in this column"
        } else {
            "unit does not belong to this column"
        };
        observer.unit_skipped(unit.id, reason);
        return;
    }

    if page_index > 0 && titles.shown_before(section, page_index) {
        column.set_continuation(section);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
