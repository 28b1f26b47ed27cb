//! Status reports listing pages that need attention.

use crate::model::page::Page;
use crate::model::Notebook;
use crate::render::{open_container, RenderedReport, STATUS_REPORT_PREFIX};
use crate::report::html_writer::{HtmlResult, HtmlWriter};
use crate::report::indenter::Indenter;
use chrono::{DateTime, FixedOffset};

const NO_GROUP: &str = "-";

/// Which page query a status report is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Changed since assignment and carrying work.
    Ungraded,
    /// Not modified within the activity threshold.
    Inactive,
    /// No images at all.
    Empty,
    /// Tag name contains the unreviewed marker.
    Unreviewed,
}

impl StatusKind {
    pub const ALL: [StatusKind; 4] = [
        StatusKind::Ungraded,
        StatusKind::Inactive,
        StatusKind::Empty,
        StatusKind::Unreviewed,
    ];

    /// Lower-case word used in the text report heading and file name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ungraded => "ungraded",
            Self::Inactive => "inactive",
            Self::Empty => "empty",
            Self::Unreviewed => "unreviewed",
        }
    }

    pub fn text_name(self) -> String {
        format!("{}report.txt", self.label())
    }

    pub fn html_name(self) -> &'static str {
        match self {
            Self::Ungraded => "UngradedPages.html",
            Self::Inactive => "InactivePages.html",
            Self::Empty => "EmptyPages.html",
            Self::Unreviewed => "UnreviewedPages.html",
        }
    }

    /// Pages of `notebook` this report lists.
    pub fn select<'n>(self, notebook: &'n Notebook, unreviewed_marker: &str) -> Vec<&'n Page> {
        match self {
            Self::Ungraded => notebook.ungraded_pages(),
            Self::Inactive => notebook.inactive_pages(),
            Self::Empty => notebook.empty_pages(),
            Self::Unreviewed => notebook.unreviewed_pages(unreviewed_marker),
        }
    }
}

/// Selected pages across all notebooks, paired with their notebook.
fn collect<'n>(
    kind: StatusKind,
    notebooks: &'n [Notebook],
    unreviewed_marker: &str,
) -> Vec<(&'n Notebook, &'n Page)> {
    notebooks
        .iter()
        .flat_map(|notebook| {
            kind.select(notebook, unreviewed_marker)
                .into_iter()
                .map(move |page| (notebook, page))
        })
        .collect()
}

/// `notebook > group > section > page [tag]`.
pub fn status_line(notebook: &Notebook, page: &Page) -> String {
    let group = notebook
        .page_section_group(page)
        .map_or(NO_GROUP, |group| group.name());
    format!(
        "{} > {} > {} > {} [{}]",
        notebook.name(),
        group,
        notebook.page_section(page).name(),
        page.name(),
        page.tag_name()
    )
}

pub fn status_text(kind: StatusKind, notebooks: &[Notebook], unreviewed_marker: &str) -> String {
    let pages = collect(kind, notebooks, unreviewed_marker);
    let mut text = Indenter::with_line(&format!("{} {} pages:", pages.len(), kind.label()));
    for (notebook, page) in &pages {
        text.append_line(&status_line(notebook, page));
    }
    text.append_line(" ");
    text.into_string()
}

pub fn status_html(
    kind: StatusKind,
    notebooks: &[Notebook],
    unreviewed_marker: &str,
    now: DateTime<FixedOffset>,
) -> HtmlResult<String> {
    let mut html = open_container(STATUS_REPORT_PREFIX, now)?;
    html.open_tag("table", "Table")?
        .open_tag("tr", "HeaderRow")?
        .append_element("th", "HeaderNotebook", "Notebook")?
        .append_element("th", "HeaderSectionGroup", "Section Group")?
        .append_element("th", "HeaderSection", "Section")?
        .append_element("th", "HeaderPage", "Page")?
        .append_element("th", "HeaderTag", "Tag")?
        .close_tag();
    for (notebook, page) in collect(kind, notebooks, unreviewed_marker) {
        html.append_html(&status_row_html(notebook, page)?)?;
    }
    html.close_all_tags().render()
}

fn status_row_html(notebook: &Notebook, page: &Page) -> HtmlResult<HtmlWriter> {
    let group = notebook
        .page_section_group(page)
        .map_or(NO_GROUP, |group| group.name());
    let mut html = HtmlWriter::with_class_prefix(STATUS_REPORT_PREFIX);
    html.open_tag("tr", "Row")?
        .append_element("td", "CellNotebook", notebook.name())?
        .append_element("td", "CellSectionGroup", group)?
        .append_element("td", "CellSection", notebook.page_section(page).name())?
        .append_element("td", "CellPage", page.name())?
        .append_element("td", "CellTag", page.tag_name())?
        .close_tag();
    Ok(html)
}

/// Text and HTML documents for every status kind.
pub fn status_reports(
    notebooks: &[Notebook],
    unreviewed_marker: &str,
    now: DateTime<FixedOffset>,
) -> HtmlResult<Vec<RenderedReport>> {
    let mut reports = Vec::with_capacity(StatusKind::ALL.len() * 2);
    for kind in StatusKind::ALL {
        reports.push(RenderedReport::new(
            kind.text_name(),
            status_text(kind, notebooks, unreviewed_marker),
        ));
        reports.push(RenderedReport::new(
            kind.html_name(),
            status_html(kind, notebooks, unreviewed_marker, now)?,
        ));
    }
    Ok(reports)
}
