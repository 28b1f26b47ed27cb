//! Full hierarchy report: every notebook down to individual inks.

use crate::model::image::Image;
use crate::model::page::Page;
use crate::model::section::Section;
use crate::model::section_group::SectionGroup;
use crate::model::Notebook;
use crate::render::{format_date, open_container, FULL_REPORT_PREFIX};
use crate::report::html_writer::{HtmlResult, HtmlWriter};
use crate::report::indenter::Indenter;
use chrono::{DateTime, FixedOffset};

const NOTEBOOK_RULE: &str = "--------------------------------";
const PAGE_NAME_WIDTH: usize = 40;
const INK_LIST_INDENT: &str = "|   ";

/// Text report for all notebooks, separated by blank lines.
pub fn full_text(notebooks: &[Notebook]) -> String {
    notebooks
        .iter()
        .map(notebook_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn notebook_text(notebook: &Notebook) -> String {
    let subjects: Vec<&str> = notebook.subjects().iter().map(|s| s.as_str()).collect();
    let mut text = Indenter::with_line(&format!("{} [{}]", notebook.name(), subjects.join(", ")));
    text.append_line(NOTEBOOK_RULE);
    for group in notebook.section_groups() {
        text.append_line(&section_group_text(notebook, group));
    }
    text.into_string()
}

fn section_group_text(notebook: &Notebook, group: &SectionGroup) -> String {
    let mut text = Indenter::with_line(&format!("# SectionGroup: {} #", group.name()));
    text.add_indent_default();
    for section in notebook.sections_in(group) {
        text.append_line(&section_text(notebook, section));
    }
    text.into_string()
}

fn section_text(notebook: &Notebook, section: &Section) -> String {
    let mut text = Indenter::with_line(&format!("# Section: {} #", section.name()));
    if section.is_deleted() {
        text.append_same_line(" (deleted)");
    }
    text.add_indent_default();
    for page in notebook.pages_in(section) {
        text.append_line(&page_text(page));
    }
    text.into_string()
}

/// One page line (padded name, assignment date, flags) followed by its images.
pub fn page_text(page: &Page) -> String {
    let mut text = Indenter::with_line(&format!(
        "{:<width$}{}{}",
        page.name(),
        format_date(page.original_assignment_date()),
        page_flags(page),
        width = PAGE_NAME_WIDTH
    ));
    text.add_indent_default();
    for image in page.images() {
        text.append_line(&image_text(page, image));
    }
    text.into_string()
}

fn page_flags(page: &Page) -> String {
    let mut flags = format!(" [{}]", page.tag_name());
    if page.is_active() {
        flags.push_str(" (active)");
    }
    if page.is_changed() {
        flags.push_str(" (changed)");
    }
    if page.has_work() {
        flags.push_str(" (has work)");
    }
    if page.is_empty() {
        flags.push_str(" (empty)");
    }
    flags
}

fn image_text(page: &Page, image: &Image) -> String {
    let mut text = Indenter::with_line(&image.rect().to_string());
    if image.has_work() {
        text.append_same_line(" (!)(has work)");
    }
    if image.ink_count() > 0 {
        text.append_line(&format!("{} ink(s):", image.ink_count()))
            .add_indent(INK_LIST_INDENT);
        for (number, ink) in page.image_inks(image).enumerate() {
            text.append_line(&format!("{}) {}", number + 1, ink));
        }
    }
    text.into_string()
}

/// HTML report: one table per notebook, section groups as columns.
pub fn full_html(notebooks: &[Notebook], now: DateTime<FixedOffset>) -> HtmlResult<String> {
    let mut html = open_container(FULL_REPORT_PREFIX, now)?;
    for notebook in notebooks {
        let mut block = notebook_html(notebook)?;
        block.append_break();
        html.append_html(&block)?;
    }
    html.close_all_tags().render()
}

pub fn notebook_html(notebook: &Notebook) -> HtmlResult<HtmlWriter> {
    let mut html = HtmlWriter::with_class_prefix(FULL_REPORT_PREFIX);
    html.open_tag("div", "NotebookContainer")?
        .append_element("p", "NotebookName", notebook.name())?
        .open_tag("div", "SectionTableContainer")?
        .open_tag("table", "SectionTable")?
        .open_tag("tr", "SectionGroupHeaderRow")?;
    for group in notebook.section_groups() {
        html.append_element("th", "SectionGroupCellHeader", group.name())?;
    }
    html.close_tag().open_tag("tr", "SectionGroupRow")?;
    for group in notebook.section_groups() {
        html.append_html(&section_group_cell_html(notebook, group)?)?;
    }
    html.close_all_tags();
    Ok(html)
}

fn section_group_cell_html(notebook: &Notebook, group: &SectionGroup) -> HtmlResult<HtmlWriter> {
    let sections = notebook
        .sections_in(group)
        .map(|section| section_html(notebook, section))
        .collect::<HtmlResult<Vec<_>>>()?;

    let mut html = HtmlWriter::with_class_prefix(FULL_REPORT_PREFIX);
    html.open_tag("td", "SectionGroupCellItem")?
        .append_element_html("div", "SectionItem", &sections)?
        .close_tag();
    Ok(html)
}

fn section_html(notebook: &Notebook, section: &Section) -> HtmlResult<HtmlWriter> {
    let pages = notebook
        .pages_in(section)
        .map(page_html)
        .collect::<HtmlResult<Vec<_>>>()?;

    let header_class = if section.is_deleted() {
        "SectionHeaderDeleted"
    } else {
        "SectionHeader"
    };
    let mut html = HtmlWriter::with_class_prefix(FULL_REPORT_PREFIX);
    html.append_element("p", header_class, section.name())?
        .append_element_html("div", "PageItem", &pages)?;
    Ok(html)
}

/// One page entry: name, date, status classes and a list of image cards.
pub fn page_html(page: &Page) -> HtmlResult<HtmlWriter> {
    let mut html = HtmlWriter::with_class_prefix(FULL_REPORT_PREFIX);
    html.open_tag("div", page_status_class(page))?
        .append_element("p", "PageName", page.name())?
        .append_element(
            "p",
            "PageDate",
            &format_date(page.original_assignment_date()),
        )?
        .append_element("p", "PageTag", page.tag_name())?;
    if !page.images().is_empty() {
        html.open_tag("ul", "ImageList")?;
        for image in page.images() {
            html.append_html(&image_html(page, image)?)?;
        }
        html.close_tag();
    }
    html.close_tag();
    Ok(html)
}

fn page_status_class(page: &Page) -> &'static str {
    if page.is_empty() {
        "PageEmpty"
    } else if page.is_changed() && page.has_work() {
        "PageUngraded"
    } else if !page.is_active() {
        "PageInactive"
    } else {
        "Page"
    }
}

fn image_html(page: &Page, image: &Image) -> HtmlResult<HtmlWriter> {
    let count = image.ink_count();
    let marks = if count == 1 {
        "1 mark".to_string()
    } else {
        format!("{count} marks")
    };
    let mut html = HtmlWriter::with_class_prefix(FULL_REPORT_PREFIX);
    html.open_tag("li", if image.has_work() { "ImageItemWork" } else { "ImageItem" })?
        .append_element("p", "ImageSubheader", &marks)?;
    if count > 0 {
        let inks = page.image_inks(image).map(|ink| ink.name());
        html.append_element_texts("p", "ImageInks", inks)?;
    }
    html.close_tag();
    Ok(html)
}
