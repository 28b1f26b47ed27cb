//! Missing-assignment report over a window of upcoming days.

use crate::missing::{has_assigned_pages, missing_subjects};
use crate::model::subject::Subject;
use crate::model::Notebook;
use crate::render::{format_date, open_container, MISSING_ASSIGNMENT_PREFIX};
use crate::report::html_writer::{HtmlResult, HtmlWriter};
use crate::report::indenter::Indenter;
use chrono::{DateTime, FixedOffset, NaiveDate};

const MISSING_ITEM_INDENT: &str = "    - ";
const OK_CELL_TEXT: &str = "\u{a0}";

/// Per day, one `notebook - subject` line for every missing subject.
pub fn missing_text(notebooks: &[Notebook], dates: &[NaiveDate]) -> String {
    let mut text = Indenter::new();
    for &date in dates {
        text.append_line(&format!("{} missing:", format_date(date)))
            .add_indent(MISSING_ITEM_INDENT);
        for notebook in notebooks {
            for subject in missing_subjects(notebook, date) {
                text.append_line(&format!("{} - {}", notebook.name(), subject));
            }
        }
        text.remove_indent().append_line("");
    }
    text.into_string()
}

/// Per day, a table of notebooks missing at least one subject.
pub fn missing_html(
    notebooks: &[Notebook],
    dates: &[NaiveDate],
    now: DateTime<FixedOffset>,
) -> HtmlResult<String> {
    let mut html = open_container(MISSING_ASSIGNMENT_PREFIX, now)?;
    for &date in dates {
        html.open_tag("div", "DayContainer")?
            .append_element("p", "DayHeader", &format_date(date))?
            .append_element("p", "DaySubheader", "Assignments missing:")?
            .open_tag("table", "DayTable")?
            .open_tag("tbody", "TableBody")?
            .open_tag("tr", "HeaderRow")?
            .append_element("th", "CellHeader", "Name")?;
        for subject in Subject::ALL {
            html.append_element("th", "CellHeader", subject.as_str())?;
        }
        html.close_tag();
        for notebook in notebooks {
            if let Some(row) = missing_row_html(notebook, date)? {
                html.append_html(&row)?;
            }
        }
        // tbody, table, day container
        html.close_tag().close_tag().close_tag();
    }
    html.close_all_tags().render()
}

/// Row for one notebook, or `None` when nothing is missing on `date`.
///
/// Cells: `N/A` for subjects the notebook never registered, a non-breaking
/// space when work is assigned, `X` when it is missing.
pub fn missing_row_html(notebook: &Notebook, date: NaiveDate) -> HtmlResult<Option<HtmlWriter>> {
    let mut html = HtmlWriter::with_class_prefix(MISSING_ASSIGNMENT_PREFIX);
    html.open_tag("tr", "StudentRow")?
        .append_element("td", "CellItem", notebook.name())?;

    let mut any_missing = false;
    for subject in Subject::ALL {
        let (class, text) = if !notebook.has_subject(subject) {
            ("CellItemNA", "N/A")
        } else if has_assigned_pages(notebook, subject, date) {
            ("CellItemOK", OK_CELL_TEXT)
        } else {
            any_missing = true;
            ("CellItemX", "X")
        };
        html.append_element("td", class, text)?;
    }

    if !any_missing {
        return Ok(None);
    }
    html.close_all_tags();
    Ok(Some(html))
}
