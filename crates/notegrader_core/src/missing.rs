//! Missing-assignment detection over classified notebooks.
//!
//! # Invariants
//! - Only non-empty pages count as assigned work.
//! - Missing subjects are reported in the notebook's registration order.
//! - Lookahead windows never contain Sundays.

use crate::model::subject::Subject;
use crate::model::Notebook;
use chrono::{Datelike, NaiveDate, Weekday};

/// Returns whether `notebook` has a non-empty page for `subject` due on `date`.
pub fn has_assigned_pages(notebook: &Notebook, subject: Subject, date: NaiveDate) -> bool {
    notebook.has_pages_where(|page| {
        !page.is_empty()
            && notebook.page_subject(page) == Some(subject)
            && page.original_assignment_date() == date
    })
}

/// Registered subjects of `notebook` with no assigned page on `date`.
pub fn missing_subjects(notebook: &Notebook, date: NaiveDate) -> Vec<Subject> {
    notebook
        .subjects()
        .iter()
        .copied()
        .filter(|subject| !has_assigned_pages(notebook, *subject, date))
        .collect()
}

/// The next `count` dates starting at `start`, skipping Sundays.
pub fn lookahead_dates(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    let mut date = start;
    while dates.len() < count {
        if date.weekday() != Weekday::Sun {
            dates.push(date);
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    dates
}
