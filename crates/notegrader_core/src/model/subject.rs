//! Closed vocabularies: assignable subjects and weekday folder names.
//!
//! # Invariants
//! - The subject list order is fixed; detection picks the first match.
//! - Weekday names match only as whole English day names, ignoring case.

use chrono::Weekday;
use std::fmt::{Display, Formatter};

/// Subject a student can be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subject {
    Math,
    Reading,
    Grammar,
}

impl Subject {
    /// Every known subject, in detection order.
    pub const ALL: [Subject; 3] = [Subject::Math, Subject::Reading, Subject::Grammar];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Math => "Math",
            Self::Reading => "Reading",
            Self::Grammar => "Grammar",
        }
    }

    /// Detects the subject a section name refers to.
    ///
    /// Returns the first known subject contained in `name`, ignoring case.
    pub fn detect(name: &str) -> Option<Subject> {
        let lowered = name.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|subject| lowered.contains(&subject.as_str().to_lowercase()))
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Full English name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Resolves a folder name that is exactly a weekday name, ignoring case.
///
/// Abbreviations (`Mon`) and names with extra words do not match.
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    WEEKDAYS
        .into_iter()
        .find(|day| weekday_name(*day).eq_ignore_ascii_case(name))
}
