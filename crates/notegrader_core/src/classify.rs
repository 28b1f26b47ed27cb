//! Page and image status classification policy.
//!
//! # Responsibility
//! - Decide the derived status flags (active, changed, has-work) and the
//!   inferred assignment date for pages and images.
//! - Keep every threshold in an explicit [`ClassifierConfig`] value.
//!
//! # Invariants
//! - All functions are pure: same inputs, same flags.
//! - Weekday folders resolve by scanning forward one day at a time from the
//!   page creation date.

use crate::geometry::Rect;
use crate::model::subject::weekday_from_name;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Thresholds and defaults applied while classifying pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Pages modified within this many days of "now" are active.
    pub active_threshold_days: f64,
    /// Minimum overlapping ink marks for an image to count as worked on.
    pub minimum_inks: usize,
    /// Minimum ink area to image area ratio for an image to count as worked on.
    pub page_fill_constant: f64,
    /// Tag name used for pages without a tag.
    pub default_tag: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            active_threshold_days: 3.0,
            minimum_inks: 5,
            page_fill_constant: 0.005,
            default_tag: "none".to_string(),
        }
    }
}

/// Returns whether a page was modified within the active window.
pub fn is_active(
    last_modified_at: DateTime<FixedOffset>,
    now: DateTime<FixedOffset>,
    config: &ClassifierConfig,
) -> bool {
    let elapsed_days =
        now.signed_duration_since(last_modified_at).num_milliseconds() as f64 / MILLIS_PER_DAY;
    elapsed_days < config.active_threshold_days
}

/// Returns whether a page was modified after its tag was last assigned.
pub fn is_changed(
    last_modified_at: DateTime<FixedOffset>,
    last_assigned_at: DateTime<FixedOffset>,
) -> bool {
    last_modified_at > last_assigned_at
}

/// Ratio of summed ink area to image area. Zero for empty images.
pub fn fill_ratio(image: &Rect, ink_area: f64) -> f64 {
    let image_area = image.area();
    if image_area <= 0.0 {
        return 0.0;
    }
    ink_area / image_area
}

/// Decides whether an image carries enough handwritten work.
///
/// Both the ink count and the fill ratio thresholds must be met.
pub fn image_has_work<'a, I>(image: &Rect, inks: I, config: &ClassifierConfig) -> bool
where
    I: IntoIterator<Item = &'a Rect>,
{
    let (count, ink_area) = inks
        .into_iter()
        .fold((0usize, 0.0f64), |(count, area), ink| (count + 1, area + ink.area()));
    count >= config.minimum_inks && fill_ratio(image, ink_area) >= config.page_fill_constant
}

/// First date on or after `start` that falls on `weekday`.
pub fn next_weekday_on_or_after(start: NaiveDate, weekday: Weekday) -> NaiveDate {
    let mut date = start;
    while date.weekday() != weekday {
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    date
}

/// Infers the date a page's work was due.
///
/// Pages filed under a weekday-named section group are due on that weekday,
/// on or after creation. All other pages are due on the day their tag was
/// last assigned.
pub fn original_assignment_date(
    section_group_name: Option<&str>,
    created_at: DateTime<FixedOffset>,
    last_assigned_at: DateTime<FixedOffset>,
) -> NaiveDate {
    match section_group_name.and_then(weekday_from_name) {
        Some(weekday) => next_weekday_on_or_after(created_at.date_naive(), weekday),
        None => last_assigned_at.date_naive(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        image_has_work, is_active, is_changed, next_weekday_on_or_after,
        original_assignment_date, ClassifierConfig,
    };
    use crate::geometry::Rect;
    use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Weekday};

    fn at(value: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(value).unwrap()
    }

    fn unit_inks(count: usize) -> Vec<Rect> {
        (0..count)
            .map(|i| Rect::new(i as f32, 0.0, 1.0, 1.0))
            .collect()
    }

    #[test]
    fn five_unit_inks_on_hundred_area_image_has_work() {
        let image = Rect::new(0.0, 0.0, 10.0, 10.0);
        let config = ClassifierConfig::default();
        assert!(image_has_work(&image, &unit_inks(5), &config));
    }

    #[test]
    fn four_inks_fail_count_threshold_despite_ratio() {
        let image = Rect::new(0.0, 0.0, 10.0, 10.0);
        let config = ClassifierConfig::default();
        assert!(!image_has_work(&image, &unit_inks(4), &config));
    }

    #[test]
    fn enough_inks_with_tiny_area_fail_ratio_threshold() {
        let image = Rect::new(0.0, 0.0, 1000.0, 1000.0);
        let config = ClassifierConfig::default();
        assert!(!image_has_work(&image, &unit_inks(10), &config));
    }

    #[test]
    fn thresholds_come_from_config() {
        let image = Rect::new(0.0, 0.0, 10.0, 10.0);
        let config = ClassifierConfig {
            minimum_inks: 2,
            page_fill_constant: 0.01,
            ..ClassifierConfig::default()
        };
        assert!(image_has_work(&image, &unit_inks(2), &config));
        assert!(!image_has_work(&image, &unit_inks(1), &config));
    }

    #[test]
    fn empty_image_never_meets_ratio() {
        let config = ClassifierConfig::default();
        assert!(!image_has_work(&Rect::EMPTY, &unit_inks(8), &config));
    }

    #[test]
    fn active_window_is_exclusive() {
        let now = at("2024-03-10T12:00:00Z");
        let config = ClassifierConfig::default();
        assert!(is_active(now - Duration::hours(71), now, &config));
        assert!(!is_active(now - Duration::hours(72), now, &config));
        assert!(!is_active(now - Duration::days(30), now, &config));
    }

    #[test]
    fn changed_requires_strictly_later_modification() {
        let assigned = at("2024-03-10T12:00:00Z");
        assert!(is_changed(assigned + Duration::seconds(1), assigned));
        assert!(!is_changed(assigned, assigned));
        assert!(!is_changed(assigned - Duration::days(1), assigned));
    }

    #[test]
    fn monday_folder_page_created_wednesday_is_due_next_monday() {
        // 2024-03-06 is a Wednesday.
        let created = at("2024-03-06T09:00:00Z");
        let assigned = at("2024-03-20T09:00:00Z");
        let date = original_assignment_date(Some("Monday"), created, assigned);
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());

        let offset = (7 + Weekday::Mon.num_days_from_monday() as i64
            - Weekday::Wed.num_days_from_monday() as i64)
            % 7;
        assert_eq!(date, created.date_naive() + Duration::days(offset));
    }

    #[test]
    fn forward_scan_matches_modular_offset_for_every_pair() {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for start_offset in 0..7 {
            let start = base + Duration::days(start_offset);
            for target in [
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ] {
                let scanned = next_weekday_on_or_after(start, target);
                let offset = (7 + target.num_days_from_monday() as i64
                    - start.weekday().num_days_from_monday() as i64)
                    % 7;
                assert_eq!(scanned, start + Duration::days(offset));
                assert_eq!(scanned.weekday(), target);
            }
        }
    }

    #[test]
    fn same_weekday_resolves_to_creation_date() {
        let created = at("2024-03-06T23:00:00Z");
        let date = original_assignment_date(Some("wednesday"), created, created);
        assert_eq!(date, created.date_naive());
    }

    #[test]
    fn weekday_is_read_on_the_timestamp_own_clock() {
        // Monday evening in New York is already Tuesday in UTC.
        let created = at("2024-03-04T19:30:00-05:00");
        let date = original_assignment_date(Some("Monday"), created, created);
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());

        let assigned = at("2024-03-08T23:30:00-08:00");
        assert_eq!(
            original_assignment_date(None, created, assigned),
            NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()
        );
    }

    #[test]
    fn active_window_compares_instants_across_offsets() {
        let now = at("2024-03-10T12:00:00+00:00");
        let config = ClassifierConfig::default();
        assert!(is_active(at("2024-03-07T15:00:00+02:00"), now, &config));
        assert!(!is_active(at("2024-03-07T14:00:00+02:00"), now, &config));
    }

    #[test]
    fn non_weekday_folder_uses_tag_assignment_date() {
        let created = at("2024-03-06T09:00:00Z");
        let assigned = at("2024-03-08T17:30:00Z");
        assert_eq!(
            original_assignment_date(Some("Week 3"), created, assigned),
            NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()
        );
        assert_eq!(
            original_assignment_date(None, created, assigned),
            NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()
        );
    }
}
