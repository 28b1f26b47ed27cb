mod common;

use chrono::NaiveDate;
use notegrader_core::missing::{has_assigned_pages, lookahead_dates, missing_subjects};
use notegrader_core::model::node::RawNode;
use notegrader_core::render::missing::{missing_html, missing_row_html, missing_text};
use notegrader_core::{
    load_notebooks, BuildContext, ClassifierConfig, MemoryHierarchyProvider, Notebook, Subject,
};

fn notebooks() -> Vec<Notebook> {
    let provider = common::provider();
    let classifier = ClassifierConfig::default();
    let ctx = BuildContext::new(&provider, &classifier, common::now());
    load_notebooks(&ctx, "QuestLearning").unwrap()
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
}

#[test]
fn subject_with_work_due_is_not_missing() {
    let notebooks = notebooks();
    let ada = &notebooks[0];

    assert!(has_assigned_pages(ada, Subject::Math, monday()));
    assert!(!has_assigned_pages(ada, Subject::Reading, monday()));
    assert_eq!(missing_subjects(ada, monday()), vec![Subject::Reading]);
}

#[test]
fn empty_pages_never_count_as_assigned() {
    let notebooks = notebooks();
    let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    // The Story page is due that Tuesday but has no images.
    assert_eq!(
        missing_subjects(&notebooks[0], tuesday),
        vec![Subject::Math, Subject::Reading]
    );
}

#[test]
fn text_report_lists_missing_subjects_per_day() {
    let notebooks = notebooks();
    let text = missing_text(&notebooks, &[monday()]);
    assert_eq!(text, "03/11/2024 missing:\n    - Ada Lovelace - Reading\n");
}

#[test]
fn html_row_marks_each_subject_cell() {
    let notebooks = notebooks();
    let row = missing_row_html(&notebooks[0], monday())
        .unwrap()
        .unwrap()
        .render()
        .unwrap();

    assert!(row.contains("<tr class='missingAssignmentStudentRow'>"));
    assert!(row.contains("<td class='missingAssignmentCellItemOK'>\n        \u{a0}\n    </td>"));
    assert!(row.contains("<td class='missingAssignmentCellItemX'>\n        X\n    </td>"));
    assert!(row.contains("<td class='missingAssignmentCellItemNA'>\n        N/A\n    </td>"));
}

#[test]
fn notebooks_without_registered_subjects_get_no_row() {
    let hierarchy = RawNode::parse_xml(
        r#"<Notebooks><Notebook name="New Student"><SectionGroup name="Monday" /></Notebook></Notebooks>"#,
    )
    .unwrap();
    let provider = MemoryHierarchyProvider::new(hierarchy);
    let classifier = ClassifierConfig::default();
    let ctx = BuildContext::new(&provider, &classifier, common::now());
    let newcomer = load_notebooks(&ctx, "").unwrap().remove(0);

    assert!(missing_row_html(&newcomer, monday()).unwrap().is_none());
    assert_eq!(missing_text(&[newcomer], &[monday()]), "03/11/2024 missing:\n");
}

#[test]
fn html_report_has_one_day_container_per_date() {
    let notebooks = notebooks();
    let friday = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
    let dates = lookahead_dates(friday, 2);
    let html = missing_html(&notebooks, &dates, common::now()).unwrap();

    assert_eq!(html.matches("missingAssignmentDayContainer").count(), 2);
    assert_eq!(html.matches("missingAssignmentStudentRow").count(), 2);
    assert!(html.contains("Last updated 3/8 12:00 PM"));
    assert!(html.contains("<th class='missingAssignmentCellHeader'>\n"));
}
