use std::fs;

use athlete_tally::roster::{League, Roster, RosterEntry};
use athlete_tally::state::{EntryList, build_report};
use athlete_tally::summary_export::{SummaryInput, export_summary};

#[test]
fn writes_summary_workbook() {
    let roster = Roster::from_entries([
        RosterEntry {
            full_name: "LeBron James".to_string(),
            league: League::Nba,
        },
        RosterEntry {
            full_name: "Mike Trout".to_string(),
            league: League::Mlb,
        },
    ]);
    let entries = ["LeBron James", "Mike Trout", "John Doe"]
        .into_iter()
        .collect::<EntryList>();
    let report = build_report(&entries, &roster).expect("non-empty");

    let dir = std::env::temp_dir().join(format!("athlete_tally_test_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("summary.xlsx");

    let done = export_summary(
        &path,
        &SummaryInput {
            time_limit_minutes: 5,
            report: &report,
        },
    )
    .expect("export should succeed");

    assert_eq!(done.athletes, report.total);
    assert_eq!(done.leagues, report.tally.len());
    assert_eq!(done.athletes, 3);
    assert_eq!(done.leagues, 3);
    assert!(fs::metadata(&path).map(|m| m.len() > 0).unwrap_or(false));
    let _ = fs::remove_dir_all(&dir);
}
