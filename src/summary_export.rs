use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::state::Report;

pub struct SummaryInput<'a> {
    pub time_limit_minutes: u32,
    pub report: &'a Report,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub leagues: usize,
    pub athletes: usize,
}

/// Write the end-of-round summary workbook: headline numbers, league counts
/// (largest first) and every entered athlete with the league it resolved to.
pub fn export_summary(path: &Path, input: &SummaryInput<'_>) -> Result<ExportReport> {
    let summary_rows = summary_rows(input);
    let league_rows = league_rows(input.report);
    let athlete_rows = athlete_rows(input.report);

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary")?;
        write_rows(sheet, &summary_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("LeagueCounts")?;
        write_rows(sheet, &league_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Athletes")?;
        write_rows(sheet, &athlete_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        leagues: league_rows.len().saturating_sub(1),
        athletes: athlete_rows.len().saturating_sub(1),
    })
}

fn summary_rows(input: &SummaryInput<'_>) -> Vec<Vec<String>> {
    let report = input.report;
    vec![
        vec!["Metric".to_string(), "Value".to_string()],
        vec![
            "Time Limit (minutes)".to_string(),
            input.time_limit_minutes.to_string(),
        ],
        vec!["Total Athletes".to_string(), report.total.to_string()],
        vec![
            "Verified".to_string(),
            report.classification.verified.len().to_string(),
        ],
        vec![
            "Percent Verified".to_string(),
            format!("{:.2}", report.percent_verified),
        ],
    ]
}

fn league_rows(report: &Report) -> Vec<Vec<String>> {
    let mut rows = vec![vec!["League".to_string(), "Count".to_string()]];
    for (label, count) in report.tally.sorted_desc() {
        rows.push(vec![label.to_string(), count.to_string()]);
    }
    rows
}

fn athlete_rows(report: &Report) -> Vec<Vec<String>> {
    let mut rows = vec![vec!["Athlete".to_string(), "League".to_string()]];
    for name in report
        .classification
        .verified
        .iter()
        .chain(report.classification.unverified.iter())
    {
        rows.push(vec![name.input_name.clone(), name.league.to_string()]);
    }
    rows
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{League, Roster, RosterEntry};
    use crate::state::{EntryList, build_report};

    fn sample_report() -> Report {
        let roster = Roster::from_entries([
            RosterEntry {
                full_name: "LeBron James".to_string(),
                league: League::Nba,
            },
            RosterEntry {
                full_name: "Stephen Curry".to_string(),
                league: League::Nba,
            },
            RosterEntry {
                full_name: "Mike Trout".to_string(),
                league: League::Mlb,
            },
        ]);
        let entries = [
            "John Doe",
            "Mike Trout",
            "LeBron James",
            "Jane Roe",
            "Stephen Curry",
            "Max Power",
        ]
        .into_iter()
        .collect::<EntryList>();
        build_report(&entries, &roster).expect("non-empty")
    }

    #[test]
    fn league_rows_follow_sorted_tally() {
        let rows = league_rows(&sample_report());
        let body = rows[1..]
            .iter()
            .map(|row| (row[0].as_str(), row[1].as_str()))
            .collect::<Vec<_>>();
        assert_eq!(rows[0], ["League", "Count"]);
        assert_eq!(body, [("Unverified", "3"), ("NBA", "2"), ("MLB", "1")]);
    }

    #[test]
    fn athlete_rows_list_verified_then_unverified() {
        let rows = athlete_rows(&sample_report());
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[1], ["Mike Trout", "MLB"]);
        assert_eq!(rows[3], ["Stephen Curry", "NBA"]);
        assert_eq!(rows[4], ["John Doe", "Unverified"]);
        assert_eq!(rows[6], ["Max Power", "Unverified"]);
    }

    #[test]
    fn summary_rows_carry_headline_numbers() {
        let report = sample_report();
        let rows = summary_rows(&SummaryInput {
            time_limit_minutes: 15,
            report: &report,
        });
        assert_eq!(rows[1], ["Time Limit (minutes)", "15"]);
        assert_eq!(rows[2], ["Total Athletes", "6"]);
        assert_eq!(rows[3], ["Verified", "3"]);
        assert_eq!(rows[4], ["Percent Verified", "50.00"]);
    }
}
