use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use athlete_tally::config::Settings;
use athlete_tally::matcher::{ClassifiedName, LeagueLabel};
use athlete_tally::roster::load_roster;
use athlete_tally::state::{EntryList, build_report};

#[derive(Serialize)]
struct JsonReport<'a> {
    total: usize,
    percent_verified: f64,
    verified: &'a [ClassifiedName],
    unverified: &'a [ClassifiedName],
    tally: Vec<JsonTallyRow>,
}

#[derive(Serialize)]
struct JsonTallyRow {
    league: LeagueLabel,
    count: usize,
}

fn main() -> Result<()> {
    let settings = Settings::load();
    let roster_path = parse_roster_arg().unwrap_or(settings.roster_path);
    let json = std::env::args().skip(1).any(|arg| arg == "--json");

    let entries = parse_names().into_iter().collect::<EntryList>();
    if entries.is_empty() {
        return Err(anyhow!("no athlete names given"));
    }

    let roster = load_roster(&roster_path)
        .with_context(|| format!("unable to load roster {}", roster_path.display()))?;
    let report = build_report(&entries, &roster).context("empty athlete list")?;

    if json {
        let out = JsonReport {
            total: report.total,
            percent_verified: report.percent_verified,
            verified: &report.classification.verified,
            unverified: &report.classification.unverified,
            tally: report
                .tally
                .sorted_desc()
                .into_iter()
                .map(|(league, count)| JsonTallyRow { league, count })
                .collect(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("serialize report")?
        );
        return Ok(());
    }

    println!("Roster: {} ({} athletes)", roster_path.display(), roster.len());
    println!("Total athletes entered: {}", report.total);
    println!(
        "We could verify {}, or {}% athletes in the list",
        report.classification.verified.len(),
        report.percent_verified
    );
    println!("Verified athletes:");
    for name in &report.classification.verified {
        println!(" - {} ({})", name.input_name, name.league);
    }
    if !report.classification.unverified.is_empty() {
        println!("Unverified athletes:");
        for (idx, name) in report.classification.unverified.iter().enumerate() {
            println!(" {}. {}", idx + 1, name.input_name);
        }
    }
    println!("Counts by league:");
    for (league, count) in report.tally.sorted_desc() {
        println!("  {:<10} {count}", league.label());
    }

    Ok(())
}

fn parse_roster_arg() -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix("--roster=") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == "--roster" {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}

fn parse_names() -> Vec<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut names = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--roster" {
            skip_next = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        names.push(arg);
    }
    names
}
