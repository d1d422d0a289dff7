use chrono::{Duration, Local, TimeZone};

use athlete_tally::matcher::LeagueLabel;
use athlete_tally::roster::{League, Roster, RosterEntry};
use athlete_tally::state::{AppState, EntryList, TimerPhase, build_report};
use athlete_tally::timer::{Countdown, format_remaining};

fn roster() -> Roster {
    Roster::from_entries([RosterEntry {
        full_name: "LeBron James".to_string(),
        league: League::Nba,
    }])
}

#[test]
fn entry_list_rejects_exact_duplicates_only() {
    let mut entries = EntryList::new();
    assert!(entries.push("LeBron James"));
    assert!(!entries.push("LeBron James"));
    assert!(!entries.push("  LeBron James "));
    assert!(entries.push("lebron james"));
    assert!(!entries.push("   "));
    assert_eq!(entries.as_slice(), ["LeBron James", "lebron james"]);
}

#[test]
fn submit_input_clears_buffer_only_on_accept() {
    let mut state = AppState::default();
    state.input = " John Doe ".to_string();
    assert!(state.submit_input());
    assert!(state.input.is_empty());
    assert_eq!(state.entries.as_slice(), ["John Doe"]);

    state.input = "John Doe".to_string();
    assert!(!state.submit_input());
    assert_eq!(state.input, "John Doe");
    assert_eq!(state.entries.len(), 1);
    assert!(state.logs.back().is_some_and(|l| l.starts_with("[WARN]")));
}

#[test]
fn empty_state_has_no_report() {
    let state = AppState::default();
    assert!(state.report(&roster()).is_none());
}

#[test]
fn report_combines_classification_tally_and_percent() {
    let entries = ["LeBron James", "John Doe"].into_iter().collect::<EntryList>();
    let report = build_report(&entries, &roster()).expect("non-empty");
    assert_eq!(report.total, 2);
    assert_eq!(report.percent_verified, 50.0);
    assert_eq!(report.tally.get(LeagueLabel::League(League::Nba)), 1);
    assert_eq!(report.tally.get(LeagueLabel::Unverified), 1);
}

#[test]
fn timer_reveals_summary_once() {
    let roster = roster();
    let start = Local.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let mut state = AppState::new(Countdown::new(1));
    assert_eq!(state.timer_phase(start), TimerPhase::Idle);
    assert!(!state.tick(start, &roster));

    state.start_timer(start);
    assert_eq!(state.timer_phase(start + Duration::seconds(30)), TimerPhase::Running);
    assert!(!state.tick(start + Duration::seconds(30), &roster));

    let after = start + Duration::seconds(61);
    assert_eq!(state.timer_phase(after), TimerPhase::Expired);
    assert!(state.tick(after, &roster));
    assert!(state.final_summary.is_some());
    assert!(!state.tick(after + Duration::seconds(1), &roster));

    // A restart hides the summary until the new deadline passes.
    state.start_timer(after);
    assert!(state.final_summary.is_none());
    assert!(state.tick(after + Duration::minutes(2), &roster));
}

#[test]
fn final_summary_is_frozen_at_expiry() {
    let roster = roster();
    let start = Local.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let mut state = AppState::new(Countdown::new(1));
    state.input = "LeBron James".to_string();
    state.submit_input();
    state.start_timer(start);
    assert!(state.tick(start + Duration::minutes(2), &roster));

    state.input = "John Doe".to_string();
    assert!(state.submit_input());
    state.countdown.step_limit(30);

    let summary = state.final_summary.as_ref().expect("revealed");
    assert_eq!(summary.time_limit_minutes, 1);
    let report = summary.report.as_ref().expect("one athlete entered");
    assert_eq!(report.total, 1);
    assert_eq!(report.percent_verified, 100.0);
    assert_eq!(report.tally.get(LeagueLabel::Unverified), 0);
    assert_eq!(state.report(&roster).map(|r| r.total), Some(2));
}

#[test]
fn final_summary_without_names_has_no_report() {
    let start = Local.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let mut state = AppState::new(Countdown::new(0));
    state.start_timer(start);
    assert!(state.tick(start, &roster()));
    assert!(state.final_summary.as_ref().is_some_and(|s| s.report.is_none()));
}

#[test]
fn countdown_remaining_and_format() {
    let start = Local.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let mut countdown = Countdown::new(90);
    assert!(countdown.remaining(start).is_none());

    countdown.start(start);
    let left = countdown
        .remaining(start + Duration::milliseconds(1500))
        .unwrap();
    assert_eq!(format_remaining(left), "1:29:58");
    assert_eq!(
        countdown.remaining(start + Duration::hours(3)),
        Some(Duration::zero())
    );
    assert_eq!(format_remaining(Duration::seconds(59)), "0:00:59");
}

#[test]
fn zero_minute_timer_expires_immediately() {
    let start = Local.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let mut countdown = Countdown::new(0);
    countdown.start(start);
    assert!(countdown.is_expired(start));
    assert!(!countdown.is_running(start));
}

#[test]
fn slider_limits_are_clamped() {
    let mut countdown = Countdown::new(500);
    assert_eq!(countdown.limit_minutes, 120);
    countdown.step_limit(10);
    assert_eq!(countdown.limit_minutes, 120);
    countdown.set_limit(3);
    countdown.step_limit(-10);
    assert_eq!(countdown.limit_minutes, 0);
}
