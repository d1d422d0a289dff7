use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::matcher::{self, Classification, LeagueTally};
use crate::roster::Roster;
use crate::timer::Countdown;

/// Names typed by the user, in the order they were entered.
///
/// Only exact duplicates are rejected; `"lebron james"` and `"LeBron James"`
/// are both kept even though they resolve to the same roster entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryList {
    names: Vec<String>,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trim and append. Returns `false` when the input was blank or already present.
    pub fn push(&mut self, raw: &str) -> bool {
        let name = raw.trim();
        if name.is_empty() || self.names.iter().any(|existing| existing == name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for EntryList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = EntryList::new();
        for name in iter {
            list.push(name.as_ref());
        }
        list
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub total: usize,
    pub classification: Classification,
    pub tally: LeagueTally,
    pub percent_verified: f64,
}

/// Derive the classification, tally, and percentage for a non-empty entry list.
pub fn build_report(entries: &EntryList, roster: &Roster) -> Option<Report> {
    if entries.is_empty() {
        return None;
    }
    let classification = matcher::classify(entries.as_slice(), roster);
    let tally = matcher::tally_by_league(
        &classification.verified,
        classification.unverified.len(),
    );
    let percent_verified =
        matcher::percent_verified(entries.len(), classification.verified.len()).ok()?;
    Some(Report {
        total: entries.len(),
        classification,
        tally,
        percent_verified,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Timer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Expired,
}

/// Snapshot taken the moment the countdown expires. Names added afterwards
/// do not change it.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalSummary {
    pub time_limit_minutes: u32,
    pub report: Option<Report>,
}

#[derive(Debug, Clone, Default)]
pub struct ExportState {
    pub path: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub entries: EntryList,
    pub input: String,
    pub focus: Focus,
    pub countdown: Countdown,
    pub final_summary: Option<FinalSummary>,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
    pub export: ExportState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Countdown::default())
    }
}

impl AppState {
    pub fn new(countdown: Countdown) -> Self {
        Self {
            entries: EntryList::new(),
            input: String::new(),
            focus: Focus::Input,
            countdown,
            final_summary: None,
            help_overlay: false,
            logs: VecDeque::with_capacity(200),
            export: ExportState::default(),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    /// Move the input buffer into the entry list. The buffer is cleared only
    /// when the name was accepted, so a rejected duplicate stays editable.
    pub fn submit_input(&mut self) -> bool {
        let raw = std::mem::take(&mut self.input);
        if self.entries.push(&raw) {
            self.push_log(format!("[INFO] Added {}", raw.trim()));
            true
        } else {
            if !raw.trim().is_empty() {
                self.push_log(format!("[WARN] {} is already on the list", raw.trim()));
            }
            self.input = raw;
            false
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Timer,
            Focus::Timer => Focus::Input,
        };
    }

    pub fn start_timer(&mut self, now: DateTime<Local>) {
        self.countdown.start(now);
        self.final_summary = None;
        self.export = ExportState::default();
        self.push_log(format!(
            "[INFO] Timer started for {} minutes",
            self.countdown.limit_minutes
        ));
    }

    pub fn timer_phase(&self, now: DateTime<Local>) -> TimerPhase {
        if self.countdown.is_running(now) {
            TimerPhase::Running
        } else if self.countdown.is_expired(now) {
            TimerPhase::Expired
        } else {
            TimerPhase::Idle
        }
    }

    /// Called on every UI tick. Returns `true` exactly once per started timer:
    /// on the first tick that observes the deadline as passed, after freezing
    /// the report into `final_summary`.
    pub fn tick(&mut self, now: DateTime<Local>, roster: &Roster) -> bool {
        if self.final_summary.is_some() || self.timer_phase(now) != TimerPhase::Expired {
            return false;
        }
        self.final_summary = Some(FinalSummary {
            time_limit_minutes: self.countdown.limit_minutes,
            report: self.report(roster),
        });
        self.push_log("[INFO] Time's up!");
        true
    }

    pub fn report(&self, roster: &Roster) -> Option<Report> {
        build_report(&self.entries, roster)
    }
}
