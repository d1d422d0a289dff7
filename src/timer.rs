use chrono::{DateTime, Duration, Local};

pub const MIN_LIMIT_MINUTES: u32 = 0;
pub const MAX_LIMIT_MINUTES: u32 = 120;
pub const DEFAULT_LIMIT_MINUTES: u32 = 60;

/// A single scheduled deadline. Nothing here sleeps; the UI tick asks for the
/// remaining time and renders whatever comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    pub limit_minutes: u32,
    pub deadline: Option<DateTime<Local>>,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT_MINUTES)
    }
}

impl Countdown {
    pub fn new(limit_minutes: u32) -> Self {
        Self {
            limit_minutes: clamp_limit(limit_minutes),
            deadline: None,
        }
    }

    /// Adjust the slider. Only affects the next `start`.
    pub fn set_limit(&mut self, minutes: u32) {
        self.limit_minutes = clamp_limit(minutes);
    }

    pub fn step_limit(&mut self, delta: i32) {
        let next = (self.limit_minutes as i64 + delta as i64)
            .clamp(MIN_LIMIT_MINUTES as i64, MAX_LIMIT_MINUTES as i64);
        self.limit_minutes = next as u32;
    }

    /// Schedule the deadline from `now`. Restarting replaces any running deadline.
    pub fn start(&mut self, now: DateTime<Local>) {
        self.deadline = Some(now + Duration::minutes(self.limit_minutes as i64));
    }

    pub fn is_running(&self, now: DateTime<Local>) -> bool {
        self.deadline.is_some_and(|deadline| now < deadline)
    }

    pub fn is_expired(&self, now: DateTime<Local>) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Time left until the deadline, or `None` when no timer was started.
    /// Saturates at zero once the deadline has passed.
    pub fn remaining(&self, now: DateTime<Local>) -> Option<Duration> {
        let deadline = self.deadline?;
        let left = deadline - now;
        if left < Duration::zero() {
            Some(Duration::zero())
        } else {
            Some(left)
        }
    }
}

fn clamp_limit(minutes: u32) -> u32 {
    minutes.clamp(MIN_LIMIT_MINUTES, MAX_LIMIT_MINUTES)
}

/// `H:MM:SS`, sub-second precision dropped.
pub fn format_remaining(left: Duration) -> String {
    let secs = left.num_seconds().max(0);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}
