use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::roster::{League, Roster};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeagueLabel {
    League(League),
    Unverified,
}

impl LeagueLabel {
    pub fn label(self) -> &'static str {
        match self {
            LeagueLabel::League(league) => league.label(),
            LeagueLabel::Unverified => "Unverified",
        }
    }
}

impl fmt::Display for LeagueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for LeagueLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedName {
    pub input_name: String,
    pub matched: bool,
    pub league: LeagueLabel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub verified: Vec<ClassifiedName>,
    pub unverified: Vec<ClassifiedName>,
}

impl Classification {
    pub fn total(&self) -> usize {
        self.verified.len() + self.unverified.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("cannot compute a verification percentage for zero athletes")]
    DivisionByZero,
}

/// Split entered names into roster matches and misses, keeping input order in both.
pub fn classify<S: AsRef<str>>(entries: &[S], roster: &Roster) -> Classification {
    let mut out = Classification::default();
    for entry in entries {
        let input_name = entry.as_ref().to_string();
        match roster.lookup(&input_name) {
            Some(hit) => out.verified.push(ClassifiedName {
                input_name,
                matched: true,
                league: LeagueLabel::League(hit.league),
            }),
            None => out.unverified.push(ClassifiedName {
                input_name,
                matched: false,
                league: LeagueLabel::Unverified,
            }),
        }
    }
    out
}

pub fn percent_verified(total: usize, verified_count: usize) -> Result<f64, MatchError> {
    if total == 0 {
        return Err(MatchError::DivisionByZero);
    }
    let pct = verified_count as f64 / total as f64 * 100.0;
    // Half-way cases go to the even digit: 1/32 is 3.12, not 3.13.
    Ok((pct * 100.0).round_ties_even() / 100.0)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueTally {
    counts: HashMap<LeagueLabel, usize>,
}

impl LeagueTally {
    pub fn get(&self, label: LeagueLabel) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LeagueLabel, usize)> + '_ {
        self.counts.iter().map(|(label, count)| (*label, *count))
    }

    /// Bars ordered for display: highest count first, ties broken by label.
    pub fn sorted_desc(&self) -> Vec<(LeagueLabel, usize)> {
        let mut rows = self.iter().collect::<Vec<_>>();
        rows.sort_by(|a, b| match b.1.cmp(&a.1) {
            Ordering::Equal => a.0.label().cmp(b.0.label()),
            other => other,
        });
        rows
    }
}

pub fn tally_by_league(verified: &[ClassifiedName], unverified_count: usize) -> LeagueTally {
    let mut counts: HashMap<LeagueLabel, usize> = HashMap::new();
    for name in verified {
        *counts.entry(name.league).or_insert(0) += 1;
    }
    if unverified_count > 0 {
        counts.insert(LeagueLabel::Unverified, unverified_count);
    }
    LeagueTally { counts }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_two_places() {
        assert_eq!(percent_verified(3, 1).unwrap(), 33.33);
        assert_eq!(percent_verified(3, 2).unwrap(), 66.67);
    }

    #[test]
    fn sorted_desc_breaks_ties_by_label() {
        let verified = ["a", "b"]
            .iter()
            .zip([League::Nfl, League::Mlb])
            .map(|(name, league)| ClassifiedName {
                input_name: name.to_string(),
                matched: true,
                league: LeagueLabel::League(league),
            })
            .collect::<Vec<_>>();
        let tally = tally_by_league(&verified, 2);
        let rows = tally.sorted_desc();
        assert_eq!(rows[0], (LeagueLabel::Unverified, 2));
        assert_eq!(rows[1], (LeagueLabel::League(League::Mlb), 1));
        assert_eq!(rows[2], (LeagueLabel::League(League::Nfl), 1));
    }
}
