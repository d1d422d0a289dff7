pub mod config;
pub mod matcher;
pub mod roster;
pub mod state;
pub mod summary_export;
pub mod timer;

pub use matcher::{
    Classification, ClassifiedName, LeagueLabel, LeagueTally, MatchError, classify,
    percent_verified, tally_by_league,
};
pub use roster::{League, Roster, RosterEntry, RosterError, load_roster};
pub use state::{AppState, EntryList, Report};
