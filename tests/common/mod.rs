#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use ssa_terminal::dataset::{self, Dataset, MatchRecord};

pub fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

pub fn load_fixture(name: &str) -> Dataset {
    dataset::load_csv(&fixture_path(name)).expect("fixture csv should load")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn record(
    day: NaiveDate,
    team: &str,
    opponent: &str,
    tournament: &str,
    score: i32,
    opponent_score: i32,
) -> MatchRecord {
    MatchRecord {
        date: day,
        team: Some(team.to_string()),
        opposing_team: Some(opponent.to_string()),
        tournament: Some(tournament.to_string()),
        city: Some("City".to_string()),
        country: Some("Country".to_string()),
        neutral: false,
        score,
        opponent_score,
    }
}

/// The three-match table used in the worked example.
pub fn three_matches() -> Dataset {
    Dataset::from_records(vec![
        record(date(2022, 1, 1), "USA", "Canada", "Friendly", 2, 1),
        record(date(2022, 1, 2), "USA", "Mexico", "Friendly", 1, 1),
        record(date(2022, 2, 1), "Canada", "Mexico", "Cup", 3, 0),
    ])
}
