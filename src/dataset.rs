use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_DATA_PATH: &str = "data/results_transformed.csv";

/// One played match, seen from `team`'s side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(deserialize_with = "de_match_date")]
    pub date: NaiveDate,
    pub team: Option<String>,
    pub opposing_team: Option<String>,
    pub tournament: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    #[serde(deserialize_with = "de_flag")]
    pub neutral: bool,
    pub score: i32,
    pub opponent_score: i32,
}

/// Column order used by the recent-matches table and the CSV header.
pub const COLUMNS: [&str; 9] = [
    "date",
    "team",
    "opposing_team",
    "tournament",
    "city",
    "country",
    "neutral",
    "score",
    "opponent_score",
];

impl MatchRecord {
    /// Cell text in `COLUMNS` order. Missing values render empty.
    pub fn cells(&self) -> [String; 9] {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        [
            self.date.format("%Y-%m-%d").to_string(),
            text(&self.team),
            text(&self.opposing_team),
            text(&self.tournament),
            text(&self.city),
            text(&self.country),
            self.neutral.to_string(),
            self.score.to_string(),
            self.opponent_score.to_string(),
        ]
    }
}

/// The full match table. Built once at startup and only ever borrowed.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub source: Option<PathBuf>,
    records: Vec<MatchRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<MatchRecord>) -> Self {
        Self {
            source: None,
            records,
        }
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest match date, `None` for an empty table.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?.date;
        Some(
            self.records
                .iter()
                .fold((first, first), |(lo, hi), r| (lo.min(r.date), hi.max(r.date))),
        )
    }
}

pub fn load_csv(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("open match results {}", path.display()))?;
    let mut dataset =
        read_csv(file).with_context(|| format!("load match results {}", path.display()))?;
    dataset.source = Some(path.to_path_buf());
    Ok(dataset)
}

pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::with_capacity(1024);
    for (idx, row) in rdr.deserialize::<MatchRecord>().enumerate() {
        // +2: header line and 1-based numbering.
        let record = row.with_context(|| format!("parse row on line {}", idx + 2))?;
        records.push(record);
    }
    if records.is_empty() {
        bail!("dataset has no rows");
    }
    Ok(Dataset::from_records(records))
}

pub fn parse_match_date(raw: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
    const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

    let cleaned = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(cleaned, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cleaned, fmt) {
            return Some(dt.date());
        }
    }
    None
}

pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" | "True" | "TRUE" | "1" => Some(true),
        "false" | "False" | "FALSE" | "0" => Some(false),
        _ => None,
    }
}

fn de_match_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_match_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}'")))
}

fn de_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid boolean '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::{parse_flag, parse_match_date, read_csv};
    use chrono::NaiveDate;

    #[test]
    fn parse_match_date_accepts_timestamps() {
        let d = NaiveDate::from_ymd_opt(1998, 7, 12).unwrap();
        assert_eq!(parse_match_date("1998-07-12"), Some(d));
        assert_eq!(parse_match_date("1998/07/12"), Some(d));
        assert_eq!(parse_match_date("1998-07-12 00:00:00"), Some(d));
        assert_eq!(parse_match_date("12 July 1998"), None);
    }

    #[test]
    fn parse_flag_spellings() {
        assert_eq!(parse_flag("True"), Some(true));
        assert_eq!(parse_flag(" FALSE "), Some(false));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("yes"), None);
    }

    #[test]
    fn header_only_file_is_rejected() {
        let raw = "date,team,opposing_team,tournament,city,country,neutral,score,opponent_score\n";
        let err = read_csv(raw.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("no rows"));
    }
}
