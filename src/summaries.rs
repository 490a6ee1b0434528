use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::dataset::MatchRecord;
use crate::filters::FilteredView;

pub const TOP_TOURNAMENTS: usize = 5;
pub const RECENT_MATCH_LIMIT: usize = 10;
pub const OTHER_BUCKET: &str = "Other";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAverage {
    pub team: String,
    pub score: f64,
    pub opponent_score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TournamentCount {
    pub tournament: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePoint {
    pub score: i32,
    pub opponent_score: i32,
    pub team: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateAverage {
    pub date: NaiveDate,
    pub score: f64,
    pub opponent_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateSummaries {
    pub team_averages: Vec<TeamAverage>,
    pub tournament_counts: Vec<TournamentCount>,
    pub score_points: Vec<ScorePoint>,
    pub recent_matches: Vec<MatchRecord>,
    pub scores_over_time: Vec<DateAverage>,
}

impl AggregateSummaries {
    pub fn tournament_total(&self) -> usize {
        self.tournament_counts.iter().map(|t| t.count).sum()
    }
}

pub fn build_summaries(view: &FilteredView<'_>) -> AggregateSummaries {
    AggregateSummaries {
        team_averages: team_averages(view),
        tournament_counts: tournament_counts(view),
        score_points: score_points(view),
        recent_matches: recent_matches(view),
        scores_over_time: scores_over_time(view),
    }
}

#[derive(Default)]
struct MeanAcc {
    score: i64,
    opponent_score: i64,
    n: usize,
}

impl MeanAcc {
    fn push(&mut self, record: &MatchRecord) {
        self.score += i64::from(record.score);
        self.opponent_score += i64::from(record.opponent_score);
        self.n += 1;
    }

    fn means(&self) -> (f64, f64) {
        let n = self.n as f64;
        (self.score as f64 / n, self.opponent_score as f64 / n)
    }
}

/// Mean score and opponent score per team, ascending by team name.
/// Rows without a team are left out.
pub fn team_averages(view: &FilteredView<'_>) -> Vec<TeamAverage> {
    let mut groups: BTreeMap<&str, MeanAcc> = BTreeMap::new();
    for record in view.iter() {
        if let Some(team) = record.team.as_deref() {
            groups.entry(team).or_default().push(record);
        }
    }
    groups
        .into_iter()
        .map(|(team, acc)| {
            let (score, opponent_score) = acc.means();
            TeamAverage {
                team: team.to_string(),
                score,
                opponent_score,
            }
        })
        .collect()
}

/// Top tournaments by match count followed by one `Other` bucket for the rest.
///
/// Ties keep first-appearance order. `Other` is always present, with a count
/// of 0 when there are `TOP_TOURNAMENTS` or fewer distinct tournaments.
pub fn tournament_counts(view: &FilteredView<'_>) -> Vec<TournamentCount> {
    let mut first_seen: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tournament in view.iter().filter_map(|r| r.tournament.as_deref()) {
        let count = counts.entry(tournament).or_insert_with(|| {
            first_seen.push(tournament);
            0
        });
        *count += 1;
    }

    let mut ranked: Vec<(&str, usize)> = first_seen.iter().map(|t| (*t, counts[t])).collect();
    // Stable: equal counts stay in first-seen order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let other: usize = ranked.iter().skip(TOP_TOURNAMENTS).map(|(_, n)| n).sum();
    let mut out: Vec<TournamentCount> = ranked
        .into_iter()
        .take(TOP_TOURNAMENTS)
        .map(|(tournament, count)| TournamentCount {
            tournament: tournament.to_string(),
            count,
        })
        .collect();
    out.push(TournamentCount {
        tournament: OTHER_BUCKET.to_string(),
        count: other,
    });
    out
}

pub fn score_points(view: &FilteredView<'_>) -> Vec<ScorePoint> {
    view.iter()
        .map(|r| ScorePoint {
            score: r.score,
            opponent_score: r.opponent_score,
            team: r.team.clone(),
        })
        .collect()
}

/// Latest matches first; same-day matches keep dataset order.
pub fn recent_matches(view: &FilteredView<'_>) -> Vec<MatchRecord> {
    let mut rows: Vec<&MatchRecord> = view.rows().to_vec();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows.into_iter()
        .take(RECENT_MATCH_LIMIT)
        .cloned()
        .collect()
}

pub fn scores_over_time(view: &FilteredView<'_>) -> Vec<DateAverage> {
    let mut groups: BTreeMap<NaiveDate, MeanAcc> = BTreeMap::new();
    for record in view.iter() {
        groups.entry(record.date).or_default().push(record);
    }
    groups
        .into_iter()
        .map(|(date, acc)| {
            let (score, opponent_score) = acc.means();
            DateAverage {
                date,
                score,
                opponent_score,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::MatchRecord;

    fn rec(day: u32, team: &str, tournament: &str, score: i32) -> MatchRecord {
        MatchRecord {
            date: NaiveDate::from_ymd_opt(2010, 6, day).unwrap(),
            team: Some(team.to_string()),
            opposing_team: Some("X".to_string()),
            tournament: Some(tournament.to_string()),
            city: Some("Durban".to_string()),
            country: Some("South Africa".to_string()),
            neutral: true,
            score,
            opponent_score: 0,
        }
    }

    #[test]
    fn tournament_ties_keep_first_seen_order() {
        let rows = vec![
            rec(1, "A", "Cup", 1),
            rec(2, "A", "Friendly", 1),
            rec(3, "A", "Friendly", 1),
            rec(4, "A", "Cup", 1),
            rec(5, "A", "Qualifier", 1),
        ];
        let view = FilteredView::from_rows(rows.iter().collect());
        let counts = tournament_counts(&view);
        let names: Vec<&str> = counts.iter().map(|c| c.tournament.as_str()).collect();
        assert_eq!(names, ["Cup", "Friendly", "Qualifier", OTHER_BUCKET]);
        assert_eq!(counts[3].count, 0);
    }

    #[test]
    fn remainder_beyond_top_five_goes_to_other() {
        let names = ["T1", "T2", "T3", "T4", "T5", "T6", "T7"];
        let mut rows = Vec::new();
        for (i, name) in names.iter().enumerate() {
            // T1 appears 7 times, T7 once.
            for _ in 0..(names.len() - i) {
                rows.push(rec(1, "A", name, 0));
            }
        }
        let view = FilteredView::from_rows(rows.iter().collect());
        let counts = tournament_counts(&view);
        assert_eq!(counts.len(), TOP_TOURNAMENTS + 1);
        assert_eq!(counts[0].tournament, "T1");
        assert_eq!(counts[5].tournament, OTHER_BUCKET);
        assert_eq!(counts[5].count, 2 + 1);
        assert_eq!(
            counts.iter().map(|c| c.count).sum::<usize>(),
            rows.len()
        );
    }

    #[test]
    fn recent_matches_sort_is_stable_on_equal_dates() {
        let rows = vec![
            rec(1, "first", "Cup", 0),
            rec(9, "late", "Cup", 0),
            rec(1, "second", "Cup", 0),
        ];
        let view = FilteredView::from_rows(rows.iter().collect());
        let recent = recent_matches(&view);
        let teams: Vec<&str> = recent.iter().filter_map(|r| r.team.as_deref()).collect();
        assert_eq!(teams, ["late", "first", "second"]);
    }

    #[test]
    fn scores_over_time_averages_per_day() {
        let rows = vec![rec(2, "A", "Cup", 4), rec(1, "B", "Cup", 1), rec(2, "C", "Cup", 2)];
        let view = FilteredView::from_rows(rows.iter().collect());
        let series = scores_over_time(&view);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2010, 6, 1).unwrap());
        assert_eq!(series[1].score, 3.0);
    }
}
