mod common;

use common::{date, load_fixture, three_matches};
use ssa_terminal::dashboard::{WorldCupView, update_filter_options, update_visualizations};
use ssa_terminal::filters::{FilterCriteria, FilterField, apply_filters};
use ssa_terminal::summaries::{OTHER_BUCKET, RECENT_MATCH_LIMIT, build_summaries};

#[test]
fn worked_example_january() {
    let ds = three_matches();
    let criteria = FilterCriteria::new(date(2022, 1, 1), date(2022, 1, 31));
    let s = update_visualizations(&ds, &criteria);

    assert_eq!(s.team_averages.len(), 1);
    let usa = &s.team_averages[0];
    assert_eq!(usa.team, "USA");
    assert!((usa.score - 1.5).abs() < 1e-12);
    assert!((usa.opponent_score - 1.0).abs() < 1e-12);

    let counts: Vec<(&str, usize)> = s
        .tournament_counts
        .iter()
        .map(|c| (c.tournament.as_str(), c.count))
        .collect();
    assert_eq!(counts, [("Friendly", 2), (OTHER_BUCKET, 0)]);
    assert_eq!(s.score_points.len(), 2);
    assert_eq!(s.recent_matches[0].date, date(2022, 1, 2));
}

#[test]
fn empty_view_yields_empty_summaries() {
    let ds = three_matches();
    let mut criteria = FilterCriteria::spanning(&ds).unwrap();
    criteria.toggle(FilterField::Team, "Narnia");
    let s = update_visualizations(&ds, &criteria);

    assert!(s.team_averages.is_empty());
    assert!(s.score_points.is_empty());
    assert!(s.recent_matches.is_empty());
    assert!(s.scores_over_time.is_empty());
    assert_eq!(s.tournament_counts.len(), 1);
    assert_eq!(s.tournament_counts[0].tournament, OTHER_BUCKET);
    assert_eq!(s.tournament_counts[0].count, 0);

    let options = update_filter_options(&ds, &criteria);
    assert!(FilterField::ALL.iter().all(|f| options.get(*f).is_empty()));
}

#[test]
fn fixture_tournament_buckets_sum_to_rows_with_tournament() {
    let ds = load_fixture("results_small.csv");
    let view = apply_filters(&ds, &FilterCriteria::spanning(&ds).unwrap());
    let s = build_summaries(&view);

    let names: Vec<&str> = s
        .tournament_counts
        .iter()
        .map(|c| c.tournament.as_str())
        .collect();
    assert_eq!(
        names,
        [
            "FIFA World Cup",
            "UEFA Nations League",
            "UEFA Euro qualification",
            "Friendly",
            "Copa América",
            OTHER_BUCKET,
        ]
    );
    let with_tournament = view.iter().filter(|r| r.tournament.is_some()).count();
    assert_eq!(s.tournament_total(), with_tournament);
}

#[test]
fn recent_matches_capped_and_descending() {
    let ds = load_fixture("results_small.csv");
    let s = update_visualizations(&ds, &FilterCriteria::spanning(&ds).unwrap());

    assert_eq!(s.recent_matches.len(), RECENT_MATCH_LIMIT);
    assert!(s.recent_matches.windows(2).all(|w| w[0].date >= w[1].date));
    assert_eq!(s.recent_matches[0].date, date(2019, 11, 19));
    // Two matches on 2018-06-16; only the first listed one fits.
    assert_eq!(s.recent_matches[9].team.as_deref(), Some("France"));
}

#[test]
fn team_averages_in_team_order() {
    let ds = load_fixture("results_small.csv");
    let s = update_visualizations(&ds, &FilterCriteria::spanning(&ds).unwrap());

    let teams: Vec<&str> = s.team_averages.iter().map(|t| t.team.as_str()).collect();
    assert_eq!(
        teams,
        ["Argentina", "Brazil", "England", "France", "Portugal", "Russia", "Spain"]
    );
    let spain = s.team_averages.iter().find(|t| t.team == "Spain").unwrap();
    assert!((spain.score - 3.0).abs() < 1e-12);
    assert!((spain.opponent_score - 1.25).abs() < 1e-12);
    // The team-less row still shows up in the scatter.
    assert_eq!(s.score_points.len(), 14);
    assert!(s.score_points.iter().any(|p| p.team.is_none()));
}

#[test]
fn scores_over_time_one_point_per_date() {
    let ds = load_fixture("results_small.csv");
    let s = update_visualizations(&ds, &FilterCriteria::spanning(&ds).unwrap());

    assert_eq!(s.scores_over_time.len(), 12);
    assert!(s.scores_over_time.windows(2).all(|w| w[0].date < w[1].date));
    let world_cup_day = s
        .scores_over_time
        .iter()
        .find(|p| p.date == date(2018, 6, 16))
        .unwrap();
    assert!((world_cup_day.score - 1.5).abs() < 1e-12);
    assert!((world_cup_day.opponent_score - 1.0).abs() < 1e-12);
}

#[test]
fn world_cup_view_serializes_for_the_summarizer() {
    let ds = three_matches();
    let view = WorldCupView::compute(&ds, &FilterCriteria::spanning(&ds).unwrap());
    assert_eq!(view.rows, 3);
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["rows"], 3);
    assert_eq!(json["options"]["fields"]["team"][0]["value"], "Canada");
    assert_eq!(json["summaries"]["recent_matches"][0]["date"], "2022-02-01");
}
