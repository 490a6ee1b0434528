mod common;

use common::{date, fixture_path, load_fixture};
use ssa_terminal::dataset::{self, COLUMNS};

#[test]
fn loads_fixture_with_missing_values_and_flag_spellings() {
    let ds = load_fixture("results_small.csv");
    assert_eq!(ds.len(), 14);
    assert_eq!(ds.date_bounds(), Some((date(2018, 6, 14), date(2019, 11, 19))));

    let records = ds.records();
    assert_eq!(records[0].team.as_deref(), Some("Russia"));
    assert!(!records[0].neutral);
    assert!(records[1].neutral);
    // "0" / "1" / "true" spellings
    assert!(!records[10].neutral);
    assert!(records[11].neutral);
    assert!(records[13].neutral);
    assert_eq!(records[12].country, None);
    assert_eq!(records[13].team, None);
    assert_eq!(records[13].opposing_team.as_deref(), Some("Mexico"));
}

#[test]
fn missing_file_is_an_error() {
    let err = dataset::load_csv(&fixture_path("does_not_exist.csv")).unwrap_err();
    assert!(format!("{err:#}").contains("does_not_exist.csv"));
}

#[test]
fn malformed_row_reports_line() {
    let raw = "\
date,team,opposing_team,tournament,city,country,neutral,score,opponent_score
2020-01-01,A,B,Cup,X,Y,False,1,0
not-a-date,A,B,Cup,X,Y,False,1,0
";
    let err = dataset::read_csv(raw.as_bytes()).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("line 3"), "{msg}");
}

#[test]
fn non_integer_score_is_rejected() {
    let raw = "\
date,team,opposing_team,tournament,city,country,neutral,score,opponent_score
2020-01-01,A,B,Cup,X,Y,False,one,0
";
    assert!(dataset::read_csv(raw.as_bytes()).is_err());
}

#[test]
fn cells_follow_column_order() {
    let ds = load_fixture("results_small.csv");
    let cells = ds.records()[12].cells();
    assert_eq!(cells.len(), COLUMNS.len());
    assert_eq!(cells[0], "2019-10-13");
    assert_eq!(cells[1], "Spain");
    assert_eq!(cells[5], "");
    assert_eq!(cells[6], "false");
}
