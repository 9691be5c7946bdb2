use std::path::PathBuf;
use tvchart::loader::{LoadError, Loader, RatingPolicy, Source, parse_rows};
use tvchart::tooltip::TooltipContent;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[test]
fn parse_sample_csv() {
    let sample = "series_title,rating,genre\nA,9.0,Drama\nB, 8.5 ,Comedy\nC,8.7,Drama\n";
    let out = parse_rows(sample.as_bytes(), RatingPolicy::Skip).unwrap();
    assert_eq!(out.skipped, 0);
    assert_eq!(out.rows.len(), 3);
    assert_eq!(out.rows[1].series_title, "B");
    assert_eq!(out.rows[1].rating, 8.5);
    assert_eq!(out.rows[2].genre, "Drama");
}

#[test]
fn rating_text_is_kept_for_display() {
    let sample = "series_title,rating,genre\nDark,8.50,Sci-Fi\nSherlock, 9 ,Crime\n";
    let out = parse_rows(sample.as_bytes(), RatingPolicy::Strict).unwrap();
    assert_eq!(out.rows[0].rating, 8.5);
    assert_eq!(out.rows[0].rating_text.as_deref(), Some("8.50"));
    assert_eq!(out.rows[1].rating_text.as_deref(), Some("9"));
    let tip = TooltipContent::for_row(&out.rows[0]);
    assert_eq!(tip.html(), "<u>Dark</u><br>Rating: 8.50<br>Genre: Sci-Fi");
}

#[test]
fn column_order_and_extra_columns_do_not_matter() {
    let sample = "genre,year,rating,series_title\nDrama,2019,9.4,Chernobyl\n";
    let out = parse_rows(sample.as_bytes(), RatingPolicy::Strict).unwrap();
    assert_eq!(out.rows[0].series_title, "Chernobyl");
    assert_eq!(out.rows[0].rating, 9.4);
}

#[test]
fn missing_column_is_error() {
    let sample = "series_title,genre\nA,Drama\n";
    let err = parse_rows(sample.as_bytes(), RatingPolicy::Skip).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn("rating")));
}

#[test]
fn malformed_rating_is_skipped_by_default() {
    let out = Loader::default()
        .load(&Source::Path(fixture("malformed.csv")))
        .unwrap();
    assert_eq!(out.skipped, 1);
    let titles: Vec<&str> = out.rows.iter().map(|r| r.series_title.as_str()).collect();
    assert_eq!(titles, ["Good Show", "Another"]);
}

#[test]
fn malformed_rating_fails_in_strict_mode() {
    let err = Loader::with_policy(RatingPolicy::Strict)
        .load(&Source::Path(fixture("malformed.csv")))
        .unwrap_err();
    match err {
        LoadError::InvalidRating { line, value } => {
            assert_eq!(line, 3);
            assert_eq!(value, "n/a");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_io_error() {
    let err = Loader::default()
        .load(&Source::parse("does/not/exist.csv"))
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("does/not/exist.csv"));
}

#[test]
fn fixture_loads_in_file_order() {
    let out = Loader::default()
        .load(&Source::Path(fixture("tv_series.csv")))
        .unwrap();
    assert_eq!(out.rows.len(), 15);
    assert_eq!(out.rows[0].series_title, "Breaking Bad");
    assert_eq!(out.rows[14].series_title, "Glee");
}
