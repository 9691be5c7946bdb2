use serde::{Deserialize, Serialize};

/// Ratings below this value are dropped before charting.
pub const DEFAULT_MIN_RATING: f64 = 8.5;

/// One TV series record (one CSV row).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Row {
    pub series_title: String,
    pub rating: f64,
    pub genre: String,
    /// Rating exactly as written in the source file; shown verbatim in tooltips.
    #[serde(skip)]
    pub rating_text: Option<String>,
}

impl Row {
    pub fn new(series_title: impl Into<String>, rating: f64, genre: impl Into<String>) -> Self {
        Self {
            series_title: series_title.into(),
            rating,
            genre: genre.into(),
            rating_text: None,
        }
    }
}

/// Raw CSV record before the rating is converted to a number.
///
/// Extra columns in the file are ignored by the deserializer.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub series_title: String,
    pub rating: String,
    pub genre: String,
}

/// Ordered rows; the order drives x-axis categories and animation delays.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Keep rows with `rating >= threshold`, preserving source order.
    pub fn filter_min_rating(mut self, threshold: f64) -> Self {
        self.rows.retain(|r| r.rating >= threshold);
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct titles in first-appearance order.
    pub fn titles(&self) -> Vec<&str> {
        distinct_in_order(self.rows.iter().map(|r| r.series_title.as_str()))
    }

    /// Highest finite rating, or `None` for an empty dataset.
    pub fn max_rating(&self) -> Option<f64> {
        self.rows
            .iter()
            .map(|r| r.rating)
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }

    pub fn genres(&self) -> GenreSet {
        GenreSet::from_rows(&self.rows)
    }
}

impl From<Vec<Row>> for Dataset {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

/// Distinct genres in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenreSet {
    genres: Vec<String>,
}

impl GenreSet {
    pub fn from_rows(rows: &[Row]) -> Self {
        let genres = distinct_in_order(rows.iter().map(|r| r.genre.as_str()))
            .into_iter()
            .map(str::to_string)
            .collect();
        Self { genres }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.genres.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    pub fn position(&self, genre: &str) -> Option<usize> {
        self.genres.iter().position(|g| g == genre)
    }
}

fn distinct_in_order<'a>(items: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = ahash::AHashSet::new();
    items.filter(|s| seen.insert(*s)).collect()
}
