use crate::models::{GenreSet, Row};
use serde::{Deserialize, Serialize};

/// Rating statistics for one genre.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenreSummary {
    pub genre: String,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

/// Per-genre statistics, in first-appearance order of the genres.
pub fn genre_summary(rows: &[Row]) -> Vec<GenreSummary> {
    let genres = GenreSet::from_rows(rows);
    let mut out = Vec::with_capacity(genres.len());
    for genre in genres.iter() {
        let mut vals: Vec<f64> = rows
            .iter()
            .filter(|r| r.genre == genre)
            .map(|r| r.rating)
            .collect();
        vals.sort_by(f64::total_cmp);
        let count = vals.len();
        let mean = vals.iter().sum::<f64>() / count as f64;
        let median = if count % 2 == 1 {
            vals[count / 2]
        } else {
            (vals[count / 2 - 1] + vals[count / 2]) / 2.0
        };
        out.push(GenreSummary {
            genre: genre.to_string(),
            count,
            min: vals[0],
            max: vals[count - 1],
            mean,
            median,
        });
    }
    out
}
