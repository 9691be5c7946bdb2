//! Loading of the ratings CSV from a local file or an `http(s)://` URL.
//!
//! Rows are parsed into [`Row`] records; the `rating` column is converted to a number.
//! A row whose rating does not parse is either skipped with a warning
//! ([`RatingPolicy::Skip`], default) or turned into an error ([`RatingPolicy::Strict`]).
//!
//! ### Notes
//! - Remote sources use a blocking client with a 30s total / 10s connect timeout.
//! - Transient failures (5xx / network errors) are retried a few times with a short backoff.
//!
//! Typical usage:
//! ```no_run
//! # use tvchart::loader::{Loader, Source};
//! let loader = Loader::default();
//! let outcome = loader.load(&Source::parse("tv_series.csv"))?;
//! println!("{} rows", outcome.rows.len());
//! # Ok::<(), tvchart::loader::LoadError>(())
//! ```
use crate::models::{RawRecord, Row};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Columns the input file must provide.
pub const REQUIRED_COLUMNS: [&str; 3] = ["series_title", "rating", "genre"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} failed with HTTP {status}")]
    HttpStatus { url: String, status: StatusCode },
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("line {line}: rating {value:?} is not a number")]
    InvalidRating { line: u64, value: String },
}

/// Where the CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    /// `http://` and `https://` are treated as URLs, everything else as a file path.
    pub fn parse(s: &str) -> Self {
        let lower = s.trim().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(s.trim().to_string())
        } else {
            Source::Path(PathBuf::from(s))
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Url(u) => f.write_str(u),
        }
    }
}

/// What to do with a row whose rating is not a finite number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RatingPolicy {
    #[default]
    Skip,
    Strict,
}

/// Parsed rows plus the number of rows dropped for a malformed rating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOutcome {
    pub rows: Vec<Row>,
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct Loader {
    pub policy: RatingPolicy,
    http: HttpClient,
}

impl Default for Loader {
    fn default() -> Self {
        Self::with_policy(RatingPolicy::default())
    }
}

impl Loader {
    pub fn with_policy(policy: RatingPolicy) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("tvchart/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self { policy, http }
    }

    /// Load and parse the CSV behind `source`.
    pub fn load(&self, source: &Source) -> Result<LoadOutcome, LoadError> {
        let outcome = match source {
            Source::Path(path) => {
                let file = File::open(path).map_err(|e| LoadError::Io {
                    path: path.clone(),
                    source: e,
                })?;
                parse_rows(file, self.policy)?
            }
            Source::Url(url) => {
                let body = self.fetch_text(url)?;
                parse_rows(body.as_bytes(), self.policy)?
            }
        };
        log::info!(
            "loaded {} rows from {} ({} skipped)",
            outcome.rows.len(),
            source,
            outcome.skipped
        );
        Ok(outcome)
    }

    fn fetch_text(&self, url: &str) -> Result<String, LoadError> {
        const BACKOFF_MS: [u64; 3] = [100, 300, 700];
        let mut last_err: Option<reqwest::Error> = None;
        for (attempt, backoff_ms) in BACKOFF_MS.into_iter().enumerate() {
            let last_attempt = attempt + 1 == BACKOFF_MS.len();
            match self.http.get(url).send() {
                Ok(r) if r.status().is_success() => {
                    return r.text().map_err(|e| LoadError::Http {
                        url: url.to_string(),
                        source: e,
                    });
                }
                Ok(r) if r.status().is_server_error() => {
                    if last_attempt {
                        return Err(LoadError::HttpStatus {
                            url: url.to_string(),
                            status: r.status(),
                        });
                    }
                    log::debug!("GET {} returned {}, retrying", url, r.status());
                }
                Ok(r) => {
                    return Err(LoadError::HttpStatus {
                        url: url.to_string(),
                        status: r.status(),
                    });
                }
                Err(e) => {
                    log::debug!("GET {} failed: {}", url, e);
                    last_err = Some(e);
                    if last_attempt {
                        break;
                    }
                }
            }
            std::thread::sleep(Duration::from_millis(backoff_ms));
        }
        match last_err {
            Some(source) => Err(LoadError::Http {
                url: url.to_string(),
                source,
            }),
            None => Err(LoadError::HttpStatus {
                url: url.to_string(),
                status: StatusCode::SERVICE_UNAVAILABLE,
            }),
        }
    }
}

/// Parse CSV text into rows.
///
/// The header must name `series_title`, `rating` and `genre`; fields are trimmed.
pub fn parse_rows<R: Read>(reader: R, policy: RatingPolicy) -> Result<LoadOutcome, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(LoadError::MissingColumn(col));
        }
    }

    let mut out = LoadOutcome::default();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let rec: RawRecord = record.deserialize(Some(&headers))?;
        match parse_rating(&rec.rating) {
            Some(rating) => out.rows.push(Row {
                series_title: rec.series_title,
                rating,
                genre: rec.genre,
                rating_text: Some(rec.rating),
            }),
            None => {
                if policy == RatingPolicy::Strict {
                    return Err(LoadError::InvalidRating {
                        line,
                        value: rec.rating,
                    });
                }
                log::warn!(
                    "line {}: skipping {:?}, rating {:?} is not a number",
                    line,
                    rec.series_title,
                    rec.rating
                );
                out.skipped += 1;
            }
        }
    }
    Ok(out)
}

fn parse_rating(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_detects_urls() {
        assert_eq!(
            Source::parse("HTTPS://example.org/x.csv"),
            Source::Url("HTTPS://example.org/x.csv".into())
        );
        assert_eq!(
            Source::parse("data/tv_series.csv"),
            Source::Path(PathBuf::from("data/tv_series.csv"))
        );
    }

    #[test]
    fn rating_rejects_non_finite() {
        assert_eq!(parse_rating(" 8.7 "), Some(8.7));
        assert_eq!(parse_rating("NaN"), None);
        assert_eq!(parse_rating("inf"), None);
        assert_eq!(parse_rating(""), None);
    }
}
