//! HTTP client for the Schedule of Classes catalog.
//!
//! One outbound GET per lookup:
//! `GET {base}/api/courses.json?year=&term=&campus=[&subject=]`
//! The response is expected to be a JSON array of course records; anything
//! else is treated as an empty result.

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::sync::LazyLock;
use tracing::{info, warn};
use url::Url;

use super::error::SocError;
use super::types::SocCourse;
use crate::types::Campus;

/// Base URL for the Schedule of Classes service.
pub const SOC_BASE_URL: &str = "https://sis.rutgers.edu/soc";

/// Leading letters of the query, taken as the subject code. Deliberately
/// naive: "What is CS 111?" yields WHAT. The catalog returns nothing for an
/// unknown subject, and the caller degrades to "no live data".
static SUBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]{2,4})\s*\d*").unwrap());

/// First 3-digit run anywhere in the query, taken as the course number.
static COURSE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{3}").unwrap());

/// Maximum records returned by a subject-only search.
const MAX_RESULTS: usize = 10;

/// Academic term, encoded the way the catalog expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermCode {
    pub year: i32,
    /// 1 = Spring, 7 = Summer, 9 = Fall.
    pub term: u8,
}

impl TermCode {
    /// Resolves the term containing the given date.
    pub fn for_date(date: NaiveDate) -> Self {
        let term = match date.month() {
            1..=5 => 1,
            6..=8 => 7,
            _ => 9,
        };
        Self {
            year: date.year(),
            term,
        }
    }

    pub fn current() -> Self {
        Self::for_date(Utc::now().date_naive())
    }
}

/// Configuration for the SOC client.
#[derive(Debug, Clone)]
pub struct SocConfig {
    pub base_url: String,
}

impl Default for SocConfig {
    fn default() -> Self {
        Self {
            base_url: SOC_BASE_URL.to_string(),
        }
    }
}

/// Client for fetching live course data from the SOC catalog.
pub struct SocClient {
    client: Client,
    config: SocConfig,
}

impl SocClient {
    pub fn new(client: Client, config: SocConfig) -> Self {
        Self { client, config }
    }

    /// Fetches course records for a campus, optionally scoped to a subject.
    ///
    /// # Returns
    /// * `Ok(courses)` - Possibly empty; a non-array payload is empty, not an error
    /// * `Err(SocError)` - If the request or decode fails
    pub async fn fetch_courses(
        &self,
        campus: Campus,
        subject: Option<&str>,
    ) -> Result<Vec<SocCourse>, SocError> {
        let term = TermCode::current();
        let mut url = Url::parse(&format!("{}/api/courses.json", self.config.base_url))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("year", &term.year.to_string());
            pairs.append_pair("term", &term.term.to_string());
            pairs.append_pair("campus", campus.soc_code());
            if let Some(subject) = subject {
                pairs.append_pair("subject", &subject.to_uppercase());
            }
        }

        info!(url = %url, "fetching from SOC catalog");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SocError::UnexpectedStatus {
                status: response.status().as_u16(),
            });
        }

        let payload: serde_json::Value = response.json().await?;
        if !payload.is_array() {
            warn!("SOC payload was not an array, treating as empty");
            return Ok(Vec::new());
        }

        let courses: Vec<SocCourse> = serde_json::from_value(payload)?;
        info!(count = courses.len(), "received courses from SOC");
        Ok(courses)
    }

    /// Searches the catalog based on a free-text query.
    ///
    /// Extracts a subject from the leading letters of the query; without one
    /// there is nothing to ask the catalog and the result is empty. With an
    /// embedded 3-digit course number the records are narrowed to exact
    /// number matches, otherwise at most [`MAX_RESULTS`] are returned.
    pub async fn search_courses(
        &self,
        query: &str,
        campus: Campus,
    ) -> Result<Vec<SocCourse>, SocError> {
        let Some(subject) = extract_subject(query) else {
            return Ok(Vec::new());
        };

        let courses = self.fetch_courses(campus, Some(&subject)).await?;

        if let Some(number) = extract_course_number(query) {
            return Ok(courses
                .into_iter()
                .filter(|c| c.course_number == number)
                .collect());
        }

        Ok(courses.into_iter().take(MAX_RESULTS).collect())
    }
}

/// Subject code from the leading letters of the query, upper-cased.
pub fn extract_subject(query: &str) -> Option<String> {
    SUBJECT_RE
        .captures(query)
        .map(|caps| caps[1].to_uppercase())
}

/// First embedded 3-digit course number, if any.
pub fn extract_course_number(query: &str) -> Option<String> {
    COURSE_NUMBER_RE
        .find(query)
        .map(|m| m.as_str().to_string())
}
