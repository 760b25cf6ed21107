//! Static course table.
//!
//! A small, immutable catalog embedded in the binary and loaded once at
//! startup. The rule-based responder and the `/courses` endpoints read from
//! it; nothing writes to it.

use serde::{Deserialize, Serialize};

use crate::types::Campus;

const COURSES_JSON: &str = include_str!("courses.json");

/// Difficulty tier of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Introductory,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Introductory => "introductory",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }

    /// Capitalized form used in course detail blocks.
    pub fn title_case(&self) -> &'static str {
        match self {
            Level::Introductory => "Introductory",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub code: String,
    pub title: String,
    pub credits: u32,
    pub description: String,
    /// Course codes that must be completed first, in catalog order.
    pub prerequisites: Vec<String>,
    /// Campus names offering the course.
    pub campus: Vec<String>,
    pub level: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gen_ed: Option<Vec<String>>,
}

/// The loaded course table.
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Loads the catalog embedded in the binary.
    pub fn embedded() -> Self {
        let courses: Vec<Course> =
            serde_json::from_str(COURSES_JSON).expect("embedded course table is valid JSON");
        Self::new(courses)
    }

    pub fn all(&self) -> &[Course] {
        &self.courses
    }

    /// Case-insensitive exact lookup by course code.
    pub fn get_by_code(&self, code: &str) -> Option<&Course> {
        self.courses
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    /// Courses offered at the given campus. `All` matches every course.
    pub fn by_campus(&self, campus: Campus) -> Vec<&Course> {
        match campus {
            Campus::All => self.courses.iter().collect(),
            _ => self
                .courses
                .iter()
                .filter(|c| c.campus.iter().any(|name| name == campus.name()))
                .collect(),
        }
    }

    /// Case-insensitive substring search across code, title, and description.
    pub fn search(&self, query: &str) -> Vec<&Course> {
        let query = query.to_lowercase();
        self.courses
            .iter()
            .filter(|c| {
                c.code.to_lowercase().contains(&query)
                    || c.title.to_lowercase().contains(&query)
                    || c.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// All advanced-level courses, used for elective recommendations.
    pub fn advanced(&self) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|c| c.level == Level::Advanced)
            .collect()
    }
}
