//! Wire types for the Schedule of Classes API.
//!
//! Records are transient: fetched per request, formatted, and dropped.
//! Every field defaults so that an oddly-shaped record does not sink the
//! whole payload.

use serde::{Deserialize, Serialize};

/// A course record as returned by the SOC catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocCourse {
    pub title: String,
    pub course_number: String,
    pub subject: String,
    pub subject_description: String,
    pub credits: Option<f32>,
    pub credits_text: String,
    pub expanded_title: String,
    pub pre_req_notes: String,
    pub synopsis_url: String,
    pub sections: Vec<SocSection>,
}

impl SocCourse {
    /// Display form of the credit count, preferring the free-text variant.
    pub fn credits_display(&self) -> String {
        if !self.credits_text.trim().is_empty() {
            self.credits_text.trim().to_string()
        } else {
            match self.credits {
                Some(credits) => format!("{credits}"),
                None => "N/A".to_string(),
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocSection {
    pub number: String,
    pub instructors_text: String,
    pub meeting_times: Vec<SocMeetingTime>,
    pub open_status: bool,
    pub exam_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocMeetingTime {
    pub meeting_day: String,
    pub start_time: String,
    pub end_time: String,
    pub campus_name: String,
    pub building_code: String,
    pub room_number: String,
}
