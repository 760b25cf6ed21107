//! Schedule of Classes integration: client, wire types, and the context
//! formatter that turns live records into a prompt block.

mod client;
mod error;
mod types;

pub use client::{
    extract_course_number, extract_subject, SocClient, SocConfig, TermCode, SOC_BASE_URL,
};
pub use error::SocError;
pub use types::{SocCourse, SocMeetingTime, SocSection};

/// Sections listed per course in the context block.
const MAX_SECTIONS_PER_COURSE: usize = 3;

/// Formats retrieved course records into a bounded text block for the
/// system prompt. At most [`MAX_SECTIONS_PER_COURSE`] sections are listed
/// per course; missing staffing and meeting times fall back to "Staff" and
/// "TBA".
pub fn format_for_context(courses: &[SocCourse]) -> String {
    courses
        .iter()
        .map(format_course)
        .collect::<Vec<_>>()
        .join("\n---\n")
}

fn format_course(course: &SocCourse) -> String {
    let mut block = format!(
        "COURSE: {}:{} - {}\nCredits: {}",
        course.subject,
        course.course_number,
        course.title,
        course.credits_display()
    );

    if !course.expanded_title.trim().is_empty() {
        block.push_str(&format!("\nFull Title: {}", course.expanded_title.trim()));
    }
    if !course.pre_req_notes.trim().is_empty() {
        block.push_str(&format!("\nPrerequisites: {}", course.pre_req_notes.trim()));
    }

    if !course.sections.is_empty() {
        let sections = course
            .sections
            .iter()
            .take(MAX_SECTIONS_PER_COURSE)
            .map(format_section)
            .collect::<Vec<_>>()
            .join("\n");
        block.push_str(&format!("\nAvailable Sections:\n{sections}"));
    }

    block
}

fn format_section(section: &SocSection) -> String {
    let times = if section.meeting_times.is_empty() {
        "TBA".to_string()
    } else {
        section
            .meeting_times
            .iter()
            .map(|mt| {
                format!(
                    "{} {}-{} at {}",
                    mt.meeting_day, mt.start_time, mt.end_time, mt.campus_name
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    };

    let instructors = if section.instructors_text.trim().is_empty() {
        "Staff"
    } else {
        section.instructors_text.trim()
    };

    let status = if section.open_status { "OPEN" } else { "CLOSED" };

    format!("  - Section {}: {}, {}, {}", section.number, instructors, times, status)
}
