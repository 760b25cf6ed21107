//! Rule-based response generator.
//!
//! Maps (user text, campus filter) to a formatted answer using only the
//! static course table. Rules are an explicit ordered list evaluated with
//! first-match-wins semantics; a rule that declines returns `None` and the
//! next rule runs. The final fallback is a help message, so the generator
//! always produces some string and never fails.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::catalog::{Catalog, Course};
use crate::types::Campus;

/// Course-code pattern: 2-4 letters, optional whitespace, 3 digits.
/// Applied to the lowercased message, so matching is case-insensitive.
static COURSE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z]{2,4})\s*(\d{3})").unwrap());

/// Everything a rule gets to look at.
struct RuleInput<'a> {
    catalog: &'a Catalog,
    /// The raw user message.
    message: &'a str,
    /// Lowercased copy used for keyword checks.
    lower: String,
    /// Normalized course codes found in the message, e.g. "CS 111".
    codes: Vec<String>,
}

impl<'a> RuleInput<'a> {
    fn new(catalog: &'a Catalog, message: &'a str) -> Self {
        let lower = message.to_lowercase();
        let codes = COURSE_CODE_RE
            .captures_iter(&lower)
            .map(|caps| format!("{} {}", caps[1].to_uppercase(), &caps[2]))
            .collect();
        Self {
            catalog,
            message,
            lower,
            codes,
        }
    }
}

type Rule = fn(&RuleInput<'_>) -> Option<String>;

/// Rules in fixed priority order. The order is part of the contract: the
/// first rule that produces output wins.
const RULES: &[(&str, Rule)] = &[
    ("compare", compare_rule),
    ("single_course", single_course_rule),
    ("campus_listing", campus_listing_rule),
    ("keyword_search", keyword_search_rule),
    ("difficulty", difficulty_rule),
    ("electives", electives_rule),
];

/// Generates a canned answer for the given message.
///
/// The campus filter is accepted for interface parity with the chat
/// endpoint; campus scoping inside the rules comes from campus names
/// mentioned in the message text.
pub fn generate_response(catalog: &Catalog, message: &str, campus: Campus) -> String {
    let input = RuleInput::new(catalog, message);
    debug!(campus = %campus, codes = input.codes.len(), "evaluating responder rules");

    for (name, rule) in RULES {
        if let Some(reply) = rule(&input) {
            debug!(rule = name, "responder rule matched");
            return reply;
        }
    }

    help_text()
}

/// Two or more course codes where the first two both resolve: side-by-side
/// comparison. A lookup miss on either code declines, so the message falls
/// through to the campus/search rules (not to the single-course rule, which
/// requires exactly one code).
fn compare_rule(input: &RuleInput) -> Option<String> {
    if input.codes.len() < 2 {
        return None;
    }
    let first = input.catalog.get_by_code(&input.codes[0])?;
    let second = input.catalog.get_by_code(&input.codes[1])?;
    Some(compare_courses(first, second))
}

/// Exactly one course code: prerequisites-only answer, full detail block, or
/// a not-found message naming the code. Always produces output.
fn single_course_rule(input: &RuleInput) -> Option<String> {
    if input.codes.len() != 1 {
        return None;
    }
    let code = &input.codes[0];

    let Some(course) = input.catalog.get_by_code(code) else {
        return Some(format!(
            "I don't have information about {code} in my database. \
             Please check the course code or try another course."
        ));
    };

    if input.lower.contains("prerequisite") || input.lower.contains("prereq") {
        if course.prerequisites.is_empty() {
            return Some(format!(
                "**{}: {}** has no prerequisites. It is an introductory course \
                 suitable for students beginning their studies in this area.",
                course.code, course.title
            ));
        }
        let lines = course
            .prerequisites
            .iter()
            .map(|p| format!("• {p}"))
            .collect::<Vec<_>>()
            .join("\n");
        return Some(format!(
            "**Prerequisites for {}: {}**\n\n{}\n\nYou must complete these courses \
             before enrolling in {}.",
            course.code, course.title, lines, course.code
        ));
    }

    Some(format_course(course))
}

/// Message names a campus and mentions computer science: list CS courses at
/// that campus. Later campus mentions override earlier ones in the fixed
/// order New Brunswick, Newark, Camden.
fn campus_listing_rule(input: &RuleInput) -> Option<String> {
    let lower = &input.lower;
    if !(lower.contains("newark") || lower.contains("new brunswick") || lower.contains("camden")) {
        return None;
    }

    let mut campus = Campus::NewBrunswick;
    if lower.contains("newark") {
        campus = Campus::Newark;
    }
    if lower.contains("camden") {
        campus = Campus::Camden;
    }

    if !(lower.contains("cs") || lower.contains("computer science")) {
        return None;
    }

    let matches: Vec<&Course> = input
        .catalog
        .by_campus(campus)
        .into_iter()
        .filter(|c| c.code.starts_with("CS"))
        .collect();
    if matches.is_empty() {
        return None;
    }

    let lines = matches
        .iter()
        .map(|c| format!("• **{}**: {} ({} credits)", c.code, c.title, c.credits))
        .collect::<Vec<_>>()
        .join("\n");
    Some(format!(
        "**Computer Science Courses at {}:**\n\n{}\n\nWould you like details about any \
         specific course?",
        campus.name(),
        lines
    ))
}

/// Substring search of the whole message across the catalog. One hit shows
/// full detail; several list up to five with a narrowing prompt.
fn keyword_search_rule(input: &RuleInput) -> Option<String> {
    let results = input.catalog.search(input.message);
    match results.len() {
        0 => None,
        1 => Some(format_course(results[0])),
        n => {
            let lines = results
                .iter()
                .take(5)
                .map(|c| format!("• **{}**: {}", c.code, c.title))
                .collect::<Vec<_>>()
                .join("\n");
            Some(format!(
                "I found {n} courses matching your query:\n\n{lines}\n\nWhich course \
                 would you like to know more about?"
            ))
        }
    }
}

fn difficulty_rule(input: &RuleInput) -> Option<String> {
    let lower = &input.lower;
    if !(lower.contains("hard") || lower.contains("difficult") || lower.contains("easy")) {
        return None;
    }
    Some(
        "Course difficulty is subjective and depends on your background. Generally:\n\n\
         • **Introductory courses** (like CS 111, MATH 151) are designed for beginners\n\
         • **Intermediate courses** require foundational knowledge\n\
         • **Advanced courses** assume mastery of prerequisites\n\n\
         Which specific course would you like to know about? I can provide more details \
         about its prerequisites and content."
            .to_string(),
    )
}

fn electives_rule(input: &RuleInput) -> Option<String> {
    if !input.lower.contains("elective") {
        return None;
    }
    let lines = input
        .catalog
        .advanced()
        .iter()
        .map(|c| format!("• **{}**: {}", c.code, c.title))
        .collect::<Vec<_>>()
        .join("\n");
    Some(format!(
        "**Elective Recommendations:**\n\n{lines}\n\nThese advanced courses can serve as \
         electives for CS majors. Would you like details about any of these?"
    ))
}

fn help_text() -> String {
    "I can help you with information about Rutgers courses. Try asking about:\n\n\
     • A specific course (e.g., \"What is CS 111?\")\n\
     • Prerequisites (e.g., \"What are the prereqs for CS 112?\")\n\
     • Courses at a specific campus (e.g., \"CS courses in Newark\")\n\
     • Course comparisons (e.g., \"Compare CS 111 and CS 112\")\n\n\
     What would you like to know?"
        .to_string()
}

/// Full detail block for one course.
fn format_course(course: &Course) -> String {
    let prereqs = if course.prerequisites.is_empty() {
        "None".to_string()
    } else {
        course.prerequisites.join(", ")
    };
    let campuses = course.campus.join(", ");
    let gen_ed = course
        .gen_ed
        .as_ref()
        .map(|tags| tags.join(", "))
        .unwrap_or_else(|| "None".to_string());

    format!(
        "**{code}: {title}**\n\n\
         • Credits: {credits}\n\
         • Level: {level}\n\
         • Prerequisites: {prereqs}\n\
         • Campuses: {campuses}\n\
         • Gen Ed: {gen_ed}\n\n\
         {description}",
        code = course.code,
        title = course.title,
        credits = course.credits,
        level = course.level.title_case(),
        description = course.description,
    )
}

/// Side-by-side comparison of two courses.
fn compare_courses(first: &Course, second: &Course) -> String {
    fn summary(course: &Course) -> String {
        let prereqs = if course.prerequisites.is_empty() {
            "None".to_string()
        } else {
            course.prerequisites.join(", ")
        };
        format!(
            "**{}: {}**\n• Credits: {}\n• Level: {}\n• Prerequisites: {}",
            course.code,
            course.title,
            course.credits,
            course.level.as_str(),
            prereqs
        )
    }

    format!(
        "**Comparison: {c1} vs {c2}**\n\n{s1}\n\n{s2}\n\n\
         **Key Differences:**\n\
         {c1} focuses on {t1}, while {c2} covers {t2}. {c2} typically builds upon \
         concepts from {c1} and goes into greater depth.",
        c1 = first.code,
        c2 = second.code,
        s1 = summary(first),
        s2 = summary(second),
        t1 = first.title.to_lowercase(),
        t2 = second.title.to_lowercase(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::embedded()
    }

    fn respond(message: &str) -> String {
        generate_response(&catalog(), message, Campus::All)
    }

    #[test]
    fn test_single_course_detail() {
        let reply = respond("What is CS 111?");
        assert!(reply.contains("CS 111"));
        assert!(reply.contains("Introduction to Computer Science"));
        assert!(reply.contains("Credits: 4"));
        assert!(reply.contains("Prerequisites: None"));
    }

    #[test]
    fn test_detail_block_lists_prerequisites_verbatim() {
        let reply = respond("Tell me about CS 344");
        assert!(reply.contains("CS 344"));
        assert!(reply.contains("Design and Analysis of Computer Algorithms"));
        assert!(reply.contains("Credits: 3"));
        assert!(reply.contains("Prerequisites: CS 112, CS 205"));
    }

    #[test]
    fn test_code_matching_tolerates_case_and_spacing() {
        assert!(respond("what is cs111?").contains("Introduction to Computer Science"));
        assert!(respond("MATH  151 info").contains("Calculus I"));
    }

    #[test]
    fn test_comparison() {
        let reply = respond("Compare CS 111 and CS 112");
        assert!(reply.contains("CS 111"));
        assert!(reply.contains("CS 112"));
        assert!(reply.contains("Key Differences"));
    }

    #[test]
    fn test_comparison_with_unknown_code_falls_through() {
        // "CS 999" breaks the comparison; with two codes present the single
        // course rule is skipped too, so this lands on the help fallback.
        let reply = respond("Compare CS 111 and CS 999");
        assert!(reply.contains("I can help you with information about Rutgers courses"));
    }

    #[test]
    fn test_prerequisites_answer() {
        let reply = respond("Prerequisites for CS 112");
        assert!(reply.contains("Prerequisites for CS 112"));
        assert!(reply.contains("• CS 111"));
    }

    #[test]
    fn test_prerequisites_empty_special_case() {
        let reply = respond("What are the prereqs for CS 111?");
        assert!(reply.contains("has no prerequisites"));
    }

    #[test]
    fn test_unknown_code_names_it() {
        let reply = respond("What is CS 999?");
        assert!(reply.contains("CS 999"));
        assert!(reply.contains("don't have information"));
    }

    #[test]
    fn test_campus_listing_scopes_by_campus_and_prefix() {
        let reply = respond("CS courses in Newark");
        assert!(reply.contains("Computer Science Courses at Newark"));
        assert!(reply.contains("CS 111"));
        assert!(reply.contains("CS 112"));
        // New Brunswick-only courses must not appear.
        assert!(!reply.contains("CS 214"));
        assert!(!reply.contains("CS 336"));
        // MATH is excluded by the CS prefix even though Newark offers it.
        assert!(!reply.contains("MATH 151"));
    }

    #[test]
    fn test_later_campus_mention_wins() {
        let reply = respond("computer science in newark or camden?");
        assert!(reply.contains("Computer Science Courses at Camden"));
    }

    #[test]
    fn test_keyword_search_single_hit() {
        // The whole message is the search needle, so a bare phrase that
        // appears in exactly one description shows the full detail block.
        let reply = respond("NP-completeness");
        assert!(reply.contains("CS 344"));
        assert!(reply.contains("Credits: 3"));
    }

    #[test]
    fn test_keyword_search_multiple_hits_lists_up_to_five() {
        let reply = respond("calculus");
        assert!(reply.contains("I found 2 courses"));
        assert!(reply.contains("MATH 151"));
        assert!(reply.contains("MATH 152"));
    }

    #[test]
    fn test_difficulty_keywords() {
        let reply = respond("is this stuff too difficult for me");
        assert!(reply.contains("Course difficulty is subjective"));
    }

    #[test]
    fn test_electives_lists_advanced_courses() {
        let reply = respond("recommend an elective please");
        assert!(reply.contains("Elective Recommendations"));
        assert!(reply.contains("CS 214"));
        assert!(reply.contains("CS 336"));
        assert!(reply.contains("CS 344"));
    }

    #[test]
    fn test_default_help() {
        let reply = respond("hello there");
        assert!(reply.contains("I can help you with information about Rutgers courses"));
    }
}
