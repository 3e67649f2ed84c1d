//! Plain resume text to a loosely structured document.
//!
//! Output mirrors what the profile editor historically received from the
//! resume importer: education and experience as raw text, skills as a flat
//! list, and everything else folded into `others`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

/// Lines that start a section when they stand alone, compared case-insensitively.
const SECTION_HEADERS: [&str; 15] = [
    "education",
    "experience",
    "skills",
    "projects",
    "certifications",
    "achievements",
    "awards",
    "languages",
    "additional information",
    "computer proficiency",
    "core competencies",
    "internships",
    "co-curricular",
    "declaration",
    "others",
];

const CORE_SECTIONS: [&str; 3] = ["education", "experience", "skills"];

/// The name is looked for near the top of the document only.
const NAME_SCAN_LINES: usize = 15;
const NAME_BLOCKLIST: [&str; 4] = ["linkedin", "github", "phone", "email"];

const MAX_SKILL_LEN: usize = 60;
const SKILL_BLOCKLIST: [&str; 9] = [
    "achievement",
    "award",
    "certificate",
    "loyalty",
    "top performer",
    "appreciation",
    "language",
    "additional",
    "miscellaneous",
];

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"[\w.-]+@[\w.-]+").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"(?:\+91[\s-]?)?\d{10}").unwrap();
    static ref LINKEDIN_RE: Regex =
        Regex::new(r"(?:https?://)?(?:www\.)?linkedin\.com/in/\S+").unwrap();
    static ref GITHUB_RE: Regex = Regex::new(r"(?:https?://)?(?:www\.)?github\.com/\S+").unwrap();
    static ref SKILL_SPLIT_RE: Regex = Regex::new(r"[•\n,-]").unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedResume {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub education: String,
    pub experience: String,
    pub skills: Vec<String>,
    pub others: String,
}

impl ParsedResume {
    /// The parse as a legacy-shaped profile document.
    pub fn document(&self) -> Value {
        json!({
            "name": self.name,
            "email": self.email,
            "phone": self.phone,
            "linkedin": self.linkedin,
            "github": self.github,
            "education": self.education,
            "experience": self.experience,
            "skills": self.skills,
            "others": self.others,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn section_header(line: &str) -> Option<&'static str> {
    let line = line.trim();
    SECTION_HEADERS
        .iter()
        .copied()
        .find(|header| line.eq_ignore_ascii_case(header))
}

/// Splits text at header lines. Sections keep first-seen order; a repeated
/// header starts its section over. Text before the first header is dropped.
pub fn split_into_sections(text: &str) -> Vec<(&'static str, String)> {
    let mut sections: Vec<(&'static str, Vec<&str>)> = Vec::new();
    let mut current: Option<usize> = None;

    for line in text.lines() {
        if let Some(header) = section_header(line) {
            let index = match sections.iter().position(|(h, _)| *h == header) {
                Some(i) => {
                    sections[i].1.clear();
                    i
                }
                None => {
                    sections.push((header, Vec::new()));
                    sections.len() - 1
                }
            };
            current = Some(index);
        } else if let Some(i) = current {
            sections[i].1.push(line.trim_end());
        }
    }

    sections
        .into_iter()
        .map(|(header, lines)| (header, lines.join("\n").trim().to_string()))
        .collect()
}

fn section<'a>(sections: &'a [(&'static str, String)], header: &str) -> &'a str {
    sections
        .iter()
        .find(|(h, _)| *h == header)
        .map(|(_, content)| content.as_str())
        .unwrap_or("")
}

// ────────────────────────────────────────────────────────────────────────────
// Heuristics
// ────────────────────────────────────────────────────────────────────────────

fn is_probable_name(line: &str) -> bool {
    if line.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    (2..=4).contains(&words.len())
        && words
            .iter()
            .all(|w| w.chars().next().is_some_and(char::is_uppercase))
}

fn find_name(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(NAME_SCAN_LINES)
        .filter(|line| {
            let lower = line.to_lowercase();
            !SECTION_HEADERS
                .iter()
                .chain(NAME_BLOCKLIST.iter())
                .any(|blocked| lower.contains(blocked))
        })
        .find(|line| is_probable_name(line))
        .unwrap_or("")
        .to_string()
}

fn first_match(re: &Regex, text: &str) -> String {
    re.find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn is_skill(fragment: &str) -> bool {
    let lower = fragment.to_lowercase();
    !SKILL_BLOCKLIST.iter().any(|bad| lower.contains(bad))
        && fragment.chars().count() <= MAX_SKILL_LEN
        && fragment.chars().any(|c| c.is_ascii_alphabetic())
}

/// Splits the skills section into skills and leftover fragments that read
/// like something else (awards, long sentences, bare numbers).
fn split_skills(raw: &str) -> (Vec<String>, Vec<String>) {
    SKILL_SPLIT_RE
        .split(raw)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .partition(|item| is_skill(item))
}

fn capitalize(header: &str) -> String {
    let mut chars = header.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn collect_others(sections: &[(&'static str, String)], fragments: &[String]) -> String {
    let mut others: Vec<String> = SECTION_HEADERS
        .iter()
        .filter(|header| !CORE_SECTIONS.contains(*header))
        .filter_map(|header| {
            let content = section(sections, header);
            (!content.is_empty()).then(|| format!("**{}**:\n{}", capitalize(header), content))
        })
        .collect();

    if !fragments.is_empty() {
        others.push(format!(
            "**Miscellaneous from Skills**:\n{}",
            fragments.join("\n")
        ));
    }
    others.join("\n\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

pub fn parse_resume(text: &str) -> ParsedResume {
    let sections = split_into_sections(text);
    let (skills, fragments) = split_skills(section(&sections, "skills"));

    let parsed = ParsedResume {
        name: find_name(text),
        email: first_match(&EMAIL_RE, text),
        phone: first_match(&PHONE_RE, text),
        linkedin: first_match(&LINKEDIN_RE, text),
        github: first_match(&GITHUB_RE, text),
        education: section(&sections, "education").to_string(),
        experience: section(&sections, "experience").to_string(),
        skills,
        others: collect_others(&sections, &fragments),
    };

    debug!(
        sections = sections.len(),
        skills = parsed.skills.len(),
        misc_fragments = fragments.len(),
        has_name = !parsed.name.is_empty(),
        "parsed resume text"
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Priya Raman
Email: priya.raman@example.com | Phone: +91 9876543210
linkedin.com/in/priya-raman  github.com/priyar

EDUCATION
B.Tech Computer Science
2016 - 2020
IIT Madras

Experience
Backend Engineer at Acme
2020 - present
Built billing APIs

SKILLS
Rust, Go • PostgreSQL
Best Employee Award 2022
1234

Projects
Ledger | Double-entry bookkeeping | |

Awards
Hackathon winner
";

    #[test]
    fn test_split_into_sections() {
        let sections = split_into_sections(SAMPLE);
        let headers: Vec<&str> = sections.iter().map(|(h, _)| *h).collect();
        assert_eq!(
            headers,
            vec!["education", "experience", "skills", "projects", "awards"]
        );
        assert_eq!(
            section(&sections, "education"),
            "B.Tech Computer Science\n2016 - 2020\nIIT Madras"
        );
    }

    #[test]
    fn test_repeated_header_starts_over() {
        let sections = split_into_sections("Skills\nCOBOL\nskills\nRust");
        assert_eq!(sections, vec![("skills", "Rust".to_string())]);
    }

    #[test]
    fn test_header_must_stand_alone() {
        let sections = split_into_sections("Work experience at Acme\nEducation\nBSc");
        assert_eq!(sections, vec![("education", "BSc".to_string())]);
    }

    #[test]
    fn test_contacts_and_name() {
        let parsed = parse_resume(SAMPLE);
        assert_eq!(parsed.name, "Priya Raman");
        assert_eq!(parsed.email, "priya.raman@example.com");
        assert_eq!(parsed.phone, "+91 9876543210");
        assert_eq!(parsed.linkedin, "linkedin.com/in/priya-raman");
        assert_eq!(parsed.github, "github.com/priyar");
    }

    #[test]
    fn test_name_skips_digits_and_headers() {
        let text = "Curriculum Vitae 2024\nSkills Summary\nalan turing\nAlan Mathison Turing\n";
        assert_eq!(find_name(text), "Alan Mathison Turing");
        assert_eq!(find_name("resume\n"), "");
    }

    #[test]
    fn test_skill_filter() {
        let parsed = parse_resume(SAMPLE);
        assert_eq!(parsed.skills, vec!["Rust", "Go", "PostgreSQL"]);
        assert!(parsed
            .others
            .ends_with("**Miscellaneous from Skills**:\nBest Employee Award 2022\n1234"));
    }

    #[test]
    fn test_others_in_header_order() {
        let parsed = parse_resume(SAMPLE);
        assert!(parsed.others.starts_with(
            "**Projects**:\nLedger | Double-entry bookkeeping | |\n\n**Awards**:\nHackathon winner"
        ));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(parse_resume(""), ParsedResume::default());
    }

    #[test]
    fn test_document_shape() {
        let doc = parse_resume(SAMPLE).document();
        assert_eq!(doc["skills"], json!(["Rust", "Go", "PostgreSQL"]));
        assert!(doc["education"].is_string());
        assert!(doc.get("selectedTemplate").is_none());
    }
}
