//! Best-effort pattern matching over free text.
//!
//! Kept apart from the strict delimiter parser so it can be replaced without
//! touching the strict path. The ORDER in which patterns are tried is part of
//! the observable behavior; do not reorder.

use lazy_static::lazy_static;
use regex::Regex;

use crate::profile::fields::split_list;
use crate::profile::tokenizer::tokenize;

lazy_static! {
    /// `Project 3:`, `3. ` or `#3 ` at the start of a project line.
    static ref NUMBERING_RE: Regex = Regex::new(r"(?i)^(\d+\.\s|Project\s+\d+:|#\d+\s)").unwrap();

    static ref PROJECT_MARKER_RE: Regex = Regex::new(r"(?i)^Project\s+\d+:").unwrap();
    /// Text with a `Project N:` marker or a `| http` link column is treated as
    /// numbered; only then do numbered lines start new projects.
    static ref PROJECT_FORMATTING_RE: Regex =
        Regex::new(r"(?im)^\s*Project\s+\d+:|\|\s*https?://").unwrap();

    static ref GITHUB_RE: Regex = Regex::new(r"(?i)github(\s+link)?:\s*(https?://\S+)").unwrap();
    /// Tried in order; the first that matches supplies the demo link.
    static ref DEMO_RES: [Regex; 3] = [
        Regex::new(r"(?i)demo(\s+link)?:\s*(https?://\S+)").unwrap(),
        Regex::new(r"(?i)live(\s+link)?:\s*(https?://\S+)").unwrap(),
        Regex::new(r"(?i)project(\s+link)?:\s*(https?://\S+)").unwrap(),
    ];
    static ref TECH_RE: Regex = Regex::new(r"(?i)tech(nologies|\s+stack)?:\s*([^\n]+)").unwrap();

    static ref AT_RE: Regex = Regex::new(r"(?i)(?:^|\s)at\s+(.+)$").unwrap();
    static ref DASH_RE: Regex = Regex::new(r"\s[-–—]\s*(.+)$").unwrap();

    static ref DATE_RANGE_RE: Regex =
        Regex::new(r"(?i)(\d{4})\s*[-–—]\s*(\d{4}|present|current|ongoing)").unwrap();
}

/// Removes a leading project numbering marker.
pub fn strip_numbering(line: &str) -> &str {
    match NUMBERING_RE.find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line.trim(),
    }
}

pub fn starts_with_numbering(line: &str) -> bool {
    NUMBERING_RE.is_match(line)
}

pub fn starts_with_project_marker(line: &str) -> bool {
    PROJECT_MARKER_RE.is_match(line)
}

pub fn has_project_formatting(raw: &str) -> bool {
    PROJECT_FORMATTING_RE.is_match(raw)
}

pub fn is_date_range(line: &str) -> bool {
    DATE_RANGE_RE.is_match(line)
}

/// Labels pulled out of a free-text project description.
#[derive(Debug, Default, PartialEq)]
pub struct ProjectLabels {
    pub description: String,
    pub github: Option<String>,
    pub demo: Option<String>,
    pub technologies: Vec<String>,
}

/// Removes the first match of `re` from `text`, returning capture group 2.
fn take_label(re: &Regex, text: &mut String) -> Option<String> {
    let (range, value) = {
        let caps = re.captures(text.as_str())?;
        let whole = caps.get(0)?;
        (whole.range(), caps.get(2)?.as_str().trim().to_string())
    };
    text.replace_range(range, "");
    Some(value)
}

/// Extracts `github:`, `demo:`/`live:`/`project:` and `tech:`/`technologies:`
/// labels (case-insensitive) from a legacy project description. Each matched
/// label and its value are removed from the retained description.
pub fn extract_project_labels(description: &str) -> ProjectLabels {
    let mut text = description.to_string();

    let github = take_label(&GITHUB_RE, &mut text);
    let demo = DEMO_RES.iter().find_map(|re| take_label(re, &mut text));
    let technologies = take_label(&TECH_RE, &mut text)
        .map(|list| split_list(&list).into_iter().map(String::from).collect())
        .unwrap_or_default();

    ProjectLabels {
        description: tokenize(&text).join("\n"),
        github,
        demo,
        technologies,
    }
}

/// Splits an experience title line into `(role, company)`.
///
/// Tries `<role> at <company>` first, then `<role> - <company>`. When neither
/// matches, the whole line is the role and the company is empty.
pub fn split_role_company(title: &str) -> (String, String) {
    let title = title.trim();
    for re in [&*AT_RE, &*DASH_RE] {
        if let Some(caps) = re.captures(title) {
            if let (Some(whole), Some(company)) = (caps.get(0), caps.get(1)) {
                let role = title[..whole.start()].trim();
                return (role.to_string(), company.as_str().trim().to_string());
            }
        }
    }
    (title.to_string(), String::new())
}
