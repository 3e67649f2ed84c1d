//! Category grouping for education and skills textareas.
//!
//! Input lines either declare a category (`Name: row`) or continue the
//! current one. A line containing `:` ALWAYS declares a category, even when it
//! also contains `|`; consumers rely on this precedence. Consecutive
//! declarations of the same category collapse into one group.

use tracing::debug;

use crate::profile::fields::{row, split_list, split_prefix};
use crate::profile::models::{EducationCategory, EducationEntry, SkillGroup};
use crate::profile::tokenizer::tokenize;

pub const DEFAULT_EDUCATION_CATEGORY: &str = "Education";
pub const DEFAULT_SKILLS_CATEGORY: &str = "Other Skills";

/// Single-pass accumulator threaded through the fold over lines.
struct Grouper<T> {
    groups: Vec<(String, Vec<T>)>,
    current: Option<(String, Vec<T>)>,
}

impl<T> Grouper<T> {
    fn new() -> Self {
        Self {
            groups: Vec::new(),
            current: None,
        }
    }

    /// Moves the current category into the result if it holds anything.
    /// A category repeating the one just emitted is merged into it.
    fn flush(&mut self) {
        let Some((name, entries)) = self.current.take() else {
            return;
        };
        if entries.is_empty() {
            return;
        }
        match self.groups.last_mut() {
            Some((last, existing)) if *last == name => existing.extend(entries),
            _ => self.groups.push((name, entries)),
        }
    }

    fn declare(&mut self, name: &str, entries: Vec<T>) {
        self.flush();
        self.current = Some((name.to_string(), entries));
    }

    fn continue_with(&mut self, default_category: &str, entries: Vec<T>) {
        self.current
            .get_or_insert_with(|| (default_category.to_string(), Vec::new()))
            .1
            .extend(entries);
    }

    fn finish(mut self) -> Vec<(String, Vec<T>)> {
        self.flush();
        self.groups
    }
}

/// Groups tokenized lines into `(category, entries)` pairs in first-declaration
/// order. `parse_row` turns row text (after any prefix) into entries.
///
/// If every declared category ended up empty (header-only input), each line
/// is parsed as a raw row under `default_category` so no text is lost.
fn group_lines<T>(
    lines: &[&str],
    default_category: &str,
    parse_row: impl Fn(&str) -> Vec<T>,
) -> Vec<(String, Vec<T>)> {
    let groups = lines
        .iter()
        .fold(Grouper::new(), |mut acc, line| {
            match split_prefix(line) {
                Some((name, rest)) => {
                    let entries = if rest.is_empty() {
                        Vec::new()
                    } else {
                        parse_row(rest)
                    };
                    acc.declare(name, entries);
                }
                None => acc.continue_with(default_category, parse_row(line)),
            }
            acc
        })
        .finish();

    if groups.is_empty() && !lines.is_empty() {
        debug!(
            lines = lines.len(),
            "header-only input, falling back to '{default_category}'"
        );
        let entries: Vec<T> = lines.iter().flat_map(|line| parse_row(line)).collect();
        if entries.is_empty() {
            return Vec::new();
        }
        return vec![(default_category.to_string(), entries)];
    }
    groups
}

/// Parses one `Degree | Institution | Date | Description` row.
pub fn education_entry_from_row(text: &str) -> EducationEntry {
    let [degree, institution, date, description] = row::<4>(text);
    EducationEntry {
        degree: degree.to_string(),
        institution: institution.to_string(),
        date: date.to_string(),
        description: description.to_string(),
    }
}

pub fn group_education(raw: &str) -> Vec<EducationCategory> {
    let lines = tokenize(raw);
    group_lines(&lines, DEFAULT_EDUCATION_CATEGORY, |text| {
        vec![education_entry_from_row(text)]
    })
    .into_iter()
    .map(|(category, entries)| EducationCategory { category, entries })
    .collect()
}

pub fn group_skills(raw: &str) -> Vec<SkillGroup> {
    let lines = tokenize(raw);
    group_lines(&lines, DEFAULT_SKILLS_CATEGORY, |text| {
        split_list(text).into_iter().map(String::from).collect()
    })
    .into_iter()
    .map(|(category, items)| SkillGroup { category, items })
    .collect()
}
