//! Entity normalization for projects, certificates, experience and legacy
//! education blocks.
//!
//! Nothing here fails on malformed input: a line that matches no known shape
//! is kept as a title or description.

use crate::profile::fields::{row, split_fields};
use crate::profile::heuristics::{
    extract_project_labels, has_project_formatting, is_date_range, split_role_company,
    starts_with_numbering, starts_with_project_marker, strip_numbering,
};
use crate::profile::models::{
    CertificateEntry, EducationEntry, ExperienceEntry, ProjectEntry,
};
use crate::profile::tokenizer::{split_blocks, tokenize};

fn non_empty(field: &str) -> Option<String> {
    (!field.is_empty()).then(|| field.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

/// Parses `[Project N:] Title | Description | GitHub | Demo`.
/// Empty link fields become `None`, not `""`.
pub fn project_from_row(line: &str) -> ProjectEntry {
    let fields = split_fields(strip_numbering(line));
    let field = |i: usize| fields.get(i).copied().unwrap_or("");
    ProjectEntry {
        title: field(0).to_string(),
        description: field(1).to_string(),
        github: non_empty(field(2)),
        demo: non_empty(field(3)),
        technologies: Vec::new(),
    }
}

/// Parses a legacy multi-line project: the first line is the title, the rest
/// is description text that may carry `github:`/`demo:`/`tech:` labels.
pub fn project_from_block(lines: &[&str]) -> ProjectEntry {
    let Some((first, rest)) = lines.split_first() else {
        return ProjectEntry::default();
    };
    let labels = extract_project_labels(&rest.join("\n"));
    ProjectEntry {
        title: strip_numbering(first).to_string(),
        description: labels.description,
        github: labels.github,
        demo: labels.demo,
        technologies: labels.technologies,
    }
}

/// Whether `line` starts a new project inside a block opened by `first`.
/// A `Project N:` block is only ended by another `Project N:` line, so
/// numbered lists inside its description stay with it.
fn opens_project(first: &str, line: &str) -> bool {
    if starts_with_project_marker(first) {
        starts_with_project_marker(line)
    } else {
        starts_with_numbering(line)
    }
}

/// Splits project text into blocks at blank lines. Numbered lines also start
/// blocks, but only when the text carries project formatting.
fn project_blocks(raw: &str) -> Vec<Vec<&str>> {
    let numbered = has_project_formatting(raw);
    let mut blocks = Vec::new();
    for block in split_blocks(raw) {
        let mut current: Vec<&str> = Vec::new();
        for line in block {
            if numbered && !current.is_empty() && opens_project(current[0], line) {
                blocks.push(std::mem::take(&mut current));
            }
            current.push(line);
        }
        if !current.is_empty() {
            blocks.push(current);
        }
    }
    blocks
}

/// Each `|` line is its own project; plain lines in between extend the
/// description of the project above them.
fn projects_from_rows(lines: &[&str], out: &mut Vec<ProjectEntry>) {
    let start = out.len();
    for line in lines {
        if line.contains('|') {
            out.push(project_from_row(line));
            continue;
        }
        match out.get_mut(start..).and_then(|block| block.last_mut()) {
            Some(project) if project.description.is_empty() => {
                project.description = line.to_string();
            }
            Some(project) => {
                project.description.push('\n');
                project.description.push_str(line);
            }
            None => out.push(project_from_block(&[line])),
        }
    }
}

pub fn normalize_projects(raw: &str) -> Vec<ProjectEntry> {
    let mut projects = Vec::new();
    for block in project_blocks(raw) {
        if strip_numbering(block[0]).contains('|') {
            projects_from_rows(&block, &mut projects);
        } else {
            projects.push(project_from_block(&block));
        }
    }
    projects
}

// ────────────────────────────────────────────────────────────────────────────
// Certificates
// ────────────────────────────────────────────────────────────────────────────

/// Parses `Title | Issuer | Date | Link`; missing fields are `""`.
pub fn certificate_from_row(line: &str) -> CertificateEntry {
    let [title, issuer, date, link] = row::<4>(line);
    CertificateEntry {
        title: title.to_string(),
        issuer: issuer.to_string(),
        date: date.to_string(),
        link: link.to_string(),
    }
}

pub fn normalize_certificates(raw: &str) -> Vec<CertificateEntry> {
    tokenize(raw).into_iter().map(certificate_from_row).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

/// Splits an experience title. `Role | Company` is taken literally; anything
/// else goes through the `at`/dash heuristics.
pub fn split_title(title: &str) -> (String, String) {
    match title.split_once('|') {
        Some((role, company)) => (role.trim().to_string(), company.trim().to_string()),
        None => split_role_company(title),
    }
}

/// Legacy experience block: title line, date line, then description.
pub fn experience_from_block(lines: &[&str]) -> ExperienceEntry {
    let title = lines.first().copied().unwrap_or("");
    let (role, company) = split_title(title);
    ExperienceEntry {
        role,
        company,
        date: lines.get(1).copied().unwrap_or("").to_string(),
        description: lines.get(2..).unwrap_or_default().join("\n"),
    }
}

pub fn normalize_experience(raw: &str) -> Vec<ExperienceEntry> {
    split_blocks(raw)
        .iter()
        .map(|block| experience_from_block(block))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Legacy education
// ────────────────────────────────────────────────────────────────────────────

/// Legacy education block. The second line is taken as the date when it looks
/// like a year range, otherwise as the institution. Remaining lines join into
/// a one-line description.
pub fn education_from_block(lines: &[&str]) -> EducationEntry {
    let line = |i: usize| lines.get(i).copied().unwrap_or("").to_string();
    let (institution, date) = match lines.get(1) {
        Some(second) if is_date_range(second) => (line(2), line(1)),
        _ => (line(1), line(2)),
    };
    EducationEntry {
        degree: line(0),
        institution,
        date,
        description: lines.get(3..).unwrap_or_default().join(" "),
    }
}

/// Reads legacy blank-line separated education text.
pub fn legacy_education_blocks(raw: &str) -> Vec<EducationEntry> {
    split_blocks(raw)
        .iter()
        .map(|block| education_from_block(block))
        .collect()
}
