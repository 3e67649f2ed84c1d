//! Dual-shape reader.
//!
//! Profile fields arrive either in the legacy shape (a plain string, or an
//! array of plain strings) or in the normalized shape (an array of objects,
//! possibly with stray strings mixed in). The shape is classified once here;
//! everything downstream sees normalized values only.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::profile::entities::{
    education_from_block, legacy_education_blocks, normalize_certificates, normalize_experience,
    normalize_projects,
};
use crate::profile::grouping::{
    group_education, group_skills, DEFAULT_EDUCATION_CATEGORY, DEFAULT_SKILLS_CATEGORY,
};
use crate::profile::models::{
    CertificateEntry, EducationCategory, EducationEntry, ExperienceEntry, FlatEducationEntry,
    Profile, ProjectEntry, SkillGroup, Template,
};
use crate::profile::fields::split_list;
use crate::profile::tokenizer::{compact_lines, single_line, tokenize};

/// Raised only when a caller hands over a value of the wrong JSON type.
/// Data-quality problems never produce an error.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("profile document must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("field '{field}' must be a string or null, found {found}")]
    InvalidScalar { field: &'static str, found: &'static str },

    #[error("field '{field}' must be a string, an array or null, found {found}")]
    InvalidFieldType { field: &'static str, found: &'static str },

    #[error("element {index} of '{field}' must be a string or an object, found {found}")]
    InvalidElement {
        field: &'static str,
        index: usize,
        found: &'static str,
    },

    #[error("element {index} of '{field}' is malformed: {source}")]
    MalformedEntry {
        field: &'static str,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One element of a normalized-shape array.
#[derive(Debug, Clone, Copy)]
pub enum Element<'a> {
    Text(&'a str),
    Object(&'a Value),
}

/// The shape a collection field arrived in.
#[derive(Debug)]
pub enum FieldShape<'a> {
    Absent,
    LegacyString(&'a str),
    LegacyArray(Vec<&'a str>),
    Normalized(Vec<Element<'a>>),
}

impl<'a> FieldShape<'a> {
    pub fn classify(field: &'static str, value: Option<&'a Value>) -> Result<Self, ShapeError> {
        match value {
            None | Some(Value::Null) => Ok(FieldShape::Absent),
            Some(Value::String(s)) => Ok(FieldShape::LegacyString(s)),
            Some(Value::Array(items)) => {
                if let Some(strings) = items.iter().map(Value::as_str).collect::<Option<Vec<_>>>()
                {
                    return Ok(FieldShape::LegacyArray(strings));
                }
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| match item {
                        Value::String(s) => Ok(Element::Text(s)),
                        Value::Object(_) => Ok(Element::Object(item)),
                        other => Err(ShapeError::InvalidElement {
                            field,
                            index,
                            found: json_type_name(other),
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(FieldShape::Normalized)
            }
            Some(other) => Err(ShapeError::InvalidFieldType {
                field,
                found: json_type_name(other),
            }),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FieldShape::Absent => "absent",
            FieldShape::LegacyString(_) => "legacy_string",
            FieldShape::LegacyArray(_) => "legacy_array",
            FieldShape::Normalized(_) => "normalized",
        }
    }
}

/// Classifies `value` and records the outcome at debug level.
fn classify<'a>(field: &'static str, value: Option<&'a Value>) -> Result<FieldShape<'a>, ShapeError> {
    let shape = FieldShape::classify(field, value)?;
    debug!(field, shape = shape.kind(), "classified profile field");
    Ok(shape)
}

fn parse_entry<'a, T: Deserialize<'a>>(
    field: &'static str,
    index: usize,
    value: &'a Value,
) -> Result<T, ShapeError> {
    T::deserialize(value).map_err(|source| ShapeError::MalformedEntry {
        field,
        index,
        source,
    })
}

pub fn read_scalar(field: &'static str, value: Option<&Value>) -> Result<String, ShapeError> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ShapeError::InvalidScalar {
            field,
            found: json_type_name(other),
        }),
    }
}

pub fn read_template(value: Option<&Value>) -> Result<Template, ShapeError> {
    read_scalar("selectedTemplate", value).map(|id| Template::from_id(&id))
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Splits a stored skill string into list items. A value holding commas or
/// line breaks becomes several items.
fn skill_items(item: &str) -> Vec<String> {
    split_list(&single_line(item))
        .into_iter()
        .map(String::from)
        .collect()
}

/// Appends uncategorized skills to the default group, creating it at the
/// position of the first such skill.
fn push_uncategorized(groups: &mut Vec<SkillGroup>, item: &str) {
    let items = skill_items(item);
    if items.is_empty() {
        return;
    }
    match groups
        .iter_mut()
        .find(|g| g.category == DEFAULT_SKILLS_CATEGORY)
    {
        Some(group) => group.items.extend(items),
        None => groups.push(SkillGroup {
            category: DEFAULT_SKILLS_CATEGORY.to_string(),
            items,
        }),
    }
}

/// Appends items to the last group when it has the same name, otherwise
/// opens a new group.
fn push_skills(groups: &mut Vec<SkillGroup>, category: &str, items: Vec<String>) {
    if items.is_empty() {
        return;
    }
    match groups.last_mut() {
        Some(last) if last.category == category => last.items.extend(items),
        _ => groups.push(SkillGroup {
            category: category.to_string(),
            items,
        }),
    }
}

pub fn read_skills(value: Option<&Value>) -> Result<Vec<SkillGroup>, ShapeError> {
    const FIELD: &str = "skills";
    let mut groups: Vec<SkillGroup> = Vec::new();
    match classify(FIELD, value)? {
        FieldShape::Absent => {}
        FieldShape::LegacyString(text) => groups = group_skills(text),
        FieldShape::LegacyArray(items) => {
            for item in items {
                push_uncategorized(&mut groups, item);
            }
        }
        FieldShape::Normalized(elements) => {
            for (index, element) in elements.into_iter().enumerate() {
                match element {
                    Element::Text(item) => push_uncategorized(&mut groups, item),
                    Element::Object(obj) => {
                        let group: SkillGroup = parse_entry(FIELD, index, obj)?;
                        let category = single_line(&group.category);
                        if category.is_empty() {
                            for item in &group.items {
                                push_uncategorized(&mut groups, item);
                            }
                            continue;
                        }
                        let items = group.items.iter().flat_map(|i| skill_items(i)).collect();
                        push_skills(&mut groups, &category, items);
                    }
                }
            }
        }
    }
    Ok(groups)
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

/// Collapses every field onto one line so the entry fits a textarea row.
fn tidy_education(entry: EducationEntry) -> EducationEntry {
    EducationEntry {
        degree: single_line(&entry.degree),
        institution: single_line(&entry.institution),
        date: single_line(&entry.date),
        description: single_line(&entry.description),
    }
}

fn education_category_name(name: &str) -> String {
    match single_line(name) {
        name if name.is_empty() => DEFAULT_EDUCATION_CATEGORY.to_string(),
        name => name,
    }
}

/// Appends an entry to the last category when it has the same name,
/// otherwise opens a new category.
fn push_education(categories: &mut Vec<EducationCategory>, category: &str, entry: EducationEntry) {
    match categories.last_mut() {
        Some(last) if last.category == category => last.entries.push(entry),
        _ => categories.push(EducationCategory {
            category: category.to_string(),
            entries: vec![entry],
        }),
    }
}

/// Pipe-delimited text uses the categorized grammar; anything else is read as
/// legacy blank-line separated blocks.
fn education_from_text(text: &str) -> Vec<EducationCategory> {
    if text.contains('|') {
        return group_education(text);
    }
    let entries = legacy_education_blocks(text);
    if entries.is_empty() {
        return Vec::new();
    }
    debug!(entries = entries.len(), "read legacy education text");
    vec![EducationCategory {
        category: DEFAULT_EDUCATION_CATEGORY.to_string(),
        entries,
    }]
}

fn extend_education(categories: &mut Vec<EducationCategory>, text: &str) {
    if text.contains('|') {
        for category in group_education(text) {
            for entry in category.entries {
                push_education(categories, &category.category, entry);
            }
        }
    } else {
        let lines = tokenize(text);
        if !lines.is_empty() {
            push_education(categories, DEFAULT_EDUCATION_CATEGORY, education_from_block(&lines));
        }
    }
}

pub fn read_education(value: Option<&Value>) -> Result<Vec<EducationCategory>, ShapeError> {
    const FIELD: &str = "education";
    let mut categories: Vec<EducationCategory> = Vec::new();
    match classify(FIELD, value)? {
        FieldShape::Absent => {}
        FieldShape::LegacyString(text) => categories = education_from_text(text),
        FieldShape::LegacyArray(items) => {
            for text in items {
                extend_education(&mut categories, text);
            }
        }
        FieldShape::Normalized(elements) => {
            for (index, element) in elements.into_iter().enumerate() {
                match element {
                    Element::Text(text) => extend_education(&mut categories, text),
                    Element::Object(obj) if obj.get("entries").is_some() => {
                        let category: EducationCategory = parse_entry(FIELD, index, obj)?;
                        let name = education_category_name(&category.category);
                        for entry in category.entries {
                            push_education(&mut categories, &name, tidy_education(entry));
                        }
                    }
                    Element::Object(obj) => {
                        let flat: FlatEducationEntry = parse_entry(FIELD, index, obj)?;
                        let name = education_category_name(&flat.category);
                        push_education(&mut categories, &name, tidy_education(flat.entry));
                    }
                }
            }
        }
    }
    Ok(categories)
}

// ────────────────────────────────────────────────────────────────────────────
// Experience, projects, certificates
// ────────────────────────────────────────────────────────────────────────────

/// Shared dispatch for fields whose text form is parsed by `from_text` and
/// whose object form deserializes straight into `T`.
fn read_entities<T>(
    field: &'static str,
    value: Option<&Value>,
    from_text: impl Fn(&str) -> Vec<T>,
    tidy: impl Fn(T) -> T,
) -> Result<Vec<T>, ShapeError>
where
    T: for<'de> Deserialize<'de>,
{
    let out = match classify(field, value)? {
        FieldShape::Absent => Vec::new(),
        FieldShape::LegacyString(text) => from_text(text),
        FieldShape::LegacyArray(items) => items.into_iter().flat_map(&from_text).collect(),
        FieldShape::Normalized(elements) => {
            let mut out = Vec::new();
            for (index, element) in elements.into_iter().enumerate() {
                match element {
                    Element::Text(text) => out.extend(from_text(text)),
                    Element::Object(obj) => out.push(tidy(parse_entry(field, index, obj)?)),
                }
            }
            out
        }
    };
    Ok(out)
}

/// Fields rendered on a single textarea line.
fn to_single_line(s: &mut String) {
    *s = single_line(s);
}

/// Free-text descriptions keep their lines but lose blank ones, which would
/// otherwise split the entry in two.
fn to_compact_lines(s: &mut String) {
    *s = compact_lines(s);
}

pub fn read_experience(value: Option<&Value>) -> Result<Vec<ExperienceEntry>, ShapeError> {
    read_entities("experience", value, normalize_experience, |mut e: ExperienceEntry| {
        to_single_line(&mut e.role);
        to_single_line(&mut e.company);
        to_single_line(&mut e.date);
        to_compact_lines(&mut e.description);
        e
    })
}

pub fn read_projects(value: Option<&Value>) -> Result<Vec<ProjectEntry>, ShapeError> {
    read_entities("projects", value, normalize_projects, |mut p: ProjectEntry| {
        to_single_line(&mut p.title);
        to_compact_lines(&mut p.description);
        p.technologies = p
            .technologies
            .iter()
            .flat_map(|t| skill_items(t))
            .collect();
        p
    })
}

pub fn read_certificates(value: Option<&Value>) -> Result<Vec<CertificateEntry>, ShapeError> {
    read_entities("certificates", value, normalize_certificates, |mut c: CertificateEntry| {
        to_single_line(&mut c.title);
        to_single_line(&mut c.issuer);
        to_single_line(&mut c.date);
        to_single_line(&mut c.link);
        c
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Whole profile
// ────────────────────────────────────────────────────────────────────────────

fn field<'a>(doc: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    doc.get(key)
}

/// Reads a profile document of any historical shape into the normalized
/// `Profile`. Missing fields default to empty values.
pub fn read_profile(doc: &Value) -> Result<Profile, ShapeError> {
    let Value::Object(doc) = doc else {
        return Err(ShapeError::NotAnObject {
            found: json_type_name(doc),
        });
    };

    Ok(Profile {
        name: read_scalar("name", field(doc, "name"))?,
        email: read_scalar("email", field(doc, "email"))?,
        phone: read_scalar("phone", field(doc, "phone"))?,
        github: read_scalar("github", field(doc, "github"))?,
        linkedin: read_scalar("linkedin", field(doc, "linkedin"))?,
        resume: read_scalar("resume", field(doc, "resume"))?,
        summary: read_scalar("summary", field(doc, "summary"))?,
        skills: read_skills(field(doc, "skills"))?,
        education: read_education(field(doc, "education"))?,
        experience: read_experience(field(doc, "experience"))?,
        projects: read_projects(field(doc, "projects"))?,
        certificates: read_certificates(field(doc, "certificates"))?,
        others: read_scalar("others", field(doc, "others"))?,
        selected_template: read_template(field(doc, "selectedTemplate"))?,
    })
}
