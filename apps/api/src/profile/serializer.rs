//! Structured profile fields back to editable textarea text.
//!
//! Output uses exactly the grammar the normalizer accepts, so
//! `normalize(serialize(x)) == x` holds for anything the reader produced,
//! as long as field values contain no `|`, category names contain no `:`
//! and skill items contain no `,`.

use crate::profile::entities::split_title;
use crate::profile::models::{
    CertificateEntry, EducationCategory, EducationEntry, ExperienceEntry, ProjectEntry,
    SkillGroup,
};
use crate::profile::tokenizer::single_line;

/// One `Category: a, b, c` line per group.
pub fn skills_to_text(groups: &[SkillGroup]) -> String {
    groups
        .iter()
        .map(|g| format!("{}: {}", g.category, g.items.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn education_row(entry: &EducationEntry) -> String {
    [
        &entry.degree,
        &entry.institution,
        &entry.date,
        &entry.description,
    ]
    .map(|field| single_line(field))
    .join(" | ")
}

/// `Category: first row` followed by one continuation row per further entry.
/// A continuation row holding `:` would declare a category of its own, so it
/// repeats the category prefix and the grouper folds it back in.
pub fn education_to_text(categories: &[EducationCategory]) -> String {
    let mut lines = Vec::new();
    for category in categories {
        let mut rows = category.entries.iter().map(education_row);
        let Some(first) = rows.next() else {
            continue;
        };
        lines.push(format!("{}: {}", category.category, first));
        lines.extend(rows.map(|row| {
            if row.contains(':') {
                format!("{}: {}", category.category, row)
            } else {
                row
            }
        }));
    }
    lines.join("\n")
}

/// Multi-line descriptions, descriptions containing `|`, and projects with
/// technologies do not fit a single pipe row.
fn needs_block_form(project: &ProjectEntry) -> bool {
    !project.technologies.is_empty()
        || project.description.contains('\n')
        || project.description.contains('|')
}

fn project_row(n: usize, p: &ProjectEntry) -> String {
    format!(
        "Project {n}: {} | {} | {} | {}",
        p.title,
        p.description,
        p.github.as_deref().unwrap_or(""),
        p.demo.as_deref().unwrap_or("")
    )
}

fn project_block(n: usize, p: &ProjectEntry) -> String {
    let mut lines = vec![format!("Project {n}: {}", p.title)];
    if !p.description.is_empty() {
        lines.push(p.description.clone());
    }
    if let Some(github) = &p.github {
        lines.push(format!("GitHub: {github}"));
    }
    if let Some(demo) = &p.demo {
        lines.push(format!("Demo: {demo}"));
    }
    if !p.technologies.is_empty() {
        lines.push(format!("Technologies: {}", p.technologies.join(", ")));
    }
    lines.join("\n")
}

pub fn projects_to_text(projects: &[ProjectEntry]) -> String {
    let any_block = projects.iter().any(needs_block_form);
    let rendered: Vec<String> = projects
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if needs_block_form(p) {
                project_block(i + 1, p)
            } else {
                project_row(i + 1, p)
            }
        })
        .collect();
    rendered.join(if any_block { "\n\n" } else { "\n" })
}

pub fn certificates_to_text(certificates: &[CertificateEntry]) -> String {
    certificates
        .iter()
        .map(|c| [c.title.as_str(), &c.issuer, &c.date, &c.link].join(" | "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `Role at Company` when that reads back to the same pair, otherwise the
/// literal `Role | Company` form.
fn experience_title(e: &ExperienceEntry) -> String {
    let natural = match (e.role.is_empty(), e.company.is_empty()) {
        (false, false) => format!("{} at {}", e.role, e.company),
        (false, true) => e.role.clone(),
        (true, false) => format!("at {}", e.company),
        (true, true) => String::new(),
    };
    let (role, company) = split_title(&natural);
    if !natural.is_empty() && role == e.role && company == e.company {
        natural
    } else {
        format!("{} | {}", e.role, e.company).trim().to_string()
    }
}

/// Blank-line separated blocks of title, date and description lines.
pub fn experience_to_text(entries: &[ExperienceEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            let mut lines = vec![experience_title(e), e.date.clone()];
            if !e.description.is_empty() {
                lines.push(e.description.clone());
            }
            lines.join("\n").trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::entities::{normalize_certificates, normalize_experience, normalize_projects};
    use crate::profile::grouping::{group_education, group_skills};
    use crate::profile::reader::{read_education, read_experience, read_projects};
    use serde_json::json;

    fn edu(degree: &str, institution: &str, date: &str, description: &str) -> EducationEntry {
        EducationEntry {
            degree: degree.into(),
            institution: institution.into(),
            date: date.into(),
            description: description.into(),
        }
    }

    fn sample_education() -> Vec<EducationCategory> {
        vec![
            EducationCategory {
                category: "Degrees".into(),
                entries: vec![
                    edu("BSc Computer Science", "Stanford University", "2018-2022", "Graduated with honors"),
                    edu("MSc Computer Science", "MIT", "2022-2024", ""),
                ],
            },
            EducationCategory {
                category: "Courses".into(),
                entries: vec![edu("Machine Learning", "Coursera", "", "")],
            },
        ]
    }

    #[test]
    fn test_skills_text_format() {
        let text = skills_to_text(&[
            SkillGroup {
                category: "Languages".into(),
                items: vec!["Rust".into(), "Go".into()],
            },
            SkillGroup {
                category: "Tools".into(),
                items: vec!["Git".into()],
            },
        ]);
        assert_eq!(text, "Languages: Rust, Go\nTools: Git");
    }

    #[test]
    fn test_skills_round_trip() {
        let groups = vec![
            SkillGroup {
                category: "Languages".into(),
                items: vec!["JavaScript".into(), "C++".into(), "Node.js".into()],
            },
            SkillGroup {
                category: "Other Skills".into(),
                items: vec!["Public speaking".into()],
            },
        ];
        assert_eq!(group_skills(&skills_to_text(&groups)), groups);
    }

    #[test]
    fn test_education_text_format() {
        let text = education_to_text(&sample_education());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Degrees: BSc Computer Science | Stanford University | 2018-2022 | Graduated with honors"
        );
        assert_eq!(lines[1], "MSc Computer Science | MIT | 2022-2024 | ");
        assert!(lines[2].starts_with("Courses: Machine Learning | Coursera"));
    }

    #[test]
    fn test_education_round_trip() {
        let categories = sample_education();
        assert_eq!(group_education(&education_to_text(&categories)), categories);
    }

    #[test]
    fn test_education_round_trip_with_colon_in_first_row() {
        let categories = vec![EducationCategory {
            category: "Degrees".into(),
            entries: vec![edu("PhD", "ETH", "2020", "Thesis: distributed systems")],
        }];
        assert_eq!(group_education(&education_to_text(&categories)), categories);
    }

    #[test]
    fn test_education_continuation_row_with_colon_repeats_category() {
        let categories = vec![EducationCategory {
            category: "Degrees".into(),
            entries: vec![
                edu("BSc", "MIT", "2018", ""),
                edu("PhD", "ETH", "2020", "Thesis: distributed systems"),
            ],
        }];
        let text = education_to_text(&categories);
        assert_eq!(text.lines().nth(1), Some("Degrees: PhD | ETH | 2020 | Thesis: distributed systems"));
        assert_eq!(group_education(&text), categories);
    }

    #[test]
    fn test_education_multiline_field_stays_on_one_row() {
        let text = education_to_text(&[EducationCategory {
            category: "Degrees".into(),
            entries: vec![edu("BSc", "MIT", "2018", "Honors\nDean's list")],
        }]);
        assert_eq!(text, "Degrees: BSc | MIT | 2018 | Honors Dean's list");
    }

    #[test]
    fn test_empty_education_category_is_skipped() {
        let text = education_to_text(&[EducationCategory {
            category: "Degrees".into(),
            entries: vec![],
        }]);
        assert_eq!(text, "");
    }

    #[test]
    fn test_legacy_education_block_round_trips_after_read() {
        let categories = read_education(Some(&json!(
            "BTech CSE\n2018 - 2022\nIIT Delhi\nCGPA 9.1\nDean's list"
        )))
        .unwrap();
        assert_eq!(categories[0].entries.len(), 1);
        assert_eq!(categories[0].entries[0].description, "CGPA 9.1 Dean's list");
        assert_eq!(group_education(&education_to_text(&categories)), categories);
    }

    #[test]
    fn test_flat_education_round_trips_after_read() {
        let categories = read_education(Some(&json!([
            {"category": "Degrees", "degree": "MSc"},
            {"category": "Degrees", "degree": "PhD", "description": "Thesis\nGPA: 3.9"}
        ])))
        .unwrap();
        assert_eq!(
            categories,
            vec![EducationCategory {
                category: "Degrees".into(),
                entries: vec![edu("MSc", "", "", ""), edu("PhD", "", "", "Thesis GPA: 3.9")],
            }]
        );
        assert_eq!(group_education(&education_to_text(&categories)), categories);
    }

    #[test]
    fn test_projects_round_trip_with_numbered_description() {
        let projects = read_projects(Some(&json!([
            {"title": "Chat", "description": "Features:\n1. Rooms\n\n2. DMs"},
            {"title": "Blog", "description": "A blog", "github": "https://github.com/u/blog"}
        ])))
        .unwrap();
        assert_eq!(projects[0].description, "Features:\n1. Rooms\n2. DMs");
        let text = projects_to_text(&projects);
        assert_eq!(normalize_projects(&text), projects);
    }

    #[test]
    fn test_experience_round_trip_with_literal_titles() {
        let entries = vec![
            ExperienceEntry {
                role: "Intern - Backend".into(),
                company: String::new(),
                date: "2019".into(),
                description: String::new(),
            },
            ExperienceEntry {
                role: String::new(),
                company: "Acme".into(),
                date: "2020".into(),
                description: "Contract work".into(),
            },
            ExperienceEntry {
                role: String::new(),
                company: String::new(),
                date: "2021".into(),
                description: "Volunteering".into(),
            },
        ];
        let text = experience_to_text(&entries);
        assert!(text.starts_with("Intern - Backend |\n2019"));
        assert_eq!(normalize_experience(&text), entries);
    }

    #[test]
    fn test_experience_round_trips_after_read() {
        let entries = read_experience(Some(&json!([
            {"role": "Engineer", "company": "Acme - Labs", "date": "2020", "description": "Built\n\nShipped"}
        ])))
        .unwrap();
        assert_eq!(normalize_experience(&experience_to_text(&entries)), entries);
    }

    #[test]
    fn test_projects_round_trip_rows() {
        let projects = vec![
            ProjectEntry {
                title: "Blog".into(),
                description: "A blog".into(),
                github: None,
                demo: Some("https://demo.com".into()),
                technologies: vec![],
            },
            ProjectEntry {
                title: "Tasks".into(),
                description: String::new(),
                github: Some("https://github.com/u/tasks".into()),
                demo: None,
                technologies: vec![],
            },
        ];
        let text = projects_to_text(&projects);
        assert!(text.starts_with("Project 1: Blog | A blog |  | https://demo.com"));
        assert_eq!(normalize_projects(&text), projects);
    }

    #[test]
    fn test_projects_round_trip_with_technologies() {
        let projects = vec![
            ProjectEntry {
                title: "Chat".into(),
                description: "Realtime chat\nWith rooms".into(),
                github: Some("https://github.com/u/chat".into()),
                demo: Some("https://chat.app".into()),
                technologies: vec!["React".into(), "Socket.io".into()],
            },
            ProjectEntry {
                title: "Blog".into(),
                description: "A blog".into(),
                github: None,
                demo: None,
                technologies: vec![],
            },
        ];
        assert_eq!(normalize_projects(&projects_to_text(&projects)), projects);
    }

    #[test]
    fn test_certificates_round_trip() {
        let certs = vec![CertificateEntry {
            title: "CKA".into(),
            issuer: "CNCF".into(),
            date: "2024".into(),
            link: "https://cncf.io/c/1".into(),
        }];
        assert_eq!(normalize_certificates(&certificates_to_text(&certs)), certs);
    }

    #[test]
    fn test_experience_round_trip() {
        let entries = vec![
            ExperienceEntry {
                role: "Backend Engineer".into(),
                company: "Acme".into(),
                date: "2021 - Present".into(),
                description: "Built APIs\nOwned on-call".into(),
            },
            ExperienceEntry {
                role: "Freelancer".into(),
                company: String::new(),
                date: "2019".into(),
                description: String::new(),
            },
        ];
        assert_eq!(normalize_experience(&experience_to_text(&entries)), entries);
    }

    #[test]
    fn test_empty_inputs_serialize_to_empty_text() {
        assert_eq!(skills_to_text(&[]), "");
        assert_eq!(education_to_text(&[]), "");
        assert_eq!(projects_to_text(&[]), "");
        assert_eq!(experience_to_text(&[]), "");
    }
}
