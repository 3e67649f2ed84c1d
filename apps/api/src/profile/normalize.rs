//! Save and load paths between the textarea form and the normalized profile.

use serde_json::Value;
use tracing::debug;

use crate::profile::entities::{normalize_certificates, normalize_experience, normalize_projects};
use crate::profile::grouping::{group_education, group_skills};
use crate::profile::models::{Profile, ProfileForm, Template};
use crate::profile::reader::{read_profile, ShapeError};
use crate::profile::serializer::{
    certificates_to_text, education_to_text, experience_to_text, projects_to_text,
    skills_to_text,
};

impl ProfileForm {
    /// Save path: parses every textarea into its canonical structure.
    /// `current_template` is kept when the form does not choose one.
    pub fn normalize(&self, current_template: Template) -> Profile {
        let profile = Profile {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            github: self.github.trim().to_string(),
            linkedin: self.linkedin.trim().to_string(),
            resume: self.resume.trim().to_string(),
            summary: self.summary.clone(),
            skills: group_skills(&self.skills),
            education: group_education(&self.education),
            experience: normalize_experience(&self.experience),
            projects: normalize_projects(&self.projects),
            certificates: normalize_certificates(&self.certificates),
            others: self.others.clone(),
            selected_template: self.selected_template.unwrap_or(current_template),
        };
        debug!(
            skills = profile.skills.len(),
            education = profile.education.len(),
            experience = profile.experience.len(),
            projects = profile.projects.len(),
            certificates = profile.certificates.len(),
            "normalized profile form"
        );
        profile
    }

    /// Load path: renders a normalized profile back into editable text.
    pub fn from_profile(profile: &Profile) -> Self {
        ProfileForm {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            github: profile.github.clone(),
            linkedin: profile.linkedin.clone(),
            resume: profile.resume.clone(),
            summary: profile.summary.clone(),
            skills: skills_to_text(&profile.skills),
            education: education_to_text(&profile.education),
            experience: experience_to_text(&profile.experience),
            projects: projects_to_text(&profile.projects),
            certificates: certificates_to_text(&profile.certificates),
            others: profile.others.clone(),
            selected_template: Some(profile.selected_template),
        }
    }
}

/// Builds the editing view for a document of any historical shape, e.g. the
/// output of the resume parser or a record saved before normalization.
pub fn form_from_document(doc: &Value) -> Result<ProfileForm, ShapeError> {
    read_profile(doc).map(|profile| ProfileForm::from_profile(&profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_form() -> ProfileForm {
        ProfileForm {
            name: "  Grace Hopper ".into(),
            email: "grace@example.com".into(),
            skills: "Languages: COBOL, Fortran\nTools: UNIVAC".into(),
            education: "Degrees: PhD Mathematics | Yale | 1934 | \nMA Mathematics | Yale | 1930"
                .into(),
            experience: "Rear Admiral at US Navy\n1943 - 1986\nLed compiler work".into(),
            projects: "Project 1: FLOW-MATIC | First English-like language | | https://example.org/flow"
                .into(),
            certificates: "Computer Sciences Man of the Year | DPMA | 1969 |".into(),
            others: "Grace Murray Hopper Award".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_form() {
        let profile = sample_form().normalize(Template::AdvancedPortfolio);
        assert_eq!(profile.name, "Grace Hopper");
        assert_eq!(profile.skills.len(), 2);
        assert_eq!(profile.education[0].entries.len(), 2);
        assert_eq!(profile.experience[0].company, "US Navy");
        assert_eq!(profile.projects[0].github, None);
        assert_eq!(profile.certificates[0].issuer, "DPMA");
        assert_eq!(profile.selected_template, Template::AdvancedPortfolio);
    }

    #[test]
    fn test_form_template_overrides_current() {
        let form = ProfileForm {
            selected_template: Some(Template::CardPortfolio),
            ..Default::default()
        };
        assert_eq!(form.normalize(Template::Minimal).selected_template, Template::CardPortfolio);
    }

    #[test]
    fn test_profile_survives_form_cycle() {
        let profile = sample_form().normalize(Template::Minimal);
        let again = ProfileForm::from_profile(&profile).normalize(Template::SidebarClassic);
        assert_eq!(again, profile);
    }

    #[test]
    fn test_empty_form_yields_empty_profile() {
        let profile = ProfileForm::default().normalize(Template::default());
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn test_form_from_parser_output() {
        let doc = json!({
            "name": "Linus Torvalds",
            "skills": ["C", "Git"],
            "education": "MSc Computer Science\nUniversity of Helsinki\n1996",
            "experience": "",
            "others": ""
        });
        let form = form_from_document(&doc).unwrap();
        assert_eq!(form.skills, "Other Skills: C, Git");
        assert_eq!(
            form.education,
            "Education: MSc Computer Science | University of Helsinki | 1996 | "
        );
        assert_eq!(form.projects, "");
    }

    #[test]
    fn test_form_from_document_rejects_bad_types() {
        assert!(form_from_document(&json!({"skills": true})).is_err());
    }
}
