use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit JSON `null` the same as a missing key.
/// Historical documents carry `null` wherever a field was never filled in.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_empty_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Links are either a non-empty string or absent. Renderers show a link
/// button only when the value is `Some`.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty_list")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub degree: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub institution: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationCategory {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty_list")]
    pub entries: Vec<EducationEntry>,
}

/// An education object stored without a surrounding category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlatEducationEntry {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(flatten)]
    pub entry: EducationEntry,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub github: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub demo: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty_list")]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificateEntry {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub issuer: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
}

/// Portfolio renderer chosen by the user. Unknown ids fall back to the
/// minimal template, which is also what records saved before template
/// selection existed (`"default"`) resolve to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Template {
    #[default]
    #[serde(rename = "Template1")]
    Minimal,
    #[serde(rename = "Template2")]
    SidebarClassic,
    #[serde(rename = "Template3")]
    CardPortfolio,
    #[serde(rename = "TemplateModern")]
    DynamicInteractive,
    #[serde(rename = "PortfolioModern")]
    AdvancedPortfolio,
}

impl Template {
    pub fn id(&self) -> &'static str {
        match self {
            Template::Minimal => "Template1",
            Template::SidebarClassic => "Template2",
            Template::CardPortfolio => "Template3",
            Template::DynamicInteractive => "TemplateModern",
            Template::AdvancedPortfolio => "PortfolioModern",
        }
    }

    pub fn from_id(id: &str) -> Self {
        match id.trim() {
            "Template2" => Template::SidebarClassic,
            "Template3" => Template::CardPortfolio,
            "TemplateModern" => Template::DynamicInteractive,
            "PortfolioModern" => Template::AdvancedPortfolio,
            _ => Template::Minimal,
        }
    }
}

impl From<String> for Template {
    fn from(id: String) -> Self {
        Template::from_id(&id)
    }
}

/// The canonical, normalized profile. This is the only shape handed to
/// renderers and the only shape written to the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub github: String,
    pub linkedin: String,
    /// Download URL of the uploaded resume file.
    pub resume: String,
    pub summary: String,
    pub skills: Vec<SkillGroup>,
    pub education: Vec<EducationCategory>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certificates: Vec<CertificateEntry>,
    pub others: String,
    pub selected_template: Template,
}

/// Textarea view of a profile exchanged with the editing surface.
/// Derived on load, discarded on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub github: String,
    pub linkedin: String,
    pub resume: String,
    pub summary: String,
    pub skills: String,
    pub education: String,
    pub experience: String,
    pub projects: String,
    pub certificates: String,
    pub others: String,
    /// Absent when the form does not touch the template choice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_template: Option<Template>,
}
