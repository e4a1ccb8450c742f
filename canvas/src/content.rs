//! Element kinds and their content payloads.
//!
//! Every placed element carries exactly one [`ElementContent`] variant, and the
//! variant *is* the element's kind, so a kind/content mismatch cannot be
//! represented. Payload fields use camelCase on the wire to match documents
//! written by the browser editor.
//!
//! This module also owns the two per-kind tables the editor needs: the
//! default content a palette drop starts from ([`ElementContent::default_for`])
//! and the validation rules a content edit must pass
//! ([`ElementContent::validate`]).

#[cfg(test)]
#[path = "content_test.rs"]
mod content_test;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

static EMAIL_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$"));

// =============================================================
// Kind
// =============================================================

/// The closed set of element variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Experience,
    Education,
    Skill,
    Contact,
    Header,
    Summary,
    Shape,
    Line,
    Divider,
    Projects,
    Certifications,
    Languages,
    References,
}

impl ElementKind {
    pub const ALL: [ElementKind; 15] = [
        ElementKind::Text,
        ElementKind::Image,
        ElementKind::Experience,
        ElementKind::Education,
        ElementKind::Skill,
        ElementKind::Contact,
        ElementKind::Header,
        ElementKind::Summary,
        ElementKind::Shape,
        ElementKind::Line,
        ElementKind::Divider,
        ElementKind::Projects,
        ElementKind::Certifications,
        ElementKind::Languages,
        ElementKind::References,
    ];

    /// Wire name, as used in the `type` field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Skill => "skill",
            Self::Contact => "contact",
            Self::Header => "header",
            Self::Summary => "summary",
            Self::Shape => "shape",
            Self::Line => "line",
            Self::Divider => "divider",
            Self::Projects => "projects",
            Self::Certifications => "certifications",
            Self::Languages => "languages",
            Self::References => "references",
        }
    }

    /// Parse a wire name. Returns `None` for kinds outside the closed set.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == raw)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================
// Errors
// =============================================================

/// Why a content payload was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContentError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: &'static str, min: f64, max: f64 },
    #[error("{field} is not a valid {expected}")]
    Invalid { field: &'static str, expected: &'static str },
    #[error("at least one {item} is required")]
    Empty { item: &'static str },
    #[error("cannot replace {expected} content with {found} content")]
    KindMismatch { expected: ElementKind, found: ElementKind },
    #[error("unknown element kind: {0}")]
    UnknownKind(String),
    #[error("malformed {kind} content: {message}")]
    Malformed { kind: ElementKind, message: String },
}

// =============================================================
// Shared enums
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    #[default]
    Triangle,
    Circle,
    Square,
    Diamond,
    Star,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerStyle {
    #[default]
    Line,
    Dots,
    Dashes,
    Thick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Native,
}

const ACCENT: &str = "#10b981";

// =============================================================
// Payloads
// =============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextContent {
    pub text: String,
    pub font_size: f64,
    pub font_weight: FontWeight,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            text: "Your text here".into(),
            font_size: 16.0,
            font_weight: FontWeight::Normal,
            color: None,
            text_align: None,
            font_family: None,
            line_height: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageContent {
    pub src: String,
    pub alt: String,
    pub width: f64,
    pub height: f64,
    pub rounded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
}

impl Default for ImageContent {
    fn default() -> Self {
        Self {
            src: String::new(),
            alt: "Profile Image".into(),
            width: 150.0,
            height: 150.0,
            rounded: false,
            opacity: None,
            border_color: None,
            border_width: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceContent {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub current: bool,
}

impl Default for ExperienceContent {
    fn default() -> Self {
        Self {
            title: "Job Title".into(),
            company: "Company Name".into(),
            location: "Location".into(),
            start_date: "2020".into(),
            end_date: "2023".into(),
            description: "Job description here".into(),
            current: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationContent {
    pub degree: String,
    pub school: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

impl Default for EducationContent {
    fn default() -> Self {
        Self {
            degree: "Degree".into(),
            school: "School Name".into(),
            location: "Location".into(),
            start_date: "2018".into(),
            end_date: "2022".into(),
            description: "Education description".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillContent {
    pub skills: Vec<String>,
}

impl Default for SkillContent {
    fn default() -> Self {
        Self { skills: vec!["Skill 1".into(), "Skill 2".into(), "Skill 3".into()] }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactContent {
    pub phone: String,
    pub email: String,
    pub location: String,
    pub website: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderContent {
    pub name: String,
    pub title: String,
    pub font_size: f64,
    pub font_weight: FontWeight,
}

impl Default for HeaderContent {
    fn default() -> Self {
        Self {
            name: "Your Name".into(),
            title: "Professional Title".into(),
            font_size: 24.0,
            font_weight: FontWeight::Bold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryContent {
    pub text: String,
    pub font_size: f64,
    pub font_weight: FontWeight,
}

impl Default for SummaryContent {
    fn default() -> Self {
        Self { text: "Professional summary".into(), font_size: 14.0, font_weight: FontWeight::Normal }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeContent {
    #[serde(rename = "type")]
    pub shape: ShapeType,
    pub color: String,
    pub size: f64,
    pub rotation: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
}

impl Default for ShapeContent {
    fn default() -> Self {
        Self {
            shape: ShapeType::Triangle,
            color: ACCENT.into(),
            size: 50.0,
            rotation: 0.0,
            opacity: None,
            border_color: None,
            border_width: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineContent {
    pub style: LineStyle,
    pub color: String,
    pub thickness: f64,
    pub length: f64,
    pub angle: f64,
}

impl Default for LineContent {
    fn default() -> Self {
        Self { style: LineStyle::Solid, color: ACCENT.into(), thickness: 2.0, length: 100.0, angle: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerContent {
    pub style: DividerStyle,
    pub color: String,
    pub thickness: f64,
}

impl Default for DividerContent {
    fn default() -> Self {
        Self { style: DividerStyle::Line, color: ACCENT.into(), thickness: 2.0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectsContent {
    pub projects: Vec<Project>,
}

impl Default for ProjectsContent {
    fn default() -> Self {
        Self {
            projects: vec![Project {
                name: "Project Name".into(),
                description: "Project description".into(),
                technologies: vec!["Technology".into()],
            }],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationsContent {
    pub certifications: Vec<Certification>,
}

impl Default for CertificationsContent {
    fn default() -> Self {
        Self {
            certifications: vec![Certification {
                name: "Certification Name".into(),
                issuer: "Issuing Organization".into(),
                date: "2023".into(),
            }],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub name: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguagesContent {
    pub languages: Vec<Language>,
}

impl Default for LanguagesContent {
    fn default() -> Self {
        Self { languages: vec![Language { name: "English".into(), proficiency: Proficiency::Native }] }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reference {
    pub name: String,
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferencesContent {
    pub references: Vec<Reference>,
}

impl Default for ReferencesContent {
    fn default() -> Self {
        Self {
            references: vec![Reference {
                name: "Reference Name".into(),
                title: "Title".into(),
                company: "Company".into(),
                email: None,
                phone: None,
            }],
        }
    }
}

// =============================================================
// ElementContent
// =============================================================

/// Kind-tagged content payload of an element.
///
/// Serializes as the bare payload object; the kind travels separately in the
/// element's `type` field (see [`crate::doc::Element`]).
///
/// Decoding normalizes rather than preserves. Missing payload fields take the
/// kind's defaults and unknown keys are dropped, so `{"text":"x"}` comes back
/// with `fontSize: 16`. A load then save of a document written elsewhere
/// rewrites its payloads into this shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ElementContent {
    Text(TextContent),
    Image(ImageContent),
    Experience(ExperienceContent),
    Education(EducationContent),
    Skill(SkillContent),
    Contact(ContactContent),
    Header(HeaderContent),
    Summary(SummaryContent),
    Shape(ShapeContent),
    Line(LineContent),
    Divider(DividerContent),
    Projects(ProjectsContent),
    Certifications(CertificationsContent),
    Languages(LanguagesContent),
    References(ReferencesContent),
}

impl ElementContent {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Text(_) => ElementKind::Text,
            Self::Image(_) => ElementKind::Image,
            Self::Experience(_) => ElementKind::Experience,
            Self::Education(_) => ElementKind::Education,
            Self::Skill(_) => ElementKind::Skill,
            Self::Contact(_) => ElementKind::Contact,
            Self::Header(_) => ElementKind::Header,
            Self::Summary(_) => ElementKind::Summary,
            Self::Shape(_) => ElementKind::Shape,
            Self::Line(_) => ElementKind::Line,
            Self::Divider(_) => ElementKind::Divider,
            Self::Projects(_) => ElementKind::Projects,
            Self::Certifications(_) => ElementKind::Certifications,
            Self::Languages(_) => ElementKind::Languages,
            Self::References(_) => ElementKind::References,
        }
    }

    /// Content a freshly placed element of `kind` starts with.
    #[must_use]
    pub fn default_for(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Text => Self::Text(TextContent::default()),
            ElementKind::Image => Self::Image(ImageContent::default()),
            ElementKind::Experience => Self::Experience(ExperienceContent::default()),
            ElementKind::Education => Self::Education(EducationContent::default()),
            ElementKind::Skill => Self::Skill(SkillContent::default()),
            ElementKind::Contact => Self::Contact(ContactContent::default()),
            ElementKind::Header => Self::Header(HeaderContent::default()),
            ElementKind::Summary => Self::Summary(SummaryContent::default()),
            ElementKind::Shape => Self::Shape(ShapeContent::default()),
            ElementKind::Line => Self::Line(LineContent::default()),
            ElementKind::Divider => Self::Divider(DividerContent::default()),
            ElementKind::Projects => Self::Projects(ProjectsContent::default()),
            ElementKind::Certifications => Self::Certifications(CertificationsContent::default()),
            ElementKind::Languages => Self::Languages(LanguagesContent::default()),
            ElementKind::References => Self::References(ReferencesContent::default()),
        }
    }

    /// Decode a raw JSON payload for `kind`. A `null` payload yields the default content.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Malformed`] if the payload does not fit the kind's shape.
    pub fn from_value(kind: ElementKind, value: serde_json::Value) -> Result<Self, ContentError> {
        if value.is_null() {
            return Ok(Self::default_for(kind));
        }
        let content = match kind {
            ElementKind::Text => Self::Text(decode(kind, value)?),
            ElementKind::Image => Self::Image(decode(kind, value)?),
            ElementKind::Experience => Self::Experience(decode(kind, value)?),
            ElementKind::Education => Self::Education(decode(kind, value)?),
            ElementKind::Skill => Self::Skill(decode(kind, value)?),
            ElementKind::Contact => Self::Contact(decode(kind, value)?),
            ElementKind::Header => Self::Header(decode(kind, value)?),
            ElementKind::Summary => Self::Summary(decode(kind, value)?),
            ElementKind::Shape => Self::Shape(decode(kind, value)?),
            ElementKind::Line => Self::Line(decode(kind, value)?),
            ElementKind::Divider => Self::Divider(decode(kind, value)?),
            ElementKind::Projects => Self::Projects(decode(kind, value)?),
            ElementKind::Certifications => Self::Certifications(decode(kind, value)?),
            ElementKind::Languages => Self::Languages(decode(kind, value)?),
            ElementKind::References => Self::References(decode(kind, value)?),
        };
        Ok(content)
    }

    /// Check the per-kind editor rules.
    ///
    /// # Errors
    ///
    /// Returns the first rule the content breaks.
    pub fn validate(&self) -> Result<(), ContentError> {
        match self {
            Self::Text(c) => {
                required("text", &c.text)?;
                in_range("font size", c.font_size, 8.0, 72.0)?;
                optional_in_range("line height", c.line_height, 0.5, 3.0)
            }
            Self::Summary(c) => {
                required("summary text", &c.text)?;
                in_range("font size", c.font_size, 8.0, 72.0)
            }
            Self::Header(c) => {
                required("name", &c.name)?;
                required("title", &c.title)?;
                in_range("font size", c.font_size, 8.0, 72.0)
            }
            Self::Image(c) => {
                if !is_http_url(&c.src) && !c.src.starts_with("data:") {
                    return if c.src.trim().is_empty() {
                        Err(ContentError::Required { field: "image URL" })
                    } else {
                        Err(ContentError::Invalid { field: "image URL", expected: "URL" })
                    };
                }
                required("alt text", &c.alt)?;
                optional_in_range("opacity", c.opacity, 0.0, 1.0)?;
                optional_in_range("border width", c.border_width, 0.0, 10.0)
            }
            Self::Experience(c) => {
                required("title", &c.title)?;
                required("company", &c.company)?;
                required("location", &c.location)?;
                required("start date", &c.start_date)?;
                if !c.current {
                    required("end date", &c.end_date)?;
                }
                required("description", &c.description)
            }
            Self::Education(c) => {
                required("degree", &c.degree)?;
                required("school", &c.school)?;
                required("location", &c.location)?;
                required("start date", &c.start_date)?;
                required("end date", &c.end_date)?;
                required("description", &c.description)
            }
            Self::Contact(c) => validate_contact(c),
            Self::Skill(c) => {
                if c.skills.iter().any(|s| !s.trim().is_empty()) {
                    Ok(())
                } else {
                    Err(ContentError::Empty { item: "skill" })
                }
            }
            Self::Shape(c) => {
                required("color", &c.color)?;
                in_range("rotation", c.rotation, 0.0, 360.0)?;
                optional_in_range("opacity", c.opacity, 0.0, 1.0)?;
                optional_in_range("border width", c.border_width, 0.0, 10.0)
            }
            Self::Line(c) => {
                required("color", &c.color)?;
                in_range("thickness", c.thickness, 1.0, 20.0)?;
                in_range("angle", c.angle, 0.0, 360.0)
            }
            Self::Divider(c) => {
                required("color", &c.color)?;
                in_range("thickness", c.thickness, 1.0, 20.0)
            }
            Self::Projects(c) => {
                non_empty("project", &c.projects)?;
                c.projects.iter().try_for_each(|p| {
                    required("project name", &p.name)?;
                    required("project description", &p.description)
                })
            }
            Self::Certifications(c) => {
                non_empty("certification", &c.certifications)?;
                c.certifications.iter().try_for_each(|cert| {
                    required("certification name", &cert.name)?;
                    required("issuer", &cert.issuer)?;
                    required("date", &cert.date)
                })
            }
            Self::Languages(c) => {
                non_empty("language", &c.languages)?;
                c.languages.iter().try_for_each(|l| required("language name", &l.name))
            }
            Self::References(c) => {
                non_empty("reference", &c.references)?;
                c.references.iter().try_for_each(|r| {
                    required("reference name", &r.name)?;
                    required("reference title", &r.title)?;
                    required("reference company", &r.company)
                })
            }
        }
    }
}

fn decode<T: DeserializeOwned>(kind: ElementKind, value: serde_json::Value) -> Result<T, ContentError> {
    serde_json::from_value(value).map_err(|e| ContentError::Malformed { kind, message: e.to_string() })
}

fn validate_contact(c: &ContactContent) -> Result<(), ContentError> {
    required("phone", &c.phone)?;
    required("email", &c.email)?;
    if !is_email(&c.email) {
        return Err(ContentError::Invalid { field: "email", expected: "email address" });
    }
    required("location", &c.location)?;

    let links = [
        ("website", Some(c.website.as_str())),
        ("linkedin", c.linkedin.as_deref()),
        ("github", c.github.as_deref()),
        ("portfolio", c.portfolio.as_deref()),
    ];
    for (field, value) in links {
        if let Some(url) = value.filter(|v| !v.trim().is_empty())
            && !is_http_url(url)
        {
            return Err(ContentError::Invalid { field, expected: "URL" });
        }
    }
    Ok(())
}

fn required(field: &'static str, value: &str) -> Result<(), ContentError> {
    if value.trim().is_empty() {
        return Err(ContentError::Required { field });
    }
    Ok(())
}

fn non_empty<T>(item: &'static str, items: &[T]) -> Result<(), ContentError> {
    if items.is_empty() {
        return Err(ContentError::Empty { item });
    }
    Ok(())
}

fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ContentError> {
    if !(min..=max).contains(&value) {
        return Err(ContentError::OutOfRange { field, min, max });
    }
    Ok(())
}

fn optional_in_range(field: &'static str, value: Option<f64>, min: f64, max: f64) -> Result<(), ContentError> {
    value.map_or(Ok(()), |v| in_range(field, v, min, max))
}

/// Parses as an absolute `http`/`https` URL with a host.
fn is_http_url(raw: &str) -> bool {
    Url::parse(raw.trim()).is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
}

fn is_email(raw: &str) -> bool {
    EMAIL_RE.as_ref().is_ok_and(|re| re.is_match(raw))
}
