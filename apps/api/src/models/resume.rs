//! The resume document: personal info plus eight repeatable or singleton sections.
//!
//! JSON keys are the human section names ("Personal Info", "Work Experience", ...)
//! so documents saved by earlier builder clients load unchanged. Every key is
//! optional on the way in; a missing section is simply empty.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ────────────────────────────────────────────────────────────────────────────
// Section names
// ────────────────────────────────────────────────────────────────────────────

/// The nine sections of a resume, in builder (wizard) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "Personal Info")]
    PersonalInfo,
    #[serde(rename = "Work Experience")]
    WorkExperience,
    Education,
    Skills,
    Languages,
    Certifications,
    Achievements,
    Projects,
    Summary,
}

impl Section {
    /// Wizard order. Independent of the display order used by the renderers.
    pub const ALL: [Section; 9] = [
        Section::PersonalInfo,
        Section::WorkExperience,
        Section::Education,
        Section::Skills,
        Section::Languages,
        Section::Certifications,
        Section::Achievements,
        Section::Projects,
        Section::Summary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::PersonalInfo => "Personal Info",
            Section::WorkExperience => "Work Experience",
            Section::Education => "Education",
            Section::Skills => "Skills",
            Section::Languages => "Languages",
            Section::Certifications => "Certifications",
            Section::Achievements => "Achievements",
            Section::Projects => "Projects",
            Section::Summary => "Summary",
        }
    }

    /// URL-friendly form used in route paths, e.g. `work-experience`.
    pub fn slug(self) -> &'static str {
        match self {
            Section::PersonalInfo => "personal-info",
            Section::WorkExperience => "work-experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Languages => "languages",
            Section::Certifications => "certifications",
            Section::Achievements => "achievements",
            Section::Projects => "projects",
            Section::Summary => "summary",
        }
    }

    /// Accepts either the display name or the slug.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        Section::ALL
            .into_iter()
            .find(|sec| sec.name() == s || sec.slug().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

/// A record whose text fields can be addressed by name from the builder forms.
pub trait EntryRecord: Default + Clone {
    /// Field names accepted by [`EntryRecord::field_mut`], in form order.
    const FIELDS: &'static [&'static str];

    fn field_mut(&mut self, field: &str) -> Option<&mut String>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub address: String,
    /// URL or data URI. Binary uploads are out of round-trip scope; anything
    /// that is not a non-empty string loads as "no photo".
    #[serde(
        deserialize_with = "photo_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo: Option<String>,
}

impl EntryRecord for PersonalInfo {
    const FIELDS: &'static [&'static str] =
        &["name", "title", "email", "phone", "linkedin", "address"];

    fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "name" => Some(&mut self.name),
            "title" => Some(&mut self.title),
            "email" => Some(&mut self.email),
            "phone" => Some(&mut self.phone),
            "linkedin" => Some(&mut self.linkedin),
            "address" => Some(&mut self.address),
            _ => None,
        }
    }
}

fn photo_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkExperience {
    pub company: String,
    pub role: String,
    pub start: String,
    pub end: String,
    pub description: String,
}

impl EntryRecord for WorkExperience {
    const FIELDS: &'static [&'static str] = &["company", "role", "start", "end", "description"];

    fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "company" => Some(&mut self.company),
            "role" => Some(&mut self.role),
            "start" => Some(&mut self.start),
            "end" => Some(&mut self.end),
            "description" => Some(&mut self.description),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub university: String,
    pub cgpa: String,
    pub start: String,
    pub end: String,
}

impl EntryRecord for Education {
    const FIELDS: &'static [&'static str] = &["degree", "university", "cgpa", "start", "end"];

    fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "degree" => Some(&mut self.degree),
            "university" => Some(&mut self.university),
            "cgpa" => Some(&mut self.cgpa),
            "start" => Some(&mut self.start),
            "end" => Some(&mut self.end),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub year: String,
}

impl EntryRecord for Certification {
    const FIELDS: &'static [&'static str] = &["name", "issuer", "year"];

    fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "name" => Some(&mut self.name),
            "issuer" => Some(&mut self.issuer),
            "year" => Some(&mut self.year),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub technologies: String,
    pub description: String,
    pub link: String,
}

impl EntryRecord for Project {
    const FIELDS: &'static [&'static str] = &["title", "technologies", "description", "link"];

    fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "title" => Some(&mut self.title),
            "technologies" => Some(&mut self.technologies),
            "description" => Some(&mut self.description),
            "link" => Some(&mut self.link),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tag lists
// ────────────────────────────────────────────────────────────────────────────

/// Ordered list of unique, non-empty, trimmed strings (Skills, Languages, Achievements).
///
/// Loading normalizes whatever was stored, so the invariant holds even for
/// hand-edited or legacy data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagList(Vec<String>);

impl TagList {
    /// Appends `raw` (trimmed) unless it is empty or already present.
    /// Returns true when the list changed. Comparison is case-sensitive.
    pub fn add(&mut self, raw: &str) -> bool {
        let tag = raw.trim();
        if tag.is_empty() || self.0.iter().any(|t| t == tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for TagList {
    fn from(raw: Vec<String>) -> Self {
        let mut list = TagList::default();
        for tag in raw {
            list.add(&tag);
        }
        list
    }
}

impl From<TagList> for Vec<String> {
    fn from(list: TagList) -> Self {
        list.0
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeDocument {
    #[serde(rename = "Personal Info")]
    pub personal_info: PersonalInfo,
    #[serde(rename = "Work Experience")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(rename = "Education")]
    pub education: Vec<Education>,
    #[serde(rename = "Skills")]
    pub skills: TagList,
    #[serde(rename = "Languages")]
    pub languages: TagList,
    #[serde(rename = "Certifications")]
    pub certifications: Vec<Certification>,
    #[serde(rename = "Achievements")]
    pub achievements: TagList,
    #[serde(rename = "Projects")]
    pub projects: Vec<Project>,
    #[serde(rename = "Summary")]
    pub summary: String,
}

impl ResumeDocument {
    /// Whether a section has nothing to show. Personal Info is never empty:
    /// the header renders even when every contact field is blank.
    pub fn is_section_empty(&self, section: Section) -> bool {
        match section {
            Section::PersonalInfo => false,
            Section::WorkExperience => self.work_experience.is_empty(),
            Section::Education => self.education.is_empty(),
            Section::Skills => self.skills.is_empty(),
            Section::Languages => self.languages.is_empty(),
            Section::Certifications => self.certifications.is_empty(),
            Section::Achievements => self.achievements.is_empty(),
            Section::Projects => self.projects.is_empty(),
            Section::Summary => self.summary.trim().is_empty(),
        }
    }

    pub fn tags_mut(&mut self, section: Section) -> Option<&mut TagList> {
        match section {
            Section::Skills => Some(&mut self.skills),
            Section::Languages => Some(&mut self.languages),
            Section::Achievements => Some(&mut self.achievements),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_keys_load_as_empty() {
        let doc: ResumeDocument = serde_json::from_value(json!({
            "Personal Info": { "name": "Ada" }
        }))
        .unwrap();
        assert_eq!(doc.personal_info.name, "Ada");
        assert_eq!(doc.personal_info.email, "");
        assert!(doc.work_experience.is_empty());
        assert!(doc.is_section_empty(Section::Skills));
        assert!(doc.is_section_empty(Section::Summary));
    }

    #[test]
    fn test_serialized_keys_are_section_names() {
        let value = serde_json::to_value(ResumeDocument::default()).unwrap();
        let obj = value.as_object().unwrap();
        for section in Section::ALL {
            assert!(obj.contains_key(section.name()), "missing {section}");
        }
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let mut doc = ResumeDocument::default();
        doc.personal_info.name = "Grace Hopper".to_string();
        doc.personal_info.photo = Some("https://example.com/me.png".to_string());
        doc.work_experience.push(WorkExperience {
            company: "Navy".to_string(),
            role: "Rear Admiral".to_string(),
            start: "1943".to_string(),
            end: "1986".to_string(),
            description: String::new(),
        });
        doc.skills.add("COBOL");
        doc.summary = "Compiler pioneer.".to_string();

        let raw = serde_json::to_string(&doc).unwrap();
        let back: ResumeDocument = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_non_string_photo_loads_as_none() {
        let doc: ResumeDocument = serde_json::from_value(json!({
            "Personal Info": { "name": "Ada", "photo": {} }
        }))
        .unwrap();
        assert_eq!(doc.personal_info.photo, None);
    }

    #[test]
    fn test_tag_add_trims_and_dedups() {
        let mut tags = TagList::default();
        assert!(tags.add("  Rust "));
        assert!(!tags.add("Rust"));
        assert!(!tags.add("   "));
        assert!(tags.add("rust"));
        assert_eq!(tags.as_slice(), ["Rust", "rust"]);
    }

    #[test]
    fn test_tag_add_preserves_order() {
        let mut tags = TagList::from(vec!["Go".to_string(), "Rust".to_string()]);
        tags.add("Zig");
        assert_eq!(tags.as_slice(), ["Go", "Rust", "Zig"]);
    }

    #[test]
    fn test_loaded_tags_are_normalized() {
        let doc: ResumeDocument = serde_json::from_value(json!({
            "Skills": ["Rust", " Rust ", "", "Go"]
        }))
        .unwrap();
        assert_eq!(doc.skills.as_slice(), ["Rust", "Go"]);
    }

    #[test]
    fn test_tag_remove_out_of_range() {
        let mut tags = TagList::from(vec!["A".to_string()]);
        assert_eq!(tags.remove(3), None);
        assert_eq!(tags.remove(0).as_deref(), Some("A"));
        assert!(tags.is_empty());
    }

    #[test]
    fn test_section_from_name_or_slug() {
        assert_eq!(Section::from_name("Work Experience"), Some(Section::WorkExperience));
        assert_eq!(Section::from_name("work-experience"), Some(Section::WorkExperience));
        assert_eq!(Section::from_name("Hobbies"), None);
    }

    #[test]
    fn test_personal_info_header_never_empty() {
        assert!(!ResumeDocument::default().is_section_empty(Section::PersonalInfo));
    }
}
