//! Pure edit operations behind the builder forms.
//!
//! `apply_patch` never touches the input document; it returns the edited copy
//! so callers can persist it (auto-save) and hand it back in one step.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::resume::{EntryRecord, PersonalInfo, ResumeDocument, Section};

/// One form interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SectionPatch {
    /// Personal Info field, including `photo` (empty clears it).
    SetField { field: String, value: String },
    /// Appends a blank record to a record list.
    AddEntry,
    UpdateEntry {
        index: usize,
        field: String,
        value: String,
    },
    RemoveEntry { index: usize },
    /// Adds a tag; duplicates (after trim) and blanks are ignored.
    AddTag { value: String },
    RemoveTag { index: usize },
    /// Replaces the Summary text.
    SetText { value: String },
}

impl SectionPatch {
    pub fn op(&self) -> &'static str {
        match self {
            SectionPatch::SetField { .. } => "set_field",
            SectionPatch::AddEntry => "add_entry",
            SectionPatch::UpdateEntry { .. } => "update_entry",
            SectionPatch::RemoveEntry { .. } => "remove_entry",
            SectionPatch::AddTag { .. } => "add_tag",
            SectionPatch::RemoveTag { .. } => "remove_tag",
            SectionPatch::SetText { .. } => "set_text",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("'{op}' does not apply to section '{section}'")]
    UnsupportedPatch { section: Section, op: &'static str },

    #[error("section '{section}' has no field '{field}'")]
    UnknownField { section: Section, field: String },

    #[error("section '{section}' has no entry {index} (len {len})")]
    IndexOutOfRange {
        section: Section,
        index: usize,
        len: usize,
    },
}

/// Applies `patch` to `section` of `document` and returns the new document.
pub fn apply_patch(
    document: &ResumeDocument,
    section: Section,
    patch: &SectionPatch,
) -> Result<ResumeDocument, EditError> {
    let mut next = document.clone();
    match section {
        Section::PersonalInfo => apply_to_personal_info(&mut next.personal_info, patch)?,
        Section::WorkExperience => apply_to_records(section, &mut next.work_experience, patch)?,
        Section::Education => apply_to_records(section, &mut next.education, patch)?,
        Section::Certifications => apply_to_records(section, &mut next.certifications, patch)?,
        Section::Projects => apply_to_records(section, &mut next.projects, patch)?,
        Section::Skills | Section::Languages | Section::Achievements => {
            let Some(tags) = next.tags_mut(section) else {
                return Err(unsupported(section, patch));
            };
            match patch {
                SectionPatch::AddTag { value } => {
                    tags.add(value);
                }
                SectionPatch::RemoveTag { index } => {
                    let len = tags.len();
                    tags.remove(*index).ok_or(EditError::IndexOutOfRange {
                        section,
                        index: *index,
                        len,
                    })?;
                }
                other => return Err(unsupported(section, other)),
            }
        }
        Section::Summary => match patch {
            SectionPatch::SetText { value } => next.summary = value.clone(),
            other => return Err(unsupported(section, other)),
        },
    }
    Ok(next)
}

fn unsupported(section: Section, patch: &SectionPatch) -> EditError {
    EditError::UnsupportedPatch {
        section,
        op: patch.op(),
    }
}

fn apply_to_personal_info(info: &mut PersonalInfo, patch: &SectionPatch) -> Result<(), EditError> {
    let SectionPatch::SetField { field, value } = patch else {
        return Err(unsupported(Section::PersonalInfo, patch));
    };
    if field == "photo" {
        info.photo = (!value.trim().is_empty()).then(|| value.clone());
        return Ok(());
    }
    let slot = info.field_mut(field).ok_or_else(|| EditError::UnknownField {
        section: Section::PersonalInfo,
        field: field.clone(),
    })?;
    *slot = value.clone();
    Ok(())
}

fn apply_to_records<R: EntryRecord>(
    section: Section,
    records: &mut Vec<R>,
    patch: &SectionPatch,
) -> Result<(), EditError> {
    let len = records.len();
    match patch {
        SectionPatch::AddEntry => records.push(R::default()),
        SectionPatch::UpdateEntry {
            index,
            field,
            value,
        } => {
            let record = records
                .get_mut(*index)
                .ok_or(EditError::IndexOutOfRange {
                    section,
                    index: *index,
                    len,
                })?;
            let slot = record
                .field_mut(field)
                .ok_or_else(|| EditError::UnknownField {
                    section,
                    field: field.clone(),
                })?;
            *slot = value.clone();
        }
        SectionPatch::RemoveEntry { index } => {
            if *index >= len {
                return Err(EditError::IndexOutOfRange {
                    section,
                    index: *index,
                    len,
                });
            }
            records.remove(*index);
        }
        other => return Err(unsupported(section, other)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(field: &str, value: &str) -> SectionPatch {
        SectionPatch::SetField {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_set_personal_field() {
        let doc = ResumeDocument::default();
        let next = apply_patch(&doc, Section::PersonalInfo, &set("email", "a@b.c")).unwrap();
        assert_eq!(next.personal_info.email, "a@b.c");
        assert_eq!(doc.personal_info.email, "", "input must not change");
    }

    #[test]
    fn test_photo_blank_clears() {
        let doc = apply_patch(
            &ResumeDocument::default(),
            Section::PersonalInfo,
            &set("photo", "data:image/png;base64,AAAA"),
        )
        .unwrap();
        assert!(doc.personal_info.photo.is_some());
        let doc = apply_patch(&doc, Section::PersonalInfo, &set("photo", "")).unwrap();
        assert_eq!(doc.personal_info.photo, None);
    }

    #[test]
    fn test_unknown_personal_field() {
        let err = apply_patch(&ResumeDocument::default(), Section::PersonalInfo, &set("age", "30"))
            .unwrap_err();
        assert!(matches!(err, EditError::UnknownField { .. }));
    }

    #[test]
    fn test_add_update_remove_entry() {
        let doc = ResumeDocument::default();
        let doc = apply_patch(&doc, Section::WorkExperience, &SectionPatch::AddEntry).unwrap();
        let doc = apply_patch(
            &doc,
            Section::WorkExperience,
            &SectionPatch::UpdateEntry {
                index: 0,
                field: "company".to_string(),
                value: "Initech".to_string(),
            },
        )
        .unwrap();
        assert_eq!(doc.work_experience[0].company, "Initech");
        assert_eq!(doc.work_experience[0].role, "");

        let doc = apply_patch(
            &doc,
            Section::WorkExperience,
            &SectionPatch::RemoveEntry { index: 0 },
        )
        .unwrap();
        assert!(doc.work_experience.is_empty());
    }

    #[test]
    fn test_update_out_of_range() {
        let err = apply_patch(
            &ResumeDocument::default(),
            Section::Projects,
            &SectionPatch::UpdateEntry {
                index: 2,
                field: "title".to_string(),
                value: "x".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            EditError::IndexOutOfRange {
                section: Section::Projects,
                index: 2,
                len: 0
            }
        );
    }

    #[test]
    fn test_add_tag_is_noop_for_duplicate() {
        let doc = apply_patch(
            &ResumeDocument::default(),
            Section::Skills,
            &SectionPatch::AddTag {
                value: "Rust".to_string(),
            },
        )
        .unwrap();
        let again = apply_patch(
            &doc,
            Section::Skills,
            &SectionPatch::AddTag {
                value: " Rust ".to_string(),
            },
        )
        .unwrap();
        assert_eq!(again, doc);
    }

    #[test]
    fn test_tag_patch_on_record_section_is_rejected() {
        let err = apply_patch(
            &ResumeDocument::default(),
            Section::Education,
            &SectionPatch::AddTag {
                value: "x".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            EditError::UnsupportedPatch {
                section: Section::Education,
                op: "add_tag"
            }
        );
    }

    #[test]
    fn test_set_summary() {
        let doc = apply_patch(
            &ResumeDocument::default(),
            Section::Summary,
            &SectionPatch::SetText {
                value: "Builder of things.".to_string(),
            },
        )
        .unwrap();
        assert_eq!(doc.summary, "Builder of things.");
    }

    #[test]
    fn test_patch_wire_format() {
        let patch: SectionPatch = serde_json::from_value(json!({
            "op": "update_entry", "index": 1, "field": "cgpa", "value": "3.9"
        }))
        .unwrap();
        assert_eq!(patch.op(), "update_entry");
        let patch: SectionPatch = serde_json::from_value(json!({ "op": "add_entry" })).unwrap();
        assert_eq!(patch, SectionPatch::AddEntry);
    }
}
