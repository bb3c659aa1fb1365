//! Section registry: for every section, the shape its editor works on and the
//! renderer that turns it into a display block.
//!
//! Keyed by the `Section` enum so adding a section is a compile error until it
//! has both an editor shape and a renderer.

pub mod editor;
pub mod handlers;

use serde::Serialize;

use crate::models::resume::{
    Certification, Education, EntryRecord, PersonalInfo, Project, ResumeDocument, Section,
    WorkExperience,
};
use crate::render::blocks;
use crate::render::SectionBlock;
use crate::templates::StyleBundle;

/// Shape of the value the section's form edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionShape {
    /// A single record of named text fields.
    Record { fields: &'static [&'static str] },
    /// An ordered list of records.
    RecordList { fields: &'static [&'static str] },
    /// Unique, non-empty strings.
    TagList,
    /// One free-text value.
    Text,
}

/// Produces the section's display block, or `None` to omit it entirely.
pub type SectionRenderer = fn(&ResumeDocument, &StyleBundle) -> Option<SectionBlock>;

pub struct SectionSpec {
    pub section: Section,
    pub shape: SectionShape,
    pub render: SectionRenderer,
}

static REGISTRY: [SectionSpec; 9] = [
    SectionSpec {
        section: Section::PersonalInfo,
        shape: SectionShape::Record {
            fields: PersonalInfo::FIELDS,
        },
        // The header is rendered unconditionally by the pipeline, never as a body block.
        render: blocks::no_block,
    },
    SectionSpec {
        section: Section::WorkExperience,
        shape: SectionShape::RecordList {
            fields: WorkExperience::FIELDS,
        },
        render: blocks::work_experience,
    },
    SectionSpec {
        section: Section::Education,
        shape: SectionShape::RecordList {
            fields: Education::FIELDS,
        },
        render: blocks::education,
    },
    SectionSpec {
        section: Section::Skills,
        shape: SectionShape::TagList,
        render: blocks::skills,
    },
    SectionSpec {
        section: Section::Languages,
        shape: SectionShape::TagList,
        render: blocks::languages,
    },
    SectionSpec {
        section: Section::Certifications,
        shape: SectionShape::RecordList {
            fields: Certification::FIELDS,
        },
        render: blocks::certifications,
    },
    SectionSpec {
        section: Section::Achievements,
        shape: SectionShape::TagList,
        render: blocks::achievements,
    },
    SectionSpec {
        section: Section::Projects,
        shape: SectionShape::RecordList {
            fields: Project::FIELDS,
        },
        render: blocks::projects,
    },
    SectionSpec {
        section: Section::Summary,
        shape: SectionShape::Text,
        render: blocks::summary,
    },
];

/// All specs in wizard order.
pub fn registry() -> &'static [SectionSpec] {
    &REGISTRY
}

pub fn spec(section: Section) -> &'static SectionSpec {
    // REGISTRY is laid out in `Section::ALL` order.
    let index = Section::ALL
        .iter()
        .position(|s| *s == section)
        .unwrap_or_default();
    &REGISTRY[index]
}

/// Next wizard step, `None` on the last one.
pub fn next(section: Section) -> Option<Section> {
    let index = Section::ALL.iter().position(|s| *s == section)?;
    Section::ALL.get(index + 1).copied()
}

/// Previous wizard step, `None` on the first one.
pub fn previous(section: Section) -> Option<Section> {
    let index = Section::ALL.iter().position(|s| *s == section)?;
    index.checked_sub(1).map(|i| Section::ALL[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::resolve;

    #[test]
    fn test_registry_follows_wizard_order() {
        let sections: Vec<Section> = registry().iter().map(|s| s.section).collect();
        assert_eq!(sections, Section::ALL);
    }

    #[test]
    fn test_spec_lookup_matches_section() {
        for section in Section::ALL {
            assert_eq!(spec(section).section, section);
        }
    }

    #[test]
    fn test_wizard_navigation_saturates() {
        assert_eq!(previous(Section::PersonalInfo), None);
        assert_eq!(next(Section::PersonalInfo), Some(Section::WorkExperience));
        assert_eq!(previous(Section::Summary), Some(Section::Projects));
        assert_eq!(next(Section::Summary), None);
    }

    #[test]
    fn test_every_renderer_skips_empty_document() {
        let doc = ResumeDocument::default();
        let style = resolve("modern");
        for spec in registry() {
            assert!(
                (spec.render)(&doc, style).is_none(),
                "{} rendered a block for an empty document",
                spec.section
            );
        }
    }

    #[test]
    fn test_shapes() {
        assert_eq!(spec(Section::Skills).shape, SectionShape::TagList);
        assert_eq!(spec(Section::Summary).shape, SectionShape::Text);
        assert!(matches!(
            spec(Section::Projects).shape,
            SectionShape::RecordList { fields } if fields.contains(&"link")
        ));
    }
}
