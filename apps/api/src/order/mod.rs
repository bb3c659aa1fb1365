//! Display order of the resume body sections.
//!
//! Personal Info is the header and always renders first, so the default order
//! only lists the eight body sections. Saved orders are taken as given apart
//! from duplicate removal and appending body sections they do not mention.

pub mod handlers;

use serde::{Deserialize, Serialize};

use crate::models::resume::Section;

pub const DEFAULT_ORDER: [Section; 8] = [
    Section::Summary,
    Section::Skills,
    Section::WorkExperience,
    Section::Projects,
    Section::Education,
    Section::Certifications,
    Section::Achievements,
    Section::Languages,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionOrder(Vec<Section>);

impl Default for SectionOrder {
    fn default() -> Self {
        SectionOrder(DEFAULT_ORDER.to_vec())
    }
}

impl SectionOrder {
    /// Rebuilds an order from persisted names. Unknown names and repeats are
    /// dropped; body sections the saved order never mentioned are appended in
    /// default order so newly introduced sections still display.
    pub fn restore(saved: &[String]) -> Self {
        let mut order = Vec::with_capacity(DEFAULT_ORDER.len());
        for name in saved {
            match Section::from_name(name) {
                Some(section) if !order.contains(&section) => order.push(section),
                Some(_) => {}
                None => tracing::debug!("Dropping unknown section '{name}' from saved order"),
            }
        }
        for section in DEFAULT_ORDER {
            if !order.contains(&section) {
                order.push(section);
            }
        }
        SectionOrder(order)
    }

    /// Moves `source` to the position currently held by `target`, shifting the
    /// elements in between. Returns false (and changes nothing) when the two are
    /// equal or either is absent.
    pub fn reorder(&mut self, source: Section, target: Section) -> bool {
        if source == target {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(source), self.position(target)) else {
            return false;
        };
        let moved = self.0.remove(from);
        self.0.insert(to, moved);
        true
    }

    fn position(&self, section: Section) -> Option<usize> {
        self.0.iter().position(|s| *s == section)
    }

    pub fn as_slice(&self) -> &[Section] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
