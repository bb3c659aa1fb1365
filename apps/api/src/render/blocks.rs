//! Per-section renderers referenced by the section registry.
//!
//! Each returns `None` when its section is absent or empty so that no empty
//! heading ever reaches the output.

use crate::models::resume::{ResumeDocument, Section, TagList};
use crate::render::{EntryBlock, HeaderBlock, SectionBlock, SectionBody, Span};
use crate::templates::StyleBundle;

pub fn header(document: &ResumeDocument) -> HeaderBlock {
    let info = &document.personal_info;
    HeaderBlock {
        name: info.name.clone(),
        title: info.title.clone(),
        contact_line: format!(
            "{} | {} | {} | {}",
            info.email, info.phone, info.linkedin, info.address
        ),
        photo: info.photo.clone(),
    }
}

fn block(section: Section, style: &StyleBundle, body: SectionBody) -> SectionBlock {
    SectionBlock {
        section,
        title: style.section_title_case.apply(section.name()),
        title_color: style.section_title_color,
        body,
    }
}

fn tag_block(section: Section, tags: &TagList, style: &StyleBundle) -> Option<SectionBlock> {
    if tags.is_empty() {
        return None;
    }
    Some(block(
        section,
        style,
        SectionBody::Bullets(tags.as_slice().to_vec()),
    ))
}

fn non_empty(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        Vec::new()
    } else {
        vec![text.to_string()]
    }
}

pub fn no_block(_: &ResumeDocument, _: &StyleBundle) -> Option<SectionBlock> {
    None
}

pub fn summary(document: &ResumeDocument, style: &StyleBundle) -> Option<SectionBlock> {
    if document.summary.trim().is_empty() {
        return None;
    }
    Some(block(
        Section::Summary,
        style,
        SectionBody::Paragraph(document.summary.clone()),
    ))
}

pub fn skills(document: &ResumeDocument, style: &StyleBundle) -> Option<SectionBlock> {
    tag_block(Section::Skills, &document.skills, style)
}

pub fn languages(document: &ResumeDocument, style: &StyleBundle) -> Option<SectionBlock> {
    tag_block(Section::Languages, &document.languages, style)
}

pub fn achievements(document: &ResumeDocument, style: &StyleBundle) -> Option<SectionBlock> {
    tag_block(Section::Achievements, &document.achievements, style)
}

pub fn work_experience(document: &ResumeDocument, style: &StyleBundle) -> Option<SectionBlock> {
    if document.work_experience.is_empty() {
        return None;
    }
    let entries = document
        .work_experience
        .iter()
        .map(|exp| EntryBlock {
            headline: vec![
                Span::strong(&exp.role),
                Span::plain(" at "),
                Span::strong(&exp.company),
                Span::plain(format!(" ({} - {})", exp.start, exp.end)),
            ],
            details: non_empty(&exp.description),
            link: None,
            href: None,
        })
        .collect();
    Some(block(
        Section::WorkExperience,
        style,
        SectionBody::Entries(entries),
    ))
}

pub fn education(document: &ResumeDocument, style: &StyleBundle) -> Option<SectionBlock> {
    if document.education.is_empty() {
        return None;
    }
    let entries = document
        .education
        .iter()
        .map(|edu| EntryBlock {
            headline: vec![
                Span::strong(&edu.degree),
                Span::plain(" at "),
                Span::strong(&edu.university),
                Span::plain(format!(" ({} - {})", edu.start, edu.end)),
            ],
            details: vec![format!("CGPA/Percentage: {}", edu.cgpa)],
            link: None,
            href: None,
        })
        .collect();
    Some(block(Section::Education, style, SectionBody::Entries(entries)))
}

pub fn projects(document: &ResumeDocument, style: &StyleBundle) -> Option<SectionBlock> {
    if document.projects.is_empty() {
        return None;
    }
    let entries = document
        .projects
        .iter()
        .map(|proj| EntryBlock {
            headline: vec![
                Span::strong(&proj.title),
                Span::plain(format!(" [{}]", proj.technologies)),
            ],
            details: non_empty(&proj.description),
            link: (!proj.link.trim().is_empty()).then(|| proj.link.clone()),
            href: safe_href(&proj.link),
        })
        .collect();
    Some(block(Section::Projects, style, SectionBody::Entries(entries)))
}

const LINK_SCHEMES: [&str; 3] = ["http://", "https://", "mailto:"];

/// `link` when it is safe to put in an `href`.
fn safe_href(link: &str) -> Option<String> {
    let link = link.trim();
    LINK_SCHEMES
        .iter()
        .any(|scheme| {
            link.len() > scheme.len()
                && link.get(..scheme.len()).is_some_and(|p| p.eq_ignore_ascii_case(scheme))
        })
        .then(|| link.to_string())
}

pub fn certifications(document: &ResumeDocument, style: &StyleBundle) -> Option<SectionBlock> {
    if document.certifications.is_empty() {
        return None;
    }
    let items = document
        .certifications
        .iter()
        .map(|cert| format!("{} ({}, {})", cert.name, cert.issuer, cert.year))
        .collect();
    Some(block(Section::Certifications, style, SectionBody::Bullets(items)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Certification, Education, Project};
    use crate::templates::resolve;

    #[test]
    fn test_blank_summary_is_skipped() {
        let mut doc = ResumeDocument::default();
        doc.summary = "   ".to_string();
        assert!(summary(&doc, resolve("modern")).is_none());
    }

    #[test]
    fn test_project_link_only_when_present() {
        let mut doc = ResumeDocument::default();
        doc.projects.push(Project {
            title: "ripgrep".to_string(),
            technologies: "Rust".to_string(),
            description: String::new(),
            link: "https://github.com/BurntSushi/ripgrep".to_string(),
        });
        doc.projects.push(Project::default());
        let block = projects(&doc, resolve("modern")).unwrap();
        let SectionBody::Entries(entries) = block.body else {
            panic!("projects render as entries");
        };
        assert!(entries[0].link.is_some());
        assert!(entries[0].details.is_empty());
        assert!(entries[1].link.is_none());
    }

    #[test]
    fn test_only_web_and_mail_links_become_hrefs() {
        assert_eq!(
            safe_href(" https://example.com/a "),
            Some("https://example.com/a".to_string())
        );
        assert!(safe_href("HTTP://example.com").is_some());
        assert!(safe_href("mailto:ada@example.com").is_some());
        assert_eq!(safe_href("javascript:alert(1)"), None);
        assert_eq!(safe_href("  JavaScript:alert(1)"), None);
        assert_eq!(safe_href("data:text/html,<b>x</b>"), None);
        assert_eq!(safe_href("example.com"), None);
        assert_eq!(safe_href("https://"), None);

        let mut doc = ResumeDocument::default();
        doc.projects.push(Project {
            title: "x".to_string(),
            link: "javascript:alert(1)".to_string(),
            ..Project::default()
        });
        let SectionBody::Entries(entries) = projects(&doc, resolve("modern")).unwrap().body else {
            panic!("projects render as entries");
        };
        assert_eq!(entries[0].link.as_deref(), Some("javascript:alert(1)"));
        assert_eq!(entries[0].href, None);
    }

    #[test]
    fn test_entries_with_empty_fields_still_render() {
        let mut doc = ResumeDocument::default();
        doc.education.push(Education::default());
        let block = education(&doc, resolve("classic")).unwrap();
        let SectionBody::Entries(entries) = block.body else {
            panic!("education renders as entries");
        };
        assert_eq!(entries[0].details, ["CGPA/Percentage: "]);
    }

    #[test]
    fn test_certification_bullet_format() {
        let mut doc = ResumeDocument::default();
        doc.certifications.push(Certification {
            name: "CKA".to_string(),
            issuer: "CNCF".to_string(),
            year: "2023".to_string(),
        });
        let block = certifications(&doc, resolve("creative")).unwrap();
        assert_eq!(block.title, "Certifications");
        assert_eq!(block.body, SectionBody::Bullets(vec!["CKA (CNCF, 2023)".to_string()]));
    }

    #[test]
    fn test_header_contact_line() {
        let mut doc = ResumeDocument::default();
        doc.personal_info.email = "ada@example.com".to_string();
        doc.personal_info.address = "London".to_string();
        assert_eq!(header(&doc).contact_line, "ada@example.com |  |  | London");
    }
}
