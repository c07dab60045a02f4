//! Display names for folders and pages.
//!
//! Folder names and file stems come straight from the filesystem, so the
//! sidebar converts them for display: separators become spaces and each word
//! is capitalized.
//!
//! - `core-concepts` → "Core Concepts"
//! - `getting_started` → "Getting Started"
//! - `vpc-app` stays `vpc-app` when it names a module folder (callers decide)

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

/// Characters treated as word separators in file and folder names.
const SEPARATORS: &[char] = &['-', '_'];

/// Convert separators to spaces and capitalize the first letter of each word.
///
/// The rest of each word is left as is, so acronyms survive:
/// `deploy-to-AWS` → "Deploy To AWS".
pub fn display_name(name: &str) -> String {
    name.split(SEPARATORS)
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Page title derived from a file stem: `overview` → "Overview".
pub fn title_from_stem(stem: &str) -> String {
    display_name(stem)
}

/// Text of the first non-empty level-1 heading, ATX or setext.
///
/// Headings are read from the parsed document, so `#` lines inside code
/// blocks are not headings.
pub fn first_heading(markdown: &str) -> Option<String> {
    let mut title: Option<String> = None;
    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => title = Some(String::new()),
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                if let Some(text) = title.take() {
                    let text = text.trim();
                    if !text.is_empty() {
                        return Some(text.to_string());
                    }
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(title) = title.as_mut() {
                    title.push_str(&text);
                }
            }
            _ => {}
        }
    }
    None
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
