use std::path::PathBuf;

use console::style;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

use crate::archive::ZipProcessor;
use crate::config::GeneratorConfig;
use crate::locator;

/// Any failure while resolving one parameter's description collapses to this
/// single kind; the distinction only matters for the warning message, never
/// for control flow.
#[derive(Debug, Error)]
#[error("{cause}")]
pub struct DescribeError {
    cause: String,
}

impl DescribeError {
    fn new(cause: impl std::fmt::Display) -> Self {
        Self {
            cause: cause.to_string(),
        }
    }
}

/// Mines a one-sentence description per parameter from the distribution's
/// `params/<name>.xml` documentation entries.
///
/// Documentation coverage is known to be incomplete, so every failure here is
/// policy: log a warning and continue with an empty description.
pub struct DescriptionResolver {
    archive: ZipProcessor,
    distribution: PathBuf,
    source_root: String,
}

impl DescriptionResolver {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            archive: ZipProcessor::new(config.distribution.clone()),
            distribution: config.distribution.clone(),
            source_root: config.source_root.clone(),
        }
    }

    /// Resolve the description for `name`, degrading to an empty string on
    /// any failure.
    pub fn resolve(&self, name: &str) -> String {
        match self.mine(name) {
            Ok(description) => description,
            Err(e) => {
                eprintln!(
                    "{} failed to obtain description for '{}': {}",
                    style("warning:").yellow().bold(),
                    name,
                    e
                );
                String::new()
            }
        }
    }

    fn mine(&self, name: &str) -> std::result::Result<String, DescribeError> {
        let relative = format!("params/{name}.xml");
        let doc_locator =
            locator::nested_locator(&self.distribution, &self.source_root, &relative)
                .map_err(DescribeError::new)?;
        let (_, entry) = locator::parse_locator(&doc_locator).map_err(DescribeError::new)?;

        let bytes = self.archive.read_entry(&entry).map_err(DescribeError::new)?;
        first_sentence(&String::from_utf8_lossy(&bytes))
    }
}

/// Extract the first sentence of the first paragraph of the first descriptive
/// section of a refentry document, as a single normalized line.
fn first_sentence(document: &str) -> std::result::Result<String, DescribeError> {
    let raw = leading_paragraph_text(document)?;
    Ok(normalize(&raw))
}

/// The text of the first `para` that is a direct child of the first
/// `refsect1`, up to the paragraph's first child element.
fn leading_paragraph_text(document: &str) -> std::result::Result<String, DescribeError> {
    let mut reader = Reader::from_str(document);

    // First refsect1, in document order.
    loop {
        match reader.read_event().map_err(DescribeError::new)? {
            Event::Start(e) if e.name().local_name().as_ref() == b"refsect1" => break,
            Event::Eof => return Err(DescribeError::new("no descriptive section found")),
            _ => {}
        }
    }

    // First para directly beneath it.
    let mut depth = 1usize;
    loop {
        match reader.read_event().map_err(DescribeError::new)? {
            Event::Start(e) => {
                if depth == 1 && e.name().local_name().as_ref() == b"para" {
                    break;
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 1 && e.name().local_name().as_ref() == b"para" {
                    return Ok(String::new());
                }
            }
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Err(DescribeError::new("section has no description paragraph"));
                }
            }
            Event::Eof => return Err(DescribeError::new("section has no description paragraph")),
            _ => {}
        }
    }

    // Leading text of the paragraph, ending at its first child element.
    let mut text = String::new();
    loop {
        match reader.read_event().map_err(DescribeError::new)? {
            Event::Text(t) => text.push_str(&t.unescape().map_err(DescribeError::new)?),
            Event::Comment(_) | Event::PI(_) => {}
            _ => break,
        }
    }
    Ok(text)
}

/// Truncate at (and including) the first period, then collapse all runs of
/// whitespace, newlines included, to single spaces. Text with no period is
/// used in full.
fn normalize(raw: &str) -> String {
    let cut = match raw.find('.') {
        Some(index) => &raw[..=index],
        None => raw,
    };
    cut.split_whitespace().collect::<Vec<_>>().join(" ")
}
