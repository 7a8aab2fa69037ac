use std::collections::{HashSet, VecDeque};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::archive::ZipProcessor;
use crate::error::{Result, StylegenError};
use crate::locator;

/// The opaque transform of the pipeline: takes the locator of a root
/// stylesheet and produces one global parameter name per line. Blank lines
/// are allowed and carry no parameter.
pub trait ParamListTransform {
    fn run(&self, stylesheet_locator: &str) -> Result<String>;
}

/// Default transform: walks the stylesheet's transitive include/import graph
/// inside the archive and collects every top-level `xsl:param` name.
#[derive(Debug, Default)]
pub struct XsltGraphScan;

impl XsltGraphScan {
    pub fn new() -> Self {
        Self
    }
}

impl ParamListTransform for XsltGraphScan {
    fn run(&self, stylesheet_locator: &str) -> Result<String> {
        let (archive_path, root_entry) = locator::parse_locator(stylesheet_locator)?;
        let archive = ZipProcessor::new(archive_path);

        let mut visited: HashSet<String> = HashSet::new();
        let mut queue = VecDeque::from([root_entry]);
        let mut names = Vec::new();

        while let Some(entry) = queue.pop_front() {
            if !visited.insert(entry.clone()) {
                continue;
            }

            let bytes = archive
                .read_entry(&entry)
                .map_err(|e| StylegenError::Extraction {
                    context: format!("reading stylesheet {entry}: {e}"),
                })?;
            let source = String::from_utf8_lossy(&bytes);
            let scanned = scan_stylesheet(&entry, &source)?;

            names.extend(scanned.params);
            for href in scanned.hrefs {
                if let Some(resolved) = resolve_href(&entry, &href) {
                    queue.push_back(resolved);
                }
            }
        }

        Ok(names.join("\n"))
    }
}

/// Parse the transform's output into a deduplicated name set. The set carries
/// no order; callers impose one before the names become observable.
pub fn extract_parameter_names(
    transform: &dyn ParamListTransform,
    stylesheet_locator: &str,
) -> Result<HashSet<String>> {
    let text = transform.run(stylesheet_locator)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

#[derive(Debug)]
struct ScannedSheet {
    params: Vec<String>,
    hrefs: Vec<String>,
}

/// Single pass over one stylesheet: top-level `param` names and the `href`s
/// of top-level `include`/`import` elements. Depth 1 means a direct child of
/// the document element; params declared inside templates are locally scoped
/// and ignored.
fn scan_stylesheet(entry: &str, source: &str) -> Result<ScannedSheet> {
    let mut reader = Reader::from_str(source);
    let mut depth = 0usize;
    let mut params = Vec::new();
    let mut hrefs = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| StylegenError::Extraction {
            context: format!("parsing stylesheet {entry}: {e}"),
        })?;
        match event {
            Event::Start(e) => {
                if depth == 1 {
                    collect_declaration(entry, &e, &mut params, &mut hrefs)?;
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 1 {
                    collect_declaration(entry, &e, &mut params, &mut hrefs)?;
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(ScannedSheet { params, hrefs })
}

fn collect_declaration(
    entry: &str,
    element: &BytesStart<'_>,
    params: &mut Vec<String>,
    hrefs: &mut Vec<String>,
) -> Result<()> {
    // Local-name matching: the distribution binds the XSLT namespace to the
    // conventional `xsl` prefix, but nothing depends on the prefix itself.
    match element.name().local_name().as_ref() {
        b"param" => {
            if let Some(name) = attribute_value(entry, element, b"name")? {
                params.push(name);
            }
        }
        b"include" | b"import" => {
            if let Some(href) = attribute_value(entry, element, b"href")? {
                hrefs.push(href);
            }
        }
        _ => {}
    }
    Ok(())
}

fn attribute_value(
    entry: &str,
    element: &BytesStart<'_>,
    key: &[u8],
) -> Result<Option<String>> {
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| StylegenError::Extraction {
            context: format!("parsing stylesheet {entry}: {e}"),
        })?;
        if attribute.key.local_name().as_ref() == key {
            let value = attribute
                .unescape_value()
                .map_err(|e| StylegenError::Extraction {
                    context: format!("parsing stylesheet {entry}: {e}"),
                })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Resolve an include/import href against the entry that references it.
/// Absolute references (URLs or rooted paths) point outside the archive and
/// are skipped.
fn resolve_href(base_entry: &str, href: &str) -> Option<String> {
    if href.contains("://") || href.starts_with('/') {
        return None;
    }

    let mut segments: Vec<&str> = match base_entry.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    for segment in href.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = r#"<?xml version="1.0"?>
<xsl:stylesheet xmlns:xsl="http://www.w3.org/1999/XSL/Transform" version="1.0">
  <xsl:import href="../common/common.xsl"/>
  <xsl:include href="param.xsl"/>
  <xsl:param name="admon.graphics">0</xsl:param>
  <xsl:param name="toc.max.depth"/>
  <xsl:template match="/">
    <xsl:param name="local.only"/>
  </xsl:template>
</xsl:stylesheet>"#;

    #[test]
    fn scan_collects_top_level_params_only() {
        let scanned = scan_stylesheet("root.xsl", SHEET).unwrap();
        assert_eq!(scanned.params, vec!["admon.graphics", "toc.max.depth"]);
    }

    #[test]
    fn scan_collects_include_and_import_hrefs() {
        let scanned = scan_stylesheet("root.xsl", SHEET).unwrap();
        assert_eq!(scanned.hrefs, vec!["../common/common.xsl", "param.xsl"]);
    }

    #[test]
    fn scan_rejects_malformed_markup() {
        let err = scan_stylesheet("bad.xsl", "<xsl:stylesheet><unclosed").unwrap_err();
        assert!(matches!(err, StylegenError::Extraction { .. }));
    }

    #[test]
    fn href_resolution_is_relative_to_the_entry_directory() {
        assert_eq!(
            resolve_href("docbook-xsl-1.0/html/docbook.xsl", "param.xsl").as_deref(),
            Some("docbook-xsl-1.0/html/param.xsl")
        );
        assert_eq!(
            resolve_href("docbook-xsl-1.0/html/docbook.xsl", "../common/l10n.xsl").as_deref(),
            Some("docbook-xsl-1.0/common/l10n.xsl")
        );
    }

    #[test]
    fn href_resolution_skips_absolute_references() {
        assert_eq!(
            resolve_href("root/a.xsl", "http://example.com/b.xsl"),
            None
        );
        assert_eq!(resolve_href("root/a.xsl", "/etc/b.xsl"), None);
    }

    struct FixedTransform(&'static str);

    impl ParamListTransform for FixedTransform {
        fn run(&self, _locator: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn names_are_deduplicated_and_blank_lines_dropped() {
        let transform = FixedTransform("a\n\nb\na\n  \n");
        let names = extract_parameter_names(&transform, "archive:x!/y").unwrap();
        assert_eq!(names.len(), 2);
        assert!(names.contains("a"));
        assert!(names.contains("b"));
    }

    #[test]
    fn empty_output_yields_empty_set() {
        let transform = FixedTransform("");
        let names = extract_parameter_names(&transform, "archive:x!/y").unwrap();
        assert!(names.is_empty());
    }
}
