use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{Result, StylegenError};

/// Separator between the archive URL and the entry path inside it.
const ENTRY_SEPARATOR: &str = "!/";

/// Scheme prefix marking a locator that addresses an entry inside an archive.
const SCHEME: &str = "archive:";

/// Build a locator addressing one logical file inside a distribution archive
/// without extracting it: `archive:<file-url>!/<root><relative>`.
///
/// `root` is the version-specific top directory inside the archive (with a
/// trailing slash); `relative` is the path beneath it.
pub fn nested_locator(distribution: &Path, root: &str, relative: &str) -> Result<String> {
    let url = file_url(distribution)?;
    Ok(format!("{SCHEME}{url}{ENTRY_SEPARATOR}{root}{relative}"))
}

/// Split a nested locator back into the archive's filesystem path and the
/// entry name inside it.
pub fn parse_locator(locator: &str) -> Result<(PathBuf, String)> {
    let malformed = || StylegenError::LocatorParse {
        locator: locator.to_string(),
    };

    let rest = locator.strip_prefix(SCHEME).ok_or_else(malformed)?;
    let (url_str, entry) = rest.split_once(ENTRY_SEPARATOR).ok_or_else(malformed)?;
    if entry.is_empty() {
        return Err(malformed());
    }

    let url = Url::parse(url_str).map_err(|_| malformed())?;
    let path = url.to_file_path().map_err(|_| malformed())?;
    Ok((path, entry.to_string()))
}

fn file_url(distribution: &Path) -> Result<Url> {
    let absolute = if distribution.is_absolute() {
        distribution.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| StylegenError::Io {
                context: "getting current directory".into(),
                source: e,
            })?
            .join(distribution)
    };

    Url::from_file_path(&absolute).map_err(|_| StylegenError::Locator {
        path: distribution.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_composes_scheme_url_root_and_relative() {
        let locator = nested_locator(
            Path::new("/dist/docbook-xsl-1.75.2.zip"),
            "docbook-xsl-1.75.2/",
            "highlighting/foo.xml",
        )
        .unwrap();
        assert_eq!(
            locator,
            "archive:file:///dist/docbook-xsl-1.75.2.zip!/docbook-xsl-1.75.2/highlighting/foo.xml"
        );
    }

    #[test]
    fn locator_round_trips_through_parse() {
        let locator = nested_locator(
            Path::new("/tmp/docbook-xsl-1.0.zip"),
            "docbook-xsl-1.0/",
            "html/docbook.xsl",
        )
        .unwrap();
        let (path, entry) = parse_locator(&locator).unwrap();
        assert_eq!(path, Path::new("/tmp/docbook-xsl-1.0.zip"));
        assert_eq!(entry, "docbook-xsl-1.0/html/docbook.xsl");
    }

    #[test]
    fn relative_distribution_is_anchored_to_cwd() {
        let locator =
            nested_locator(Path::new("lib/dist.zip"), "docbook-xsl-1.0/", "VERSION").unwrap();
        let (path, _) = parse_locator(&locator).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("lib/dist.zip"));
    }

    #[test]
    fn parse_rejects_missing_scheme() {
        assert!(parse_locator("file:///dist.zip!/root/a.xsl").is_err());
    }

    #[test]
    fn parse_rejects_missing_separator() {
        assert!(parse_locator("archive:file:///dist.zip").is_err());
    }

    #[test]
    fn parse_rejects_empty_entry() {
        assert!(parse_locator("archive:file:///dist.zip!/").is_err());
    }
}
