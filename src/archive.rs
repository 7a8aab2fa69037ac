use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{Result, StylegenError};

/// Streams matching entries out of a distribution archive.
///
/// The archive is opened fresh for each operation and the handle is released
/// when the operation returns, on success or failure. Entry streams are only
/// valid inside the visitor invocation that receives them.
pub struct ZipProcessor {
    path: PathBuf,
}

impl ZipProcessor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Visit every non-directory entry whose name matches the include set,
    /// in archive-native order. Non-matching entries are never opened.
    pub fn process<F>(&self, includes: &GlobSet, mut visit: F) -> Result<()>
    where
        F: FnMut(&str, &mut dyn Read) -> Result<()>,
    {
        let mut archive = self.open()?;
        for index in 0..archive.len() {
            let matched = archive
                .name_for_index(index)
                .map(|name| includes.is_match(name))
                .unwrap_or(false);
            if !matched {
                continue;
            }

            let mut entry = archive.by_index(index).map_err(|e| self.format_error(e))?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            visit(&name, &mut entry)?;
        }
        Ok(())
    }

    /// Read a single named entry into memory.
    pub fn read_entry(&self, entry_name: &str) -> Result<Vec<u8>> {
        let mut archive = self.open()?;
        let mut entry = match archive.by_name(entry_name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(StylegenError::EntryNotFound {
                    entry: entry_name.to_string(),
                })
            }
            Err(e) => return Err(self.format_error(e)),
        };

        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| StylegenError::EntryRead {
                entry: entry_name.to_string(),
                source: e,
            })?;
        Ok(bytes)
    }

    fn open(&self) -> Result<ZipArchive<File>> {
        let file = File::open(&self.path).map_err(|e| StylegenError::ArchiveOpen {
            path: self.path.clone(),
            source: e,
        })?;
        ZipArchive::new(file).map_err(|e| self.format_error(e))
    }

    fn format_error(&self, source: ZipError) -> StylegenError {
        StylegenError::ArchiveFormat {
            path: self.path.clone(),
            source,
        }
    }
}

/// Compile include patterns into a single matcher.
///
/// `literal_separator` keeps `*` from crossing `/`, so `*/common/**` matches
/// exactly one leading path segment the way the distribution layout expects.
pub fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| StylegenError::GlobPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| StylegenError::GlobPattern {
        pattern: "<combined>".into(),
        source: e,
    })
}
