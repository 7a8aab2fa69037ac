use std::fs::File;
use std::path::PathBuf;

use crate::archive::{build_glob_set, ZipProcessor};
use crate::config::GeneratorConfig;
use crate::error::{Result, StylegenError};

/// Outcome of one staging pass.
#[derive(Debug, Default)]
pub struct StageReport {
    /// Entry paths (root segment stripped) copied into the resource tree.
    pub copied: Vec<String>,
    /// Entry paths skipped because the destination already existed.
    pub skipped: Vec<String>,
}

/// The archive subset a plugin of the given output type needs at runtime:
/// the format's own stylesheet directory, the shared directories, and the
/// version marker.
pub fn include_patterns(output_type: &str) -> Vec<String> {
    vec![
        "*/VERSION".to_string(),
        format!("*/{output_type}/**"),
        "*/common/**".to_string(),
        "*/lib/**".to_string(),
        "*/highlighting/**".to_string(),
    ]
}

/// Copy the matching archive entries into
/// `<targetResourcesDirectory>/<stylesheetTargetRoot>/<entry minus its root
/// segment>`. Existing destination files are left untouched, which makes
/// repeated runs against an unchanged archive idempotent.
pub fn stage_resources(archive: &ZipProcessor, config: &GeneratorConfig) -> Result<StageReport> {
    let dest_root: PathBuf = config
        .target_resources_directory
        .join(&config.stylesheet_target_root);
    std::fs::create_dir_all(&dest_root).map_err(|e| StylegenError::Staging {
        context: format!("creating resource directory {}", dest_root.display()),
        source: e,
    })?;

    let includes = build_glob_set(&include_patterns(&config.output_type))?;
    let mut report = StageReport::default();

    archive.process(&includes, |name, reader| {
        // Strip the version-specific root directory from the entry name.
        let Some((_, relative)) = name.split_once('/') else {
            return Ok(());
        };
        // Zip-slip guard.
        if relative.is_empty() || relative.split('/').any(|segment| segment == "..") {
            return Ok(());
        }

        let dest = dest_root.join(relative);
        if dest.exists() {
            report.skipped.push(relative.to_string());
            return Ok(());
        }

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StylegenError::Staging {
                context: format!("creating directory {}", parent.display()),
                source: e,
            })?;
        }
        let mut out = File::create(&dest).map_err(|e| StylegenError::Staging {
            context: format!("creating {}", dest.display()),
            source: e,
        })?;
        std::io::copy(reader, &mut out).map_err(|e| StylegenError::Staging {
            context: format!("copying {} to {}", name, dest.display()),
            source: e,
        })?;

        report.copied.push(relative.to_string());
        Ok(())
    })?;

    Ok(report)
}
