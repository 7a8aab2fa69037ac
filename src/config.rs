use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, StylegenError};

/// Raw generation settings, before defaulting. Every field is optional so the
/// same shape serves the config file, the CLI flags, and their overlay.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateOptions {
    /// Output format identifier; also the distribution directory holding the
    /// format's stylesheets.
    #[serde(alias = "type")]
    pub output_type: Option<String>,

    /// Version of the DocBook XSL distribution.
    pub version: Option<String>,

    /// Path to the distribution archive.
    pub distribution: Option<PathBuf>,

    /// Top-level directory inside the archive, with trailing slash.
    pub source_root: Option<String>,

    /// Path of the root stylesheet beneath the source root.
    pub stylesheet_path: Option<String>,

    /// Directory beneath which stylesheets are staged in the output artifact.
    pub stylesheet_target_root: Option<String>,

    /// Full staged stylesheet location, overriding root + path.
    pub stylesheet_target_location: Option<String>,

    pub class_name: Option<String>,
    pub package_name: Option<String>,
    pub group_id: Option<String>,
    pub super_class_name: Option<String>,
    pub plugin_suffix: Option<String>,

    /// Comma-separated parameter names to drop from the generated code.
    pub excluded_parameters: Option<String>,

    /// Directory receiving the generated source tree.
    pub target_directory: Option<PathBuf>,

    /// Directory receiving the staged resource tree.
    pub target_resources_directory: Option<PathBuf>,

    /// Extension of the generated source file.
    pub source_extension: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    generator: GenerateOptions,
}

impl GenerateOptions {
    /// Load options from a `stylegen.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(StylegenError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|e| StylegenError::Io {
            context: format!("reading {}", path.display()),
            source: e,
        })?;
        let file: ConfigFile =
            toml::from_str(&text).map_err(|e| StylegenError::ConfigParse { source: e })?;
        Ok(file.generator)
    }

    /// Overlay `self` on top of `base`: set fields win, unset fields fall
    /// through.
    pub fn overlay(self, base: GenerateOptions) -> Self {
        Self {
            output_type: self.output_type.or(base.output_type),
            version: self.version.or(base.version),
            distribution: self.distribution.or(base.distribution),
            source_root: self.source_root.or(base.source_root),
            stylesheet_path: self.stylesheet_path.or(base.stylesheet_path),
            stylesheet_target_root: self.stylesheet_target_root.or(base.stylesheet_target_root),
            stylesheet_target_location: self
                .stylesheet_target_location
                .or(base.stylesheet_target_location),
            class_name: self.class_name.or(base.class_name),
            package_name: self.package_name.or(base.package_name),
            group_id: self.group_id.or(base.group_id),
            super_class_name: self.super_class_name.or(base.super_class_name),
            plugin_suffix: self.plugin_suffix.or(base.plugin_suffix),
            excluded_parameters: self.excluded_parameters.or(base.excluded_parameters),
            target_directory: self.target_directory.or(base.target_directory),
            target_resources_directory: self
                .target_resources_directory
                .or(base.target_resources_directory),
            source_extension: self.source_extension.or(base.source_extension),
        }
    }

    /// Resolve every default in one pass, producing the immutable
    /// configuration the rest of the pipeline consumes.
    pub fn finalize(self) -> Result<GeneratorConfig> {
        let version = self
            .version
            .ok_or(StylegenError::ConfigMissing { name: "version" })?;
        let output_type = self.output_type.unwrap_or_else(|| "html".to_string());

        let distribution = self
            .distribution
            .unwrap_or_else(|| PathBuf::from(format!("lib/docbook-xsl-{version}.zip")));
        let source_root = self
            .source_root
            .unwrap_or_else(|| format!("docbook-xsl-{version}/"));
        let stylesheet_path = self
            .stylesheet_path
            .unwrap_or_else(|| format!("{output_type}/docbook.xsl"));
        let stylesheet_target_root = self
            .stylesheet_target_root
            .unwrap_or_else(|| "META-INF/docbkx".to_string());
        let stylesheet_target_location = self
            .stylesheet_target_location
            .unwrap_or_else(|| format!("{stylesheet_target_root}/{stylesheet_path}"));

        let group_id = self
            .group_id
            .unwrap_or_else(|| "net.sf.docbook".to_string());
        let class_name = self
            .class_name
            .unwrap_or_else(|| default_class_name(&output_type));
        let package_name = self.package_name.unwrap_or_else(|| group_id.clone());
        let super_class_name = self
            .super_class_name
            .unwrap_or_else(|| "com.agilejava.docbkx.maven.AbstractTransformerMojo".to_string());

        Ok(GeneratorConfig {
            output_type,
            version,
            distribution,
            source_root,
            stylesheet_path,
            stylesheet_target_root,
            stylesheet_target_location,
            class_name,
            package_name,
            super_class_name,
            plugin_suffix: self.plugin_suffix,
            excluded: parse_excluded(self.excluded_parameters.as_deref()),
            target_directory: self
                .target_directory
                .unwrap_or_else(|| PathBuf::from("target/generated-sources")),
            target_resources_directory: self
                .target_resources_directory
                .unwrap_or_else(|| PathBuf::from("target/generated-resources")),
            source_extension: self.source_extension.unwrap_or_else(|| "java".to_string()),
        })
    }
}

/// Fully-resolved configuration. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub output_type: String,
    pub version: String,
    pub distribution: PathBuf,
    pub source_root: String,
    pub stylesheet_path: String,
    pub stylesheet_target_root: String,
    pub stylesheet_target_location: String,
    pub class_name: String,
    pub package_name: String,
    pub super_class_name: String,
    pub plugin_suffix: Option<String>,
    pub excluded: Vec<String>,
    pub target_directory: PathBuf,
    pub target_resources_directory: PathBuf,
    pub source_extension: String,
}

/// `"html"` -> `"DocbkxHtmlMojo"`: first character upper-cased, remainder
/// unchanged.
fn default_class_name(output_type: &str) -> String {
    let mut chars = output_type.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    format!("Docbkx{capitalized}Mojo")
}

/// Split a comma-separated exclusion list, tolerating spaces after commas.
fn parse_excluded(list: Option<&str>) -> Vec<String> {
    match list {
        Some(list) => list
            .split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect(),
        None => Vec::new(),
    }
}
