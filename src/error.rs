use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum StylegenError {
    #[error("Missing required setting: {name}")]
    #[diagnostic(help("Provide {name} on the command line or in stylegen.toml"))]
    ConfigMissing { name: &'static str },

    #[error("Config file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse stylegen.toml")]
    #[diagnostic(help("Check the TOML syntax in your stylegen.toml file"))]
    ConfigParse {
        #[source]
        source: toml::de::Error,
    },

    #[error("Cannot express {path} as an archive URL")]
    #[diagnostic(help("The distribution path must be expressible as a file:// URL"))]
    Locator { path: PathBuf },

    #[error("Malformed nested locator: {locator}")]
    LocatorParse { locator: String },

    #[error("Failed to open distribution archive {path}")]
    #[diagnostic(help("Check that the DocBook XSL distribution exists at this path"))]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a readable archive: {path}")]
    ArchiveFormat {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Archive entry not found: {entry}")]
    EntryNotFound { entry: String },

    #[error("Failed to read archive entry {entry}")]
    EntryRead {
        entry: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Glob pattern error: {pattern}")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to extract parameter names: {context}")]
    #[diagnostic(help(
        "The stylesheet graph could not be traversed; no plugin source was generated"
    ))]
    Extraction { context: String },

    #[error("Failed to parse the plugin template")]
    TemplateParse {
        #[source]
        source: tera::Error,
    },

    #[error("Failed to render the plugin source")]
    Render {
        #[source]
        source: tera::Error,
    },

    #[error("Failed to write generated source to {path}")]
    SourceWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to stage resources: {context}")]
    Staging {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StylegenError>;
