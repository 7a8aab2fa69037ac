use std::path::PathBuf;

use tera::{Context, Tera};

use crate::config::GeneratorConfig;
use crate::error::{Result, StylegenError};
use crate::spec::Specification;

/// Name of the single template in the bundle.
const TEMPLATE_NAME: &str = "plugin";

/// The plugin source template, compiled into the binary.
const PLUGIN_TEMPLATE: &str = include_str!("../templates/plugin.tera");

/// Turns a specification into plugin source text.
pub trait Renderer {
    fn render(&self, spec: &Specification) -> Result<String>;
}

pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    /// Parse the embedded template bundle. Failure here means the run aborts
    /// before any extraction work happens.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, PLUGIN_TEMPLATE)
            .map_err(|e| StylegenError::TemplateParse { source: e })?;
        Ok(Self { tera })
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, spec: &Specification) -> Result<String> {
        let context =
            Context::from_serialize(spec).map_err(|e| StylegenError::Render { source: e })?;
        self.tera
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| StylegenError::Render { source: e })
    }
}

/// `<targetDirectory>/<package-as-path>/<ClassName>.<extension>`
pub fn source_file_path(config: &GeneratorConfig) -> PathBuf {
    config
        .target_directory
        .join(config.package_name.replace('.', "/"))
        .join(format!("{}.{}", config.class_name, config.source_extension))
}

/// Write the rendered source, creating intermediate directories as needed.
pub fn write_source(config: &GeneratorConfig, text: &str) -> Result<PathBuf> {
    let path = source_file_path(config);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StylegenError::Io {
            context: format!("creating source directory {}", parent.display()),
            source: e,
        })?;
    }
    std::fs::write(&path, text).map_err(|e| StylegenError::SourceWrite {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}
