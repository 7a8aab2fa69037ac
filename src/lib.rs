pub mod archive;
pub mod config;
pub mod describe;
pub mod error;
pub mod extract;
pub mod locator;
pub mod render;
pub mod spec;
pub mod stage;

use std::path::PathBuf;

use console::style;

use crate::archive::ZipProcessor;
use crate::config::{GenerateOptions, GeneratorConfig};
use crate::describe::DescriptionResolver;
use crate::error::Result;
use crate::extract::{extract_parameter_names, ParamListTransform, XsltGraphScan};
use crate::render::{write_source, Renderer, TeraRenderer};
use crate::spec::{build_specification, Specification};
use crate::stage::{stage_resources, StageReport};

/// What a generation run produced.
#[derive(Debug)]
pub struct GenerationReport {
    pub source_file: PathBuf,
    pub parameter_count: usize,
    pub staging: StageReport,
}

/// Main entry point: generate the plugin source and staged resources for one
/// output format of a DocBook XSL distribution.
pub fn generate(options: GenerateOptions) -> Result<GenerationReport> {
    // 1. Resolve every default once; the config is immutable from here on.
    let config = options.finalize()?;

    // 2. Fail on configuration problems (template bundle included) before
    //    touching the archive.
    let renderer = TeraRenderer::new()?;
    let transform = XsltGraphScan::new();

    // 3. Discover parameters and assemble the specification.
    let specification = create_specification(&config, &transform)?;
    println!(
        "{} {} parameters discovered for type '{}'",
        style("==>").cyan().bold(),
        specification.parameters.len(),
        config.output_type
    );

    // 4. Render and write the plugin source.
    let source = renderer.render(&specification)?;
    let source_file = write_source(&config, &source)?;

    // 5. Stage the resource subset out of the same archive.
    let archive = ZipProcessor::new(config.distribution.clone());
    let staging = stage_resources(&archive, &config)?;

    println!(
        "{} Generated {}",
        style("\u{2713}").green().bold(),
        style(source_file.display()).cyan()
    );
    println!(
        "  {} resources staged, {} already present",
        staging.copied.len(),
        staging.skipped.len()
    );

    Ok(GenerationReport {
        source_file,
        parameter_count: specification.parameters.len(),
        staging,
    })
}

/// Run discovery and description resolution, producing the immutable
/// specification consumed by the renderer.
pub fn create_specification(
    config: &GeneratorConfig,
    transform: &dyn ParamListTransform,
) -> Result<Specification> {
    let root_locator = locator::nested_locator(
        &config.distribution,
        &config.source_root,
        &config.stylesheet_path,
    )?;
    let names = extract_parameter_names(transform, &root_locator)?;
    let resolver = DescriptionResolver::new(config);
    Ok(build_specification(config, names, &resolver))
}

/// Discover the (sorted, post-exclusion) global parameter names without
/// generating anything.
pub fn list_parameters(options: GenerateOptions) -> Result<Vec<String>> {
    let config = options.finalize()?;
    let root_locator = locator::nested_locator(
        &config.distribution,
        &config.source_root,
        &config.stylesheet_path,
    )?;
    let transform = XsltGraphScan::new();
    let names = extract_parameter_names(&transform, &root_locator)?;

    let mut retained: Vec<String> = names
        .into_iter()
        .filter(|name| !config.excluded.contains(name))
        .collect();
    retained.sort();
    Ok(retained)
}
