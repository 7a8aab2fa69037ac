pub mod generate;
pub mod params;

use std::path::Path;

use stylegen::config::GenerateOptions;
use stylegen::error::Result;

use crate::cli::SettingsArgs;

/// Default config file looked for in the working directory.
const CONFIG_FILE: &str = "stylegen.toml";

/// Turn CLI flags into options, overlaid on the config file when one is
/// given explicitly or present in the working directory.
pub fn resolve_options(settings: SettingsArgs) -> Result<GenerateOptions> {
    let file_options = match &settings.config {
        Some(path) => Some(GenerateOptions::load(path)?),
        None if Path::new(CONFIG_FILE).exists() => {
            Some(GenerateOptions::load(Path::new(CONFIG_FILE))?)
        }
        None => None,
    };

    let cli_options = GenerateOptions {
        output_type: settings.output_type,
        version: settings.version,
        distribution: settings.distribution,
        source_root: settings.source_root,
        stylesheet_path: settings.stylesheet_path,
        stylesheet_target_root: None,
        stylesheet_target_location: None,
        class_name: settings.class_name,
        package_name: settings.package_name,
        group_id: settings.group_id,
        super_class_name: settings.super_class_name,
        plugin_suffix: settings.plugin_suffix,
        excluded_parameters: settings.excluded_parameters,
        target_directory: settings.target_directory,
        target_resources_directory: settings.target_resources_directory,
        source_extension: None,
    };

    Ok(match file_options {
        Some(base) => cli_options.overlay(base),
        None => cli_options,
    })
}
