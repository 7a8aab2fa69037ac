use std::collections::HashSet;

use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::describe::DescriptionResolver;

/// One customizable stylesheet parameter exposed by the generated plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    /// Single-line, whitespace-normalized, possibly empty.
    pub description: String,
}

/// The fully-resolved description of one plugin to be generated. Assembled
/// once per run and handed to the renderer; never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Specification {
    pub output_type: String,
    pub version: String,
    pub stylesheet_location: String,
    pub class_name: String,
    pub package_name: String,
    pub super_class_name: String,
    pub plugin_suffix: Option<String>,
    pub parameters: Vec<Parameter>,
}

/// Assemble the specification from the discovered name set.
///
/// The set carries no iteration order, so names are sorted before the
/// parameter sequence is materialized; generated output must be reproducible
/// across runs. Excluded names are dropped before any description lookup.
pub fn build_specification(
    config: &GeneratorConfig,
    names: HashSet<String>,
    resolver: &DescriptionResolver,
) -> Specification {
    let mut retained: Vec<String> = names
        .into_iter()
        .filter(|name| !config.excluded.contains(name))
        .collect();
    retained.sort();

    let parameters = retained
        .into_iter()
        .map(|name| Parameter {
            description: resolver.resolve(&name),
            name,
        })
        .collect();

    Specification {
        output_type: config.output_type.clone(),
        version: config.version.clone(),
        stylesheet_location: config.stylesheet_target_location.clone(),
        class_name: config.class_name.clone(),
        package_name: config.package_name.clone(),
        super_class_name: config.super_class_name.clone(),
        plugin_suffix: config.plugin_suffix.clone(),
        parameters,
    }
}
