use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stylegen",
    about = "Generates build-plugin sources from DocBook XSL stylesheet distributions",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the plugin source and staged resources for one output format
    Generate {
        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// List the global parameters discovered in a stylesheet graph
    Params {
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

/// Generation settings; anything left unset falls back to the config file and
/// then to the built-in defaults.
#[derive(Args)]
pub struct SettingsArgs {
    /// Output format type (e.g. html, fo)
    #[arg(short = 't', long = "type")]
    pub output_type: Option<String>,

    /// Version of the DocBook XSL distribution
    #[arg(long = "dist-version")]
    pub version: Option<String>,

    /// Path to the distribution archive (default: lib/docbook-xsl-<version>.zip)
    #[arg(short, long)]
    pub distribution: Option<PathBuf>,

    /// Root directory inside the archive (default: docbook-xsl-<version>/)
    #[arg(long)]
    pub source_root: Option<String>,

    /// Root stylesheet path beneath the source root (default: <type>/docbook.xsl)
    #[arg(long)]
    pub stylesheet_path: Option<String>,

    /// Class name of the generated plugin (default: Docbkx<Type>Mojo)
    #[arg(long)]
    pub class_name: Option<String>,

    /// Package name of the generated plugin (default: the group id)
    #[arg(long)]
    pub package_name: Option<String>,

    /// Group identifier used when no package name is given
    #[arg(long)]
    pub group_id: Option<String>,

    /// Super class the generated plugin extends
    #[arg(long)]
    pub super_class_name: Option<String>,

    /// Suffix used in the generated plugin
    #[arg(long)]
    pub plugin_suffix: Option<String>,

    /// Comma-separated parameter names to exclude from generation
    #[arg(short = 'x', long = "exclude")]
    pub excluded_parameters: Option<String>,

    /// Directory receiving the generated source tree
    #[arg(long)]
    pub target_directory: Option<PathBuf>,

    /// Directory receiving the staged resource tree
    #[arg(long)]
    pub target_resources_directory: Option<PathBuf>,

    /// Path to a stylegen.toml config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
