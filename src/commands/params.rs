use console::style;
use miette::Result;

use crate::cli::SettingsArgs;

pub fn run(settings: SettingsArgs) -> Result<()> {
    let options = super::resolve_options(settings)?;
    let names = stylegen::list_parameters(options)?;

    println!(
        "{} {} global parameters",
        style("==>").cyan().bold(),
        names.len()
    );
    for name in names {
        println!("  {name}");
    }
    Ok(())
}
