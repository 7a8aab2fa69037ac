use miette::Result;

use crate::cli::SettingsArgs;

pub fn run(settings: SettingsArgs) -> Result<()> {
    let options = super::resolve_options(settings)?;
    stylegen::generate(options)?;
    Ok(())
}
