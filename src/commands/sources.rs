use crate::cli::args::{DiscoveryArgs, GlobalFlags, OutputFormat};
use crate::error::Result;
use crate::sources;
use crate::ui;
use crate::utils::machine_output;

/// Print discovered sources in precedence order. Nothing is read or fetched.
pub fn run(global: &GlobalFlags, args: &DiscoveryArgs, format: Option<OutputFormat>) -> Result<()> {
    let config = super::resolve_config(global, args.to_overrides())?;
    let descriptors = sources::describe(&sources::discover(&config));

    if let Some(format) = format {
        return machine_output::emit_v1("sources", &descriptors, Vec::new(), Vec::new(), format.as_str());
    }

    if descriptors.is_empty() {
        ui::warning("No manifest sources found");
        return Ok(());
    }

    for descriptor in &descriptors {
        println!("{:>3}  {:<6}  {}", descriptor.position, descriptor.origin, descriptor.id);
    }

    Ok(())
}
