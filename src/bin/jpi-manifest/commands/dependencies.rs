//! `jpi-manifest dependencies` command

use anyhow::Result;

use crate::cli::DependenciesArgs;
use jpi_manifest::ops::lister_for;

pub fn execute(args: DependenciesArgs) -> Result<()> {
    let (build, conventions) = super::load_build(&args.source)?;

    let lister = lister_for(&build.host);
    let classification = lister.list(&build.configurations, &conventions);

    println!("strategy: {} (host {})", lister.name(), build.host);
    if classification.descriptors.is_empty() {
        println!("no plugin dependencies");
        return Ok(());
    }

    println!("Plugin-Dependencies: {}", classification.to_attribute());
    for descriptor in &classification.descriptors {
        let kind = if descriptor.optional { "optional" } else { "required" };
        println!("  {} {} ({})", descriptor.name, descriptor.version, kind);
    }

    if !classification.propagations.is_empty() {
        println!("propagated to `{}`:", conventions.runtime_elements);
        for propagation in &classification.propagations {
            println!("  {} (from `{}`)", propagation.dependency, propagation.from);
        }
    }

    Ok(())
}
