//! `jpi-manifest generate` command

use anyhow::Result;

use crate::cli::GenerateArgs;
use jpi_manifest::util::manifest_writer::{to_manifest_string, write_manifest};
use jpi_manifest::{assemble_manifest, ManifestOptions};

pub fn execute(args: GenerateArgs) -> Result<()> {
    let (mut build, conventions) = super::load_build(&args.source)?;

    let options = ManifestOptions {
        conventions,
        ..Default::default()
    };
    let attrs = assemble_manifest(&mut build, &options)?;

    match args.output {
        Some(ref path) => {
            write_manifest(path, &attrs)?;
            eprintln!("Wrote {} ({} attributes)", path.display(), attrs.len());
        }
        None => print!("{}", to_manifest_string(&attrs)),
    }

    Ok(())
}
