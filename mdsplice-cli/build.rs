use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &[
    "blocks-json",
    "blocks-treeviz",
    "runs-json",
    "document-treeviz",
];

fn template_arg() -> Arg {
    Arg::new("template")
        .long("template")
        .short('t')
        .value_name("PATH")
        .help("Template word/document.xml")
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    println!("cargo:rerun-if-changed=build.rs");

    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("mdsplice")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render report markup into a WordprocessingML template")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a mdsplice.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Render markup into a template (default command)")
                .arg(
                    Arg::new("input")
                        .help("Markup file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(template_arg().required(true))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("assets")
                        .long("assets")
                        .value_name("DIR")
                        .help("Directory image paths resolve against")
                        .value_hint(ValueHint::DirPath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect intermediate representations of a markup file")
                .arg(
                    Arg::new("path")
                        .help("Path to the markup file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply (stage-format)")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(template_arg()),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "mdsplice", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "mdsplice", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "mdsplice", &outdir)?;

    Ok(())
}
