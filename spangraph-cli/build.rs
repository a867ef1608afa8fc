use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &[
    "graph-treeviz",
    "graph-json",
    "tokens-simple",
    "chains-simple",
];

const FORMATS: &[&str] = &["ptb", "brackets", "treeviz"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let format_arg = |name: &'static str, help: &'static str| {
        Arg::new(name)
            .long(name)
            .help(help)
            .value_parser(clap::builder::PossibleValuesParser::new(FORMATS))
            .value_hint(ValueHint::Other)
    };

    let mut cmd = Command::new("spangraph")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting annotated documents")
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
                .help("Path to a spangraph.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log progress and debug details to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the document graph of a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the input file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply (subject-format)")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(format_arg("from", "Source format")),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats (default command)")
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(format_arg("from", "Source format"))
                .arg(format_arg("to", "Target format").required(true))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "spangraph", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "spangraph", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "spangraph", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
