// Command-line interface for spangraph
//
// This binary provides commands for converting and inspecting annotated documents.
//
// Every input is read into the document graph by one of the importers of spangraph-babel, then
// written out by an exporter or shown through one of the inspect transforms. The conversion needs
// a to and from pair. The from can be auto-detected from the file extension, while being
// overwrittable by an explicit --from flag.
// Usage:
//  spangraph <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  spangraph convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  spangraph inspect <path> [<transform>]      - Execute a transform (defaults to "graph-treeviz")
//  spangraph --list-transforms                 - List available transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix. Known keys (limit, namespace, precedence, layer,
// node-ids) update the configuration; the rest are passed to the target format.
// Example:
//  spangraph wsj_0001.mrg --to brackets --extra-limit 10

use spangraph_cli::{logging, transforms};

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use spangraph_babel::{DocumentGraph, FormatRegistry};
use spangraph_config::{Loader, SpangraphConfig};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("spangraph")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting annotated documents")
        .long_about(
            "spangraph reads annotated documents into a graph of tokens, tree nodes and\n\
            markables, and writes them out again in another format.\n\n\
            Commands:\n  \
            - convert: Transform between formats (ptb → brackets, brackets → treeviz, ...)\n  \
            - inspect: View the graph (tree, JSON, tokens, chains)\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            spangraph inspect wsj_0001.mrg                   # View the graph as a tree\n  \
            spangraph inspect doc.brackets chains-simple     # List chains\n  \
            spangraph wsj_0001.mrg --to brackets             # Convert (outputs to stdout)\n  \
            spangraph doc.brackets --to treeviz -o doc.tree  # Convert to a file",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
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
                .long_about(
                    "View the graph an importer builds from a file.\n\n\
                    Transforms (subject-format):\n  \
                    - graph-treeviz:  Tree visualization (default)\n  \
                    - graph-json:     All nodes and edges as JSON\n  \
                    - tokens-simple:  Token positions, identities and surfaces\n  \
                    - chains-simple:  Markable chains\n\n\
                    Extra Parameters:\n  \
                    --extra-node-ids      Prefix treeviz labels with node identities\n  \
                    --extra-layer <name>  Restrict chains to one layer\n\n\
                    Examples:\n  \
                    spangraph inspect wsj_0001.mrg                       # Tree visualization\n  \
                    spangraph inspect wsj_0001.mrg --extra-node-ids      # With node ids\n  \
                    spangraph inspect doc.brackets chains-simple         # Chains",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the input file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply (subject-format). Defaults to 'graph-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - ptb:      Penn Treebank trees (.mrg, .ptb), input only\n  \
                    - brackets: Inline markable chains (.brackets)\n  \
                    - treeviz:  Tree visualization (.tree), output only\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\
                    Missing parent directories of the output file are created.\n\n\
                    Examples:\n  \
                    spangraph convert wsj_0001.mrg --to treeviz               # Tree (stdout)\n  \
                    spangraph convert doc.brackets --to brackets -o out/x.brackets\n  \
                    spangraph wsj_0001.mrg --to treeviz --extra-limit 1       # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .long_help(
                            "Target format to convert to.\n\n\
                            Available formats: brackets, treeviz\n\
                            Use the format name, not the file extension.",
                        )
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A first argument that is not a subcommand or flag is taken as the input file
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && cleaned_args[1] != "inspect"
                && cleaned_args[1] != "convert"
                && cleaned_args[1] != "help"
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    logging::init(matches.get_flag("verbose"));

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let Some(path) = sub_matches.get_one::<String>("path") else {
                exit_with("path is required");
            };
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or("graph-treeviz");
            let from = resolve_from(sub_matches, path);
            handle_inspect_command(path, &from, transform, &extra_params, &config);
        }
        Some(("convert", sub_matches)) => {
            let (Some(input), Some(to)) = (
                sub_matches.get_one::<String>("input"),
                sub_matches.get_one::<String>("to"),
            ) else {
                exit_with("input and --to are required");
            };
            let from = resolve_from(sub_matches, input);
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn exit_with(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Explicit --from, or the format registered for the file extension
fn resolve_from(sub_matches: &ArgMatches, input: &str) -> String {
    if let Some(f) = sub_matches.get_one::<String>("from") {
        return f.to_string();
    }
    let registry = FormatRegistry::default();
    match registry.detect_format_from_filename(input) {
        Some(detected) => {
            log::debug!("detected format '{detected}' for {input}");
            detected
        }
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

/// Reads a file into a graph with the configured import options
fn read_document(path: &str, from: &str, config: &SpangraphConfig) -> DocumentGraph {
    let registry = FormatRegistry::default();
    if let Err(e) = registry.get(from) {
        exit_with(&e.to_string());
    }

    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let params = parse_params_from_config(from, path, config);
    let doc = registry
        .parse_with_options(&source, from, &params)
        .unwrap_or_else(|e| {
            eprintln!("Error reading '{path}' as {from}: {e}");
            std::process::exit(1);
        });
    log::info!(
        "read '{}': {} node(s), {} edge(s), {} token(s)",
        doc.name,
        doc.node_count(),
        doc.edge_count(),
        doc.tokens().len()
    );
    doc
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    from: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &SpangraphConfig,
) {
    let doc = read_document(path, from, config);
    let params = build_inspect_params(transform, config, extra_params);

    let output = transforms::execute_transform(&doc, transform, &params).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &SpangraphConfig,
) {
    let registry = FormatRegistry::default();
    if let Err(e) = registry.get(to) {
        exit_with(&e.to_string());
    }

    let doc = read_document(input, from, config);

    // Serialize (format-specific parameters allowed via --extra-*)
    let mut format_options = serialize_params_from_config(to, config);
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }
    let result = registry
        .serialize_with_options(&doc, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Error writing {to}: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            write_output(Path::new(path), &result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
            log::info!("wrote {to} output to {path}");
        }
        None => print!("{result}"),
    }
}

fn write_output(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("Subjects:");
    println!("  graph       - The whole document graph");
    println!("  tokens      - The token sequence in document order");
    println!("  chains      - Markables grouped by pointing edges\n");

    println!("Formats:");
    println!("  treeviz     - Tree visualization (graph only)");
    println!("  json        - JSON output (graph only)");
    println!("  simple      - One entry per line\n");

    println!("Available transform combinations:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }

    println!("\nConversion formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        if let Ok(format) = registry.get(&format_name) {
            let direction = match (format.supports_parsing(), format.supports_serialization()) {
                (true, true) => "in/out",
                (true, false) => "in",
                _ => "out",
            };
            println!("  {format_name:<10} {direction:<7} {}", format.description());
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> SpangraphConfig {
    let loader = Loader::new().with_optional_file("spangraph.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(
    config: &mut SpangraphConfig,
    extra_params: &mut HashMap<String, String>,
) {
    if let Some(raw) = extra_params.remove("limit") {
        config.convert.ptb.limit = Some(raw.parse().unwrap_or_else(|_| {
            eprintln!("Invalid number '{raw}' for --extra-limit");
            std::process::exit(1);
        }));
    }
    if let Some(raw) = extra_params.remove("namespace") {
        config.convert.ptb.namespace = raw;
    }
    if let Some(raw) = extra_params.remove("precedence") {
        config.convert.ptb.precedence = parse_bool_arg("precedence", &raw);
    }
    if let Some(raw) = extra_params.remove("layer") {
        config.convert.brackets.layer = Some(raw);
    }
    if let Some(raw) = take_override(extra_params, &["node-ids", "ids"]) {
        config.inspect.treeviz.show_node_ids = parse_bool_arg("node-ids", &raw);
    }
}

/// Import options for a source format, taken from the configuration
fn parse_params_from_config(
    from: &str,
    input: &str,
    config: &SpangraphConfig,
) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let name = Path::new(input)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(input);
    match from {
        "ptb" => {
            let ptb = &config.convert.ptb;
            params.insert("name".to_string(), name.to_string());
            params.insert("namespace".to_string(), ptb.namespace.clone());
            params.insert("precedence".to_string(), ptb.precedence.to_string());
            params.insert("limit".to_string(), ptb.limit.unwrap_or(0).to_string());
        }
        "brackets" => {
            params.insert("name".to_string(), name.to_string());
            if let Some(layer) = &config.convert.brackets.layer {
                params.insert("layer".to_string(), layer.clone());
            }
        }
        _ => {}
    }
    params
}

/// Export options for a target format, taken from the configuration
fn serialize_params_from_config(to: &str, config: &SpangraphConfig) -> HashMap<String, String> {
    let mut params = HashMap::new();
    match to {
        "brackets" => {
            if let Some(layer) = &config.convert.brackets.layer {
                params.insert("layer".to_string(), layer.clone());
            }
        }
        "treeviz" if config.inspect.treeviz.show_node_ids => {
            params.insert("node-ids".to_string(), "true".to_string());
        }
        _ => {}
    }
    params
}

fn build_inspect_params(
    transform: &str,
    config: &SpangraphConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();

    match transform {
        "graph-treeviz" if config.inspect.treeviz.show_node_ids => {
            params.insert("node-ids".to_string(), "true".to_string());
        }
        "chains-simple" => {
            if let Some(layer) = &config.convert.brackets.layer {
                params.insert("layer".to_string(), layer.clone());
            }
        }
        _ => {}
    }

    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }

    params
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
