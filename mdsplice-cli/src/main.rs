// Command-line interface for mdsplice
//
// This binary renders report markup into a WordprocessingML template and offers an inspect
// command for looking at the intermediate stages (blocks, runs, assembled body).
//
// Rendering needs the markup file and the template's `word/document.xml`. Image paths in the
// markup resolve against --assets, then the configured images.base_dir, then the directory of
// the input file.
//
// Usage:
//  mdsplice <input> --template <document.xml> [-o <file>] [--assets <dir>]  - Render (default)
//  mdsplice render <input> --template <document.xml> [-o <file>]           - Same as above (explicit)
//  mdsplice inspect <path> [<transform>] [--template <document.xml>]       - Execute a transform
//  mdsplice --list-transforms                                             - List available transforms
//
// Extra Parameters:
//
// Parameters can be passed using --extra-<parameter-name> <value>.
// Known render settings (page-break, spacer-after-table, image-width-cm) are applied to the
// configuration; everything else is handed to the transform.
// Example:
//  mdsplice inspect report.md document-treeviz --template document.xml --extra-show-runs

mod transforms;

use clap::{Arg, ArgAction, Command, ValueHint};
use log::info;
use mdsplice_config::{Loader, MdspliceConfig};
use mdsplice_core::formats::wordml::relationships_xml;
use mdsplice_core::{render_wordml, FsResolver, MediaPart};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use transforms::TransformContext;

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
    Command::new("mdsplice")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render report markup into a WordprocessingML template")
        .long_about(
            "mdsplice turns a lightweight markup file into WordprocessingML and splices it into\n\
            an existing document.xml, right before the final section properties.\n\n\
            Commands:\n  \
            - render:  Produce the filled document.xml (default)\n  \
            - inspect: View intermediate representations (blocks, runs, assembled body)\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            mdsplice report.md --template word/document.xml            # Print XML to stdout\n  \
            mdsplice report.md --template tpl.xml -o out/document.xml  # Write XML and media\n  \
            mdsplice inspect report.md                                 # Block outline\n  \
            mdsplice report.md --template tpl.xml --extra-page-break   # Start on a new page",
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
                .help("Path to a mdsplice.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Render markup into a template (default command)")
                .long_about(
                    "Parse the markup file, build paragraphs, tables, code listings and pictures,\n\
                    and insert them into the template body before its section properties.\n\n\
                    Output goes to stdout by default. With -o, pictures are written to a media/\n\
                    directory next to the output together with a relationships.xml listing them.\n\n\
                    Examples:\n  \
                    mdsplice render report.md --template document.xml\n  \
                    mdsplice render report.md --template document.xml -o build/document.xml\n  \
                    mdsplice report.md --template document.xml --assets figures/",
                )
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
                .long_about(
                    "View the markup at different processing stages.\n\n\
                    Transforms (stage-format):\n  \
                    - blocks-treeviz:   Parsed blocks as a tree (default)\n  \
                    - blocks-json:      Parsed blocks as JSON\n  \
                    - runs-json:        Inline runs of paragraphs and list items\n  \
                    - document-treeviz: Template body after assembly\n\n\
                    Extra Parameters (document-treeviz):\n  \
                    --extra-show-runs             List runs under each paragraph\n  \
                    --extra-show-template false   Hide template nodes\n\n\
                    Examples:\n  \
                    mdsplice inspect report.md\n  \
                    mdsplice inspect report.md runs-json\n  \
                    mdsplice inspect report.md document-treeviz --template document.xml",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the markup file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply (stage-format). Defaults to 'blocks-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(template_arg()),
        )
}

fn template_arg() -> Arg {
    Arg::new("template")
        .long("template")
        .short('t')
        .value_name("PATH")
        .help("Template word/document.xml")
        .value_hint(ValueHint::FilePath)
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A first argument that is not a subcommand is taken as the render input
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && cleaned_args[1] != "inspect"
                && cleaned_args[1] != "render"
                && cleaned_args[1] != "help"
            {
                let mut new_args = vec![cleaned_args[0].clone(), "render".to_string()];
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

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("render", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let template = sub_matches
                .get_one::<String>("template")
                .expect("template is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let assets = sub_matches.get_one::<String>("assets").map(PathBuf::from);
            handle_render_command(input, template, output, assets, &config);
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(config.inspect.default_transform.as_str());
            let template = sub_matches.get_one::<String>("template").map(|s| s.as_str());
            handle_inspect_command(path, transform, template, &extra_params, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the render command
fn handle_render_command(
    input: &str,
    template: &str,
    output: Option<&str>,
    assets: Option<PathBuf>,
    config: &MdspliceConfig,
) {
    let source = read_file(input);
    let template_xml = read_file(template);

    let base_dir = assets
        .or_else(|| config.images.base_dir())
        .unwrap_or_else(|| input_dir(input));
    let resolver = FsResolver::new(base_dir);

    let rendered = render_wordml(
        &source,
        &template_xml,
        &resolver,
        &config.parse_options(),
        config.assemble_options(),
    )
    .unwrap_or_else(|e| {
        eprintln!("Render error: {e}");
        std::process::exit(1);
    });

    for path in &rendered.report.missing_resources {
        eprintln!("Warning: image not found: {path}");
    }

    match output {
        Some(path) => {
            fs::write(path, &rendered.xml).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
            if !rendered.media.is_empty() {
                write_media(Path::new(path), &rendered.media);
            }
        }
        None => print!("{}", rendered.xml),
    }

    info!(
        "rendered {} blocks into {} nodes ({} pictures)",
        rendered.report.blocks,
        rendered.report.nodes_inserted,
        rendered.media.len()
    );
}

/// Store pictures and their relationship list in `media/` beside the output file.
fn write_media(output: &Path, media: &[MediaPart]) {
    let dir = output
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("media");
    fs::create_dir_all(&dir).unwrap_or_else(|e| {
        eprintln!("Error creating directory '{}': {e}", dir.display());
        std::process::exit(1);
    });

    for part in media {
        let target = dir.join(&part.file_name);
        fs::write(&target, &part.bytes).unwrap_or_else(|e| {
            eprintln!("Error writing file '{}': {e}", target.display());
            std::process::exit(1);
        });
    }

    let rels = dir.join("relationships.xml");
    fs::write(&rels, relationships_xml(media)).unwrap_or_else(|e| {
        eprintln!("Error writing file '{}': {e}", rels.display());
        std::process::exit(1);
    });
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    template: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &MdspliceConfig,
) {
    let source = read_file(path);

    let context = TransformContext {
        parse: config.parse_options(),
        assemble: config.assemble_options(),
        template: template.map(read_file),
        base_dir: config.images.base_dir().unwrap_or_else(|| input_dir(path)),
    };

    let output = transforms::execute_transform(&source, transform, &context, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });

    print!("{output}");
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("Stages:");
    println!("  blocks    - Block records parsed from the source lines");
    println!("  runs      - Styled inline runs of paragraphs and list items");
    println!("  document  - Template body after assembly\n");

    println!("Formats:");
    println!("  json      - JSON output (blocks, runs)");
    println!("  treeviz   - Tree visualization (blocks, document)\n");

    println!("Available transform combinations:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn input_dir(input: &str) -> PathBuf {
    Path::new(input)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

fn load_cli_config(explicit_path: Option<&str>) -> MdspliceConfig {
    let loader = Loader::new().with_optional_file("mdsplice.toml");
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

fn apply_config_overrides(config: &mut MdspliceConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["page-break", "page-break-before"]) {
        config.render.page_break_before = parse_bool_arg("page-break", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["spacer-after-table"]) {
        config.render.spacer_after_table = parse_bool_arg("spacer-after-table", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["skip-front-matter"]) {
        config.markup.skip_front_matter = parse_bool_arg("skip-front-matter", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["skip-title-heading", "skip-title"]) {
        config.render.skip_title_heading = parse_bool_arg("skip-title-heading", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["skip-math-lines", "skip-math"]) {
        config.render.skip_math_lines = parse_bool_arg("skip-math-lines", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["skip-anchor-links"]) {
        config.render.skip_anchor_links = parse_bool_arg("skip-anchor-links", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["image-width-cm", "image-width"]) {
        config.images.width_cm = match raw.parse::<f32>() {
            Ok(width) if width > 0.0 => width,
            _ => {
                eprintln!("Invalid width '{raw}' for --extra-image-width-cm");
                std::process::exit(1);
            }
        };
    }
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
