// Command-line interface for notemark
//
// This binary is a reference host for the notemark-core library: it reads note Markdown from
// files, runs it through the same parse/normalize/command/serialize pipeline an editor
// embedding the library would, and writes the result back out.
//
// Usage:
//  notemark format <input> [--output <file>]                             - Canonicalize note Markdown
//  notemark convert <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats
//  notemark inspect <input> [--from <format>]                            - Show paragraphs and runs
//  notemark apply <input> <command> [--start N] [--end N] [--url URL] [--output <file>]
//                                                                         - Apply a formatting command
//
// Font and color preferences come from the configuration (notemark.toml in the working
// directory, or --config <path>), since normalization depends on them.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use flexi_logger::{Logger, LoggerHandle};
use notemark_config::{Loader, NotemarkConfig};
use notemark_core::{
    normalize, serialize, Document, EditorSession, FormatCommand, FormatRegistry, StyleOptions,
};
use std::fs;

const COMMAND_NAMES: &[&str] = &[
    "bold",
    "italic",
    "underline",
    "strikethrough",
    "list",
    "link",
    "h1",
    "h2",
    "h3",
    "body",
];

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("notemark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for formatting, converting and editing Markdown notes")
        .long_about(
            "notemark works with the line-oriented Markdown notes are stored in: headings 1-3,\n\
            bullet lists, bold, italic, underline, strikethrough and links.\n\n\
            Commands:\n  \
            - format:  Canonicalize a note\n  \
            - convert: Transform between formats (markdown, json, treeviz)\n  \
            - inspect: Show how a note is read, paragraph by paragraph\n  \
            - apply:   Apply a formatting command to a selection\n\n\
            Examples:\n  \
            notemark format note.md                       # Canonical Markdown on stdout\n  \
            notemark convert note.md --to json            # Full document model as JSON\n  \
            notemark apply note.md bold --start 0 --end 5 # Bold the first five chars",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a notemark.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level for diagnostics on stderr (overrides config and RUST_LOG)")
                .value_parser(clap::builder::PossibleValuesParser::new(LOG_LEVELS))
                .global(true),
        )
        .subcommand(
            Command::new("format")
                .about("Canonicalize a note")
                .long_about(
                    "Parse a note, normalize it with the configured fonts, and write it back.\n\n\
                    Markers come out in canonical order, '- ' bullets become '* ', and\n\
                    blanks move outside emphasis.\n\n\
                    Examples:\n  \
                    notemark format note.md\n  \
                    notemark format note.md -o note.md",
                )
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats")
                .long_about(
                    "Convert documents between formats.\n\n\
                    Supported formats:\n  \
                    - markdown: Note Markdown (.md)\n  \
                    - json:     Document model with fonts and colors (.json)\n  \
                    - treeviz:  Tree of paragraphs and runs (output only)\n\n\
                    The source format is auto-detected from the file extension.",
                )
                .arg(input_arg())
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
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the paragraphs and runs of a note")
                .arg(input_arg())
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (defaults to markdown)")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("apply")
                .about("Apply a formatting command to a selection")
                .long_about(
                    "Apply a formatting command to the chars between --start and --end.\n\n\
                    Offsets count characters, line breaks included. Without --end the\n\
                    selection is a caret, which only matters for list, heading and link\n\
                    commands.\n\n\
                    Examples:\n  \
                    notemark apply note.md h2 --start 0\n  \
                    notemark apply note.md link --start 4 --end 9 --url https://example.com",
                )
                .arg(input_arg())
                .arg(
                    Arg::new("command")
                        .help("Formatting command")
                        .required(true)
                        .index(2)
                        .value_parser(clap::builder::PossibleValuesParser::new(COMMAND_NAMES)),
                )
                .arg(
                    Arg::new("start")
                        .long("start")
                        .help("Selection start offset")
                        .default_value("0")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("end")
                        .long("end")
                        .help("Selection end offset (defaults to the start)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("url")
                        .long("url")
                        .help("Link target for the link command")
                        .value_hint(ValueHint::Url),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the resulting Markdown and selection as JSON")
                        .action(ArgAction::SetTrue),
                )
                .arg(output_arg()),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        matches.get_one::<String>("log-level").map(|s| s.as_str()),
    );
    let _logger = init_logging(&config, matches.contains_id("log-level"));
    let options = StyleOptions::from(&config.editor);
    log::debug!("style options: {options:?}");

    match matches.subcommand() {
        Some(("format", sub_matches)) => handle_format_command(sub_matches, &options),
        Some(("convert", sub_matches)) => handle_convert_command(sub_matches, &options),
        Some(("inspect", sub_matches)) => handle_inspect_command(sub_matches, &options),
        Some(("apply", sub_matches)) => handle_apply_command(sub_matches, &options),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>, log_level: Option<&str>) -> NotemarkConfig {
    let loader = Loader::new().with_optional_file("notemark.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let loader = match log_level {
        Some(level) => loader.set_override("logging.level", level),
        None => Ok(loader),
    };

    loader.and_then(Loader::build).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Starts stderr logging. RUST_LOG wins over the configured level unless --log-level was
/// given explicitly.
fn init_logging(config: &NotemarkConfig, explicit: bool) -> Option<LoggerHandle> {
    let level = config.logging.level.as_str();
    let logger = if explicit {
        Logger::try_with_str(level)
    } else {
        Logger::try_with_env_or_str(level)
    };
    match logger.and_then(|logger| logger.log_to_stderr().start()) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logging: {err}");
            None
        }
    }
}

fn read_input(input: &str) -> String {
    fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    })
}

fn write_output(output: Option<&String>, text: &str) {
    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{text}"),
    }
}

/// Parses `source` in `from` and normalizes it with the configured preferences.
fn load_document(
    registry: &FormatRegistry,
    source: &str,
    from: &str,
    options: &StyleOptions,
) -> Document {
    let doc = registry.parse(source, from).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    normalize(&doc, options)
}

fn detect_format(registry: &FormatRegistry, input: &str, explicit: Option<&String>) -> String {
    if let Some(format) = explicit {
        return format.to_string();
    }
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn handle_format_command(matches: &ArgMatches, options: &StyleOptions) {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let registry = FormatRegistry::default();
    let doc = load_document(&registry, &read_input(input), "markdown", options);
    write_output(matches.get_one::<String>("output"), &serialize(&doc));
}

fn handle_convert_command(matches: &ArgMatches, options: &StyleOptions) {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let to = matches.get_one::<String>("to").expect("to is required");
    let registry = FormatRegistry::default();
    let from = detect_format(&registry, input, matches.get_one::<String>("from"));

    // Validate formats exist
    for format in [from.as_str(), to.as_str()] {
        if let Err(e) = registry.get(format) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    let doc = load_document(&registry, &read_input(input), &from, options);
    let result = registry.serialize(&doc, to).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    write_output(matches.get_one::<String>("output"), &result);
}

fn handle_inspect_command(matches: &ArgMatches, options: &StyleOptions) {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let registry = FormatRegistry::default();
    let from = matches
        .get_one::<String>("from")
        .cloned()
        .or_else(|| registry.detect_format_from_filename(input))
        .unwrap_or_else(|| "markdown".to_string());

    let doc = load_document(&registry, &read_input(input), &from, options);
    let output = registry.serialize(&doc, "treeviz").unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });
    print!("{output}");
}

fn handle_apply_command(matches: &ArgMatches, options: &StyleOptions) {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let name = matches
        .get_one::<String>("command")
        .expect("command is required");
    let start = *matches.get_one::<usize>("start").expect("start has a default");
    let end = matches.get_one::<usize>("end").copied().unwrap_or(start);

    let command = match name.parse::<FormatCommand>() {
        Ok(FormatCommand::InsertLink { .. }) => FormatCommand::InsertLink {
            url: matches.get_one::<String>("url").cloned(),
        },
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut session = EditorSession::new(&read_input(input), *options);
    session.select(start..end);
    session.apply(&command);

    let markdown = serialize(session.document());
    if matches.get_flag("json") {
        let selection = session.selection();
        let report = serde_json::json!({
            "command": command.name(),
            "markdown": markdown,
            "selection": { "start": selection.start, "end": selection.end },
        });
        let text = serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });
        write_output(matches.get_one::<String>("output"), &format!("{text}\n"));
    } else {
        write_output(matches.get_one::<String>("output"), &markdown);
    }
}
