use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command names accepted by `notemark apply`
// We need to duplicate this here since build scripts can't access src/ modules
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

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("notemark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for formatting, converting and editing Markdown notes")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a notemark.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log level for diagnostics on stderr")
                .value_parser(["off", "error", "warn", "info", "debug", "trace"])
                .global(true),
        )
        .subcommand(
            Command::new("format")
                .about("Canonicalize a note")
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats")
                .arg(input_arg())
                .arg(Arg::new("from").long("from").value_hint(ValueHint::Other))
                .arg(Arg::new("to").long("to").value_hint(ValueHint::Other))
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the paragraphs and runs of a note")
                .arg(input_arg())
                .arg(Arg::new("from").long("from").value_hint(ValueHint::Other)),
        )
        .subcommand(
            Command::new("apply")
                .about("Apply a formatting command to a selection")
                .arg(input_arg())
                .arg(
                    Arg::new("command")
                        .help("Formatting command")
                        .index(2)
                        .value_parser(clap::builder::PossibleValuesParser::new(COMMAND_NAMES)),
                )
                .arg(Arg::new("start").long("start"))
                .arg(Arg::new("end").long("end"))
                .arg(Arg::new("url").long("url").value_hint(ValueHint::Url))
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
                .arg(output_arg()),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "notemark", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "notemark", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "notemark", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
