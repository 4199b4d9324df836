//! Command-line interface for koji
//! This binary lexes koji files and reports what the lexer sees.
//!
//! Usage:
//!   koji tokens `<path>` [--format `<format>`]  - Print the token stream
//!   koji check `<path>`                       - Report lexical errors, exit 1 if there are any
//!   koji classes `<path>`                     - Print every character with its display classes
//!   koji list-formats                       - List available output formats
//!
//! `-` reads the source from stdin. `--config <file>` layers a TOML file over the built-in
//! defaults. Logging goes to stderr and is controlled by `KOJI_LOG` or `-v`/`-vv`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use koji::koji::config::{KojiConfig, Loader};
use koji::koji::document::Document;
use koji::koji::formats::{serialize_tokens, FormatRegistry};
use koji::koji::mode::Mode;
use std::io::Read;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("koji")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting koji transcription markup")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v debug, -vv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Configuration file layered over the built-in defaults")
                .global(true),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of a file")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (see list-formats)")
                        .default_value("tokenviz"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Report lexical errors; exits with status 1 if there are any")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("classes")
                .about("Print every character with its display classes")
                .arg(path_arg()),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    init_logging(matches.get_count("verbose"));
    let config = load_config(matches.get_one::<String>("config"));

    match matches.subcommand() {
        Some(("tokens", tokens_matches)) => {
            let format = tokens_matches
                .get_one::<String>("format")
                .map_or("tokenviz", String::as_str);
            handle_tokens_command(&config, path_of(tokens_matches), format);
        }
        Some(("check", check_matches)) => {
            handle_check_command(&config, path_of(check_matches));
        }
        Some(("classes", classes_matches)) => {
            handle_classes_command(&config, path_of(classes_matches));
        }
        Some(("list-formats", _)) => {
            handle_list_formats_command();
        }
        _ => unreachable!(),
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the koji file, or - for stdin")
        .required(true)
        .index(1)
}

fn path_of(matches: &ArgMatches) -> &str {
    matches.get_one::<String>("path").map_or("-", String::as_str)
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "koji=warn",
        1 => "koji=debug",
        _ => "koji=trace",
    }
}

fn init_logging(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("KOJI_LOG")
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(verbosity))),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn load_config(path: Option<&String>) -> KojiConfig {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        std::process::exit(1);
    })
}

fn read_source(path: &str) -> String {
    let result = if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source).map(|_| source)
    } else {
        std::fs::read_to_string(path)
    };
    result.unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

fn open_document(config: &KojiConfig, path: &str) -> Document {
    let mode = Mode::from_config(config).unwrap_or_else(|e| {
        eprintln!("Invalid mode configuration: {}", e);
        std::process::exit(1);
    });
    let mut document = Document::with_config(mode, config.document.clone());
    document.update_source(&read_source(path));
    document
}

/// Handle the tokens command
fn handle_tokens_command(config: &KojiConfig, path: &str, format: &str) {
    let document = open_document(config, path);
    let output = serialize_tokens(document.tokens(), format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}

/// Handle the check command
fn handle_check_command(config: &KojiConfig, path: &str) {
    let document = open_document(config, path);
    let diagnostics = document.diagnostics();
    for diagnostic in &diagnostics {
        println!(
            "{}:{}:{}: {} [{}]",
            path,
            diagnostic.start_position.line + 1,
            diagnostic.start_position.column + 1,
            diagnostic.message,
            diagnostic.code
        );
    }
    if !diagnostics.is_empty() {
        std::process::exit(1);
    }
}

/// Handle the classes command
fn handle_classes_command(config: &KojiConfig, path: &str) {
    let document = open_document(config, path);
    for (number, line) in document.lines().iter().enumerate() {
        println!("line {}", number + 1);
        for character in line.iter() {
            let classes = if character.classes.is_empty() {
                "-".to_string()
            } else {
                character.classes.join(" ")
            };
            println!("{:>6} {:?} {}", character.index, character.display, classes);
        }
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");
    for name in registry.list_formats() {
        let description = registry.get(&name).map_or("", |f| f.description());
        println!("  {}", name);
        println!("    {}", description);
    }
}
