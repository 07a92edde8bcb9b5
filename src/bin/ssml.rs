//! Command-line interface for ssml
//! This binary parses markup files and prints their tokens or tree in different formats.
//!
//! Usage:
//!   ssml `<path>` [--format `<format>`] [--config `<file>`] [--builder `<builder>`] [--warnings]
//!   ssml --list-formats                                         - List all available formats

use clap::{Arg, ArgAction, ArgMatches, Command};
use ssml::ssml::config::{Loader, SsmlConfig};
use ssml::ssml::processor::{
    available_formats, format_descriptions, process_file, ProcessingSpec,
};
use ssml::Builder;

fn main() {
    let matches = Command::new("ssml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting speech-synthesis markup files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the markup file")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default from configuration: ast-treeviz)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("builder")
                .long("builder")
                .short('b')
                .help("Tree building design")
                .value_parser(["stack", "recursive"]),
        )
        .arg(
            Arg::new("warnings")
                .long("warnings")
                .short('w')
                .help("Print parse warnings to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    let Some(path) = matches.get_one::<String>("path") else {
        eprintln!("Error: a path is required");
        std::process::exit(1);
    };
    handle_process_command(path, &config);
}

/// Build the configuration from defaults, an optional file and CLI overrides
fn load_config(matches: &ArgMatches) -> Result<SsmlConfig, config::ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.format(format)?;
    }
    if let Some(builder) = matches.get_one::<String>("builder") {
        let builder: Builder = builder.parse().map_err(config::ConfigError::Message)?;
        loader = loader.builder(builder)?;
    }
    if matches.get_flag("warnings") {
        loader = loader.warnings(true)?;
    }
    loader.build()
}

/// Handle the default processing command
fn handle_process_command(path: &str, config: &SsmlConfig) {
    let spec = ProcessingSpec::from_string(&config.output.format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("\nAvailable formats:");
        for format in available_formats() {
            eprintln!("  {}", format);
        }
        std::process::exit(1);
    });

    let processed = process_file(path, &spec, config).unwrap_or_else(|e| {
        eprintln!("Processing error: {}", e);
        std::process::exit(1);
    });

    if config.output.warnings {
        for warning in &processed.warnings {
            eprintln!("warning: {}", warning);
        }
    }

    print!("{}", processed.output);
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for (format, description) in format_descriptions() {
        println!("  {:<14}{}", format, description);
    }
}
