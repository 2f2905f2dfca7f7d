use clap::{Parser, Subcommand};
use experience::prelude::*;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Inspect experience documents and evaluate templates against runtime data
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode and resolve a document, then print a summary and its node tree
    Inspect {
        /// Path to the experience JSON document
        document_path: String,
    },
    /// Evaluate a template against a runtime data snapshot
    Eval {
        /// The template, e.g. "Hello {{ user.name }}"
        template: String,
        /// Path to a runtime data JSON file ({ data, urlParameters, userInfo })
        #[arg(short, long)]
        data: Option<String>,
        /// URL parameter as key=value; may be repeated
        #[arg(short, long = "url", value_parser = parse_key_value)]
        url_parameters: Vec<(String, String)>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Inspect { document_path } => run_inspect(&document_path),
        Command::Eval {
            template,
            data,
            url_parameters,
        } => run_eval(&template, data.as_deref(), url_parameters),
    }
}

fn init_logging(verbose: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("experience={}", level))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_inspect(document_path: &str) {
    let total_start = Instant::now();

    let bytes = fs::read(document_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read document '{}': {}",
            document_path, e
        ))
    });

    let decode_start = Instant::now();
    let output = Decoder::default()
        .decode(&bytes)
        .unwrap_or_else(|e| exit_with_error(&format!("Decoding failed: {}", e)));
    let relationships = output.pending.len();
    let decode_duration = decode_start.elapsed();

    let resolve_start = Instant::now();
    let (experience, report) = output.resolve();
    let resolve_duration = resolve_start.elapsed();

    println!("\n--- Experience ---");
    println!("ID:             {}", experience.id);
    if let Some(name) = &experience.name {
        println!("Name:           {}", name);
    }
    if let Some(revision) = &experience.revision_id {
        println!("Revision:       {}", revision);
    }
    println!("Appearance:     {:?}", experience.appearance);
    println!("Nodes:          {}", experience.len());
    println!("Screens:        {}", experience.screens().count());
    println!("Fonts:          {}", experience.fonts.len());
    println!("Locales:        {}", experience.localization().len());
    match experience.initial_screen() {
        Some(screen) => println!("Initial Screen: {}", screen),
        None => println!(
            "Initial Screen: '{}' (missing)",
            experience.initial_screen_id
        ),
    }

    println!("\n--- Relationships ---");
    println!("Pending:        {}", relationships);
    println!("Resolved Links: {}", report.resolved);
    println!("Unresolved:     {}", report.unresolved.len());
    for reference in &report.unresolved {
        println!(
            "  -> {} .{} -> '{}'",
            reference.source, reference.field, reference.target
        );
    }

    for screen in experience.screens() {
        println!("\n--- Tree: {} ---", screen);
        print_tree(&experience, screen, 0);
    }

    println!("\n--- Performance Summary ---");
    println!("Decode:               {:?}", decode_duration);
    println!("Resolve:              {:?}", resolve_duration);
    println!("-----------------------------");
    println!("Total Execution:      {:?}", total_start.elapsed());
    println!();
}

fn print_tree(experience: &Experience, node: &Node, depth: usize) {
    println!("{}{}", "  ".repeat(depth), node);
    for child in experience.children_of(&node.id) {
        print_tree(experience, child, depth + 1);
    }
}

fn run_eval(template: &str, data_path: Option<&str>, url_parameters: Vec<(String, String)>) {
    let runtime = match data_path {
        Some(path) => RuntimeData::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load runtime data from '{}': {}", path, e))
        }),
        None => RuntimeData::default(),
    };
    let runtime = url_parameters
        .into_iter()
        .fold(runtime, |runtime, (key, value)| {
            runtime.with_url_parameter(key, value)
        });

    match try_evaluate(template, &runtime.context()) {
        Ok(output) => println!("{}", output),
        Err(e) => exit_with_error(&format!("Template produced no value: {}", e)),
    }
}

fn parse_key_value(input: &str) -> std::result::Result<(String, String), String> {
    input
        .split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, found '{}'", input))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
