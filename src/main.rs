use std::process::ExitCode;

use oxid_query::{config::DemoConfig, demo::{self, DemoError, REPORTS}};
use rustyline::{error::ReadlineError, DefaultEditor};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn print_reports() {
    for (name, description) in REPORTS {
        println!("  {:<16} {}", name, description);
    }
}

fn run(name: &str, config: &DemoConfig) -> Result<(), DemoError> {
    demo::run_report(name, config, &mut |line: &str| println!("{}", line))
}

// Interactive prompt: a report name runs it, 'list' shows them, 'quit' leaves.
fn repl(config: &DemoConfig) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("oxidq> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;
                match line {
                    "quit" | "exit" => break,
                    "list" | "help" => print_reports(),
                    name => {
                        if let Err(e) = run(name, config) {
                            println!("{}", e);
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    println!("OxidQuery - deferred queries over in-memory data");
    let config = DemoConfig::new();
    let reports: Vec<String> = std::env::args().skip(1).collect();

    if reports.is_empty() {
        if let Err(e) = repl(&config) {
            error!(error = %e, "prompt failed");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    for name in &reports {
        println!("== {}", name);
        if let Err(e) = run(name, &config) {
            error!(report = name.as_str(), error = %e, "report failed");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
