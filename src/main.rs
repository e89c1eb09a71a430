/*!
 * Command-line interface for folder-to-llm
 */

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use folder_to_llm::config::{Args, Config};
use folder_to_llm::confirm::{confirm, Confirmation};
use folder_to_llm::report::{Reporter, ScanReport};
use folder_to_llm::scanner::Scanner;
use folder_to_llm::writer::write_output;
use folder_to_llm::{render_folder, Result};

enum Outcome {
    Written,
    Cancelled,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(Config::from_args(args)) {
        Ok(Outcome::Written) => ExitCode::SUCCESS,
        Ok(Outcome::Cancelled) => {
            eprintln!("Operation cancelled.");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(mut config: Config) -> Result<Outcome> {
    config.validate()?;

    // Only draw progress when stdout is free for the document itself
    let progress = if config.output_file.is_some() {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_prefix("Reading");
        bar
    } else {
        ProgressBar::hidden()
    };

    let scanner = Scanner::new(config.clone(), progress.clone());

    if config.confirm {
        let stdin = io::stdin();
        let decision = confirm(
            &scanner,
            config.tree_style,
            config.exclude_patterns.clone(),
            stdin.lock(),
            io::stderr(),
        )?;
        match decision {
            Confirmation::Proceed(patterns) => config.exclude_patterns = patterns,
            Confirmation::Abort => return Ok(Outcome::Cancelled),
        }
    }

    progress.enable_steady_tick(Duration::from_millis(100));
    let output = render_folder(&scanner, &config)?;
    progress.finish_and_clear();

    write_output(&output, config.output_file.as_deref())?;

    if let Some(path) = &config.output_file {
        let report = ScanReport {
            output_file: path.display().to_string(),
            format: output.format.to_string(),
            statistics: scanner.get_statistics(),
        };
        eprintln!("\n{}", Reporter::generate_report(&report));
        eprintln!("Output written to {}", path.display());
    }

    Ok(Outcome::Written)
}
