//! xtuml-ts: compiles an xTUML JSON model into TypeScript modules.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use xtuml_compiler::{CompileResult, Compiler, CompilerConfig, EmitMode};

mod error;
mod ui;

use error::CliError;

#[derive(Parser)]
#[command(name = "xtuml-ts", version)]
#[command(about = "Compiles an xTUML JSON model into TypeScript interfaces and classes")]
struct Cli {
    /// xTUML model file (JSON)
    input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Write into a non-empty output directory
    #[arg(short, long)]
    force: bool,

    /// Empty the output directory before compiling
    #[arg(long)]
    clean: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Write interfaces and classes to separate files
    #[arg(long)]
    split: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        ui::disable_colors();
    }
    init_tracing(cli.verbose, cli.no_color);

    let outcome = std::panic::catch_unwind(|| run(&cli))
        .unwrap_or_else(|_| Err(CliError::Unexpected("compiler panicked".to_string())));

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            ui::error("Compilation failed");
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(code)
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_tracing(verbose: bool, no_color: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let started = Instant::now();
    ui::print_compact_header(env!("CARGO_PKG_VERSION"));

    check_input(&cli.input)?;
    prepare_output(&cli.output, cli.force, cli.clean)?;

    let config = CompilerConfig {
        input: cli.input.clone(),
        out_dir: cli.output.clone(),
        emit_mode: if cli.split {
            EmitMode::Split
        } else {
            EmitMode::Merged
        },
    };

    let spinner = ui::spinner("Compiling model...");
    let result = Compiler::new(config).compile();
    spinner.finish_and_clear();
    let result = result?;

    print_summary(&result, &cli.output, started.elapsed());
    Ok(())
}

fn check_input(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::InputMissing {
            path: input.to_path_buf(),
        });
    }
    if !input.is_file() {
        return Err(CliError::InputNotAFile {
            path: input.to_path_buf(),
        });
    }
    Ok(())
}

fn prepare_output(out_dir: &Path, force: bool, clean: bool) -> Result<(), CliError> {
    if !out_dir.exists() {
        return Ok(());
    }
    if !out_dir.is_dir() {
        return Err(CliError::OutputNotADirectory {
            path: out_dir.to_path_buf(),
        });
    }

    if clean {
        clean_directory(out_dir)?;
        ui::info(&format!("Cleaned {}", out_dir.display()));
        return Ok(());
    }

    let is_empty = std::fs::read_dir(out_dir)
        .map_err(|e| CliError::io(out_dir, e))?
        .next()
        .is_none();
    if !is_empty && !force {
        return Err(CliError::OutputNotEmpty {
            path: out_dir.to_path_buf(),
        });
    }
    Ok(())
}

/// Removes everything inside `dir`, keeping the directory itself.
fn clean_directory(dir: &Path) -> Result<(), CliError> {
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| CliError::Io {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        let removed = if entry.file_type().is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        };
        removed.map_err(|e| CliError::io(path, e))?;
    }
    Ok(())
}

/// Number of `.ts` files under `dir`.
fn count_generated_files(dir: &Path) -> usize {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "ts"))
        .count()
}

fn print_summary(result: &CompileResult, out_dir: &Path, elapsed: Duration) {
    ui::box_header(&format!("{} v{}", result.system_name, result.version));
    for domain in &result.domains {
        ui::box_line(&ui::domain_line(
            &domain.name,
            domain.classes + domain.association_classes,
            domain.relationships,
            domain.state_machines,
        ));
    }
    ui::box_footer();

    if !result.warnings.is_empty() {
        println!();
        for warning in &result.warnings {
            ui::warning(&warning.to_string());
        }
    }

    ui::divider();

    let location = std::fs::canonicalize(out_dir).unwrap_or_else(|_| out_dir.to_path_buf());
    ui::success(&format!(
        "{} classes compiled, {} TypeScript files generated",
        result.total_classes(),
        count_generated_files(out_dir)
    ));
    ui::info(&format!("Output: {}", location.display()));
    ui::dim(&format!("Done in {:.2?}", elapsed));
}
