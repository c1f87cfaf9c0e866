use clap::Parser;
use std::io;
use tracing::{debug, error, info};

use rename_files::cli::Args;
use rename_files::error::AppError;
use rename_files::executor::{confirm_batch, execute_plan};
use rename_files::logging;
use rename_files::output::Reporter;
use rename_files::plan::build_plan;
use rename_files::scanner::scan_files;
use rename_files::transform::Transformer;

fn main() {
    let args = Args::parse();

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    if !args.dir.exists() {
        return Err(AppError::DirectoryNotFound {
            path: args.dir.clone(),
        });
    }
    if !args.dir.is_dir() {
        return Err(AppError::NotADirectory {
            path: args.dir.clone(),
        });
    }

    // Resolve the mode and compile any pattern before touching the
    // filesystem: a bad regex must fail the run with zero renames done.
    let mode = args.rename_mode().ok_or(AppError::NoPattern)?;
    debug!(mode = mode.description(), "Selected rename mode");
    let transformer = Transformer::new(mode)?;

    let mut reporter = Reporter::new();

    let files = scan_files(&args.dir, args.ext.as_deref(), args.recursive)?;
    if files.is_empty() {
        reporter.no_files_found();
        return Ok(());
    }

    info!(count = files.len(), "Enumeration complete");
    reporter.found(files.len());

    let plan = build_plan(&files, &transformer);
    if plan.is_empty() {
        reporter.nothing_to_rename();
        return Ok(());
    }

    if args.dry_run {
        reporter.preview(&plan);
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();

    if !args.interactive {
        reporter.preview(&plan);
        if !confirm_batch(&mut input, &mut reporter) {
            info!("Batch declined");
            reporter.batch_declined();
            return Ok(());
        }
    }

    let result = execute_plan(&plan, args.interactive, &mut input, &mut reporter);
    reporter.summary(&result);

    if result.aborted {
        return Err(AppError::Aborted);
    }

    Ok(())
}
