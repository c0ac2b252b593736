//! # Stratify BOQ CLI
//!
//! Command line front end for `.boq` project files:
//!
//! ```text
//! boq init tower.boq --name "Harbour View" --sample
//! boq validate tower.boq
//! boq calculate tower.boq --format json
//! ```

mod cli;
mod logging;
mod output;
mod sample;

use std::process::ExitCode;

use clap::Parser;

use boq_core::errors::{CalcError, CalcResult};
use boq_core::file_io::{load_project, load_project_with_lock_check, save_project, FileLock};
use boq_core::project::Project;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> CalcResult<()> {
    match command {
        Commands::Init {
            path,
            name,
            client,
            estimator,
            sample,
            force,
        } => {
            if path.exists() && !force {
                return Err(CalcError::file_error(
                    "create",
                    path.display().to_string(),
                    "file already exists (use --force to overwrite)",
                ));
            }

            let project = if sample {
                sample::sample_project(&name, &client, &estimator)
            } else {
                Project::new(name, client, estimator.clone())
            };

            let _lock = FileLock::acquire(&path, estimator)?;
            save_project(&project, &path)?;
            println!("Created {}", path.display());
            Ok(())
        }

        Commands::Validate { path } => {
            let project = load_project(&path)?;
            project.validate()?;
            println!(
                "{}: {} floors, {} unit templates, {} area materials - OK",
                path.display(),
                project.floors.len(),
                project.unit_templates.len(),
                project.area_materials.len(),
            );
            Ok(())
        }

        Commands::Calculate { path, format, summary } => {
            let (project, lock) = load_project_with_lock_check(&path)?;
            if let Some(info) = lock {
                tracing::warn!(
                    holder = %info.user_id,
                    since = %info.locked_at,
                    "project is being edited, report reflects the last saved state"
                );
            }

            let report = project.calculate()?;
            for (item, warning) in report.warnings() {
                tracing::info!(item, code = warning.code(), "{}", warning);
            }

            output::output_report(format, &project, &report, summary).map_err(CalcError::serialization)
        }
    }
}
