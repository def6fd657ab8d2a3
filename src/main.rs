mod cli;

use clap::Parser;
use cli::{Args, Command, ScanArgs, ScanSettings};
use helm_vuln_scan::adapters::outbound::console::StderrProgressReporter;
use helm_vuln_scan::adapters::outbound::filesystem::TarGzChartArchive;
use helm_vuln_scan::adapters::outbound::process::{HelmCli, TrivyScanner};
use helm_vuln_scan::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use helm_vuln_scan::application::use_cases::ScanChartUseCase;
use helm_vuln_scan::config::{self, ConfigFile};
use helm_vuln_scan::logging;
use helm_vuln_scan::shared::error::{AppError, ExitCode, FatalError};
use helm_vuln_scan::shared::Result;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version arrive here too and are not failures
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    logging::init_tracing(args.verbose);

    let code = match args.command {
        Command::Scan(scan_args) => match run_scan(scan_args).await {
            Ok(()) => ExitCode::Success,
            Err(e) => {
                report_error(&e);
                exit_code_for(&e)
            }
        },
    };

    process::exit(code.as_i32());
}

async fn run_scan(args: ScanArgs) -> Result<()> {
    // Load config: explicit path, or auto-discovery in the current directory
    let config = load_config(args.config.as_deref())?.unwrap_or_default();
    let ScanSettings {
        request,
        format,
        output,
        helm_binary,
        trivy_binary,
    } = args.into_settings(&config)?;

    // Create adapters (Dependency Injection)
    let use_case = ScanChartUseCase::new(
        HelmCli::new(helm_binary),
        TarGzChartArchive::new(),
        TrivyScanner::new(trivy_binary),
        StderrProgressReporter::new(),
    );

    let response = use_case
        .execute_with_shutdown(request, shutdown_signal())
        .await?;

    eprintln!("{}", FormatterFactory::progress_message(format));
    let formatted_output = FormatterFactory::create(format).format(&response.report)?;

    PresenterFactory::create(PresenterType::for_output(&output)).present(&formatted_output)?;

    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<Option<ConfigFile>> {
    match explicit {
        Some(path) => config::load_config_from_path(path).map(Some),
        None => {
            let cwd = std::env::current_dir()?;
            config::discover_config(&cwd)
        }
    }
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    if let Some(fatal) = error.downcast_ref::<FatalError>() {
        return fatal.exit_code();
    }
    if let Some(AppError::Validation { .. }) = error.downcast_ref::<AppError>() {
        return ExitCode::InvalidArguments;
    }
    ExitCode::ApplicationError
}

fn report_error(error: &anyhow::Error) {
    if let Some(FatalError::Cancelled) = error.downcast_ref::<FatalError>() {
        eprintln!("\n🛑 Interrupted.");
        return;
    }

    eprintln!("\n❌ An error occurred:\n");
    eprintln!("{}", error);

    if let Some(FatalError::AllScansFailed { failures }) = error.downcast_ref::<FatalError>() {
        eprintln!();
        for failure in failures {
            eprintln!("   - {}: {}", failure.image, failure.reason);
        }
    }

    // Display error chain
    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("\nCaused by: {}", err);
        source = err.source();
    }

    eprintln!();
}
