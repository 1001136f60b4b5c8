//! Herdcycle CLI - Track the reproductive cycle of a dairy herd

use clap::Parser;
use herdcycle::cli::commands;
use herdcycle::cli::{Cli, Commands};
use herdcycle::domain::ActionKind;
use herdcycle::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over the flags
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error [{}]: {}", e.code(), e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> herdcycle::Result<()> {
    let cwd = cli.cwd.as_deref();
    let user = cli.user.as_deref();

    match cli.command {
        Some(Commands::Init { force }) => commands::init::run(cwd, force, cli.dry_run).await,
        Some(Commands::Predict { biometrics }) => {
            commands::predict::run(cwd, user, biometrics.into(), cli.dry_run).await
        }
        Some(Commands::Reevaluate { id, biometrics }) => {
            commands::predict::reevaluate(cwd, user, id, biometrics.into(), cli.dry_run).await
        }
        Some(Commands::List {
            view,
            name,
            sort,
            desc,
            json,
        }) => {
            commands::list::run(cwd, &view, name.as_deref(), sort.as_deref(), desc, json).await
        }
        Some(Commands::Show { id, json }) => commands::show::run(cwd, id, json).await,
        Some(Commands::Inseminate { id }) => {
            commands::transition::run(cwd, user, id, ActionKind::MarkInseminated, cli.dry_run)
                .await
        }
        Some(Commands::Pregnant { id }) => {
            commands::transition::run(cwd, user, id, ActionKind::DeclarePregnant, cli.dry_run)
                .await
        }
        Some(Commands::Revert { id }) => {
            commands::transition::run(cwd, user, id, ActionKind::RevertToInseminated, cli.dry_run)
                .await
        }
        Some(Commands::Delete { id }) => {
            commands::transition::run(cwd, user, id, ActionKind::Delete, cli.dry_run).await
        }
        Some(Commands::Summary { json }) => commands::summary::run(cwd, json).await,
        Some(Commands::Export { reports }) => {
            commands::export::run(cwd, &reports, cli.dry_run).await
        }
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
