//! `bdsoil` command-line entry point.
//!
//! Parses the command line, loads configuration, opens the store and runs
//! one command. Every command except `register` signs in with the global
//! `--username`/`--password` first.
//!
//! # Architecture
//!
//! ```text
//! CLI --> AppConfig --> App (catalog + store) --> auth gate --> command handler
//! ```
//!
//! Results go to stdout; logs and hints go to stderr.

mod cli;
mod commands;
mod config;
mod error;
mod locate;
mod session;

use std::io::Write;
use std::process::ExitCode;

use bdsoil_geo::http_resolver;
use bdsoil_ledger::{ProfileChanges, Registration};
use bdsoil_types::{LandId, UserId};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, LandCommand, LocateArgs, ProfileCommand, ReportCommand};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::session::{App, Credentials};

/// Application entry point.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Load configuration, install logging, open the store and run the command.
async fn run(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(
        config = %cli.config.display(),
        database = %config.database.url,
        "bdsoil starting"
    );

    let credentials = Credentials {
        username: cli.username,
        password: cli.password,
    };
    let app = App::open(config).await?;
    let mut stdout = std::io::stdout();
    let result = dispatch(&app, &credentials, cli.command, &mut stdout).await;
    app.close().await;
    result
}

/// Sign in and suggest adding land when the user has none.
async fn sign_in(app: &App, credentials: &Credentials) -> Result<UserId, AppError> {
    let user = app.authenticate(credentials).await?;
    commands::first_land_hint(app, user, &mut std::io::stderr()).await?;
    Ok(user)
}

async fn dispatch<W: Write>(
    app: &App,
    credentials: &Credentials,
    command: Command,
    out: &mut W,
) -> Result<(), AppError> {
    match command {
        Command::Register(args) => {
            let registration = Registration {
                username: credentials.username().to_owned(),
                password: credentials.password().to_owned(),
                national_id: args.nid,
                name: args.name,
                phone: args.phone,
            };
            commands::register(app, &registration, out).await
        }

        Command::Profile(command) => profile(app, credentials, command, out).await,
        Command::Land(command) => land(app, credentials, command, out).await,

        Command::Crops { soil, season } => {
            sign_in(app, credentials).await?;
            commands::crops(app, soil, &season, out)
        }
        Command::Fertilizer { crop } => {
            sign_in(app, credentials).await?;
            commands::fertilizer(app, &crop, out)
        }
        Command::Irrigation { crop, water } => {
            sign_in(app, credentials).await?;
            commands::irrigation(&crop, water, out)
        }
        Command::Pest { description } => {
            sign_in(app, credentials).await?;
            commands::pest(app, &description, out)
        }
        Command::Price { crop } => {
            sign_in(app, credentials).await?;
            commands::price(app, crop.as_deref(), out)
        }
        Command::Weather => {
            sign_in(app, credentials).await?;
            commands::weather(out)
        }
        Command::Profit => {
            let user = sign_in(app, credentials).await?;
            commands::profit(app, user, out).await
        }

        Command::Report(ReportCommand::Csv { out: path }) => {
            let user = sign_in(app, credentials).await?;
            commands::report_csv(app, user, path.as_deref(), out).await
        }
        Command::Report(ReportCommand::Pdf { out_dir }) => {
            let user = sign_in(app, credentials).await?;
            commands::report_pdf(app, user, out_dir, out).await
        }

        Command::Locate(args) => {
            sign_in(app, credentials).await?;
            locate_with(app, args, out).await
        }
    }
}

async fn profile<W: Write>(
    app: &App,
    credentials: &Credentials,
    command: ProfileCommand,
    out: &mut W,
) -> Result<(), AppError> {
    match command {
        ProfileCommand::Show => {
            let user = sign_in(app, credentials).await?;
            commands::profile_show(app, user, out).await
        }
        ProfileCommand::Update {
            new_username,
            nid,
            name,
            phone,
            profile_pic,
        } => {
            let user = sign_in(app, credentials).await?;
            let changes = ProfileChanges {
                username: new_username,
                national_id: nid,
                name,
                phone,
                profile_pic,
            };
            commands::profile_update(app, user, &changes, out).await
        }
    }
}

async fn land<W: Write>(
    app: &App,
    credentials: &Credentials,
    command: LandCommand,
    out: &mut W,
) -> Result<(), AppError> {
    match command {
        LandCommand::Add {
            location,
            area,
            soil,
            gps,
            resolve,
        } => {
            let user = app.authenticate(credentials).await?;
            let location = match (location, gps.as_deref()) {
                (Some(location), _) => location,
                (None, Some(gps)) if resolve => {
                    let resolver =
                        http_resolver(&app.config.provider_config(), app.config.debounce())?;
                    resolver.resolve_text(gps).await?.address
                }
                (None, _) => String::new(),
            };
            commands::land_add(app, user, &location, area, soil, gps.as_deref(), out).await
        }
        LandCommand::List => {
            let user = sign_in(app, credentials).await?;
            commands::land_list(app, user, out).await
        }
        LandCommand::Delete {
            id,
            confirm_password,
        } => {
            let user = sign_in(app, credentials).await?;
            commands::land_delete(app, user, LandId(id), &confirm_password, out).await
        }
    }
}

async fn locate_with<W: Write>(app: &App, args: LocateArgs, out: &mut W) -> Result<(), AppError> {
    let resolver = http_resolver(&app.config.provider_config(), app.config.debounce())?;
    if let Some(gps) = args.gps {
        locate::from_gps(&resolver, &gps, out).await
    } else if args.current {
        locate::current(&resolver, out).await
    } else if args.interactive {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        locate::interactive(&resolver, stdin, out).await
    } else if let Some(raw) = args.map_message {
        locate::map_message(&resolver, &raw, out)
    } else {
        Err(AppError::Input(
            "choose one of --gps, --current, --interactive or --map-message".to_owned(),
        ))
    }
}
