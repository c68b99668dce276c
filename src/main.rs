//! fleetop - fleet tracking data layer with a command-line front end

use clap::Parser;
use log::LevelFilter;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod store;

use cli::{CarCommands, Cli, Commands, GlobalOptions, UserCommands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins unless `--debug` is given; the fallback level is `warn`.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module("fleetop", LevelFilter::Debug);
    }
    builder.format_timestamp_millis().init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Status => cli::status::run(&opts).await,
        Commands::Car(car_cmd) => match car_cmd {
            CarCommands::List {
                filters,
                pagination,
            } => cli::car::list(&opts, &filters, &pagination).await,
            CarCommands::Get { car_id } => cli::car::get(&opts, &car_id).await,
            CarCommands::Summary => cli::car::summary(&opts).await,
            CarCommands::Create(args) => cli::car::create(&opts, args).await,
            CarCommands::Update { car_id, changes } => {
                cli::car::update(&opts, &car_id, &changes).await
            }
            CarCommands::SetStatus { car_id, status } => {
                cli::car::set_status(&opts, &car_id, status).await
            }
            CarCommands::Locate {
                car_id,
                latitude,
                longitude,
                address,
            } => cli::car::locate(&opts, &car_id, latitude, longitude, address).await,
            CarCommands::Delete { car_id } => cli::car::delete(&opts, &car_id).await,
            CarCommands::Assign { car_id, user_id } => {
                cli::car::assign(&opts, &car_id, &user_id).await
            }
            CarCommands::Unassign { car_id, user_id } => {
                cli::car::unassign(&opts, &car_id, &user_id).await
            }
        },
        Commands::User(user_cmd) => match user_cmd {
            UserCommands::List { pagination } => cli::user::list(&opts, &pagination).await,
            UserCommands::Get { user_id } => cli::user::get(&opts, &user_id).await,
            UserCommands::Register(args) => cli::user::register(&opts, args).await,
            UserCommands::Update { user_id, changes } => {
                cli::user::update(&opts, &user_id, &changes).await
            }
        },
    }
}
