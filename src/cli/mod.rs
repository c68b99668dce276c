//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

use crate::models::CarStatus;

pub mod args;
pub mod car;
pub mod context;
pub mod status;
pub mod user;

pub use args::{
    CarFilterArgs, CreateCarArgs, GlobalOptions, OutputFormat, PaginationArgs, RegisterUserArgs,
    UpdateCarArgs, UpdateUserArgs,
};
pub use context::CommandContext;

/// fleetop - browse and manage a rental fleet from the terminal
#[derive(Parser, Debug)]
#[command(name = "fleetop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "FLEETOP_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "FLEETOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the fleet API base URL
    #[arg(long, global = true, env = "FLEETOP_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Serve data from a fixture file instead of the API ("bundled" for built-in data)
    #[arg(long, global = true, env = "FLEETOP_FIXTURES", hide_env = true)]
    pub fixtures: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "FLEETOP_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show configuration and data source status
    Status,

    /// Browse and manage cars
    #[command(subcommand)]
    Car(CarCommands),

    /// Browse and register drivers
    #[command(subcommand)]
    User(UserCommands),
}

/// Car subcommands
#[derive(Subcommand, Debug)]
pub enum CarCommands {
    /// List cars
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        filters: CarFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Show a single car
    Get {
        /// Car ID
        car_id: String,
    },

    /// Show fleet-wide counts by status
    Summary,

    /// Add a car to the fleet
    Create(CreateCarArgs),

    /// Edit a car's details
    Update {
        /// Car ID
        car_id: String,

        #[command(flatten)]
        changes: UpdateCarArgs,
    },

    /// Change a car's status
    SetStatus {
        /// Car ID
        car_id: String,

        /// New status (available, rented, maintenance, inactive)
        status: CarStatus,
    },

    /// Record a car's position
    Locate {
        /// Car ID
        car_id: String,

        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// Street address or landmark
        #[arg(long)]
        address: Option<String>,
    },

    /// Remove a car from the fleet
    Delete {
        /// Car ID
        car_id: String,
    },

    /// Assign a car to a driver
    Assign {
        /// Car ID
        car_id: String,

        /// User ID
        user_id: String,
    },

    /// Release a car from a driver
    Unassign {
        /// Car ID
        car_id: String,

        /// User ID
        user_id: String,
    },
}

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List registered drivers
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Show a single driver
    Get {
        /// User ID
        user_id: String,
    },

    /// Register a new driver
    Register(RegisterUserArgs),

    /// Edit a driver's contact details or status
    Update {
        /// User ID
        user_id: String,

        #[command(flatten)]
        changes: UpdateUserArgs,
    },
}
