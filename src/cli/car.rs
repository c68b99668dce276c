//! Car commands

use colored::Colorize;
use log::debug;
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{
    CarFilterArgs, CommandContext, CreateCarArgs, OutputFormat, PaginationArgs, UpdateCarArgs,
};
use crate::error::{Error, Result};
use crate::models::{Car, CarDisplay, CarStatus, SummaryDisplay};
use crate::output::{self, json, table};

/// Print a one-line confirmation, or the affected entity as JSON.
pub(crate) fn report<T: Serialize + ?Sized>(
    format: OutputFormat,
    message: &str,
    data: &T,
) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{} {}", "✓".green(), message),
        OutputFormat::Json => println!("{}", json::format_json(data)?),
    }
    Ok(())
}

fn print_car(format: OutputFormat, car: &Car) -> Result<()> {
    match format {
        OutputFormat::Table => output::print(&vec![CarDisplay::from(car)], format),
        OutputFormat::Json => {
            println!("{}", json::format_json(car)?);
            Ok(())
        }
    }
}

/// Run the car list command
pub async fn list(
    opts: &GlobalOptions,
    filters: &CarFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;

    let params = pagination.to_params();
    ctx.store.load_cars(params.as_ref()).await?;
    ctx.store.set_filter(filters.to_filter());

    let cars = ctx.store.filtered_cars();
    debug!("Showing {} of {} cars", cars.len(), ctx.store.cars().len());

    let display: Vec<CarDisplay> = cars.iter().map(CarDisplay::from).collect();
    match ctx.format {
        OutputFormat::Table => {
            println!(
                "{}",
                table::format_table_of(&display, ctx.store.cars().len(), "cars")
            );
            Ok(())
        }
        OutputFormat::Json => output::print(&display, ctx.format),
    }
}

/// Run the car get command
pub async fn get(opts: &GlobalOptions, car_id: &str) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    let car = ctx.store.get_car(car_id).await?;
    print_car(ctx.format, &car)
}

/// Run the car summary command
pub async fn summary(opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    ctx.store.load_cars(None).await?;

    let summary = ctx.store.fleet_summary();
    match ctx.format {
        OutputFormat::Table => output::print(&SummaryDisplay::rows(&summary), ctx.format),
        OutputFormat::Json => {
            println!("{}", json::format_json(&summary)?);
            Ok(())
        }
    }
}

/// Run the car create command
pub async fn create(opts: &GlobalOptions, args: CreateCarArgs) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    let car = ctx.store.create_car(args.into()).await?;
    report(
        ctx.format,
        &format!("Added {} ({})", car.name.bold(), car.id),
        &car,
    )
}

/// Run the car update command
pub async fn update(opts: &GlobalOptions, car_id: &str, changes: &UpdateCarArgs) -> Result<()> {
    if changes.is_empty() {
        return Err(Error::Other(
            "Nothing to update; pass at least one of --name, --rate, --plate, --mileage, --type"
                .to_string(),
        ));
    }

    let mut ctx = CommandContext::new(opts)?;
    let current = ctx.store.get_car(car_id).await?;

    let car = ctx.store.update_car(changes.apply(current)).await?;
    report(ctx.format, &format!("Updated {}", car.name.bold()), &car)
}

/// Run the car set-status command
pub async fn set_status(opts: &GlobalOptions, car_id: &str, status: CarStatus) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    ctx.store.get_car(car_id).await?;

    let car = ctx.store.update_car_status(car_id, status).await?;
    report(
        ctx.format,
        &format!("{} is now {}", car.name.bold(), car.status),
        &car,
    )
}

/// Run the car locate command
pub async fn locate(
    opts: &GlobalOptions,
    car_id: &str,
    latitude: f64,
    longitude: f64,
    address: Option<String>,
) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    ctx.store.get_car(car_id).await?;

    let car = ctx
        .store
        .update_car_location(car_id, latitude, longitude, address)
        .await?;
    report(
        ctx.format,
        &format!("{} located at {:.4}, {:.4}", car.name.bold(), latitude, longitude),
        &car,
    )
}

/// Run the car delete command
pub async fn delete(opts: &GlobalOptions, car_id: &str) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    let car = ctx.store.get_car(car_id).await?;
    ctx.store.delete_car(car_id).await?;

    report(
        ctx.format,
        &format!("Deleted {} ({})", car.name.bold(), car.id),
        &serde_json::json!({ "deleted": car.id }),
    )
}

/// Run the car assign command
pub async fn assign(opts: &GlobalOptions, car_id: &str, user_id: &str) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    ctx.store.get_car(car_id).await?;
    let user = ctx.store.get_user(user_id).await?;

    ctx.store.assign_car(car_id, user_id).await?;
    report(
        ctx.format,
        &format!("Assigned {} to {}", car_id.bold(), user.full_name()),
        &serde_json::json!({ "carId": car_id, "userId": user_id }),
    )
}

/// Run the car unassign command
pub async fn unassign(opts: &GlobalOptions, car_id: &str, user_id: &str) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    ctx.store.get_car(car_id).await?;
    let user = ctx.store.get_user(user_id).await?;

    ctx.store.unassign_car(car_id, user_id).await?;
    report(
        ctx.format,
        &format!("Released {} from {}", car_id.bold(), user.full_name()),
        &serde_json::json!({ "carId": car_id, "userId": user_id }),
    )
}
