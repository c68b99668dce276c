//! User commands

use colored::Colorize;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::car::report;
use crate::cli::{CommandContext, OutputFormat, PaginationArgs, RegisterUserArgs, UpdateUserArgs};
use crate::error::{Error, Result};
use crate::models::UserDisplay;
use crate::output::{self, json};

/// Run the user list command
pub async fn list(opts: &GlobalOptions, pagination: &PaginationArgs) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;

    let params = pagination.to_params();
    let users = ctx.store.load_users(params.as_ref()).await?;
    debug!("Fetched {} users", users.len());

    let display: Vec<UserDisplay> = users.iter().map(UserDisplay::from).collect();
    output::print(&display, ctx.format)
}

/// Run the user get command
pub async fn get(opts: &GlobalOptions, user_id: &str) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    let user = ctx.store.get_user(user_id).await?;

    match ctx.format {
        OutputFormat::Table => output::print(&vec![UserDisplay::from(&user)], ctx.format),
        OutputFormat::Json => {
            println!("{}", json::format_json(&user)?);
            Ok(())
        }
    }
}

/// Run the user register command
pub async fn register(opts: &GlobalOptions, args: RegisterUserArgs) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;

    // Duplicate emails are checked against the loaded collection
    ctx.store.load_users(None).await?;

    let user = ctx.store.register_user(args.into()).await?;
    report(
        ctx.format,
        &format!("Registered {} ({})", user.full_name().bold(), user.id),
        &user,
    )
}

/// Run the user update command
pub async fn update(opts: &GlobalOptions, user_id: &str, changes: &UpdateUserArgs) -> Result<()> {
    if changes.is_empty() {
        return Err(Error::Other(
            "Nothing to update; pass at least one of --email, --phone, --license, --status"
                .to_string(),
        ));
    }

    let mut ctx = CommandContext::new(opts)?;

    // Email uniqueness is checked against the loaded collection
    ctx.store.load_users(None).await?;
    let current = ctx.store.get_user(user_id).await?;

    let user = ctx.store.update_user(changes.apply(current)).await?;
    report(
        ctx.format,
        &format!("Updated {} ({})", user.full_name().bold(), user.id),
        &user,
    )
}
