//! Pagination argument types for CLI commands

use clap::Args;

use crate::client::PaginationParams;

use super::SortDir;

/// Server-side pagination arguments for list commands.
///
/// Flatten this into any command that supports pagination:
/// ```ignore
/// List {
///     #[command(flatten)]
///     pagination: PaginationArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Page number (1-indexed)
    #[arg(long, short = 'p')]
    pub page: Option<usize>,

    /// Items per page
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Field the server sorts by
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Server sort direction (asc, desc)
    #[arg(long, value_enum, hide_possible_values = true)]
    pub sort_dir: Option<SortDir>,
}

impl PaginationArgs {
    /// Convert CLI args to API pagination params.
    ///
    /// Returns `None` when no pagination flag was given, so the request goes out
    /// without query parameters.
    pub fn to_params(&self) -> Option<PaginationParams> {
        if self.page.is_none()
            && self.limit.is_none()
            && self.sort_by.is_none()
            && self.sort_dir.is_none()
        {
            return None;
        }

        let defaults = PaginationParams::default();
        let mut params = PaginationParams::new(
            self.page.unwrap_or(defaults.page),
            self.limit.unwrap_or(defaults.limit),
        );
        if let Some(ref field) = self.sort_by {
            params = params.sort_by(field);
        }
        if let Some(dir) = self.sort_dir {
            params = params.sort_direction(dir.into());
        }

        Some(params)
    }
}
