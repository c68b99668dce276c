//! Display model implementations for table and JSON output
//!
//! Display models flatten domain types into CLI-friendly rows with column names
//! and formatted values.

mod car;
mod common;
mod summary;
mod user;

pub use car::CarDisplay;
pub use summary::SummaryDisplay;
pub use user::UserDisplay;
