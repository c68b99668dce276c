//! Fleet API wire models
//!
//! Request and response bodies exactly as they travel over the wire: camelCase keys,
//! enums as lowercase strings, timestamps as RFC 3339 strings. Domain types with
//! parsed timestamps live in [`crate::models`].

mod car;
mod user;

pub use car::{CarDto, CreateCarRequest, LocationDto, UpdateLocationRequest, UpdateStatusRequest};
pub use user::{RegisterUserRequest, UserDto};
