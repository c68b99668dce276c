//! User display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_datetime, or_empty};
use crate::models::User;

/// User display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UserDisplay {
    #[tabled(rename = "USER ID")]
    pub id: String,

    /// First + last name
    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "PHONE")]
    pub phone: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    /// Number of cars assigned to the user
    #[tabled(rename = "CARS")]
    pub cars: usize,

    #[tabled(rename = "REGISTERED")]
    pub registered: String,
}

impl From<&User> for UserDisplay {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.full_name(),
            email: user.email.clone(),
            phone: or_empty(user.phone.as_deref()),
            status: user.status.to_string(),
            cars: user.assigned_car_ids.len(),
            registered: format_datetime(&user.registered_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::UserBuilder;

    #[test]
    fn test_user_display_from_user() {
        let user = UserBuilder::new("u-1")
            .name("Ada", "Lovelace")
            .assigned_car("car-1")
            .assigned_car("car-2")
            .build();

        let display = UserDisplay::from(&user);

        assert_eq!(display.name, "Ada Lovelace");
        assert_eq!(display.email, "u-1@example.com");
        assert_eq!(display.phone, "--");
        assert_eq!(display.cars, 2);
        assert_eq!(display.status, "active");
    }
}
