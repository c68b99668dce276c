//! Car display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{EMPTY_CELL, format_datetime, format_rate, or_empty, truncate_string};
use crate::models::Car;

/// Maximum width of the location column
const LOCATION_WIDTH: usize = 32;

/// Car display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CarDisplay {
    #[tabled(rename = "CAR ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    /// Make, model and year
    #[tabled(rename = "VEHICLE")]
    pub vehicle: String,

    #[tabled(rename = "TYPE")]
    pub car_type: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "RATE/DAY")]
    pub daily_rate: String,

    #[tabled(rename = "PLATE")]
    pub license_plate: String,

    #[tabled(rename = "LOCATION")]
    pub location: String,

    #[tabled(rename = "ASSIGNED TO")]
    pub assigned_to: String,

    #[tabled(rename = "UPDATED")]
    pub updated: String,
}

impl From<&Car> for CarDisplay {
    fn from(car: &Car) -> Self {
        let location = match &car.location {
            Some(loc) => match &loc.address {
                Some(address) => truncate_string(address, LOCATION_WIDTH),
                None => format!("{:.4}, {:.4}", loc.latitude, loc.longitude),
            },
            None => EMPTY_CELL.to_string(),
        };

        Self {
            id: car.id.clone(),
            name: car.name.clone(),
            vehicle: format!("{} {} {}", car.year, car.make, car.model),
            car_type: car.car_type.to_string(),
            status: car.status.to_string(),
            daily_rate: format_rate(car.daily_rate),
            license_plate: car.license_plate.clone(),
            location,
            assigned_to: or_empty(car.assigned_user_id.as_deref()),
            updated: format_datetime(&car.updated_at),
        }
    }
}

impl From<Car> for CarDisplay {
    fn from(car: Car) -> Self {
        CarDisplay::from(&car)
    }
}
