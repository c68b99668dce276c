//! Test fixtures and builders for fleet models
//!
//! Provides builder patterns for creating test data with sensible defaults.
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use super::models::{CarDto, UserDto};
use crate::models::{Car, CarStatus, CarType, Location, User, UserStatus};

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

// ============================================================================
// CarBuilder
// ============================================================================

/// Builder for creating test Car instances.
///
/// # Example
/// ```ignore
/// let car = CarBuilder::new("car-1")
///     .name("Blue Civic")
///     .status(CarStatus::Rented)
///     .year(2023)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct CarBuilder {
    car: Car,
}

impl CarBuilder {
    /// Create a new builder with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            car: Car {
                name: format!("Car {}", &id),
                make: "Toyota".to_string(),
                model: "Corolla".to_string(),
                year: 2022,
                car_type: CarType::Sedan,
                status: CarStatus::Available,
                daily_rate: 50.0,
                license_plate: format!("PLT-{}", &id),
                mileage: 10_000,
                location: None,
                assigned_user_id: None,
                created_at: fixed_time(),
                updated_at: fixed_time(),
                id,
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.car.name = name.into();
        self
    }

    pub fn make(mut self, make: impl Into<String>) -> Self {
        self.car.make = make.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.car.model = model.into();
        self
    }

    pub fn year(mut self, year: u16) -> Self {
        self.car.year = year;
        self
    }

    pub fn car_type(mut self, car_type: CarType) -> Self {
        self.car.car_type = car_type;
        self
    }

    pub fn status(mut self, status: CarStatus) -> Self {
        self.car.status = status;
        self
    }

    pub fn daily_rate(mut self, rate: f64) -> Self {
        self.car.daily_rate = rate;
        self
    }

    pub fn plate(mut self, plate: impl Into<String>) -> Self {
        self.car.license_plate = plate.into();
        self
    }

    pub fn mileage(mut self, mileage: u32) -> Self {
        self.car.mileage = mileage;
        self
    }

    pub fn located_at(mut self, latitude: f64, longitude: f64) -> Self {
        self.car.location = Some(Location {
            latitude,
            longitude,
            address: None,
            updated_at: fixed_time(),
        });
        self
    }

    pub fn assigned_to(mut self, user_id: impl Into<String>) -> Self {
        self.car.assigned_user_id = Some(user_id.into());
        self
    }

    /// Build the Car.
    pub fn build(self) -> Car {
        self.car
    }

    /// Build the wire representation.
    pub fn build_dto(self) -> CarDto {
        CarDto::from(&self.car)
    }

    /// Build the wire representation as JSON.
    pub fn build_json(self) -> Value {
        serde_json::to_value(self.build_dto()).unwrap_or(Value::Null)
    }
}

// ============================================================================
// UserBuilder
// ============================================================================

/// Builder for creating test User instances.
#[derive(Debug, Clone)]
pub struct UserBuilder {
    user: User,
}

impl UserBuilder {
    /// Create a new builder with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            user: User {
                first_name: "Test".to_string(),
                last_name: format!("User {}", &id),
                email: format!("{}@example.com", &id),
                phone: None,
                license_number: None,
                status: UserStatus::Active,
                assigned_car_ids: Vec::new(),
                registered_at: fixed_time(),
                id,
            },
        }
    }

    pub fn name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.user.first_name = first.into();
        self.user.last_name = last.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.user.email = email.into();
        self
    }

    pub fn status(mut self, status: UserStatus) -> Self {
        self.user.status = status;
        self
    }

    pub fn assigned_car(mut self, car_id: impl Into<String>) -> Self {
        self.user.assigned_car_ids.push(car_id.into());
        self
    }

    /// Build the User.
    pub fn build(self) -> User {
        self.user
    }

    /// Build the wire representation.
    pub fn build_dto(self) -> UserDto {
        UserDto::from(&self.user)
    }

    /// Build the wire representation as JSON.
    pub fn build_json(self) -> Value {
        serde_json::to_value(self.build_dto()).unwrap_or(Value::Null)
    }
}

// ============================================================================
// Fleet fixtures
// ============================================================================

/// Five cars spanning the status, year and name boundaries used by filter tests.
pub fn sample_fleet() -> Vec<Car> {
    vec![
        CarBuilder::new("c1")
            .name("Delta")
            .status(CarStatus::Available)
            .year(2023)
            .daily_rate(80.0)
            .build(),
        CarBuilder::new("c2")
            .name("alpha")
            .status(CarStatus::Available)
            .year(2022)
            .daily_rate(40.0)
            .car_type(CarType::Suv)
            .build(),
        CarBuilder::new("c3")
            .name("Charlie")
            .status(CarStatus::Available)
            .year(2021)
            .daily_rate(35.0)
            .build(),
        CarBuilder::new("c4")
            .name("Bravo")
            .status(CarStatus::Rented)
            .year(2024)
            .daily_rate(120.0)
            .car_type(CarType::Luxury)
            .assigned_to("u1")
            .build(),
        CarBuilder::new("c5")
            .name("Echo")
            .status(CarStatus::Maintenance)
            .year(2022)
            .daily_rate(60.0)
            .car_type(CarType::Electric)
            .build(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_builder_defaults() {
        let car = CarBuilder::new("car-9").build();
        assert_eq!(car.id, "car-9");
        assert_eq!(car.name, "Car car-9");
        assert_eq!(car.status, CarStatus::Available);
    }

    #[test]
    fn test_car_builder_json_is_wire_format() {
        let json = CarBuilder::new("car-9").status(CarStatus::Rented).build_json();
        assert_eq!(json["status"], "rented");
        assert_eq!(json["licensePlate"], "PLT-car-9");
        assert_eq!(json["createdAt"], "2024-01-15T09:00:00Z");
    }

    #[test]
    fn test_user_builder() {
        let user = UserBuilder::new("u-7").assigned_car("car-1").build();
        assert_eq!(user.email, "u-7@example.com");
        assert_eq!(user.assigned_car_ids, vec!["car-1".to_string()]);
    }
}
