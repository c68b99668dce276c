//! Car domain model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{format_timestamp, parse_timestamp};
use crate::client::models::{CarDto, CreateCarRequest, LocationDto};
use crate::error::StoreError;

/// Availability status of a car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarStatus {
    Available,
    Rented,
    Maintenance,
    Inactive,
}

impl CarStatus {
    pub const ALL: [CarStatus; 4] = [
        CarStatus::Available,
        CarStatus::Rented,
        CarStatus::Maintenance,
        CarStatus::Inactive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CarStatus::Available => "available",
            CarStatus::Rented => "rented",
            CarStatus::Maintenance => "maintenance",
            CarStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CarStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown car status '{}'", s))
    }
}

/// Body type of a car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarType {
    Sedan,
    Suv,
    Truck,
    Van,
    Electric,
    Luxury,
}

impl CarType {
    pub const ALL: [CarType; 6] = [
        CarType::Sedan,
        CarType::Suv,
        CarType::Truck,
        CarType::Van,
        CarType::Electric,
        CarType::Luxury,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CarType::Sedan => "sedan",
            CarType::Suv => "suv",
            CarType::Truck => "truck",
            CarType::Van => "van",
            CarType::Electric => "electric",
            CarType::Luxury => "luxury",
        }
    }
}

impl fmt::Display for CarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CarType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown car type '{}'", s))
    }
}

/// Last reported position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// A car in the fleet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    pub name: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub car_type: CarType,
    pub status: CarStatus,
    pub daily_rate: f64,
    pub license_plate: String,
    pub mileage: u32,
    pub location: Option<Location>,
    pub assigned_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when adding a car; the backend assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
    pub name: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub car_type: CarType,
    pub daily_rate: f64,
    pub license_plate: String,
    pub mileage: u32,
}

impl NewCar {
    /// Reject payloads the backend would refuse anyway.
    pub fn validate(&self) -> Result<(), StoreError> {
        validate_fields(
            [
                ("name", &self.name),
                ("make", &self.make),
                ("model", &self.model),
                ("licensePlate", &self.license_plate),
            ],
            self.daily_rate,
        )
    }
}

impl Car {
    /// Same field rules as [`NewCar::validate`], applied to an edited car.
    pub fn validate(&self) -> Result<(), StoreError> {
        validate_fields(
            [
                ("name", &self.name),
                ("make", &self.make),
                ("model", &self.model),
                ("licensePlate", &self.license_plate),
            ],
            self.daily_rate,
        )
    }
}

fn validate_fields(required: [(&str, &String); 4], daily_rate: f64) -> Result<(), StoreError> {
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(invalid(field, "must not be empty".to_string()));
        }
    }
    if !daily_rate.is_finite() || daily_rate < 0.0 {
        return Err(invalid(
            "dailyRate",
            format!("must be a non-negative amount, got {}", daily_rate),
        ));
    }
    Ok(())
}

impl From<&NewCar> for CreateCarRequest {
    fn from(car: &NewCar) -> Self {
        Self {
            name: car.name.clone(),
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year,
            car_type: car.car_type.to_string(),
            daily_rate: car.daily_rate,
            license_plate: car.license_plate.clone(),
            mileage: car.mileage,
        }
    }
}

fn invalid(field: &str, err: String) -> StoreError {
    StoreError::InvalidPayload(format!("{}: {}", field, err))
}

impl TryFrom<LocationDto> for Location {
    type Error = StoreError;

    fn try_from(dto: LocationDto) -> Result<Self, Self::Error> {
        Ok(Self {
            latitude: dto.latitude,
            longitude: dto.longitude,
            address: dto.address,
            updated_at: parse_timestamp("location.updatedAt", &dto.updated_at)?,
        })
    }
}

impl From<&Location> for LocationDto {
    fn from(location: &Location) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            address: location.address.clone(),
            updated_at: format_timestamp(&location.updated_at),
        }
    }
}

impl TryFrom<CarDto> for Car {
    type Error = StoreError;

    fn try_from(dto: CarDto) -> Result<Self, Self::Error> {
        Ok(Self {
            car_type: dto.car_type.parse().map_err(|e| invalid("type", e))?,
            status: dto.status.parse().map_err(|e| invalid("status", e))?,
            location: dto.location.map(Location::try_from).transpose()?,
            created_at: parse_timestamp("createdAt", &dto.created_at)?,
            updated_at: parse_timestamp("updatedAt", &dto.updated_at)?,
            id: dto.id,
            name: dto.name,
            make: dto.make,
            model: dto.model,
            year: dto.year,
            daily_rate: dto.daily_rate,
            license_plate: dto.license_plate,
            mileage: dto.mileage,
            assigned_user_id: dto.assigned_user_id,
        })
    }
}

impl From<&Car> for CarDto {
    fn from(car: &Car) -> Self {
        Self {
            id: car.id.clone(),
            name: car.name.clone(),
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year,
            car_type: car.car_type.to_string(),
            status: car.status.to_string(),
            daily_rate: car.daily_rate,
            license_plate: car.license_plate.clone(),
            mileage: car.mileage,
            location: car.location.as_ref().map(LocationDto::from),
            assigned_user_id: car.assigned_user_id.clone(),
            created_at: format_timestamp(&car.created_at),
            updated_at: format_timestamp(&car.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> CarDto {
        CarDto {
            id: "car-1".to_string(),
            name: "Blue Civic".to_string(),
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            year: 2022,
            car_type: "sedan".to_string(),
            status: "Rented".to_string(),
            daily_rate: 45.0,
            license_plate: "ABC-123".to_string(),
            mileage: 12000,
            location: Some(LocationDto {
                latitude: 49.28,
                longitude: -123.12,
                address: None,
                updated_at: "2024-05-01T12:30:00+02:00".to_string(),
            }),
            assigned_user_id: Some("u-1".to_string()),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-02-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("MAINTENANCE".parse::<CarStatus>(), Ok(CarStatus::Maintenance));
        assert!("parked".parse::<CarStatus>().is_err());
    }

    #[test]
    fn test_car_type_round_trips_through_str() {
        for car_type in CarType::ALL {
            assert_eq!(car_type.to_string().parse::<CarType>(), Ok(car_type));
        }
    }

    #[test]
    fn test_car_from_dto_parses_timestamps() {
        let car = Car::try_from(dto()).unwrap();

        assert_eq!(car.status, CarStatus::Rented);
        assert_eq!(car.car_type, CarType::Sedan);
        assert_eq!(car.created_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        // Offsets are normalized to UTC
        assert_eq!(
            car.location.unwrap().updated_at.to_rfc3339(),
            "2024-05-01T10:30:00+00:00"
        );
    }

    #[test]
    fn test_car_from_dto_rejects_bad_timestamp() {
        let mut bad = dto();
        bad.created_at = "yesterday".to_string();

        match Car::try_from(bad) {
            Err(StoreError::InvalidPayload(msg)) => assert!(msg.contains("createdAt")),
            other => panic!("Expected InvalidPayload, got {:?}", other),
        }
    }

    #[test]
    fn test_car_from_dto_rejects_unknown_type() {
        let mut bad = dto();
        bad.car_type = "hovercraft".to_string();
        assert!(Car::try_from(bad).is_err());
    }

    #[test]
    fn test_edited_car_validation() {
        let car = crate::client::fixtures::CarBuilder::new("c1").build();
        assert!(car.validate().is_ok());

        let negative = Car {
            daily_rate: -50.0,
            ..car.clone()
        };
        assert!(negative.validate().is_err());

        let blank = Car {
            make: String::new(),
            ..car
        };
        match blank.validate() {
            Err(StoreError::InvalidPayload(msg)) => assert!(msg.contains("make")),
            other => panic!("Expected InvalidPayload, got {:?}", other),
        }
    }

    #[test]
    fn test_new_car_validation() {
        let mut car = NewCar {
            name: "Blue Civic".to_string(),
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            year: 2022,
            car_type: CarType::Sedan,
            daily_rate: 45.0,
            license_plate: "ABC-123".to_string(),
            mileage: 0,
        };
        assert!(car.validate().is_ok());
        assert_eq!(CreateCarRequest::from(&car).car_type, "sedan");

        car.daily_rate = -1.0;
        assert!(car.validate().is_err());

        car.daily_rate = 45.0;
        car.license_plate = "  ".to_string();
        match car.validate() {
            Err(StoreError::InvalidPayload(msg)) => assert!(msg.contains("licensePlate")),
            other => panic!("Expected InvalidPayload, got {:?}", other),
        }
    }

    #[test]
    fn test_car_to_dto_uses_wire_strings() {
        let car = Car::try_from(dto()).unwrap();
        let wire = CarDto::from(&car);

        assert_eq!(wire.status, "rented");
        assert_eq!(wire.car_type, "sedan");
        assert_eq!(wire.created_at, "2024-01-01T00:00:00Z");
    }
}
