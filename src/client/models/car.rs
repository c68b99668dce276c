//! Car wire models

use serde::{Deserialize, Serialize};

/// Car resource as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDto {
    pub id: String,

    pub name: String,

    pub make: String,

    pub model: String,

    pub year: u16,

    /// Body type (sedan, suv, truck, van, electric, luxury)
    #[serde(rename = "type")]
    pub car_type: String,

    /// Availability status (available, rented, maintenance, inactive)
    pub status: String,

    pub daily_rate: f64,

    pub license_plate: String,

    #[serde(default)]
    pub mileage: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationDto>,

    /// User the car is currently assigned to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_user_id: Option<String>,

    /// RFC 3339 timestamp
    pub created_at: String,

    /// RFC 3339 timestamp
    pub updated_at: String,
}

/// Last reported position of a car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

/// Request body for creating a car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequest {
    pub name: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    #[serde(rename = "type")]
    pub car_type: String,
    pub daily_rate: f64,
    pub license_plate: String,
    #[serde(default)]
    pub mileage: u32,
}

/// Request body for `PATCH /cars/{id}/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Request body for `PATCH /cars/{id}/location`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateLocationRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
