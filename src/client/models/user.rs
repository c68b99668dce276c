//! User wire models

use serde::{Deserialize, Serialize};

/// Registered driver as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Driver's license number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,

    /// Account status (active, suspended, pending)
    pub status: String,

    #[serde(default)]
    pub assigned_car_ids: Vec<String>,

    /// RFC 3339 timestamp
    pub registered_at: String,
}

/// Request body for `POST /users/register`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
}
