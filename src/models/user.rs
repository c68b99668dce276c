//! User domain model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{format_timestamp, parse_timestamp};
use crate::client::models::{RegisterUserRequest, UserDto};
use crate::error::StoreError;

/// Account status of a registered driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Suspended,
    Pending,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Suspended => "suspended",
            UserStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "suspended" => Ok(UserStatus::Suspended),
            "pending" => Ok(UserStatus::Pending),
            _ => Err(format!("unknown user status '{}'", s)),
        }
    }
}

/// A registered driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub status: UserStatus,
    pub assigned_car_ids: Vec<String>,
    pub registered_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Same field rules as [`NewUser::validate`], applied to an edited user.
    pub fn validate(&self) -> Result<(), StoreError> {
        validate_fields(&self.first_name, &self.last_name, &self.email)
    }
}

/// Fields supplied when registering a driver
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub license_number: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), StoreError> {
        validate_fields(&self.first_name, &self.last_name, &self.email)
    }
}

fn validate_fields(first_name: &str, last_name: &str, email: &str) -> Result<(), StoreError> {
    if first_name.trim().is_empty() || last_name.trim().is_empty() {
        return Err(StoreError::InvalidPayload(
            "first and last name are required".to_string(),
        ));
    }
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(StoreError::InvalidPayload(format!(
            "email: '{}' is not a valid address",
            email
        ))),
    }
}

impl From<&NewUser> for RegisterUserRequest {
    fn from(user: &NewUser) -> Self {
        Self {
            first_name: user.first_name.trim().to_string(),
            last_name: user.last_name.trim().to_string(),
            email: user.email.trim().to_string(),
            phone: user.phone.clone(),
            license_number: user.license_number.clone(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = StoreError;

    fn try_from(dto: UserDto) -> Result<Self, Self::Error> {
        Ok(Self {
            status: dto
                .status
                .parse()
                .map_err(|e| StoreError::InvalidPayload(format!("status: {}", e)))?,
            registered_at: parse_timestamp("registeredAt", &dto.registered_at)?,
            id: dto.id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            phone: dto.phone,
            license_number: dto.license_number,
            assigned_car_ids: dto.assigned_car_ids,
        })
    }
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            license_number: user.license_number.clone(),
            status: user.status.to_string(),
            assigned_car_ids: user.assigned_car_ids.clone(),
            registered_at: format_timestamp(&user.registered_at),
        }
    }
}
