//! Where the store gets its data from

use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::client::HttpClient;
use crate::client::models::{CarDto, UserDto};
use crate::error::Result;
use crate::models::{Car, User};

/// Fixture document compiled into the binary
const BUNDLED_FIXTURES: &str = include_str!("../../assets/fleet.json");

/// Backing source for a [`FleetStore`](super::FleetStore)
pub enum DataSource {
    /// REST backend behind the cache and retry layers
    Remote(HttpClient),
    /// Static fixture document; no cache, no retry
    Fixture(FixtureSource),
}

/// Wire-format fixture document
#[derive(Debug, Default, Deserialize)]
struct FixtureDocument {
    #[serde(default)]
    cars: Vec<CarDto>,
    #[serde(default)]
    users: Vec<UserDto>,
}

/// Collections decoded from a fixture document
#[derive(Debug, Clone, Default)]
pub struct FixtureData {
    pub cars: Vec<Car>,
    pub users: Vec<User>,
}

/// Fixture document location: a file on disk or the bundled copy.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    path: Option<PathBuf>,
}

impl FixtureSource {
    pub fn bundled() -> Self {
        Self { path: None }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read and decode the document.
    pub async fn load(&self) -> Result<FixtureData> {
        let raw = match &self.path {
            Some(path) => {
                debug!("Loading fixtures from {}", path.display());
                tokio::fs::read_to_string(path).await?
            }
            None => {
                debug!("Loading bundled fixtures");
                BUNDLED_FIXTURES.to_string()
            }
        };

        parse(&raw)
    }
}

fn parse(raw: &str) -> Result<FixtureData> {
    let document: FixtureDocument = serde_json::from_str(raw)?;

    let cars = document
        .cars
        .into_iter()
        .map(Car::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let users = document
        .users
        .into_iter()
        .map(User::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(FixtureData { cars, users })
}
