//! Fleet data store
//!
//! Owns the canonical car and user collections and keeps them in step with the
//! backend. Reads check the response cache first and populate it on a miss; writes
//! update the collections on success and invalidate every cached response for the
//! touched collection. In fixture mode both the cache and the HTTP client are
//! bypassed and writes only change memory.
//!
//! Failed network operations record a short, operation-specific message (see
//! [`FleetStore::last_error`]) and still return the underlying error to the caller.

mod endpoints;
mod filter;
mod source;

use std::sync::Arc;

use chrono::Utc;
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::cache::{ResponseCache, cache_key};
use crate::client::models::{
    CarDto, CreateCarRequest, RegisterUserRequest, UpdateLocationRequest, UpdateStatusRequest,
    UserDto,
};
use crate::client::{HttpClient, PaginationParams, RequestOptions};
use crate::error::{Error, RequestError, Result, StoreError};
use crate::models::{Car, CarStatus, Location, NewCar, NewUser, User, UserStatus};

pub use filter::{
    CarFilter, CarSortField, FleetSummary, Range, cars_with_status, filter_cars, summarize,
};
pub use source::{DataSource, FixtureData, FixtureSource};

/// Messages recorded in UI state when a network operation fails
pub mod messages {
    pub const LOAD_FIXTURES: &str = "Failed to load fleet data. Please check the fixture file.";
    pub const LOAD_CARS: &str = "Failed to load cars. Please try again later.";
    pub const LOAD_CAR: &str = "Failed to load car details. Please try again later.";
    pub const CREATE_CAR: &str = "Failed to add car. Please try again later.";
    pub const UPDATE_CAR: &str = "Failed to update car. Please try again later.";
    pub const DELETE_CAR: &str = "Failed to delete car. Please try again later.";
    pub const UPDATE_STATUS: &str = "Failed to update car status. Please try again later.";
    pub const UPDATE_LOCATION: &str = "Failed to update car location. Please try again later.";
    pub const LOAD_USERS: &str = "Failed to load users. Please try again later.";
    pub const LOAD_USER: &str = "Failed to load user details. Please try again later.";
    pub const REGISTER_USER: &str = "Failed to register user. Please try again later.";
    pub const UPDATE_USER: &str = "Failed to update user. Please try again later.";
    pub const ASSIGN_CAR: &str = "Failed to assign car. Please try again later.";
    pub const UNASSIGN_CAR: &str = "Failed to unassign car. Please try again later.";
}

/// Domain types decoded from an API payload
trait FromWire: Sized {
    type Wire: DeserializeOwned;

    fn from_wire(wire: Self::Wire) -> std::result::Result<Self, StoreError>;
}

impl FromWire for Car {
    type Wire = CarDto;

    fn from_wire(wire: CarDto) -> std::result::Result<Self, StoreError> {
        Car::try_from(wire)
    }
}

impl FromWire for User {
    type Wire = UserDto;

    fn from_wire(wire: UserDto) -> std::result::Result<Self, StoreError> {
        User::try_from(wire)
    }
}

impl<T: FromWire> FromWire for Vec<T> {
    type Wire = Vec<T::Wire>;

    fn from_wire(wire: Self::Wire) -> std::result::Result<Self, StoreError> {
        wire.into_iter().map(T::from_wire).collect()
    }
}

fn decode<T: FromWire>(response: std::result::Result<T::Wire, RequestError>) -> Result<T> {
    Ok(T::from_wire(response?)?)
}

/// Cache check, then network fetch and cache populate on a miss.
async fn read_through<T>(
    cache: &ResponseCache,
    http: &HttpClient,
    path: &str,
    key: &str,
    options: &RequestOptions,
) -> Result<T>
where
    T: FromWire + Serialize + DeserializeOwned,
{
    if let Some(hit) = cache.get_as::<T>(key) {
        debug!("Cache hit: {}", key);
        return Ok(hit);
    }

    debug!("Cache miss: {}", key);
    let value: T = decode(http.get(path, options).await)?;
    match serde_json::to_value(&value) {
        Ok(json) => cache.set(key, json),
        Err(e) => debug!("Not caching {}: {}", key, e),
    }
    Ok(value)
}

fn list_request(endpoint: &str, pagination: Option<&PaginationParams>) -> (String, RequestOptions) {
    let params = pagination
        .map(PaginationParams::to_query_params)
        .unwrap_or_default();
    let pairs: Vec<(&str, &str)> = params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let key = cache_key(endpoint, &pairs);
    (key, RequestOptions::new().params(params))
}

fn upsert<T>(items: &mut Vec<T>, item: T, same: impl Fn(&T, &T) -> bool) {
    match items.iter_mut().find(|existing| same(existing, &item)) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

/// First `{prefix}-NNN` id not already taken.
fn next_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut n = 1usize;
    loop {
        let id = format!("{}-{:03}", prefix, n);
        if !taken(&id) {
            return id;
        }
        n += 1;
    }
}

/// In-memory fleet state backed by the REST API or a fixture document.
///
/// Operations take `&mut self`, so a store has at most one operation in flight and
/// responses are applied in the order their requests were issued.
pub struct FleetStore {
    source: DataSource,
    cache: Arc<ResponseCache>,
    cars: Vec<Car>,
    users: Vec<User>,
    fixtures_loaded: bool,
    selected_car_id: Option<String>,
    filter: CarFilter,
    last_error: Option<String>,
}

impl FleetStore {
    pub fn new(source: DataSource, cache: Arc<ResponseCache>) -> Self {
        Self {
            source,
            cache,
            cars: Vec::new(),
            users: Vec::new(),
            fixtures_loaded: false,
            selected_car_id: None,
            filter: CarFilter::default(),
            last_error: None,
        }
    }

    pub fn is_fixture_mode(&self) -> bool {
        matches!(self.source, DataSource::Fixture(_))
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    fn remote(&self) -> Option<&HttpClient> {
        match &self.source {
            DataSource::Remote(http) => Some(http),
            DataSource::Fixture(_) => None,
        }
    }

    /// Record `message` in UI state if `result` failed.
    fn settle<T>(&mut self, result: Result<T>, message: &str) -> Result<T> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(err) => {
                debug!("{} ({})", message, err);
                self.last_error = Some(message.to_string());
            }
        }
        result
    }

    /// Drop cached responses for a collection and, optionally, one detail key.
    fn invalidate(&self, collection: &str, detail: Option<&str>) {
        if self.is_fixture_mode() {
            return;
        }
        let mut removed = self.cache.remove_by_pattern(collection);
        if let Some(path) = detail {
            let key = cache_key(path, &[]);
            if self.cache.has(&key) {
                removed += 1;
            }
            self.cache.remove(&key);
        }
        debug!("Invalidated {} cached response(s) under {}", removed, collection);
    }

    /// Populate collections from the fixture document on first use.
    async fn ensure_fixtures(&mut self) -> Result<()> {
        if self.fixtures_loaded {
            return Ok(());
        }
        let loaded = match &self.source {
            DataSource::Fixture(fixtures) => fixtures.load().await,
            DataSource::Remote(_) => return Ok(()),
        };
        let data = self.settle(loaded, messages::LOAD_FIXTURES)?;
        self.cars = data.cars;
        self.users = data.users;
        self.fixtures_loaded = true;
        Ok(())
    }

    fn require_car(&self, id: &str) -> Result<&Car> {
        self.car(id)
            .ok_or_else(|| StoreError::CarNotFound(id.to_string()).into())
    }

    fn require_user(&self, id: &str) -> Result<&User> {
        self.user(id)
            .ok_or_else(|| StoreError::UserNotFound(id.to_string()).into())
    }

    fn replace_car(&mut self, car: Car) {
        upsert(&mut self.cars, car, |a, b| a.id == b.id);
    }

    fn replace_user(&mut self, user: User) {
        upsert(&mut self.users, user, |a, b| a.id == b.id);
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Load the car collection, replacing what the store holds.
    ///
    /// Fixture mode ignores pagination and returns the whole document.
    pub async fn load_cars(&mut self, pagination: Option<&PaginationParams>) -> Result<&[Car]> {
        let fetched = match self.remote() {
            Some(http) => {
                let (key, options) = list_request(endpoints::CARS, pagination);
                Some(
                    read_through::<Vec<Car>>(&self.cache, http, endpoints::CARS, &key, &options)
                        .await,
                )
            }
            None => None,
        };

        match fetched {
            Some(result) => self.cars = self.settle(result, messages::LOAD_CARS)?,
            None => self.ensure_fixtures().await?,
        }
        Ok(&self.cars)
    }

    /// Fetch one car and upsert it into the collection.
    pub async fn get_car(&mut self, id: &str) -> Result<Car> {
        let fetched = match self.remote() {
            Some(http) => {
                let path = endpoints::car(id);
                let key = cache_key(&path, &[]);
                let options = RequestOptions::new();
                Some(read_through::<Car>(&self.cache, http, &path, &key, &options).await)
            }
            None => None,
        };

        match fetched {
            Some(result) => {
                let car = self.settle(result, messages::LOAD_CAR)?;
                self.replace_car(car.clone());
                Ok(car)
            }
            None => {
                self.ensure_fixtures().await?;
                Ok(self.require_car(id)?.clone())
            }
        }
    }

    /// Load the user collection, replacing what the store holds.
    pub async fn load_users(&mut self, pagination: Option<&PaginationParams>) -> Result<&[User]> {
        let fetched = match self.remote() {
            Some(http) => {
                let (key, options) = list_request(endpoints::USERS, pagination);
                Some(
                    read_through::<Vec<User>>(&self.cache, http, endpoints::USERS, &key, &options)
                        .await,
                )
            }
            None => None,
        };

        match fetched {
            Some(result) => self.users = self.settle(result, messages::LOAD_USERS)?,
            None => self.ensure_fixtures().await?,
        }
        Ok(&self.users)
    }

    /// Fetch one user and upsert it into the collection.
    pub async fn get_user(&mut self, id: &str) -> Result<User> {
        let fetched = match self.remote() {
            Some(http) => {
                let path = endpoints::user(id);
                let key = cache_key(&path, &[]);
                let options = RequestOptions::new();
                Some(read_through::<User>(&self.cache, http, &path, &key, &options).await)
            }
            None => None,
        };

        match fetched {
            Some(result) => {
                let user = self.settle(result, messages::LOAD_USER)?;
                self.replace_user(user.clone());
                Ok(user)
            }
            None => {
                self.ensure_fixtures().await?;
                Ok(self.require_user(id)?.clone())
            }
        }
    }

    // ------------------------------------------------------------------
    // Car writes
    // ------------------------------------------------------------------

    pub async fn create_car(&mut self, new_car: NewCar) -> Result<Car> {
        self.ensure_fixtures().await?;
        new_car.validate()?;

        let body = CreateCarRequest::from(&new_car);
        let response = match self.remote() {
            Some(http) => Some(decode::<Car>(
                http.post(endpoints::CARS, &body, &RequestOptions::new()).await,
            )),
            None => None,
        };

        let car = match response {
            Some(result) => self.settle(result, messages::CREATE_CAR)?,
            None => {
                let now = Utc::now();
                Car {
                    id: next_id("car", |id| self.car(id).is_some()),
                    name: new_car.name,
                    make: new_car.make,
                    model: new_car.model,
                    year: new_car.year,
                    car_type: new_car.car_type,
                    status: CarStatus::Available,
                    daily_rate: new_car.daily_rate,
                    license_plate: new_car.license_plate,
                    mileage: new_car.mileage,
                    location: None,
                    assigned_user_id: None,
                    created_at: now,
                    updated_at: now,
                }
            }
        };

        self.replace_car(car.clone());
        self.invalidate(endpoints::CARS, Some(&endpoints::car(&car.id)));
        Ok(car)
    }

    /// Replace a car's editable fields with `car`.
    pub async fn update_car(&mut self, car: Car) -> Result<Car> {
        self.ensure_fixtures().await?;
        self.require_car(&car.id)?;
        car.validate()?;

        let path = endpoints::car(&car.id);
        let response = match self.remote() {
            Some(http) => Some(decode::<Car>(
                http.put(&path, &CarDto::from(&car), &RequestOptions::new()).await,
            )),
            None => None,
        };

        let updated = match response {
            Some(result) => self.settle(result, messages::UPDATE_CAR)?,
            None => Car {
                updated_at: Utc::now(),
                ..car
            },
        };

        self.replace_car(updated.clone());
        self.invalidate(endpoints::CARS, Some(&path));
        Ok(updated)
    }

    /// Remove a car. Users lose it from their assignments; a selection pointing at
    /// it resolves to `None` from then on.
    pub async fn delete_car(&mut self, id: &str) -> Result<()> {
        self.ensure_fixtures().await?;
        self.require_car(id)?;

        let path = endpoints::car(id);
        let response = match self.remote() {
            Some(http) => Some(
                http.delete::<Value>(&path, &RequestOptions::new())
                    .await
                    .map_err(Error::from),
            ),
            None => None,
        };
        if let Some(result) = response {
            self.settle(result, messages::DELETE_CAR)?;
        }

        // The car's own holder counts even when users were never loaded
        let mut holders: Vec<String> = self
            .car(id)
            .and_then(|c| c.assigned_user_id.clone())
            .into_iter()
            .collect();
        self.cars.retain(|c| c.id != id);
        for user in &mut self.users {
            if user.assigned_car_ids.iter().any(|car_id| car_id == id) {
                user.assigned_car_ids.retain(|car_id| car_id != id);
                if !holders.contains(&user.id) {
                    holders.push(user.id.clone());
                }
            }
        }

        self.invalidate(endpoints::CARS, Some(&path));
        for user_id in &holders {
            self.invalidate(endpoints::USERS, Some(&endpoints::user(user_id)));
        }
        Ok(())
    }

    pub async fn update_car_status(&mut self, id: &str, status: CarStatus) -> Result<Car> {
        self.ensure_fixtures().await?;
        let current = self.require_car(id)?.clone();

        let body = UpdateStatusRequest {
            status: status.to_string(),
        };
        let response = match self.remote() {
            Some(http) => Some(decode::<Car>(
                http.patch(&endpoints::car_status(id), &body, &RequestOptions::new())
                    .await,
            )),
            None => None,
        };

        let updated = match response {
            Some(result) => self.settle(result, messages::UPDATE_STATUS)?,
            None => Car {
                status,
                updated_at: Utc::now(),
                ..current
            },
        };

        self.replace_car(updated.clone());
        self.invalidate(endpoints::CARS, Some(&endpoints::car(id)));
        Ok(updated)
    }

    pub async fn update_car_location(
        &mut self,
        id: &str,
        latitude: f64,
        longitude: f64,
        address: Option<String>,
    ) -> Result<Car> {
        self.ensure_fixtures().await?;
        let current = self.require_car(id)?.clone();

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(StoreError::InvalidPayload(format!(
                "location: ({}, {}) is out of range",
                latitude, longitude
            ))
            .into());
        }

        let body = UpdateLocationRequest {
            latitude,
            longitude,
            address: address.clone(),
        };
        let response = match self.remote() {
            Some(http) => Some(decode::<Car>(
                http.patch(&endpoints::car_location(id), &body, &RequestOptions::new())
                    .await,
            )),
            None => None,
        };

        let updated = match response {
            Some(result) => self.settle(result, messages::UPDATE_LOCATION)?,
            None => {
                let now = Utc::now();
                Car {
                    location: Some(Location {
                        latitude,
                        longitude,
                        address,
                        updated_at: now,
                    }),
                    updated_at: now,
                    ..current
                }
            }
        };

        self.replace_car(updated.clone());
        self.invalidate(endpoints::CARS, Some(&endpoints::car(id)));
        Ok(updated)
    }

    // ------------------------------------------------------------------
    // User writes
    // ------------------------------------------------------------------

    /// Register a driver. Emails are unique, compared case-insensitively against the
    /// loaded collection.
    pub async fn register_user(&mut self, new_user: NewUser) -> Result<User> {
        self.ensure_fixtures().await?;
        new_user.validate()?;

        let email = new_user.email.trim();
        if self
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(email))
        {
            return Err(StoreError::AlreadyRegistered(email.to_string()).into());
        }

        let body = RegisterUserRequest::from(&new_user);
        let response = match self.remote() {
            Some(http) => Some(decode::<User>(
                http.post(endpoints::REGISTER_USER, &body, &RequestOptions::new())
                    .await,
            )),
            None => None,
        };

        let user = match response {
            Some(result) => self.settle(result, messages::REGISTER_USER)?,
            None => User {
                id: next_id("user", |id| self.user(id).is_some()),
                first_name: body.first_name,
                last_name: body.last_name,
                email: body.email,
                phone: body.phone,
                license_number: body.license_number,
                status: UserStatus::Pending,
                assigned_car_ids: Vec::new(),
                registered_at: Utc::now(),
            },
        };

        self.replace_user(user.clone());
        self.invalidate(endpoints::USERS, Some(&endpoints::user(&user.id)));
        Ok(user)
    }

    pub async fn update_user(&mut self, user: User) -> Result<User> {
        self.ensure_fixtures().await?;
        self.require_user(&user.id)?;
        user.validate()?;

        let email = user.email.trim();
        if self
            .users
            .iter()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(email))
        {
            return Err(StoreError::AlreadyRegistered(email.to_string()).into());
        }

        let path = endpoints::user(&user.id);
        let response = match self.remote() {
            Some(http) => Some(decode::<User>(
                http.put(&path, &UserDto::from(&user), &RequestOptions::new())
                    .await,
            )),
            None => None,
        };

        let updated = match response {
            Some(result) => self.settle(result, messages::UPDATE_USER)?,
            None => user,
        };

        self.replace_user(updated.clone());
        self.invalidate(endpoints::USERS, Some(&path));
        Ok(updated)
    }

    // ------------------------------------------------------------------
    // Assignments
    // ------------------------------------------------------------------

    /// Assign a car to a user. A car holds at most one user.
    pub async fn assign_car(&mut self, car_id: &str, user_id: &str) -> Result<()> {
        self.ensure_fixtures().await?;
        let car = self.require_car(car_id)?;
        self.require_user(user_id)?;

        if let Some(holder) = &car.assigned_user_id {
            return Err(StoreError::AlreadyAssigned {
                car_id: car_id.to_string(),
                user_id: holder.clone(),
            }
            .into());
        }

        let path = endpoints::assignment(user_id, car_id);
        let response = match self.remote() {
            Some(http) => Some(
                http.post::<Value, _>(&path, &json!({}), &RequestOptions::new())
                    .await
                    .map_err(Error::from),
            ),
            None => None,
        };
        if let Some(result) = response {
            self.settle(result, messages::ASSIGN_CAR)?;
        }

        let now = Utc::now();
        if let Some(car) = self.cars.iter_mut().find(|c| c.id == car_id) {
            car.assigned_user_id = Some(user_id.to_string());
            car.updated_at = now;
        }
        if let Some(user) = self.users.iter_mut().find(|u| u.id == user_id)
            && !user.assigned_car_ids.iter().any(|id| id == car_id)
        {
            user.assigned_car_ids.push(car_id.to_string());
        }

        self.invalidate(endpoints::CARS, Some(&endpoints::car(car_id)));
        self.invalidate(endpoints::USERS, Some(&endpoints::user(user_id)));
        Ok(())
    }

    pub async fn unassign_car(&mut self, car_id: &str, user_id: &str) -> Result<()> {
        self.ensure_fixtures().await?;
        let car = self.require_car(car_id)?;
        self.require_user(user_id)?;

        if car.assigned_user_id.as_deref() != Some(user_id) {
            return Err(StoreError::NotAssigned {
                car_id: car_id.to_string(),
                user_id: user_id.to_string(),
            }
            .into());
        }

        let path = endpoints::assignment(user_id, car_id);
        let response = match self.remote() {
            Some(http) => Some(
                http.delete::<Value>(&path, &RequestOptions::new())
                    .await
                    .map_err(Error::from),
            ),
            None => None,
        };
        if let Some(result) = response {
            self.settle(result, messages::UNASSIGN_CAR)?;
        }

        let now = Utc::now();
        if let Some(car) = self.cars.iter_mut().find(|c| c.id == car_id) {
            car.assigned_user_id = None;
            car.updated_at = now;
        }
        if let Some(user) = self.users.iter_mut().find(|u| u.id == user_id) {
            user.assigned_car_ids.retain(|id| id != car_id);
        }

        self.invalidate(endpoints::CARS, Some(&endpoints::car(car_id)));
        self.invalidate(endpoints::USERS, Some(&endpoints::user(user_id)));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Collections and derived views
    // ------------------------------------------------------------------

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn car(&self, id: &str) -> Option<&Car> {
        self.cars.iter().find(|c| c.id == id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    #[allow(dead_code)]
    pub fn available_cars(&self) -> Vec<Car> {
        cars_with_status(&self.cars, CarStatus::Available)
    }

    #[allow(dead_code)]
    pub fn rented_cars(&self) -> Vec<Car> {
        cars_with_status(&self.cars, CarStatus::Rented)
    }

    #[allow(dead_code)]
    pub fn maintenance_cars(&self) -> Vec<Car> {
        cars_with_status(&self.cars, CarStatus::Maintenance)
    }

    #[allow(dead_code)]
    pub fn inactive_cars(&self) -> Vec<Car> {
        cars_with_status(&self.cars, CarStatus::Inactive)
    }

    pub fn set_filter(&mut self, filter: CarFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &CarFilter {
        &self.filter
    }

    /// Cars matching the current filter, recomputed on every call.
    pub fn filtered_cars(&self) -> Vec<Car> {
        filter_cars(&self.cars, &self.filter)
    }

    #[allow(dead_code)]
    pub fn select_car(&mut self, id: Option<&str>) {
        self.selected_car_id = id.map(str::to_string);
    }

    /// The selected car, or `None` when nothing is selected or the id is no longer
    /// in the collection.
    #[allow(dead_code)]
    pub fn selected_car(&self) -> Option<&Car> {
        self.selected_car_id.as_deref().and_then(|id| self.car(id))
    }

    pub fn fleet_summary(&self) -> FleetSummary {
        summarize(&self.cars)
    }

    /// Message for the most recent failed network operation, if it has not been
    /// superseded by a success or cleared.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[allow(dead_code)]
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}
