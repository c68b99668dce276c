//! Derived car views
//!
//! Pure functions over the canonical car collection. Nothing here holds state; the
//! store recomputes views on every call.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::client::SortDirection;
use crate::models::{Car, CarStatus, CarType};

/// Inclusive bounds; `None` leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Range<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: PartialOrd + Copy> Range<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Field to sort filtered cars by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarSortField {
    Name,
    Year,
    DailyRate,
    Status,
    Mileage,
}

impl FromStr for CarSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "name" => Ok(CarSortField::Name),
            "year" => Ok(CarSortField::Year),
            "dailyrate" | "rate" => Ok(CarSortField::DailyRate),
            "status" => Ok(CarSortField::Status),
            "mileage" => Ok(CarSortField::Mileage),
            _ => Err(format!("unknown sort field '{}'", s)),
        }
    }
}

impl fmt::Display for CarSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CarSortField::Name => "name",
            CarSortField::Year => "year",
            CarSortField::DailyRate => "dailyRate",
            CarSortField::Status => "status",
            CarSortField::Mileage => "mileage",
        };
        f.write_str(name)
    }
}

/// Multi-predicate car filter. Empty sets and open ranges match everything.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CarFilter {
    pub statuses: Vec<CarStatus>,
    pub types: Vec<CarType>,
    pub year: Range<u16>,
    pub daily_rate: Range<f64>,
    /// Case-insensitive substring over name, make, model and license plate
    pub search: Option<String>,
    pub sort_by: Option<CarSortField>,
    pub sort_direction: SortDirection,
}

impl CarFilter {
    pub fn matches(&self, car: &Car) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&car.status) {
            return false;
        }
        if !self.types.is_empty() && !self.types.contains(&car.car_type) {
            return false;
        }
        if !self.year.contains(car.year) || !self.daily_rate.contains(car.daily_rate) {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                [&car.name, &car.make, &car.model, &car.license_plate]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
            }
            _ => true,
        }
    }
}

fn compare(a: &Car, b: &Car, field: CarSortField) -> Ordering {
    match field {
        CarSortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        CarSortField::Year => a.year.cmp(&b.year),
        CarSortField::DailyRate => a.daily_rate.total_cmp(&b.daily_rate),
        CarSortField::Status => a.status.cmp(&b.status),
        CarSortField::Mileage => a.mileage.cmp(&b.mileage),
    }
}

/// Apply every predicate, then sort (stable) if a sort field is set.
pub fn filter_cars(cars: &[Car], filter: &CarFilter) -> Vec<Car> {
    let mut result: Vec<Car> = cars.iter().filter(|c| filter.matches(c)).cloned().collect();

    if let Some(field) = filter.sort_by {
        result.sort_by(|a, b| {
            let ordering = compare(a, b, field);
            match filter.sort_direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    result
}

/// Cars in a single status, in collection order.
pub fn cars_with_status(cars: &[Car], status: CarStatus) -> Vec<Car> {
    cars.iter().filter(|c| c.status == status).cloned().collect()
}

/// Fleet-wide counts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetSummary {
    pub total: usize,
    pub available: usize,
    pub rented: usize,
    pub maintenance: usize,
    pub inactive: usize,
    /// Mean daily rate, `None` for an empty fleet
    pub average_daily_rate: Option<f64>,
}

pub fn summarize(cars: &[Car]) -> FleetSummary {
    let count = |status| cars.iter().filter(|c| c.status == status).count();
    let average_daily_rate = if cars.is_empty() {
        None
    } else {
        Some(cars.iter().map(|c| c.daily_rate).sum::<f64>() / cars.len() as f64)
    };

    FleetSummary {
        total: cars.len(),
        available: count(CarStatus::Available),
        rented: count(CarStatus::Rented),
        maintenance: count(CarStatus::Maintenance),
        inactive: count(CarStatus::Inactive),
        average_daily_rate,
    }
}
