//! Filter and input argument types for CLI commands

use clap::Args;

use super::SortDir;
use crate::models::{Car, CarStatus, CarType, NewCar, NewUser, User, UserStatus};
use crate::store::{CarFilter, CarSortField, Range};

/// Local filter arguments for `car list`.
///
/// Supports both repeated flags and comma-separated values:
/// - `--status available --status rented` (repeated)
/// - `--status available,rented` (comma-separated)
#[derive(Args, Debug, Default, Clone)]
pub struct CarFilterArgs {
    /// Filter by status (available, rented, maintenance, inactive)
    #[arg(long, short = 's', value_delimiter = ',')]
    pub status: Vec<CarStatus>,

    /// Filter by body type (sedan, suv, truck, van, electric, luxury)
    #[arg(long = "type", short = 't', value_delimiter = ',')]
    pub car_type: Vec<CarType>,

    /// Oldest model year to include
    #[arg(long)]
    pub min_year: Option<u16>,

    /// Newest model year to include
    #[arg(long)]
    pub max_year: Option<u16>,

    /// Lowest daily rate to include
    #[arg(long)]
    pub min_rate: Option<f64>,

    /// Highest daily rate to include
    #[arg(long)]
    pub max_rate: Option<f64>,

    /// Case-insensitive search over name, make, model and plate
    #[arg(long, short = 'q')]
    pub search: Option<String>,

    /// Sort by (name, year, daily-rate, status, mileage)
    #[arg(long)]
    pub sort: Option<CarSortField>,

    /// Sort order for --sort (asc, desc)
    #[arg(
        long,
        value_enum,
        default_value = "asc",
        hide_possible_values = true,
        hide_default_value = true
    )]
    pub order: SortDir,
}

impl CarFilterArgs {
    pub fn to_filter(&self) -> CarFilter {
        CarFilter {
            statuses: self.status.clone(),
            types: self.car_type.clone(),
            year: Range::new(self.min_year, self.max_year),
            daily_rate: Range::new(self.min_rate, self.max_rate),
            search: self.search.clone(),
            sort_by: self.sort,
            sort_direction: self.order.into(),
        }
    }
}

/// Arguments for `car create`.
#[derive(Args, Debug, Clone)]
pub struct CreateCarArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub make: String,

    #[arg(long)]
    pub model: String,

    /// Model year
    #[arg(long)]
    pub year: u16,

    /// Body type (sedan, suv, truck, van, electric, luxury)
    #[arg(long = "type", default_value = "sedan")]
    pub car_type: CarType,

    /// Daily rental rate
    #[arg(long)]
    pub rate: f64,

    /// License plate
    #[arg(long)]
    pub plate: String,

    /// Odometer reading
    #[arg(long, default_value_t = 0)]
    pub mileage: u32,
}

impl From<CreateCarArgs> for NewCar {
    fn from(args: CreateCarArgs) -> Self {
        Self {
            name: args.name,
            make: args.make,
            model: args.model,
            year: args.year,
            car_type: args.car_type,
            daily_rate: args.rate,
            license_plate: args.plate,
            mileage: args.mileage,
        }
    }
}

/// Arguments for `car update`. Only the flags given are changed.
#[derive(Args, Debug, Default, Clone)]
pub struct UpdateCarArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// Daily rental rate
    #[arg(long)]
    pub rate: Option<f64>,

    /// License plate
    #[arg(long)]
    pub plate: Option<String>,

    /// Odometer reading
    #[arg(long)]
    pub mileage: Option<u32>,

    /// Body type (sedan, suv, truck, van, electric, luxury)
    #[arg(long = "type")]
    pub car_type: Option<CarType>,
}

impl UpdateCarArgs {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.rate.is_none()
            && self.plate.is_none()
            && self.mileage.is_none()
            && self.car_type.is_none()
    }

    pub fn apply(&self, mut car: Car) -> Car {
        if let Some(name) = &self.name {
            car.name = name.clone();
        }
        if let Some(rate) = self.rate {
            car.daily_rate = rate;
        }
        if let Some(plate) = &self.plate {
            car.license_plate = plate.clone();
        }
        if let Some(mileage) = self.mileage {
            car.mileage = mileage;
        }
        if let Some(car_type) = self.car_type {
            car.car_type = car_type;
        }
        car
    }
}

/// Arguments for `user register`.
#[derive(Args, Debug, Clone)]
pub struct RegisterUserArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: Option<String>,

    /// Driver's license number
    #[arg(long)]
    pub license: Option<String>,
}

impl From<RegisterUserArgs> for NewUser {
    fn from(args: RegisterUserArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            license_number: args.license,
        }
    }
}

/// Arguments for `user update`. Only the flags given are changed.
#[derive(Args, Debug, Default, Clone)]
pub struct UpdateUserArgs {
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Driver's license number
    #[arg(long)]
    pub license: Option<String>,

    /// Account status (active, suspended, pending)
    #[arg(long)]
    pub status: Option<UserStatus>,
}

impl UpdateUserArgs {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.phone.is_none()
            && self.license.is_none()
            && self.status.is_none()
    }

    pub fn apply(&self, mut user: User) -> User {
        if let Some(email) = &self.email {
            user.email = email.trim().to_string();
        }
        if let Some(phone) = &self.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(license) = &self.license {
            user.license_number = Some(license.clone());
        }
        if let Some(status) = self.status {
            user.status = status;
        }
        user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SortDirection;

    #[test]
    fn test_empty_args_match_everything() {
        assert_eq!(CarFilterArgs::default().to_filter(), CarFilter::default());
    }

    #[test]
    fn test_to_filter() {
        let args = CarFilterArgs {
            status: vec![CarStatus::Available, CarStatus::Rented],
            min_year: Some(2020),
            max_rate: Some(99.5),
            search: Some("tesla".to_string()),
            sort: Some(CarSortField::DailyRate),
            order: SortDir::Desc,
            ..CarFilterArgs::default()
        };

        let filter = args.to_filter();
        assert_eq!(filter.statuses.len(), 2);
        assert_eq!(filter.year, Range::new(Some(2020), None));
        assert_eq!(filter.daily_rate, Range::new(None, Some(99.5)));
        assert_eq!(filter.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn test_update_args_touch_only_given_fields() {
        let car = crate::client::fixtures::CarBuilder::new("c1")
            .name("Old")
            .daily_rate(40.0)
            .build();
        let args = UpdateCarArgs {
            rate: Some(55.0),
            ..UpdateCarArgs::default()
        };

        assert!(UpdateCarArgs::default().is_empty());
        assert!(!args.is_empty());

        let updated = args.apply(car.clone());
        assert_eq!(updated.daily_rate, 55.0);
        assert_eq!(updated.name, "Old");
        assert_eq!(updated.license_plate, car.license_plate);

        let user = crate::client::fixtures::UserBuilder::new("u1").build();
        let args = UpdateUserArgs {
            status: Some(UserStatus::Suspended),
            email: Some(" new@example.com ".to_string()),
            ..UpdateUserArgs::default()
        };
        let updated = args.apply(user.clone());
        assert_eq!(updated.status, UserStatus::Suspended);
        assert_eq!(updated.email, "new@example.com");
        assert_eq!(updated.first_name, user.first_name);
    }
}
