//! REST endpoint paths, relative to the configured API base URL

pub const CARS: &str = "/cars";
pub const USERS: &str = "/users";
pub const REGISTER_USER: &str = "/users/register";

pub fn car(id: &str) -> String {
    format!("{}/{}", CARS, id)
}

pub fn car_status(id: &str) -> String {
    format!("{}/{}/status", CARS, id)
}

pub fn car_location(id: &str) -> String {
    format!("{}/{}/location", CARS, id)
}

pub fn user(id: &str) -> String {
    format!("{}/{}", USERS, id)
}

/// `POST` assigns, `DELETE` unassigns.
pub fn assignment(user_id: &str, car_id: &str) -> String {
    format!("{}/{}/cars/{}", USERS, user_id, car_id)
}
