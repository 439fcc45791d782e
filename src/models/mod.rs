pub mod appointments;
pub mod brands;
pub mod model_years;
pub mod products;
pub mod recommendations;
pub mod vehicle_models;
pub mod workshops;

pub mod user_logins;
pub mod users;
