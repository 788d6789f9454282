pub mod users_service;

pub use users_service::{ApiError, AuthApi, HealthApi, UsersApi, UsersServiceClient};
