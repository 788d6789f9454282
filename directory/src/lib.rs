//! Cached view of the users service's user list.

pub mod user_directory;

pub use user_directory::UserDirectory;
