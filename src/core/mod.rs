pub mod aggregator;
pub mod clock;
pub mod config;
pub mod log;
pub mod month;
pub mod session;
pub mod summary;
pub mod users;
