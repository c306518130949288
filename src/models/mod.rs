pub mod interval;
pub mod profile;
pub mod session;
pub mod summary;
