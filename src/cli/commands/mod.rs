pub mod clock;
pub mod config;
pub mod export;
pub mod init;
pub mod log;
pub mod session;
pub mod summary;
pub mod user;
