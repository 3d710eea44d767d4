pub mod config;
pub mod log;
pub mod menu;
pub mod session;
