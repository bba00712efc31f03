pub mod config;
pub mod logging;

pub mod admission;
pub mod error;
pub mod fetch;
pub mod registry;
pub mod screen;
pub mod word;
