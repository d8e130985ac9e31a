pub mod config;
pub mod logging;

pub mod progress;
pub mod report;
pub mod request;
pub mod sink;
pub mod style;
pub mod transfer;
