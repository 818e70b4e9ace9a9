pub mod config;
pub mod logging;

pub mod fetcher;
pub mod manifest;
pub mod retry;
