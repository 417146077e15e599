pub mod config;
pub mod logging;

pub mod bake;
pub mod dataset;
pub mod http;
pub mod image;
pub mod resolver;
pub mod retry;
