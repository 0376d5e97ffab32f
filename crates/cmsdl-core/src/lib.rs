pub mod config;
pub mod logging;

pub mod bindings;
pub mod classify;
pub mod http;
pub mod model;
pub mod page;
pub mod relay;
pub mod scrape;
pub mod url_model;
