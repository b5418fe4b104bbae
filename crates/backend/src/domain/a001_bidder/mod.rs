pub mod locator;
pub mod service;
