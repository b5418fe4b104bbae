pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod google;
pub mod sheets;
