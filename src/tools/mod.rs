// Shared text helpers
pub mod clean;

// Modular tools
pub mod batch;
pub mod classify;
pub mod decode;
pub mod extract;
pub mod fetch;
pub mod scrape;
