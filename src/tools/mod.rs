// Shared types
pub mod types;

// Pipeline tools
pub mod batch;
pub mod clean;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod render;
pub mod scrape;
