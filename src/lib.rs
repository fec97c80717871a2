pub mod dashboard;
pub mod error;
pub mod listing;
pub mod loader;
pub mod output;
pub mod pipeline;
