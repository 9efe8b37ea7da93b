pub mod ask;
pub mod health;
pub mod listings;
pub mod metrics_handler;
pub mod static_files;

pub use ask::AppState;
