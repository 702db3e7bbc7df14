//! Application services.

pub mod enrichment;
mod posts;

pub use posts::{CreateStage, PostService, can_delete};
