//! SeaORM entities.

pub mod category;
pub mod discourse;
pub mod post;
