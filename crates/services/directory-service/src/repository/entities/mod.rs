//! SeaORM entities for the directory tables.

pub mod preference;
pub mod user;
