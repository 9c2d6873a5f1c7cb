pub mod catalog;
pub mod config;
pub mod profile;
pub mod weights;
