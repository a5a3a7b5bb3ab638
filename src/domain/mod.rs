// Domain module: Business logic and models

pub mod config;
pub mod models;
pub mod solver_service;
pub mod value_objects;
pub mod view;

pub use config::*;
pub use models::*;
pub use solver_service::*;
pub use value_objects::*;
pub use view::*;
