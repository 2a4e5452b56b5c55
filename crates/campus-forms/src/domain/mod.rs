//! Domain module
//!
//! Contains all form logic: the field model, the registration session and
//! the pure rules that decide visibility, validation and cascade clearing.

pub mod aggregates;
pub mod value_objects;
pub mod events;
pub mod services;

pub use aggregates::*;
pub use value_objects::*;
pub use events::*;
