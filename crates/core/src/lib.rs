//! Domain types, error taxonomy and validation rules shared by every
//! FashionSD crate.

pub mod design;
pub mod error;
pub mod generation;
pub mod types;
