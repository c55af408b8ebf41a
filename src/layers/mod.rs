#[macro_use]
pub mod macros;

pub mod base;
pub mod manager;
pub mod marker;
pub mod popup;
pub mod tile;
pub mod vector;
