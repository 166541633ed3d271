//! Core types and utilities for the lifebg animated page backgrounds.

pub mod types;
pub mod config;
pub mod error;
pub mod layout;
pub mod chrome;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
pub use layout::{GridLayout, Point, Shape, Viewport, DEFAULT_CELL_SIZE, MAX_BOARD_CELLS};
