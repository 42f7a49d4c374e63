//! # HomePlan Core
//!
//! Core types and utilities for HomePlan.
//! Provides the geometry primitives, unit formatting, and shared
//! constants used by the editor and store crates.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod units;

pub use error::{CoreError, Result};
pub use geometry::{
    distance, project_point_on_segment, rotate_point, rotated_bounding_box, Point, Rect,
};
pub use units::{format_measure, unit_label, UnitSystem};
