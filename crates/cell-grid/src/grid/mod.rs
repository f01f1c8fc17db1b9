//! Grid layout and sampling.
//!
//! A [`GridSpec`] names how many columns and rows to cut an image into. A
//! [`GridSampler`] binds that spec to concrete image dimensions, computes
//! each [`CellRect`], and reduces the pixels inside it to a [`CellColor`].
//!
//! # Boundary Rounding
//!
//! Nominal cell sizes (`width / columns`, `height / rows`) are fractional in
//! general. [`EdgePolicy`] decides what happens to the remainder:
//!
//! | Policy | Cell span | Trailing pixels |
//! |--------|-----------|-----------------|
//! | [`EdgePolicy::Truncate`] | `floor(i*s)..floor(i*s) + floor(s)` | dropped |
//! | [`EdgePolicy::Cover`] | `floor(i*s)..floor((i+1)*s)` | sampled |
//!
//! `Truncate` is the default and reproduces the layout existing survey
//! tables were produced with.

mod error;
mod sampler;
mod spec;

pub use error::GridError;
pub use sampler::{CellColor, CellRect, GridSampler};
pub use spec::{EdgePolicy, GridSpec, ParseEdgePolicyError};
