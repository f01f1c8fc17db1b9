//! Color type and string conversions
//!
//! Terrameter readings are stored as plain 8-bit RGB images, so a single
//! byte-exact color type is all the sampler needs. Two string forms exist:
//!
//! - **Hex** (`#rrggbb`): the canonical form written to every output table
//!   and used to fill heatmap cells.
//! - **Tuple** (`(r, g, b)`): the human-readable form of the `RGB_Color`
//!   column in the long-form table.
//!
//! # Example
//!
//! ```
//! use cell_grid::Rgb;
//!
//! let color = Rgb::new(255, 128, 0);
//! assert_eq!(color.to_hex(), "#ff8000");
//! assert_eq!(color.to_tuple_string(), "(255, 128, 0)");
//!
//! let parsed: Rgb = "#FF8000".parse().unwrap();
//! assert_eq!(parsed, color);
//! ```

mod error;
mod rgb;

pub use error::ParseColorError;
pub use rgb::Rgb;
