//! Binary→decimal floating-point formatting with explicit format
//! families and a shortest round-trip mode.
//!
//! [`format_float`] and [`append_float`] convert a binary32 or binary64
//! value to text under one of the families `b`, `e`/`E`, `f`, `g`/`G`,
//! `x`/`X`, with a caller-chosen precision; any negative precision asks
//! for the fewest digits that re-read bit-for-bit as the input.
//!
//! Common cases run on the Ryū-style fast paths in [`ftoa_ryu`]; inputs
//! those decline (high fixed precisions, `f` with its exponent-bound
//! digit ranges) fall back to an exact multiprecision decimal, so every
//! output is correctly rounded.
//!
//! ```
//! use ftoa::format_float;
//!
//! assert_eq!(format_float(1.0 / 3.0, b'g', -1, 64), "0.3333333333333333");
//! assert_eq!(format_float(std::f64::consts::PI, b'g', 6, 64), "3.14159");
//! assert_eq!(format_float(1e20, b'f', -1, 64), "100000000000000000000");
//! ```

mod convert;
mod decimal;
mod render;
mod shortest;
mod util;

pub use crate::convert::{append_float, format_float};
