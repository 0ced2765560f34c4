//! Ryū-style fast paths for binary→decimal floating-point conversion,
//! exposing rounded digit strings rather than finished text.
//!
//! Four entry points cover the two widths: [`d2d_shortest`] /
//! [`f2d_shortest`] produce the fewest digits that re-read as the same
//! value, and [`d2d_fixed`] / [`f2d_fixed`] produce a requested digit
//! count (up to 18 and 9 digits) with correct round-to-nearest-even.
//! All of them work from the decoded integer mantissa (implicit bit
//! included) and its binary exponent, and return `None` when a request
//! falls outside their operating range, so callers can switch to an
//! exact multiprecision path instead.
//!
//! The power-of-ten table behind the scaling covers every exponent a
//! binary64 can produce and is computed at compile time from exact
//! integer arithmetic.

#![cfg_attr(not(test), no_std)]

mod common;
mod d2d;
mod digits;
mod f2d;
mod pow10;

pub use crate::d2d::{d2d_fixed, d2d_shortest};
pub use crate::digits::Digits;
pub use crate::f2d::{f2d_fixed, f2d_shortest};
