//! Binary64 mantissa/exponent to decimal digits.

use crate::common::{divisible_by_pow5, mul_by_log2_log10};
use crate::digits::{format_decimal, ryu_digits, select_shortest, Digits};
use crate::pow10::mult_128bit_pow10;

pub(crate) const DOUBLE_MANTISSA_BITS: u32 = 52;
/// Exponent of the least significant bit of a subnormal binary64.
pub(crate) const DOUBLE_MIN_EXP2: i32 = -1074;

/// The interval of values rounding to `mant * 2^e2`: midpoints to both
/// neighbors, scaled to integers sharing one binary exponent.
fn compute_bounds(mant: u64, e2: i32) -> (u64, u64, u64, i32) {
    if mant != 1 << DOUBLE_MANTISSA_BITS || e2 == DOUBLE_MIN_EXP2 {
        // regular spacing on both sides (including all subnormals)
        (2 * mant - 1, 2 * mant, 2 * mant + 1, e2 - 1)
    } else {
        // at a binade boundary the gap below is half as wide
        (4 * mant - 1, 4 * mant, 4 * mant + 2, e2 - 2)
    }
}

/// Shortest round-tripping digits for the binary64 value `mant * 2^e2`,
/// where `mant` carries the implicit top bit. `None` only when the
/// required power of ten is outside the table, which no binary64
/// produces.
pub fn d2d_shortest(mant: u64, e2: i32) -> Option<Digits> {
    if mant == 0 {
        return Some(Digits::zero());
    }
    // An exact integer narrower than the mantissa has no other integer
    // in its rounding interval; its own digits are already shortest.
    if e2 <= 0 && mant.trailing_zeros() as i32 >= -e2 {
        let m = mant >> (-e2) as u32;
        return Some(ryu_digits(m, m, m, true, false));
    }
    let (ml, mc, mu, e2) = compute_bounds(mant, e2);
    if e2 == 0 {
        return Some(ryu_digits(ml, mc, mu, true, false));
    }
    // the smallest power of ten above 2^-e2
    let q = mul_by_log2_log10(-e2) + 1;

    let (dl, _, mut dl0) = mult_128bit_pow10(ml, e2, q)?;
    let (dc, _, mut dc0) = mult_128bit_pow10(mc, e2, q)?;
    let (du, e2, mut du0) = mult_128bit_pow10(mu, e2, q)?;
    debug_assert!(e2 < 0);

    if q > 55 {
        // large powers of ten are not exactly representable
        dl0 = false;
        dc0 = false;
        du0 = false;
    }
    if q < 0 && q >= -24 {
        // dividing by a small power of ten may still be exact
        // (5^25 has 59 bits, so -q beyond 24 never divides a mantissa)
        if divisible_by_pow5(ml, -q) {
            dl0 = true;
        }
        if divisible_by_pow5(mc, -q) {
            dc0 = true;
        }
        if divisible_by_pow5(mu, -q) {
            du0 = true;
        }
    }
    Some(select_shortest(dl, dc, du, e2, q, mant & 1 == 0, dl0, dc0, du0))
}

/// `prec`-digit decimal expansion of `mant * 2^e2`, correctly rounded.
/// `None` when `prec` exceeds 18 digits or the scaling power is outside
/// the table.
pub fn d2d_fixed(mant: u64, e2: i32, prec: usize) -> Option<Digits> {
    if prec > 18 {
        return None;
    }
    if mant == 0 {
        return Some(Digits::zero());
    }
    // renormalize to 55 bits so the scaled product keeps full precision
    let b = 64 - mant.leading_zeros();
    let mut mant = mant;
    let mut e2 = e2;
    if b < 55 {
        mant <<= 55 - b;
        e2 -= (55 - b) as i32;
    }
    // scale so the integer part carries at least `prec` digits
    let q = -mul_by_log2_log10(e2 + 54) + prec as i32 - 1;
    let (di, dexp2, mut d0) = mult_128bit_pow10(mant, e2, q)?;
    debug_assert!(dexp2 < 0);

    let mut exact = q >= 0 && q <= 55;
    // an exact division by a small power of ten also loses nothing
    if q < 0 && q >= -22 && divisible_by_pow5(mant, -q) {
        exact = true;
        d0 = true;
    }

    let extra = (-dexp2) as u32;
    let mask = (1u64 << extra) - 1;
    let (di, dfrac) = (di >> extra, di & mask);
    let round_up = if exact {
        // an exact half rounds up onto odd, or when bits sit below it
        dfrac > 1 << (extra - 1)
            || (dfrac == 1 << (extra - 1) && !d0)
            || (dfrac == 1 << (extra - 1) && d0 && di & 1 == 1)
    } else {
        // a truncated product rounds up from the half bit alone
        dfrac >> (extra - 1) == 1
    };
    let d0 = d0 && dfrac == 0;

    let mut d = format_decimal(di, !d0, round_up, prec);
    d.dp -= q;
    Some(d)
}
