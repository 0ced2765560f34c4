//! Binary32 mantissa/exponent to decimal digits.

use crate::common::{divisible_by_pow5, mul_by_log2_log10};
use crate::digits::{format_decimal, ryu_digits, select_shortest, Digits};
use crate::pow10::mult_64bit_pow10;

pub(crate) const FLOAT_MANTISSA_BITS: u32 = 23;
/// Exponent of the least significant bit of a subnormal binary32.
pub(crate) const FLOAT_MIN_EXP2: i32 = -149;

fn compute_bounds(mant: u32, e2: i32) -> (u32, u32, u32, i32) {
    if mant != 1 << FLOAT_MANTISSA_BITS || e2 == FLOAT_MIN_EXP2 {
        (2 * mant - 1, 2 * mant, 2 * mant + 1, e2 - 1)
    } else {
        (4 * mant - 1, 4 * mant, 4 * mant + 2, e2 - 2)
    }
}

/// Shortest round-tripping digits for the binary32 value `mant * 2^e2`
/// (`mant` carries the implicit top bit).
pub fn f2d_shortest(mant: u32, e2: i32) -> Option<Digits> {
    if mant == 0 {
        return Some(Digits::zero());
    }
    if e2 <= 0 && mant.trailing_zeros() as i32 >= -e2 {
        let m = (mant >> (-e2) as u32) as u64;
        return Some(ryu_digits(m, m, m, true, false));
    }
    let (ml, mc, mu, e2) = compute_bounds(mant, e2);
    if e2 == 0 {
        return Some(ryu_digits(ml as u64, mc as u64, mu as u64, true, false));
    }
    let q = mul_by_log2_log10(-e2) + 1;

    let (dl, _, mut dl0) = mult_64bit_pow10(ml, e2, q)?;
    let (dc, _, mut dc0) = mult_64bit_pow10(mc, e2, q)?;
    let (du, e2, mut du0) = mult_64bit_pow10(mu, e2, q)?;
    debug_assert!(e2 < 0);

    if q > 55 {
        dl0 = false;
        dc0 = false;
        du0 = false;
    }
    if q < 0 && q >= -24 {
        if divisible_by_pow5(ml as u64, -q) {
            dl0 = true;
        }
        if divisible_by_pow5(mc as u64, -q) {
            dc0 = true;
        }
        if divisible_by_pow5(mu as u64, -q) {
            du0 = true;
        }
    }
    Some(select_shortest(
        dl as u64, dc as u64, du as u64, e2, q, mant & 1 == 0, dl0, dc0, du0,
    ))
}

/// `prec`-digit decimal expansion of the binary32 value `mant * 2^e2`.
/// `None` when `prec` exceeds 9 digits.
pub fn f2d_fixed(mant: u32, e2: i32, prec: usize) -> Option<Digits> {
    if prec > 9 {
        return None;
    }
    if mant == 0 {
        return Some(Digits::zero());
    }
    // renormalize to 25 bits
    let b = 32 - mant.leading_zeros();
    let mut mant = mant;
    let mut e2 = e2;
    if b < 25 {
        mant <<= 25 - b;
        e2 -= (25 - b) as i32;
    }
    let q = -mul_by_log2_log10(e2 + 24) + prec as i32 - 1;
    let (di, dexp2, mut d0) = mult_64bit_pow10(mant, e2, q)?;
    debug_assert!(dexp2 < 0);

    let mut exact = q >= 0 && q <= 27;
    // (5^11 has 26 bits, so -q beyond 10 never divides a 25-bit mantissa)
    if q < 0 && q >= -10 && divisible_by_pow5(mant as u64, -q) {
        exact = true;
        d0 = true;
    }

    let extra = (-dexp2) as u32;
    let mask = (1u32 << extra) - 1;
    let (di, dfrac) = (di >> extra, di & mask);
    let round_up = if exact {
        dfrac > 1 << (extra - 1)
            || (dfrac == 1 << (extra - 1) && !d0)
            || (dfrac == 1 << (extra - 1) && d0 && di & 1 == 1)
    } else {
        dfrac >> (extra - 1) == 1
    };
    let d0 = d0 && dfrac == 0;

    let mut d = format_decimal(di as u64, !d0, round_up, prec);
    d.dp -= q;
    Some(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(d: &Digits) -> (std::string::String, i32) {
        (std::str::from_utf8(d.digits()).unwrap().to_owned(), d.dp())
    }

    #[test]
    fn shortest_small_values() {
        // 1.0f32 = 2^23 * 2^-23
        let d = f2d_shortest(1 << 23, -23).unwrap();
        assert_eq!(parts(&d), ("1".to_owned(), 1));
        // 0.1f32 decodes to 0xCCCCCD * 2^-27
        let d = f2d_shortest(0xCCCCCD, -27).unwrap();
        assert_eq!(parts(&d), ("1".to_owned(), 0));
        // f32::MAX = (2^24 - 1) * 2^104
        let d = f2d_shortest(0xFFFFFF, 104).unwrap();
        assert_eq!(parts(&d), ("34028235".to_owned(), 39));
    }

    #[test]
    fn shortest_of_smallest_subnormal() {
        // 1e-45f32 is 1 * 2^-149
        let d = f2d_shortest(1, FLOAT_MIN_EXP2).unwrap();
        assert_eq!(parts(&d), ("1".to_owned(), -44));
    }

    #[test]
    fn fixed_small_values() {
        // 0.5 to two digits
        let d = f2d_fixed(1 << 24, -25, 2).unwrap();
        assert_eq!(parts(&d), ("5".to_owned(), 0));
        let d = f2d_fixed(1 << 23, -23, 3).unwrap();
        assert_eq!(parts(&d), ("1".to_owned(), 1));
    }

    #[test]
    fn fixed_rejects_wide_requests() {
        assert!(f2d_fixed(1 << 23, -23, 10).is_none());
    }
}
