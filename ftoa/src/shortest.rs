//! Shortest round-trip trimming for the exact conversion path.

use crate::convert::FloatInfo;
use crate::decimal::Decimal;

/// Trims `d`, holding the exact expansion of `mant * 2^(exp - mant_bits)`,
/// to the shortest digit prefix whose round-to-nearest reading is still
/// the original float.
pub(crate) fn round_shortest(d: &mut Decimal, mant: u64, exp: i32, flt: &FloatInfo) {
    if mant == 0 {
        d.nd = 0;
        return;
    }

    // The neighbors sit ~2^(exp - mant_bits) away while the closest
    // shorter decimal is at least 10^(dp-nd) away, so when the latter
    // clearly dominates the digits are already shortest. 332/100 stands
    // in for log2(10) (which it undershoots).
    let minexp = flt.bias + 1;
    if exp > minexp && 332 * (d.dp - d.nd as i32) >= 100 * (exp - flt.mant_bits as i32) {
        return;
    }

    // upper bound: halfway to the next float up
    let mut upper = Decimal::new();
    upper.assign(2 * mant + 1);
    upper.shift(exp - flt.mant_bits as i32 - 1);

    // lower bound: halfway down, where the gap halves when the mantissa
    // sits at the bottom of its binade (and the exponent can shrink)
    let (mantlo, explo) = if mant > 1 << flt.mant_bits || exp == minexp {
        (mant - 1, exp)
    } else {
        (2 * mant - 1, exp - 1)
    };
    let mut lower = Decimal::new();
    lower.assign(2 * mantlo + 1);
    lower.shift(explo - flt.mant_bits as i32 - 1);

    // the bounds themselves read back as `mant` only when round-to-even
    // would pick it, i.e. for an even mantissa
    let inclusive = mant % 2 == 0;

    // how far d has fallen behind upper:
    // 0 = equal so far; 1 = behind by one, with d showing 9s and upper
    // 0s since; 2 = behind by more, so a round-up stays inside
    let mut upperdelta: u8 = 0;

    // upper is the widest of the three; walk its digits and line the
    // other two up by decimal point
    let mut ui: i32 = 0;
    loop {
        let mi = ui - upper.dp + d.dp;
        if mi >= d.nd as i32 {
            return;
        }
        let li = ui - upper.dp + lower.dp;
        let l = if li >= 0 && (li as usize) < lower.nd {
            lower.d[li as usize]
        } else {
            b'0'
        };
        let m = if mi >= 0 { d.d[mi as usize] } else { b'0' };
        let u = if (ui as usize) < upper.nd {
            upper.d[ui as usize]
        } else {
            b'0'
        };

        // truncating here is fine if lower has split off, or if lower is
        // inclusive and ends exactly at this digit
        let okdown = l != m || inclusive && li + 1 == lower.nd as i32;

        if upperdelta == 0 && m + 1 < u {
            // d = 12345xxx, upper = 12347xxx
            upperdelta = 2;
        } else if upperdelta == 0 && m != u {
            // d = 12345xxx, upper = 12346xxx
            upperdelta = 1;
        } else if upperdelta == 1 && (m != b'9' || u != b'0') {
            // d = 1234598x, upper = 1234600x
            upperdelta = 2;
        }
        // rounding up is fine once upper has split off, provided the
        // result stays inside (or lands exactly on an inclusive upper)
        let okup = upperdelta > 0 && (inclusive || upperdelta > 1 || ui + 1 < upper.nd as i32);

        match (okdown, okup) {
            (true, true) => return d.round(mi + 1),
            (true, false) => return d.round_down(mi + 1),
            (false, true) => return d.round_up(mi + 1),
            (false, false) => {}
        }
        ui += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{FLOAT32_INFO, FLOAT64_INFO};

    fn shortest64(v: f64) -> (String, i32) {
        let bits = v.to_bits();
        let flt = &FLOAT64_INFO;
        let mut exp = (bits >> flt.mant_bits) as i32 & ((1 << flt.exp_bits) - 1);
        let mut mant = bits & ((1u64 << flt.mant_bits) - 1);
        if exp == 0 {
            exp = 1;
        } else {
            mant |= 1 << flt.mant_bits;
        }
        exp += flt.bias;

        let mut d = Decimal::new();
        d.assign(mant);
        d.shift(exp - flt.mant_bits as i32);
        round_shortest(&mut d, mant, exp, flt);
        (String::from_utf8(d.d[..d.nd].to_vec()).unwrap(), d.dp)
    }

    #[test]
    fn trims_to_known_shortest_forms() {
        assert_eq!(shortest64(1.0), ("1".to_owned(), 1));
        assert_eq!(shortest64(0.1), ("1".to_owned(), 0));
        assert_eq!(shortest64(3.25), ("325".to_owned(), 1));
        assert_eq!(shortest64(1e300), ("1".to_owned(), 301));
        assert_eq!(
            shortest64(1.0 / 3.0),
            ("3333333333333333".to_owned(), 0)
        );
        assert_eq!(
            shortest64(f64::MIN_POSITIVE),
            ("22250738585072014".to_owned(), -307)
        );
        assert_eq!(shortest64(5e-324), ("5".to_owned(), -323));
    }

    #[test]
    fn keeps_exact_wide_integers() {
        // 2^70 wants all its digits in 'f' style but only one in
        // shortest form
        assert_eq!(shortest64((1u128 << 70) as f64), ("11805916207174113".to_owned(), 22));
    }

    #[test]
    fn subnormal_bounds_use_the_minimum_exponent() {
        let (digits, dp) = shortest64(f64::from_bits(2));
        assert_eq!((digits.as_str(), dp), ("1", -322)); // 1e-323
    }

    #[test]
    fn float32_shape_is_honored() {
        // 0.1f32 = 13421773 * 2^-27; as a binary64 problem its shortest
        // form is longer, but against float32 neighbors it is just "1"
        let mant = 13421773u64;
        let exp = -4;
        let flt = &FLOAT32_INFO;
        let mut d = Decimal::new();
        d.assign(mant);
        d.shift(exp - flt.mant_bits as i32);
        round_shortest(&mut d, mant, exp, flt);
        assert_eq!(String::from_utf8(d.d[..d.nd].to_vec()).unwrap(), "1");
        assert_eq!(d.dp, 0);
    }
}
