//! Bit decoding and routing between the fast and exact paths.

use crate::decimal::Decimal;
use crate::render::{self, DigitString};
use crate::shortest::round_shortest;

/// Storage parameters of a binary floating-point width.
pub(crate) struct FloatInfo {
    pub mant_bits: u32,
    pub exp_bits: u32,
    pub bias: i32,
}

pub(crate) static FLOAT32_INFO: FloatInfo = FloatInfo { mant_bits: 23, exp_bits: 8, bias: -127 };
pub(crate) static FLOAT64_INFO: FloatInfo = FloatInfo { mant_bits: 52, exp_bits: 11, bias: -1023 };

/// Converts `val` to text and returns it.
///
/// Equivalent to [`append_float`] on a fresh buffer. See there for the
/// meaning of the arguments.
///
/// ```
/// assert_eq!(ftoa::format_float(0.1, b'e', -1, 64), "1e-01");
/// assert_eq!(ftoa::format_float(1.5, b'x', -1, 64), "0x1.8p+00");
/// ```
pub fn format_float(val: f64, fmt: u8, prec: i32, bit_size: u32) -> String {
    let mut buf = Vec::with_capacity(prec.saturating_add(4).max(24) as usize);
    append_float(&mut buf, val, fmt, prec, bit_size);
    String::from_utf8(buf).expect("formatted floats are ASCII")
}

/// Appends the text form of `val` to `dst`.
///
/// `fmt` selects the format family: `b'b'` (decimal mantissa, binary
/// exponent), `b'e'`/`b'E'` (scientific), `b'f'` (fixed point),
/// `b'g'`/`b'G'` (scientific for large exponents, fixed otherwise), or
/// `b'x'`/`b'X'` (hexadecimal mantissa, binary exponent). Any other
/// letter appends `%` followed by the letter.
///
/// `prec` counts digits after the decimal point for `e`, `E`, `f`, `x`
/// and `X`, and significant digits for `g` and `G`. Any negative value
/// asks for the fewest digits that re-read exactly as `val`.
///
/// `bit_size` must be 32 or 64; rounding assumes the value came from a
/// float of that width, and 32 reduces the value through `f32` storage
/// first.
///
/// # Panics
///
/// On a `bit_size` other than 32 or 64.
pub fn append_float(dst: &mut Vec<u8>, val: f64, fmt: u8, prec: i32, bit_size: u32) {
    let (bits, flt) = match bit_size {
        32 => ((val as f32).to_bits() as u64, &FLOAT32_INFO),
        64 => (val.to_bits(), &FLOAT64_INFO),
        _ => panic!("illegal bit size {bit_size} for float formatting"),
    };

    let neg = bits >> (flt.exp_bits + flt.mant_bits) != 0;
    let mut exp = (bits >> flt.mant_bits) as i32 & ((1 << flt.exp_bits) - 1);
    let mut mant = bits & ((1u64 << flt.mant_bits) - 1);

    if exp == (1 << flt.exp_bits) - 1 {
        // Inf or NaN; a NaN never reports a sign
        let s: &[u8] = if mant != 0 {
            b"NaN"
        } else if neg {
            b"-Inf"
        } else {
            b"+Inf"
        };
        dst.extend_from_slice(s);
        return;
    }
    if exp == 0 {
        // subnormal: no implicit bit, fixed exponent
        exp = 1;
    } else {
        mant |= 1 << flt.mant_bits;
    }
    exp += flt.bias;

    // the binary formats never need decimal digits
    if fmt == b'b' {
        return render::fmt_b(dst, neg, mant, exp, flt);
    }
    if fmt == b'x' || fmt == b'X' {
        return render::fmt_x(dst, prec, fmt, neg, mant, exp, flt);
    }

    let e2 = exp - flt.mant_bits as i32;
    let mut prec = prec;
    let shortest = prec < 0;
    let mut digs = None;
    if shortest {
        digs = if bit_size == 32 {
            ftoa_ryu::f2d_shortest(mant as u32, e2)
        } else {
            ftoa_ryu::d2d_shortest(mant, e2)
        };
        if let Some(d) = &digs {
            // effective precision of the digits we got back
            prec = match fmt {
                b'e' | b'E' => (d.nd() as i32 - 1).max(0),
                b'f' => (d.nd() as i32 - d.dp()).max(0),
                _ => d.nd() as i32, // 'g', 'G'
            };
        }
    } else if fmt != b'f' {
        // fixed significant-digit count ('f' depends on the exponent
        // instead, and goes straight to the exact path)
        let digits = match fmt {
            b'e' | b'E' => prec.saturating_add(1),
            b'g' | b'G' => {
                if prec == 0 {
                    prec = 1;
                }
                prec
            }
            _ => 1, // unrecognized; keep it cheap, echoed later
        };
        if digits <= 18 {
            digs = if bit_size == 32 && digits <= 9 {
                ftoa_ryu::f2d_fixed(mant as u32, e2, digits as usize)
            } else {
                ftoa_ryu::d2d_fixed(mant, e2, digits as usize)
            };
        }
    }

    match digs {
        Some(d) => {
            let digs = DigitString { d: d.digits(), nd: d.nd() as i32, dp: d.dp() };
            render::format_digits(dst, shortest, neg, digs, prec, fmt);
        }
        None => big_ftoa(dst, prec, fmt, neg, mant, exp, flt),
    }
}

/// The exact path: expand `mant * 2^(exp - mant_bits)` in full, then
/// round to what the format needs.
fn big_ftoa(dst: &mut Vec<u8>, prec: i32, fmt: u8, neg: bool, mant: u64, exp: i32, flt: &FloatInfo) {
    let mut d = Decimal::new();
    d.assign(mant);
    d.shift(exp - flt.mant_bits as i32);

    let mut prec = prec;
    let shortest = prec < 0;
    if shortest {
        round_shortest(&mut d, mant, exp, flt);
        prec = match fmt {
            b'e' | b'E' => d.nd as i32 - 1,
            b'f' => (d.nd as i32 - d.dp).max(0),
            _ => d.nd as i32, // 'g', 'G'
        };
    } else {
        match fmt {
            b'e' | b'E' => d.round(prec.saturating_add(1)),
            b'f' => d.round(d.dp.saturating_add(prec)),
            b'g' | b'G' => {
                if prec == 0 {
                    prec = 1;
                }
                d.round(prec);
            }
            _ => {}
        }
    }

    let digs = DigitString { d: &d.d[..d.nd], nd: d.nd as i32, dp: d.dp };
    render::format_digits(dst, shortest, neg, digs, prec, fmt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Formats through the exact path only, for comparison against the
    /// fast path taken by `append_float`.
    fn format_fallback(val: f64, fmt: u8, prec: i32, bit_size: u32) -> String {
        let (bits, flt) = match bit_size {
            32 => ((val as f32).to_bits() as u64, &FLOAT32_INFO),
            _ => (val.to_bits(), &FLOAT64_INFO),
        };
        let neg = bits >> (flt.exp_bits + flt.mant_bits) != 0;
        let mut exp = (bits >> flt.mant_bits) as i32 & ((1 << flt.exp_bits) - 1);
        let mut mant = bits & ((1u64 << flt.mant_bits) - 1);
        if exp == 0 {
            exp = 1;
        } else {
            mant |= 1 << flt.mant_bits;
        }
        exp += flt.bias;

        let mut dst = Vec::new();
        big_ftoa(&mut dst, prec, fmt, neg, mant, exp, flt);
        String::from_utf8(dst).unwrap()
    }

    #[test]
    fn fast_and_exact_paths_agree_on_a_sweep() {
        let values = [
            0.5,
            1.0,
            1.5,
            0.1,
            1.0 / 3.0,
            6.0e-8,
            123456789.0,
            3.141592653589793,
            1e17,
            9.9e99,
            2.2250738585072014e-308,
            5e-324,
            1.7976931348623157e308,
        ];
        for &v in &values {
            for prec in -1..=17 {
                for &fmt in &[b'e', b'g'] {
                    let fast = format_float(v, fmt, prec, 64);
                    let exact = format_fallback(v, fmt, prec, 64);
                    assert_eq!(fast, exact, "v = {v:e}, fmt = {}, prec = {prec}", fmt as char);
                }
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(4000))]

        #[test]
        fn fast_and_exact_paths_agree_f64(bits in any::<u64>(), prec in -1i32..=17, e in prop::bool::ANY) {
            let v = f64::from_bits(bits);
            prop_assume!(v.is_finite());
            let fmt = if e { b'e' } else { b'g' };
            prop_assert_eq!(format_float(v, fmt, prec, 64), format_fallback(v, fmt, prec, 64));
        }

        #[test]
        fn fast_and_exact_paths_agree_f32(bits in any::<u32>(), prec in -1i32..=8, e in prop::bool::ANY) {
            let v = f32::from_bits(bits);
            prop_assume!(v.is_finite());
            let fmt = if e { b'e' } else { b'g' };
            prop_assert_eq!(
                format_float(v as f64, fmt, prec, 32),
                format_fallback(v as f64, fmt, prec, 32)
            );
        }
    }

    #[test]
    #[should_panic(expected = "illegal bit size")]
    fn rejects_other_widths() {
        format_float(1.0, b'g', -1, 16);
    }
}
