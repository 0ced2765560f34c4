//! Character-level emitters for the format families.

use crate::convert::FloatInfo;
use crate::util::{append_u64, LOWER_HEX, UPPER_HEX};

/// A rounded digit string: the value is `0.d[..nd] × 10^dp`, with
/// `nd == 0` meaning zero. Signs travel separately.
pub(crate) struct DigitString<'a> {
    pub d: &'a [u8],
    pub nd: i32,
    pub dp: i32,
}

/// Renders `digs` under the requested letter, deciding between the
/// e- and f-forms for 'g'/'G'. Unknown letters are echoed as `%<letter>`.
pub(crate) fn format_digits(
    dst: &mut Vec<u8>,
    shortest: bool,
    neg: bool,
    digs: DigitString,
    prec: i32,
    fmt: u8,
) {
    match fmt {
        b'e' | b'E' => fmt_e(dst, neg, &digs, prec, fmt),
        b'f' => fmt_f(dst, neg, &digs, prec),
        b'g' | b'G' => {
            // trailing fractional zeros in the e-form are trimmed away,
            // but only when the digits reach the decimal point
            let mut eprec = prec;
            if eprec > digs.nd && digs.nd >= digs.dp {
                eprec = digs.nd;
            }
            // shortest mode chooses e-vs-f as if six digits were asked
            if shortest {
                eprec = 6;
            }
            let exp = digs.dp - 1;
            if exp < -4 || exp >= eprec {
                let prec = prec.min(digs.nd);
                return fmt_e(dst, neg, &digs, prec - 1, fmt + b'e' - b'g');
            }
            let prec = if prec > digs.dp { digs.nd } else { prec };
            fmt_f(dst, neg, &digs, (prec - digs.dp).max(0));
        }
        _ => {
            dst.push(b'%');
            dst.push(fmt);
        }
    }
}

/// `-d.ddddde±dd`; `prec` counts fractional digits.
pub(crate) fn fmt_e(dst: &mut Vec<u8>, neg: bool, d: &DigitString, prec: i32, fmt: u8) {
    if neg {
        dst.push(b'-');
    }

    dst.push(if d.nd != 0 { d.d[0] } else { b'0' });

    if prec > 0 {
        dst.push(b'.');
        let m = d.nd.min(prec.saturating_add(1));
        if m > 1 {
            dst.extend_from_slice(&d.d[1..m as usize]);
        }
        for _ in m.max(1)..=prec {
            dst.push(b'0');
        }
    }

    dst.push(fmt);
    let mut exp = d.dp - 1;
    if d.nd == 0 {
        // zero carries exponent zero
        exp = 0;
    }
    if exp < 0 {
        dst.push(b'-');
        exp = -exp;
    } else {
        dst.push(b'+');
    }
    match exp {
        0..=9 => {
            dst.push(b'0');
            dst.push(b'0' + exp as u8);
        }
        10..=99 => {
            dst.push(b'0' + (exp / 10) as u8);
            dst.push(b'0' + (exp % 10) as u8);
        }
        _ => {
            dst.push(b'0' + (exp / 100) as u8);
            dst.push(b'0' + (exp / 10 % 10) as u8);
            dst.push(b'0' + (exp % 10) as u8);
        }
    }
}

/// `-ddddd.ddd`; `prec` counts fractional digits.
pub(crate) fn fmt_f(dst: &mut Vec<u8>, neg: bool, d: &DigitString, prec: i32) {
    if neg {
        dst.push(b'-');
    }

    // integer part, zero-padded out to the decimal point
    if d.dp > 0 {
        let m = d.nd.min(d.dp);
        dst.extend_from_slice(&d.d[..m as usize]);
        for _ in m..d.dp {
            dst.push(b'0');
        }
    } else {
        dst.push(b'0');
    }

    if prec > 0 {
        dst.push(b'.');
        for i in 0..prec {
            let j = d.dp + i;
            dst.push(if 0 <= j && j < d.nd { d.d[j as usize] } else { b'0' });
        }
    }
}

/// `-ddddp±ddd`: decimal mantissa, binary exponent.
pub(crate) fn fmt_b(dst: &mut Vec<u8>, neg: bool, mant: u64, exp: i32, flt: &FloatInfo) {
    if neg {
        dst.push(b'-');
    }
    append_u64(dst, mant);
    dst.push(b'p');
    let exp = exp - flt.mant_bits as i32;
    dst.push(if exp >= 0 { b'+' } else { b'-' });
    append_u64(dst, exp.unsigned_abs() as u64);
}

/// `-0x1.yyyyp±dd`: hexadecimal mantissa, binary exponent. A negative
/// `prec` emits digits until the mantissa is exhausted.
pub(crate) fn fmt_x(
    dst: &mut Vec<u8>,
    prec: i32,
    fmt: u8,
    neg: bool,
    mant: u64,
    exp: i32,
    flt: &FloatInfo,
) {
    let mut mant = mant;
    let mut exp = exp;
    if mant == 0 {
        exp = 0;
    }

    // park the leading bit (if any) at bit 60
    mant <<= 60 - flt.mant_bits;
    while mant != 0 && mant & (1 << 60) == 0 {
        mant <<= 1;
        exp -= 1;
    }

    if prec >= 0 && prec < 15 {
        // round to prec hex digits after the leading bit, to nearest,
        // ties to even
        let shift = prec as u32 * 4;
        let extra = (mant << shift) & ((1 << 60) - 1);
        mant >>= 60 - shift;
        if (extra | (mant & 1)) > 1 << 59 {
            mant += 1;
        }
        mant <<= 60 - shift;
        if mant & (1 << 61) != 0 {
            // the carry walked past the leading bit
            mant >>= 1;
            exp += 1;
        }
    }

    let hex = if fmt == b'X' { UPPER_HEX } else { LOWER_HEX };

    if neg {
        dst.push(b'-');
    }
    dst.push(b'0');
    dst.push(fmt);
    dst.push(b'0' + (mant >> 60 & 1) as u8);

    mant <<= 4; // past the leading 0 or 1
    if prec < 0 && mant != 0 {
        dst.push(b'.');
        while mant != 0 {
            dst.push(hex[(mant >> 60 & 15) as usize]);
            mant <<= 4;
        }
    } else if prec > 0 {
        dst.push(b'.');
        for _ in 0..prec {
            dst.push(hex[(mant >> 60 & 15) as usize]);
            mant <<= 4;
        }
    }

    dst.push(if fmt.is_ascii_lowercase() { b'p' } else { b'P' });
    if exp < 0 {
        dst.push(b'-');
        exp = -exp;
    } else {
        dst.push(b'+');
    }
    match exp {
        0..=99 => {
            dst.push(b'0' + (exp / 10) as u8);
            dst.push(b'0' + (exp % 10) as u8);
        }
        100..=999 => {
            dst.push(b'0' + (exp / 100) as u8);
            dst.push(b'0' + (exp / 10 % 10) as u8);
            dst.push(b'0' + (exp % 10) as u8);
        }
        _ => {
            dst.push(b'0' + (exp / 1000) as u8);
            dst.push(b'0' + (exp / 100 % 10) as u8);
            dst.push(b'0' + (exp / 10 % 10) as u8);
            dst.push(b'0' + (exp % 10) as u8);
        }
    }
}
