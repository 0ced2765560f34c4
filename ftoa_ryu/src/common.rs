//! Helpers shared by the per-width conversion paths.

/// Floor of `x * log10(2)`. The fixed-point approximation `78913 / 2^18`
/// slightly underestimates `log10(2)`, by too little to move the floor
/// anywhere in `-1600 ..= 1600`.
#[inline]
pub(crate) const fn mul_by_log2_log10(x: i32) -> i32 {
    (x * 78913) >> 18
}

/// Floor of `x * log2(10)`, via `108853 / 2^15`; valid in `-500 ..= 500`.
#[inline]
pub(crate) const fn mul_by_log10_log2(x: i32) -> i32 {
    (x * 108853) >> 15
}

/// Whether `m` is divisible by `5^k`.
pub(crate) fn divisible_by_pow5(mut m: u64, k: i32) -> bool {
    if m == 0 {
        return true;
    }
    for _ in 0..k {
        if m % 5 != 0 {
            return false;
        }
        m /= 5;
    }
    true
}

/// Powers of ten that fit in a `u64`.
pub(crate) const U64_POW10: [u64; 20] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
    10_000_000_000_000_000_000,
];
