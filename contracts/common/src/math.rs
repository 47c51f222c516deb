//! Checked arithmetic on token amounts.
//!
//! Every helper returns `None` on overflow or a zero denominator so callers
//! can map it onto their own `Overflow` error with `ok_or`.

/// One whole, expressed in basis points.
pub const MAX_BPS: u32 = 10_000;

const BPS_DENOMINATOR: i128 = MAX_BPS as i128;

/// `amount × bps / 10 000`, rounded toward zero.
pub fn bps_floor(amount: i128, bps: u32) -> Option<i128> {
    amount.checked_mul(bps as i128)?.checked_div(BPS_DENOMINATOR)
}

/// `amount × bps / 10 000`, rounded up. `amount` must be non-negative.
pub fn bps_ceil(amount: i128, bps: u32) -> Option<i128> {
    if amount < 0 {
        return None;
    }
    let scaled = amount.checked_mul(bps as i128)?;
    let quotient = scaled / BPS_DENOMINATOR;
    if scaled % BPS_DENOMINATOR > 0 {
        quotient.checked_add(1)
    } else {
        Some(quotient)
    }
}

/// `a × b / denominator`, rounded toward zero.
pub fn mul_div(a: i128, b: i128, denominator: i128) -> Option<i128> {
    if denominator == 0 {
        return None;
    }
    a.checked_mul(b)?.checked_div(denominator)
}
