//! Capital bands.
//!
//! Deals and advisers live on different dollar scales, so each side has its own breakpoint
//! ladder. Both ladders have the same number of bands and band `n` on one side is the natural
//! counterpart of band `n` on the other. Intervals are closed below: a value exactly on a
//! breakpoint belongs to the higher band.

pub const BAND_COUNT: u8 = 6;

/// Target raise: <$100K, $100K-1M, $1M-5M, $5M-25M, $25M-100M, >=$100M.
pub const RAISE_BREAKPOINTS: [f64; 5] =
	[100_000.0, 1_000_000.0, 5_000_000.0, 25_000_000.0, 100_000_000.0];

/// Regulatory assets under management: <$10M, $10M-100M, $100M-500M, $500M-2B, $2B-10B, >=$10B.
pub const AUM_BREAKPOINTS: [f64; 5] =
	[10_000_000.0, 100_000_000.0, 500_000_000.0, 2_000_000_000.0, 10_000_000_000.0];

pub fn raise_band(target_raise: Option<f64>) -> Option<u8> {
	target_raise.map(|value| band_for(value, &RAISE_BREAKPOINTS))
}

pub fn aum_band(total_raum: Option<f64>) -> Option<u8> {
	total_raum.map(|value| band_for(value, &AUM_BREAKPOINTS))
}

pub fn band_for(value: f64, breakpoints: &[f64]) -> u8 {
	breakpoints.iter().take_while(|breakpoint| value >= **breakpoint).count() as u8
}

pub fn band_distance(lhs: u8, rhs: u8) -> u8 {
	lhs.abs_diff(rhs)
}
