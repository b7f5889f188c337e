//! Special functions for log-space probability arithmetic.
//!
//! This module provides:
//! - `ln_gamma`: natural logarithm of the Gamma function (Lanczos)
//! - `log_sum_exp`: numerically stable `ln(exp(a) + exp(b))`
//!
//! All functions are generic over `T: Float` so they serve both `f32` and
//! `f64` callers.

use num_traits::Float;
use std::f64::consts::{LN_2, PI};

/// Lanczos coefficients for g = 7, n = 9.
#[allow(clippy::excessive_precision)]
const LANCZOS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

#[inline]
fn lit<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

/// Natural logarithm of the Gamma function, `ln Γ(x)`.
///
/// Uses the Lanczos approximation (g = 7) for `x >= 0.5` and the reflection
/// formula below that.
///
/// # Accuracy
/// Relative error below 1e-13 over the positive reals.
///
/// # Examples
/// ```
/// use rvar_core::math::ln_gamma;
///
/// // Γ(5) = 4! = 24
/// assert!((ln_gamma(5.0_f64) - 24.0_f64.ln()).abs() < 1e-12);
/// ```
pub fn ln_gamma<T: Float>(x: T) -> T {
    let half = lit::<T>(0.5);
    let one = T::one();
    let pi = lit::<T>(PI);

    if x < half {
        // Γ(x) Γ(1 - x) = π / sin(πx)
        let ln_pi_sin = (pi * x).sin().abs().ln();
        return pi.ln() - ln_pi_sin - ln_gamma(one - x);
    }

    let x = x - one;
    let mut acc = lit::<T>(LANCZOS[0]);
    for (i, &c) in LANCZOS[1..].iter().enumerate() {
        acc = acc + lit::<T>(c) / (x + lit::<T>(i as f64 + 1.0));
    }
    let t = x + lit::<T>(7.5);
    half * (lit::<T>(2.0) * pi).ln() + (x + half) * t.ln() - t + acc.ln()
}

/// Numerically stable `ln(exp(a) + exp(b))`.
///
/// # Mathematical Definition
/// ```text
/// log_sum_exp(a, b) = max(a, b) + ln(1 + exp(-|a - b|))
/// ```
///
/// Equal arguments are computed as `a + ln 2` directly, which also keeps
/// two equal infinities from producing `NaN` through `a - b`. Never
/// underflows to `-inf` while both inputs are finite.
///
/// # Examples
/// ```
/// use rvar_core::math::log_sum_exp;
///
/// let lse = log_sum_exp(-1000.0_f64, -1000.0_f64);
/// assert!((lse - (-1000.0 + 2.0_f64.ln())).abs() < 1e-12);
/// ```
#[inline]
pub fn log_sum_exp<T: Float>(a: T, b: T) -> T {
    if a == b {
        return a + lit::<T>(LN_2);
    }
    let hi = a.max(b);
    hi + (-(a - b).abs()).exp().ln_1p()
}
