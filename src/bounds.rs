//! Transformation between bounded and unconstrained parameter values.
//!
//! An unconstrained minimizer searches the whole real line; user-declared
//! parameter bounds are honoured by remapping the search variable through
//! [map_to_bounded] before each model evaluation and seeding the search with
//! [map_to_unconstrained]. The transformations follow the MINUIT convention,
//! see <https://lmfit.github.io/lmfit-py/bounds.html>.

use crate::error::FitModelError;

/// Sentinel representing an unbounded side of a parameter interval.
///
/// `-UNBOUNDED` marks a missing lower bound, `UNBOUNDED` a missing upper
/// bound. Infinities are folded into the same branches.
pub const UNBOUNDED: f64 = f64::MAX;

fn check_bounds(min: f64, max: f64) -> Result<(), FitModelError> {
    if max > min {
        Ok(())
    } else {
        Err(FitModelError::InvalidBounds { min, max })
    }
}

/// Map an unconstrained search value `x` into the interval `[min, max]`.
///
/// The branch is selected by which sides of the interval are bounded:
/// identity for a fully open interval, a hyperbola for half-open intervals
/// and a sine for closed ones. The sine branch is periodic in `x`; use
/// [map_to_unconstrained] to recover a canonical search value instead of
/// inverting it blindly.
pub fn map_to_bounded(x: f64, min: f64, max: f64) -> Result<f64, FitModelError> {
    check_bounds(min, max)?;

    let value = match (min <= -UNBOUNDED, max >= UNBOUNDED) {
        (true, true) => x,
        (false, true) => min - 1.0 + (x * x + 1.0).sqrt(),
        (true, false) => max + 1.0 - (x * x + 1.0).sqrt(),
        (false, false) => min + (1.0 + (x + 1.0).sin()) * (max - min) / 2.0,
    };
    Ok(value)
}

/// Map a bounded parameter `value` back to an unconstrained search value.
///
/// Inverse of [map_to_bounded] on each branch; `value` must lie inside
/// `[min, max]`. The half-open branches return the non-negative root.
pub fn map_to_unconstrained(value: f64, min: f64, max: f64) -> Result<f64, FitModelError> {
    check_bounds(min, max)?;
    if value < min || value > max {
        return Err(FitModelError::ValueOutsideBounds { value, min, max });
    }

    let x = match (min <= -UNBOUNDED, max >= UNBOUNDED) {
        (true, true) => value,
        (false, true) => ((value - min + 1.0).powi(2) - 1.0).sqrt(),
        (true, false) => ((max - value + 1.0).powi(2) - 1.0).sqrt(),
        (false, false) => (2.0 * (value - min) / (max - min) - 1.0).asin() - 1.0,
    };
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use rand::prelude::*;
    use std::f64::consts::FRAC_PI_2;

    const N: usize = 1000;

    fn check_round_trip(min: f64, max: f64, sample: impl Fn(&mut StdRng) -> f64) {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..N {
            let v = sample(&mut rng);
            let x = map_to_unconstrained(v, min, max).unwrap();
            let back = map_to_bounded(x, min, max).unwrap();
            assert_abs_diff_eq!(back, v, epsilon = 1e-9);
        }
    }

    #[test]
    fn round_trip_unbounded() {
        check_round_trip(-UNBOUNDED, UNBOUNDED, |rng| rng.random_range(-100.0..100.0));
    }

    #[test]
    fn round_trip_lower_bound() {
        check_round_trip(0.5, UNBOUNDED, |rng| 0.5 + rng.random_range(1e-6..100.0));
    }

    #[test]
    fn round_trip_upper_bound() {
        check_round_trip(-UNBOUNDED, 2.5, |rng| 2.5 - rng.random_range(1e-6..100.0));
    }

    #[test]
    fn round_trip_both_bounds() {
        let (min, max) = (-1.0, 1.0);
        check_round_trip(min, max, |rng| {
            min + (max - min) * rng.random_range(1e-6..1.0 - 1e-6)
        });
    }

    #[test]
    fn lower_bound_branch_is_increasing() {
        let mut prev = map_to_bounded(0.0, 0.0, UNBOUNDED).unwrap();
        for i in 1..=1000 {
            let x = 0.01 * i as f64;
            let value = map_to_bounded(x, 0.0, UNBOUNDED).unwrap();
            assert!(value > prev, "not strictly increasing at x = {x}");
            prev = value;
        }
    }

    #[test]
    fn upper_bound_branch_is_decreasing() {
        let mut prev = map_to_bounded(0.0, -UNBOUNDED, 0.0).unwrap();
        for i in 1..=1000 {
            let x = 0.01 * i as f64;
            let value = map_to_bounded(x, -UNBOUNDED, 0.0).unwrap();
            assert!(value < prev, "not strictly decreasing at x = {x}");
            prev = value;
        }
    }

    #[test]
    fn unbounded_is_identity() {
        assert_eq!(map_to_bounded(0.0, -UNBOUNDED, UNBOUNDED).unwrap(), 0.0);
        assert_eq!(map_to_unconstrained(0.0, -UNBOUNDED, UNBOUNDED).unwrap(), 0.0);
        assert_eq!(map_to_bounded(-7.5, -UNBOUNDED, UNBOUNDED).unwrap(), -7.5);
    }

    #[test]
    fn lower_bound_at_origin() {
        assert_eq!(map_to_bounded(0.0, 0.0, UNBOUNDED).unwrap(), 0.0);
        assert_eq!(map_to_unconstrained(0.0, 0.0, UNBOUNDED).unwrap(), 0.0);
    }

    #[test]
    fn both_bounds_reach_the_upper_end() {
        let value = map_to_bounded(FRAC_PI_2 - 1.0, -1.0, 1.0).unwrap();
        assert_abs_diff_eq!(value, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn bounded_image_stays_inside() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..N {
            let x = rng.random_range(-30.0..30.0);
            let value = map_to_bounded(x, -2.0, 3.0).unwrap();
            assert!((-2.0..=3.0).contains(&value));
        }
    }

    #[test]
    fn invalid_bounds_fail_fast() {
        assert_eq!(
            map_to_bounded(0.0, 1.0, -1.0),
            Err(FitModelError::InvalidBounds {
                min: 1.0,
                max: -1.0
            })
        );
        assert_eq!(
            map_to_unconstrained(0.0, 1.0, 1.0),
            Err(FitModelError::InvalidBounds { min: 1.0, max: 1.0 })
        );
        assert!(map_to_bounded(0.0, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn value_outside_bounds_fails_fast() {
        assert_eq!(
            map_to_unconstrained(2.0, -1.0, 1.0),
            Err(FitModelError::ValueOutsideBounds {
                value: 2.0,
                min: -1.0,
                max: 1.0
            })
        );
        assert!(map_to_unconstrained(-0.5, 0.0, UNBOUNDED).is_err());
    }
}
