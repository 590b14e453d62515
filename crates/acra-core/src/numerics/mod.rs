use crate::common::constants::A_H;

/// Geometry-corrected solar cosine `mu0'` for a spherical atmosphere.
///
/// `mu0' = 1 / (sqrt((a_H mu0)^2 + 2 a_H + 1) - a_H mu0)`. Defined for daytime
/// angles, `mu0` in `(0, 1]`; callers reject anything outside that range.
pub fn modified_cosine(mu0: f64) -> f64 {
    let scaled = A_H * mu0;
    1.0 / ((scaled * scaled + 2.0 * A_H + 1.0).sqrt() - scaled)
}

/// Inclusive running sum: the first element equals the first input value.
pub fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    offset_cumulative_sum(0.0, values)
}

pub fn offset_cumulative_sum(offset: f64, values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |running, value| {
            *running += value;
            Some(offset + *running)
        })
        .collect()
}

pub fn concatenate(head: &[f64], tail: &[f64]) -> Vec<f64> {
    let mut joined = Vec::with_capacity(head.len() + tail.len());
    joined.extend_from_slice(head);
    joined.extend_from_slice(tail);
    joined
}

#[cfg(test)]
mod tests {
    use super::{concatenate, cumulative_sum, modified_cosine, offset_cumulative_sum};

    fn pseudo_random_sequence(seed: u64, count: usize) -> Vec<f64> {
        let mut state = seed;
        (0..count)
            .map(|_| {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                (state >> 11) as f64 / (1_u64 << 53) as f64
            })
            .collect()
    }

    #[test]
    fn modified_cosine_matches_closed_form_at_zenith() {
        let a_h = 1.0 / 0.001324;
        let expected = 1.0 / ((a_h * a_h + 2.0 * a_h + 1.0_f64).sqrt() - a_h);
        assert!((modified_cosine(1.0) - expected).abs() <= 1.0e-12);
        // sqrt((a+1)^2) - a == 1 at the zenith
        assert!((modified_cosine(1.0) - 1.0).abs() <= 1.0e-9);
    }

    #[test]
    fn modified_cosine_is_positive_and_increasing_on_daytime_angles() {
        let mut previous = 0.0;
        for step in 1..=1000 {
            let mu0 = step as f64 / 1000.0;
            let mu0_dash = modified_cosine(mu0);
            assert!(mu0_dash.is_finite() && mu0_dash > 0.0, "mu0={}", mu0);
            assert!(mu0_dash > previous, "mu0_dash should increase at mu0={}", mu0);
            previous = mu0_dash;
        }
    }

    #[test]
    fn modified_cosine_stays_positive_near_horizon() {
        let grazing = modified_cosine(1.0e-6);
        assert!(grazing > 0.0);
        assert!(grazing < 0.05);
    }

    #[test]
    fn cumulative_sum_is_inclusive() {
        assert_eq!(cumulative_sum(&[1.0, 2.0, 3.0]), vec![1.0, 3.0, 6.0]);
        assert!(cumulative_sum(&[]).is_empty());
    }

    #[test]
    fn offset_cumulative_sum_starts_past_the_offset() {
        assert_eq!(offset_cumulative_sum(10.0, &[1.0, 2.0]), vec![11.0, 13.0]);
    }

    #[test]
    fn cumulative_sums_of_non_negative_values_never_decrease() {
        for seed in 0..50_u64 {
            let values = pseudo_random_sequence(seed, 1 + (seed as usize % 40));
            let depths = offset_cumulative_sum(seed as f64, &values);
            assert_eq!(depths.len(), values.len());
            assert!(
                depths.windows(2).all(|pair| pair[1] >= pair[0]),
                "seed {} produced a decreasing depth profile",
                seed
            );
        }
    }

    #[test]
    fn concatenate_keeps_head_before_tail() {
        assert_eq!(concatenate(&[1.0, 2.0], &[3.0]), vec![1.0, 2.0, 3.0]);
    }
}
