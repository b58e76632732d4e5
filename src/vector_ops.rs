use crate::config::Number;
use wide::f32x8;

const LANES: usize = 8;

#[inline]
fn load_lanes(v: &[Number]) -> f32x8 {
    f32x8::new([v[0], v[1], v[2], v[3], v[4], v[5], v[6], v[7]])
}

/// Compute the squared Euclidean distance between two vectors using SIMD operations.
/// Callers must pass vectors of equal length.
pub fn squared_l2_distance_simd(a: &[Number], b: &[Number]) -> Number {
    debug_assert_eq!(a.len(), b.len(), "vector length mismatch");

    let mut acc = f32x8::splat(0.0);

    let len = a.len().min(b.len());
    let simd_len = len - (len % LANES);

    for i in (0..simd_len).step_by(LANES) {
        let diff = load_lanes(&a[i..i + LANES]) - load_lanes(&b[i..i + LANES]);
        acc += diff * diff;
    }

    let mut sum = acc.reduce_add();

    // Handle remaining elements
    for i in simd_len..len {
        let d = a[i] - b[i];
        sum += d * d;
    }

    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_distance(a: &[Number], b: &[Number]) -> Number {
        a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
    }

    #[test]
    fn test_distance_matches_scalar_with_tail() {
        let a: Vec<Number> = (0..19).map(|i| i as Number * 0.5).collect();
        let b: Vec<Number> = (0..19).map(|i| (19 - i) as Number * 0.25).collect();

        let simd = squared_l2_distance_simd(&a, &b);
        let scalar = scalar_distance(&a, &b);
        assert!((simd - scalar).abs() < 1e-3, "{simd} vs {scalar}");
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let a = vec![0.3; 384];
        assert_eq!(squared_l2_distance_simd(&a, &a), 0.0);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "vector length mismatch")]
    fn test_distance_length_mismatch_panics_in_debug() {
        squared_l2_distance_simd(&[1.0, 2.0], &[1.0]);
    }

    #[test]
    fn test_distance_short_vectors() {
        assert_eq!(squared_l2_distance_simd(&[1.0, 2.0], &[4.0, 6.0]), 25.0);
        assert_eq!(squared_l2_distance_simd(&[], &[]), 0.0);
    }
}
