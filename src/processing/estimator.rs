//! Size estimation and frame rate reduction
//!
//! Both functions model raw PCM: size scales linearly with frame rate when
//! bit depth, channel count and duration are held fixed. Container overhead is
//! ignored, which is what the safety factor absorbs. The reduction is a single
//! pass, so the encoded output is not guaranteed to land under the target.

use crate::config::{DEFAULT_MIN_FRAME_RATE, DEFAULT_SAFETY_FACTOR};

pub const BITS_PER_BYTE: f64 = 8.0;
pub const BYTES_PER_KILOBYTE: f64 = 1024.0;
pub const KILOBYTES_PER_MEGABYTE: f64 = 1024.0;

/// Approximate uncompressed size in kilobytes.
pub fn estimate_size_kb(frame_rate: u32, bit_depth: u16, channel_count: u16, duration_seconds: f64) -> f64 {
    let size_in_bits = frame_rate as f64 * bit_depth as f64 * channel_count as f64 * duration_seconds;
    size_in_bits / BITS_PER_BYTE / BYTES_PER_KILOBYTE
}

pub fn megabytes_to_kilobytes(size_mb: f64) -> f64 {
    size_mb * KILOBYTES_PER_MEGABYTE
}

/// Frame rate expected to bring `current_size_kb` under `target_size_mb`,
/// using the default safety factor and a 1 Hz floor.
pub fn reduced_frame_rate(current_frame_rate: u32, target_size_mb: f64, current_size_kb: f64) -> u32 {
    reduced_frame_rate_with(
        current_frame_rate,
        target_size_mb,
        current_size_kb,
        DEFAULT_SAFETY_FACTOR,
        DEFAULT_MIN_FRAME_RATE,
    )
}

pub fn reduced_frame_rate_with(
    current_frame_rate: u32,
    target_size_mb: f64,
    current_size_kb: f64,
    safety_factor: f64,
    min_frame_rate: u32,
) -> u32 {
    let target_size_kb = megabytes_to_kilobytes(target_size_mb);
    let reduction_factor = (target_size_kb / current_size_kb) * safety_factor;
    let scaled = (current_frame_rate as f64 * reduction_factor).floor();

    // NaN and negatives saturate to 0 in the cast and then hit the floor
    (scaled as u32).max(min_frame_rate.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_matches_formula() {
        let cases = [(44100u32, 16u16, 2u16, 10.0f64), (8000, 8, 1, 0.5), (96000, 24, 6, 3.25), (1, 32, 1, 0.0)];
        for (rate, bits, channels, secs) in cases {
            let expected = rate as f64 * bits as f64 * channels as f64 * secs / 8.0 / 1024.0;
            assert_eq!(estimate_size_kb(rate, bits, channels, secs), expected);
        }
    }

    #[test]
    fn test_cd_quality_ten_seconds() {
        let size = estimate_size_kb(44100, 16, 2, 10.0);
        assert!((size - 1722.65625).abs() < 1e-9);
        // already below a 5 MB target
        assert!(size <= megabytes_to_kilobytes(5.0));
    }

    #[test]
    fn test_half_megabyte_target() {
        let size = estimate_size_kb(44100, 16, 2, 10.0);
        assert_eq!(reduced_frame_rate(44100, 0.5, size), 12451);
    }

    #[test]
    fn test_floor_invariant() {
        assert_eq!(reduced_frame_rate(44100, 1e-12, 1722.0), 1);
        assert_eq!(reduced_frame_rate(8000, 0.0, 100.0), 1);
        assert_eq!(reduced_frame_rate(8000, -3.0, 100.0), 1);
        assert_eq!(reduced_frame_rate_with(8000, 1e-9, 100.0, 0.95, 100), 100);
        assert_eq!(reduced_frame_rate_with(8000, 1e-9, 100.0, 0.95, 0), 1);
    }

    #[test]
    fn test_monotonic_in_target() {
        let size = estimate_size_kb(48000, 24, 2, 30.0);
        let mut previous = u32::MAX;
        let mut target = 8.0;
        while target > 0.001 {
            let rate = reduced_frame_rate(48000, target, size);
            assert!(rate <= previous, "rate rose from {} to {} at {} MB", previous, rate, target);
            assert!(rate >= 1);
            previous = rate;
            target *= 0.8;
        }
    }

    #[test]
    fn test_safety_factor_scales_result() {
        let size = estimate_size_kb(40000, 16, 1, 10.0);
        let exact = reduced_frame_rate_with(40000, 0.25, size, 1.0, 1);
        let safe = reduced_frame_rate_with(40000, 0.25, size, 0.95, 1);
        assert!(safe < exact);
        assert_eq!(exact, 13107);
        assert_eq!(safe, 12451);
    }
}
