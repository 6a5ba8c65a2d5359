//! Stage selection
//!
//! Maps elapsed growth time onto a discrete stage index. Pure functions only,
//! so the same elapsed time always lands on the same stage.

/// Stage index for `elapsed` seconds of growth.
///
/// `floor((elapsed / duration) * (stage_count - 1))`, clamped to
/// `[0, stage_count - 1]`. A `stage_count` of zero is treated as one stage.
pub fn stage_for(elapsed: f32, duration: f32, stage_count: u32) -> u32 {
    let last = last_stage(stage_count);
    if last == 0 || duration.is_nan() || duration <= 0.0 {
        return 0;
    }

    let raw = ((elapsed / duration) * last as f32).floor();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else if raw >= last as f32 {
        last
    } else {
        raw as u32
    }
}

/// Index of the final stage
#[inline]
pub fn last_stage(stage_count: u32) -> u32 {
    stage_count.saturating_sub(1)
}

/// Growth is complete once the timer has run out and the final stage is shown
pub fn is_complete(elapsed: f32, duration: f32, stage: u32, stage_count: u32) -> bool {
    elapsed >= duration && stage == last_stage(stage_count)
}

/// Fraction of the growth duration elapsed, clamped to [0, 1]
pub fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration.is_nan() || duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_stage_example() {
        // 45/60 * 3 = 2.25
        assert_eq!(stage_for(45.0, 60.0, 4), 2);
    }

    #[test]
    fn test_stage_boundaries() {
        assert_eq!(stage_for(0.0, 60.0, 4), 0);
        assert_eq!(stage_for(19.9, 60.0, 4), 0);
        assert_eq!(stage_for(20.0, 60.0, 4), 1);
        assert_eq!(stage_for(59.9, 60.0, 4), 2);
        assert_eq!(stage_for(60.0, 60.0, 4), 3);
        assert_eq!(stage_for(600.0, 60.0, 4), 3);
    }

    #[test]
    fn test_single_stage() {
        assert_eq!(stage_for(0.0, 10.0, 1), 0);
        assert_eq!(stage_for(100.0, 10.0, 1), 0);
        assert!(!is_complete(9.0, 10.0, 0, 1));
        assert!(is_complete(10.0, 10.0, 0, 1));
    }

    #[test]
    fn test_zero_stage_count_is_single_stage() {
        assert_eq!(stage_for(50.0, 10.0, 0), 0);
        assert_eq!(last_stage(0), 0);
    }

    #[test]
    fn test_complete_requires_final_stage() {
        assert!(!is_complete(60.0, 60.0, 2, 4));
        assert!(is_complete(60.0, 60.0, 3, 4));
        assert!(!is_complete(59.0, 60.0, 3, 4));
    }

    #[test]
    fn test_progress_clamped() {
        assert_eq!(progress(0.0, 60.0), 0.0);
        assert!((progress(30.0, 60.0) - 0.5).abs() < 1e-6);
        assert_eq!(progress(120.0, 60.0), 1.0);
    }

    proptest! {
        #[test]
        fn stage_always_in_range(
            elapsed in 0.0f32..1.0e6,
            duration in 0.001f32..1.0e5,
            stage_count in 1u32..64,
        ) {
            let stage = stage_for(elapsed, duration, stage_count);
            prop_assert!(stage < stage_count);
        }

        #[test]
        fn stage_is_monotonic(
            a in 0.0f32..1.0e4,
            b in 0.0f32..1.0e4,
            duration in 0.001f32..1.0e3,
            stage_count in 1u32..64,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                stage_for(lo, duration, stage_count) <= stage_for(hi, duration, stage_count)
            );
        }

        #[test]
        fn completion_iff_timer_elapsed(
            elapsed in 0.0f32..1.0e4,
            duration in 0.001f32..1.0e3,
            stage_count in 1u32..64,
        ) {
            let stage = stage_for(elapsed, duration, stage_count);
            prop_assert_eq!(
                is_complete(elapsed, duration, stage, stage_count),
                elapsed >= duration
            );
        }
    }
}
