//! Time and easing helpers shared by the hover and exit fades.

/// Milliseconds on a monotonic clock
pub type MsTime = u64;

/// Progress from `start` to `now` over `duration_ms`, clamped to `[0, 1]`.
///
/// A zero duration is complete immediately. `now` before `start` counts as 0.
pub fn fade_ratio(start: MsTime, now: MsTime, duration_ms: u64) -> f32 {
    if duration_ms == 0 {
        return 1.0;
    }
    let elapsed = now.saturating_sub(start);
    if elapsed >= duration_ms {
        1.0
    } else {
        (elapsed as f64 / duration_ms as f64) as f32
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep on `t` clamped to `[0, 1]`
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_ratio_bounds() {
        assert_eq!(fade_ratio(1000, 1000, 500), 0.0);
        assert_eq!(fade_ratio(1000, 1250, 500), 0.5);
        assert_eq!(fade_ratio(1000, 1500, 500), 1.0);
        assert_eq!(fade_ratio(1000, 9000, 500), 1.0);
        assert_eq!(fade_ratio(1000, 500, 500), 0.0);
    }

    #[test]
    fn test_zero_duration_is_complete() {
        assert_eq!(fade_ratio(1000, 1000, 0), 1.0);
        assert_eq!(fade_ratio(1000, 0, 0), 1.0);
    }

    #[test]
    fn test_fade_ratio_is_monotonic() {
        let mut prev = 0.0;
        for now in (1000..=1600).step_by(7) {
            let r = fade_ratio(1000, now, 500);
            assert!(r >= prev);
            assert!((0.0..=1.0).contains(&r));
            prev = r;
        }
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(-1.0), 0.0);
        assert_eq!(smoothstep(0.5), 0.5);
        assert_eq!(smoothstep(2.0), 1.0);
        assert_eq!(lerp(1.0, 1.1, 0.0), 1.0);
    }
}
