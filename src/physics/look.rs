use std::f64::consts::{PI, TAU};
use tokio::time::Instant;

/// Internal yaw/pitch (radians) to the wire's degrees
pub fn to_network_yaw_pitch(yaw: f64, pitch: f64) -> (f32, f32) {
    ((PI - yaw).to_degrees() as f32, (-pitch).to_degrees() as f32)
}

/// Wire degrees back to internal radians, wrapped into one turn
pub fn from_network_yaw_pitch(yaw: f32, pitch: f32) -> (f64, f64) {
    (
        (PI - (yaw as f64).to_radians()) % TAU,
        (-(pitch as f64).to_radians()) % TAU,
    )
}

/// Shortest signed turn from `from` to `to`, in `[-PI, PI)`
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    (to - from + PI).rem_euclid(TAU) - PI
}

/// Limits the reported turn rate so the outbound stream never jumps faster than `yaw_speed`
#[derive(Debug, Clone)]
pub struct YawSmoother {
    last_sent_yaw: f64,
    last_sent_at: Instant,
    yaw_speed: f64,
}

impl YawSmoother {
    pub fn new(yaw: f64, now: Instant, yaw_speed: f64) -> Self {
        Self {
            last_sent_yaw: yaw % TAU,
            last_sent_at: now,
            yaw_speed,
        }
    }

    pub fn last_sent_yaw(&self) -> f64 {
        self.last_sent_yaw
    }

    /// Steps toward `desired_yaw` by at most `yaw_speed` times the time since the last send
    pub fn advance(&mut self, desired_yaw: f64, now: Instant) -> f64 {
        let delta = shortest_delta(self.last_sent_yaw, desired_yaw % TAU);
        let elapsed = now.saturating_duration_since(self.last_sent_at).as_secs_f64();
        self.last_sent_at = now;

        let max_delta = elapsed * self.yaw_speed;
        let delta = if delta.abs() > max_delta {
            max_delta.copysign(delta)
        } else {
            delta
        };
        self.last_sent_yaw = (self.last_sent_yaw + delta) % TAU;
        self.last_sent_yaw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_network_round_trip() {
        let (yaw, pitch) = from_network_yaw_pitch(90.0, -30.0);
        assert!((yaw - PI / 2.0).abs() < 1e-6);
        assert!((pitch - PI / 6.0).abs() < 1e-6);

        let (net_yaw, net_pitch) = to_network_yaw_pitch(yaw, pitch);
        assert!((net_yaw - 90.0).abs() < 1e-3);
        assert!((net_pitch + 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_shortest_delta_wraps() {
        assert!((shortest_delta(0.1, TAU - 0.1) + 0.2).abs() < TOLERANCE);
        assert!((shortest_delta(-3.0, 3.0) - (6.0 - TAU)).abs() < TOLERANCE);
        assert!(shortest_delta(1.0, 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_turn_rate_is_bounded() {
        let start = Instant::now();
        let mut smoother = YawSmoother::new(0.0, start, 3.0);

        let mut previous = smoother.last_sent_yaw();
        for step in 1..=25 {
            let now = start + Duration::from_millis(50 * step);
            let sent = smoother.advance(PI - 0.01, now);
            let turned = shortest_delta(previous, sent).abs();
            assert!(turned <= 3.0 * 0.05 + TOLERANCE, "turned {}", turned);
            previous = sent;
        }
        // 1.25 s at 3 rad/s covers the whole half turn
        assert!((previous - (PI - 0.01)).abs() < 1e-6);
    }

    #[test]
    fn test_small_turn_lands_exactly() {
        let start = Instant::now();
        let mut smoother = YawSmoother::new(1.0, start, 3.0);
        let sent = smoother.advance(1.05, start + Duration::from_millis(50));
        assert!((sent - 1.05).abs() < TOLERANCE);
    }

    #[test]
    fn test_no_time_no_turn() {
        let start = Instant::now();
        let mut smoother = YawSmoother::new(0.5, start, 3.0);
        assert_eq!(smoother.advance(2.0, start), 0.5);
    }
}
