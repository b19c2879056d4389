//! Velocity integration
//!
//! Fixed-interval kinematics: each axis is advanced with a half velocity
//! change before and after the position step.

/// Time step of one physics update
pub const UPDATE_INTERVAL: f64 = 0.1;

/// Extra penetration tolerated before a contact is treated as a pass-through
pub const OVERLAP_BIAS: f64 = 4.0;

/// Maximum velocity value meaning "no limit"
pub const UNBOUNDED_VELOCITY: f64 = 10000.0;

/// New velocity after one interval of acceleration or drag
///
/// Acceleration wins over drag. Drag slows the body toward zero without
/// crossing it. The result is clamped to `[-max, max]` unless the velocity is
/// zero or `max` equals [`UNBOUNDED_VELOCITY`].
pub fn compute_velocity(velocity: f64, acceleration: f64, drag: f64, max: f64) -> f64 {
    let mut velocity = velocity;
    if acceleration != 0.0 {
        velocity += acceleration * UPDATE_INTERVAL;
    } else if drag != 0.0 {
        let drag = drag * UPDATE_INTERVAL;
        if velocity - drag > 0.0 {
            velocity -= drag;
        } else if velocity + drag < 0.0 {
            velocity += drag;
        } else {
            velocity = 0.0;
        }
    }

    if velocity != 0.0 && max != UNBOUNDED_VELOCITY {
        if velocity > max {
            velocity = max;
        } else if velocity < -max {
            velocity = -max;
        }
    }
    velocity
}

/// Advance one axis, returning `(position, velocity)`
pub fn integrate_axis(position: f64, velocity: f64, acceleration: f64, drag: f64, max: f64) -> (f64, f64) {
    let half_delta = (compute_velocity(velocity, acceleration, drag, max) - velocity) / 2.0;
    let mut velocity = velocity + half_delta;
    let position = position + velocity * UPDATE_INTERVAL;
    velocity += half_delta;
    (position, velocity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sentinel_max_never_clamps() {
        for velocity in [-25_000.0, -1.0, 0.0, 3.5, 12_345.0] {
            assert_eq!(compute_velocity(velocity, 0.0, 0.0, UNBOUNDED_VELOCITY), velocity);
        }
    }

    #[test]
    fn test_acceleration_overrides_drag() {
        assert_relative_eq!(compute_velocity(10.0, 20.0, 1000.0, UNBOUNDED_VELOCITY), 12.0);
    }

    #[test]
    fn test_drag_stops_at_zero() {
        assert_relative_eq!(compute_velocity(10.0, 0.0, 50.0, UNBOUNDED_VELOCITY), 5.0);
        assert_eq!(compute_velocity(3.0, 0.0, 50.0, UNBOUNDED_VELOCITY), 0.0);
        assert_eq!(compute_velocity(-3.0, 0.0, 50.0, UNBOUNDED_VELOCITY), 0.0);
        assert_relative_eq!(compute_velocity(-10.0, 0.0, 50.0, UNBOUNDED_VELOCITY), -5.0);
    }

    #[test]
    fn test_finite_max_clamps_both_directions() {
        assert_eq!(compute_velocity(50.0, 0.0, 0.0, 20.0), 20.0);
        assert_eq!(compute_velocity(-50.0, 0.0, 0.0, 20.0), -20.0);
        assert_eq!(compute_velocity(0.0, 0.0, 0.0, 20.0), 0.0);
    }

    #[test]
    fn test_integration_uses_average_velocity() {
        // constant velocity
        let (position, velocity) = integrate_axis(0.0, 50.0, 0.0, 0.0, UNBOUNDED_VELOCITY);
        assert_relative_eq!(position, 5.0);
        assert_relative_eq!(velocity, 50.0);

        // from rest under acceleration the step uses half the gained speed
        let (position, velocity) = integrate_axis(0.0, 0.0, 100.0, 0.0, UNBOUNDED_VELOCITY);
        assert_relative_eq!(velocity, 10.0);
        assert_relative_eq!(position, 0.5);
    }
}
