//! Steering for agents following waypoints

use glam::Vec3;

/// Computes the linear acceleration driving an agent toward its goal
pub trait Steering {
    /// Acceleration to apply given the agent's current state
    fn accelerate(&self, position: Vec3, velocity: Vec3) -> Vec3;
}

/// Head straight for the target at full acceleration
#[derive(Debug, Clone)]
pub struct Seek {
    /// Target position
    pub target: Vec3,
    /// Maximum acceleration
    pub max_acceleration: f32,
}

impl Seek {
    /// Create a new seek behavior
    #[must_use]
    pub fn new(target: Vec3, max_acceleration: f32) -> Self {
        Self {
            target,
            max_acceleration,
        }
    }
}

impl Steering for Seek {
    fn accelerate(&self, position: Vec3, _velocity: Vec3) -> Vec3 {
        (self.target - position).normalize_or_zero() * self.max_acceleration
    }
}

/// Head for the target, braking inside the slow radius and coasting to a
/// stop inside the stop radius
#[derive(Debug, Clone)]
pub struct Arrive {
    /// Target position
    pub target: Vec3,
    /// Maximum acceleration
    pub max_acceleration: f32,
    /// Maximum speed
    pub max_speed: f32,
    /// Distance at which braking starts
    pub slow_radius: f32,
    /// Distance at which the agent counts as stopped
    pub stop_radius: f32,
}

impl Arrive {
    /// Create a new arrive behavior
    #[must_use]
    pub fn new(target: Vec3, max_acceleration: f32, max_speed: f32) -> Self {
        Self {
            target,
            max_acceleration,
            max_speed,
            slow_radius: 5.0,
            stop_radius: 0.5,
        }
    }
}

impl Steering for Arrive {
    fn accelerate(&self, position: Vec3, velocity: Vec3) -> Vec3 {
        let to_target = self.target - position;
        let distance = to_target.length();

        if distance < self.stop_radius {
            return Vec3::ZERO;
        }

        let target_speed = if distance > self.slow_radius {
            self.max_speed
        } else {
            self.max_speed * distance / self.slow_radius
        };

        let target_velocity = to_target.normalize_or_zero() * target_speed;
        let acceleration = target_velocity - velocity;

        if acceleration.length() > self.max_acceleration {
            return acceleration.normalize_or_zero() * self.max_acceleration;
        }
        acceleration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_accelerates_toward_target() {
        let seek = Seek::new(Vec3::new(10.0, 0.0, 0.0), 5.0);
        let acceleration = seek.accelerate(Vec3::ZERO, Vec3::ZERO);

        assert!(acceleration.x > 0.0);
        assert!((acceleration.length() - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_arrive_brakes_near_target() {
        let arrive = Arrive::new(Vec3::new(1.0, 0.0, 0.0), 5.0, 10.0);

        // Inside the slow radius the commanded speed drops with distance.
        let braking = arrive.accelerate(Vec3::ZERO, Vec3::ZERO);
        assert!(braking.x > 0.0);
        assert!(braking.length() <= 5.0 + 0.01);
    }

    #[test]
    fn test_arrive_stops_inside_stop_radius() {
        let arrive = Arrive::new(Vec3::new(0.2, 0.0, 0.0), 5.0, 10.0);
        let acceleration = arrive.accelerate(Vec3::ZERO, Vec3::X);

        assert_eq!(acceleration, Vec3::ZERO);
    }
}
