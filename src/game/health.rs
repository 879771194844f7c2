//! Health tracking and the HUD-facing readout boundary

/// Receives health readouts. Implemented by the HUD layer and passed in
/// wherever health changes, instead of living behind a global pointer.
pub trait HealthDisplay {
    /// Show the current health fraction, 0.0 to 1.0
    fn set_health_percent(&mut self, percent: f32);

    /// The owner has run out of health
    fn on_death(&mut self) {}
}

/// Hit points for a character
#[derive(Debug, Clone)]
pub struct Health {
    max: f32,
    current: f32,
    dead: bool,
}

impl Health {
    /// Create a health pool at full capacity
    #[must_use]
    pub fn new(max: f32) -> Self {
        Self {
            max,
            current: max,
            dead: false,
        }
    }

    /// Check if the owner has died
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Current hit points
    #[must_use]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Maximum hit points
    #[must_use]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Current health as a fraction of the maximum
    #[must_use]
    pub fn percent(&self) -> f32 {
        self.current / self.max
    }

    /// Subtract damage, clamping at zero. Death fires once; a dead owner
    /// takes no further damage.
    pub fn apply_damage(&mut self, amount: f32, display: &mut dyn HealthDisplay) {
        if self.dead {
            return;
        }

        self.current -= amount;
        if self.current <= 0.0 {
            self.current = 0.0;
            self.dead = true;
            log::info!("health depleted");
            display.on_death();
        }
        display.set_health_percent(self.percent());
    }

    /// Restore hit points, clamping at the maximum. Healing cannot revive.
    pub fn apply_healing(&mut self, amount: f32, display: &mut dyn HealthDisplay) {
        if self.dead {
            return;
        }

        self.current = (self.current + amount).min(self.max);
        display.set_health_percent(self.percent());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records what the HUD was told
    #[derive(Debug, Default)]
    struct RecordingDisplay {
        percent: Option<f32>,
        deaths: u32,
    }

    impl HealthDisplay for RecordingDisplay {
        fn set_health_percent(&mut self, percent: f32) {
            self.percent = Some(percent);
        }

        fn on_death(&mut self) {
            self.deaths += 1;
        }
    }

    #[test]
    fn test_damage_reduces_health_and_updates_display() {
        let mut health = Health::new(100.0);
        let mut display = RecordingDisplay::default();

        health.apply_damage(30.0, &mut display);

        assert_eq!(health.current(), 70.0);
        assert_eq!(display.percent, Some(0.7));
        assert!(!health.is_dead());
    }

    #[test]
    fn test_lethal_damage_clamps_and_fires_death_once() {
        let mut health = Health::new(50.0);
        let mut display = RecordingDisplay::default();

        health.apply_damage(80.0, &mut display);
        assert!(health.is_dead());
        assert_eq!(health.current(), 0.0);
        assert_eq!(display.deaths, 1);

        // Further damage is ignored once dead.
        health.apply_damage(10.0, &mut display);
        assert_eq!(display.deaths, 1);
        assert_eq!(health.current(), 0.0);
    }

    #[test]
    fn test_healing_clamps_at_max_and_cannot_revive() {
        let mut health = Health::new(100.0);
        let mut display = RecordingDisplay::default();

        health.apply_damage(40.0, &mut display);
        health.apply_healing(100.0, &mut display);
        assert_eq!(health.current(), 100.0);

        health.apply_damage(200.0, &mut display);
        health.apply_healing(50.0, &mut display);
        assert!(health.is_dead());
        assert_eq!(health.current(), 0.0);
    }
}
