//! Throttles how often a meter reading is handed to the host.
//!
//! Audio callbacks arrive far more often than a visual meter needs to
//! redraw, so readings are only reported once per update interval of audio.

use crate::config::MeterConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSchedule {
    interval_frames: f64,
    next_update_frame: f64,
}

impl UpdateSchedule {
    pub fn new(interval_ms: f64, sample_rate: f64) -> Self {
        let interval_frames = (interval_ms / 1000.0 * sample_rate).max(0.0);
        Self {
            interval_frames,
            next_update_frame: interval_frames,
        }
    }

    pub fn from_config(config: &MeterConfig) -> Self {
        Self::new(config.update_interval_ms, config.sample_rate)
    }

    pub fn interval_frames(&self) -> f64 {
        self.interval_frames
    }

    /// Consumes `frames` of audio and returns `true` when a report is due.
    pub fn advance(&mut self, frames: usize) -> bool {
        self.next_update_frame -= frames as f64;
        if self.next_update_frame >= 0.0 {
            return false;
        }

        if self.interval_frames > 0.0 {
            self.next_update_frame += self.interval_frames;
        } else {
            self.next_update_frame = 0.0;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_frames() {
        let schedule = UpdateSchedule::new(50.0, 48000.0);
        assert_eq!(schedule.interval_frames(), 2400.0);
    }

    #[test]
    fn test_fires_once_per_interval() {
        // 2400 frames per report, fed in 128-frame render quanta.
        let mut schedule = UpdateSchedule::new(50.0, 48000.0);
        let fired = (0..1000).filter(|_| schedule.advance(128)).count();
        // 128_000 frames / 2400 = 53.3 reports
        assert_eq!(fired, 53);
    }

    #[test]
    fn test_large_frames_fire_every_call() {
        let mut schedule = UpdateSchedule::new(50.0, 48000.0);
        assert!(schedule.advance(4096));
        assert!(schedule.advance(4096));
    }

    #[test]
    fn test_zero_interval_always_due() {
        let mut schedule = UpdateSchedule::new(0.0, 48000.0);
        assert!(schedule.advance(1));
        assert!(schedule.advance(1));
        assert!(!schedule.advance(0));
    }
}
