use log::{debug, warn};

use crate::config::{MeterConfig, DEFAULT_CLIP_THRESHOLD};
use crate::error::{MeterError, Result};
use crate::types::MeterReading;

/// Weight kept from the previous slow volume on every `process` call.
pub const SLOW_DECAY: f32 = 0.95;
/// Weight given to the new fast volume. `SLOW_DECAY + SLOW_GAIN == 1`.
pub const SLOW_GAIN: f32 = 0.05;

/// Fixed-capacity sample buffer with an RMS ("fast") volume and an
/// exponentially smoothed ("slow") volume.
///
/// The caller fills the buffer through [`buffer_mut`](Self::buffer_mut) or
/// [`load`](Self::load), calls [`process`](Self::process), then reads the
/// results. Values read before `process` reflect the previous call.
///
/// The slow volume starts at zero, so the first `process` yields
/// `0.05 * fast_volume` and the meter ramps up from silence.
///
/// A NaN or infinite sample poisons the slow volume until [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct VolumeMeter {
    buffer: Box<[f32]>,
    fast_volume: f32,
    slow_volume: f32,
    clip: f32,
    clip_threshold: f32,
}

impl VolumeMeter {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            warn!("rejecting zero-capacity volume meter");
            return Err(MeterError::InvalidCapacity(0));
        }
        debug!("creating volume meter with capacity {}", capacity);

        let mut buffer = Vec::new();
        buffer.try_reserve_exact(capacity).map_err(|err| {
            warn!("cannot allocate {} samples: {}", capacity, err);
            MeterError::Allocation { capacity }
        })?;
        buffer.resize(capacity, 0.0);

        Ok(Self {
            buffer: buffer.into_boxed_slice(),
            fast_volume: 0.0,
            slow_volume: 0.0,
            clip: 0.0,
            clip_threshold: DEFAULT_CLIP_THRESHOLD,
        })
    }

    /// Builds a meter from a signed capacity as received from a host runtime.
    pub fn from_signed(capacity: i64) -> Result<Self> {
        if capacity <= 0 {
            warn!("rejecting volume meter capacity {}", capacity);
            return Err(MeterError::InvalidCapacity(capacity));
        }
        let capacity =
            usize::try_from(capacity).map_err(|_| MeterError::InvalidCapacity(capacity))?;
        Self::new(capacity)
    }

    pub fn with_config(config: &MeterConfig) -> Result<Self> {
        let threshold = config.clip_threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            warn!("rejecting clip threshold {}", threshold);
            return Err(MeterError::InvalidClipThreshold(threshold));
        }

        let mut meter = Self::from_signed(config.capacity)?;
        meter.clip_threshold = threshold;
        Ok(meter)
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    /// Direct write access to the samples. The slice length is fixed; slots
    /// not overwritten keep their values from the previous cycle.
    pub fn buffer_mut(&mut self) -> &mut [f32] {
        &mut self.buffer
    }

    /// Copies a full frame of samples into the buffer.
    pub fn load(&mut self, samples: &[f32]) -> Result<()> {
        if samples.len() != self.buffer.len() {
            warn!(
                "dropping frame of {} samples, meter expects {}",
                samples.len(),
                self.buffer.len()
            );
            return Err(MeterError::LengthMismatch {
                expected: self.buffer.len(),
                actual: samples.len(),
            });
        }
        self.buffer.copy_from_slice(samples);
        Ok(())
    }

    pub fn process(&mut self) {
        let len = self.buffer.len();
        // f64 accumulator keeps long frames from drifting.
        let mut sum = 0.0f64;
        let mut clipped = 0usize;

        for &sample in self.buffer.iter() {
            sum += f64::from(sample) * f64::from(sample);
            if sample.abs() > self.clip_threshold {
                clipped += 1;
            }
        }

        self.fast_volume = (sum / len as f64).sqrt() as f32;
        self.slow_volume = SLOW_DECAY * self.slow_volume + SLOW_GAIN * self.fast_volume;
        self.clip = clipped as f32 / len as f32;
    }

    pub fn fast_volume(&self) -> f32 {
        self.fast_volume
    }

    pub fn slow_volume(&self) -> f32 {
        self.slow_volume
    }

    /// Fraction of samples above the clip threshold at the last `process`.
    pub fn clip(&self) -> f32 {
        self.clip
    }

    pub fn clip_threshold(&self) -> f32 {
        self.clip_threshold
    }

    pub fn reading(&self) -> MeterReading {
        MeterReading {
            instant: self.fast_volume,
            slow: self.slow_volume,
            clip: self.clip,
        }
    }

    /// Zeroes samples and derived levels without reallocating.
    pub fn reset(&mut self) {
        debug!("resetting volume meter");
        self.buffer.fill(0.0);
        self.fast_volume = 0.0;
        self.slow_volume = 0.0;
        self.clip = 0.0;
    }
}
