// src/sound_meter.rs
use js_sys::{Float32Array, JSON};
use soundmeter::{MeterConfig, MeterReading, UpdateSchedule, VolumeMeter};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log_str(s: &str);
}

// Outside a browser the messages go through the `log` facade instead.
#[cfg(not(target_arch = "wasm32"))]
fn console_log_str(s: &str) {
    log::debug!("{}", s);
}

macro_rules! console_log {
    ($($t:tt)*) => (console_log_str(&format_args!($($t)*).to_string()))
}

/// Browser-facing handle on a [`VolumeMeter`].
///
/// Typical use from an audio callback:
///
/// ```js
/// const meter = new SoundMeter(2048);
/// const view = meter.data_buffer();
/// view.set(inputBuffer.getChannelData(0));
/// meter.process_data_buffer();
/// const instant = meter.get_fast_volume();
/// ```
#[wasm_bindgen]
pub struct SoundMeter {
    meter: VolumeMeter,
    schedule: UpdateSchedule,
}

#[wasm_bindgen]
impl SoundMeter {
    #[wasm_bindgen(constructor)]
    pub fn new(capacity: i32) -> Result<SoundMeter, JsError> {
        let meter = VolumeMeter::from_signed(i64::from(capacity))?;
        console_log!("Creating new SoundMeter with {} samples", capacity);

        Ok(Self {
            meter,
            schedule: UpdateSchedule::from_config(&MeterConfig::default()),
        })
    }

    /// Builds a meter from a JSON config such as
    /// `{"capacity": 1024, "sample_rate": 44100}`.
    pub fn with_config(json: &str) -> Result<SoundMeter, JsError> {
        let config = MeterConfig::from_json(json)?;
        let meter = VolumeMeter::with_config(&config)?;
        console_log!("Creating SoundMeter from config {:?}", config);

        Ok(Self {
            meter,
            schedule: UpdateSchedule::from_config(&config),
        })
    }

    /// Live view over the sample buffer in wasm memory.
    ///
    /// Writes through the view land directly in the meter. The view must be
    /// re-fetched after the meter is freed or wasm memory grows; a detached
    /// view silently reads as empty.
    pub fn data_buffer(&mut self) -> Float32Array {
        let buffer = self.meter.buffer_mut();
        // SAFETY: the pointer and length come from a live boxed slice owned
        // by `self`, and no Rust allocation happens before the view is returned.
        unsafe { Float32Array::view_mut_raw(buffer.as_mut_ptr(), buffer.len()) }
    }

    /// Copies a full frame into the buffer. The length must equal the capacity.
    pub fn load_data(&mut self, data: &[f32]) -> Result<(), JsError> {
        self.meter.load(data)?;
        Ok(())
    }

    /// Copy of the current buffer contents.
    pub fn data(&self) -> Vec<f32> {
        self.meter.buffer().to_vec()
    }

    pub fn process_data_buffer(&mut self) {
        self.meter.process();
    }

    /// Processes the buffer and returns a `{instant, slow, clip}` object when
    /// an update interval has elapsed, `null` otherwise.
    pub fn process_and_poll(&mut self) -> Result<JsValue, JsValue> {
        if self.tick() {
            reading_to_js(&self.meter.reading())
        } else {
            Ok(JsValue::NULL)
        }
    }

    pub fn reading(&self) -> Result<JsValue, JsValue> {
        reading_to_js(&self.meter.reading())
    }

    pub fn get_fast_volume(&self) -> f32 {
        self.meter.fast_volume()
    }

    pub fn get_slow_volume(&self) -> f32 {
        self.meter.slow_volume()
    }

    pub fn get_clip(&self) -> f32 {
        self.meter.clip()
    }

    pub fn get_capacity(&self) -> usize {
        self.meter.capacity()
    }

    pub fn reset(&mut self) {
        self.meter.reset();
        console_log!("SoundMeter reset");
    }
}

impl SoundMeter {
    /// Runs one processing cycle and reports whether an update is due.
    fn tick(&mut self) -> bool {
        self.meter.process();
        self.schedule.advance(self.meter.capacity())
    }
}

fn reading_to_js(reading: &MeterReading) -> Result<JsValue, JsValue> {
    let json = reading
        .to_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    JSON::parse(&json)
}
