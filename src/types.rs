use serde::{Deserialize, Serialize};

/// Snapshot of a meter after a processing call, in the shape posted to the page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeterReading {
    pub instant: f32,
    pub slow: f32,
    pub clip: f32,
}

impl MeterReading {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
