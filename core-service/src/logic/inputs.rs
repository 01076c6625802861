//! Input Vector
//!
//! The six plant readings fed to the model, in model order.

use serde::{Deserialize, Serialize};

/// Number of model input features
pub const FEATURE_COUNT: usize = 6;

/// Bounds and default of one input control
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    /// Label table key
    pub key: &'static str,
    /// InputVector field name, also the form/JSON field name
    pub name: &'static str,
    /// CSV column header
    pub column: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
    /// Control step (1.0 for integer-valued readings)
    pub step: f32,
    /// Reading is integer-valued (slider without decimals)
    pub integer: bool,
}

/// Field table in model input order
pub static FIELDS: [FieldSpec; FEATURE_COUNT] = [
    FieldSpec { key: "steam", name: "steam_flow", column: "Steam Flow", min: 180.0, max: 910.0, default: 850.0, step: 0.01, integer: false },
    FieldSpec { key: "hrh_p", name: "hrh_pressure", column: "HRH P", min: 1.2, max: 4.39, default: 4.0, step: 0.01, integer: false },
    FieldSpec { key: "hrh_t", name: "hrh_temperature", column: "HRH T", min: 390.0, max: 540.0, default: 525.0, step: 1.0, integer: true },
    FieldSpec { key: "main_p", name: "main_pressure", column: "Main Steam P", min: 7.0, max: 17.39, default: 16.0, step: 0.01, integer: false },
    FieldSpec { key: "hp_t", name: "hp_temperature", column: "HP Temp", min: 390.0, max: 540.0, default: 538.0, step: 1.0, integer: true },
    FieldSpec { key: "ambient", name: "ambient_temperature", column: "Ambient", min: -4.0, max: 50.0, default: 25.0, step: 0.01, integer: false },
];

/// One prediction request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputVector {
    /// Steam flow (t/h)
    pub steam_flow: f32,
    /// Hot reheat pressure (MPa)
    pub hrh_pressure: f32,
    /// Hot reheat temperature (°C)
    pub hrh_temperature: f32,
    /// Main steam pressure (MPa)
    pub main_pressure: f32,
    /// HP steam temperature (°C)
    pub hp_temperature: f32,
    /// Ambient temperature (°C)
    pub ambient_temperature: f32,
}

impl Default for InputVector {
    fn default() -> Self {
        Self::from_array(FIELDS.map(|f| f.default))
    }
}

impl InputVector {
    pub fn from_array(values: [f32; FEATURE_COUNT]) -> Self {
        let [steam_flow, hrh_pressure, hrh_temperature, main_pressure, hp_temperature, ambient_temperature] = values;
        Self {
            steam_flow,
            hrh_pressure,
            hrh_temperature,
            main_pressure,
            hp_temperature,
            ambient_temperature,
        }
    }

    /// Values in model input order
    pub fn as_array(&self) -> [f32; FEATURE_COUNT] {
        [
            self.steam_flow,
            self.hrh_pressure,
            self.hrh_temperature,
            self.main_pressure,
            self.hp_temperature,
            self.ambient_temperature,
        ]
    }
}
