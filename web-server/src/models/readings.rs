//! Plant readings as submitted by the form or the JSON API

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use unit2_core::{FieldSpec, InputVector, FEATURE_COUNT, FIELDS};

use crate::error::AppError;

/// The six readings with their control ranges
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct Readings {
    #[validate(range(min = 180.0, max = 910.0))]
    pub steam_flow: f32,

    #[validate(range(min = 1.2, max = 4.39))]
    pub hrh_pressure: f32,

    #[validate(range(min = 390.0, max = 540.0))]
    pub hrh_temperature: f32,

    #[validate(range(min = 7.0, max = 17.39))]
    pub main_pressure: f32,

    #[validate(range(min = 390.0, max = 540.0))]
    pub hp_temperature: f32,

    #[validate(range(min = -4.0, max = 50.0))]
    pub ambient_temperature: f32,
}

impl Readings {
    /// Check the control ranges and convert to the model input
    pub fn validated(self) -> Result<InputVector, AppError> {
        self.validate()?;

        let input = InputVector::from(self);
        for (spec, value) in FIELDS.iter().zip(input.as_array()) {
            if value.is_nan() {
                return Err(AppError::ValidationError(format!("{} is not a number", spec.column)));
            }
            if spec.integer && value.fract() != 0.0 {
                return Err(AppError::ValidationError(format!("{} must be a whole number", spec.column)));
            }
        }
        Ok(input)
    }

    /// Parse the urlencoded page form. Missing or non-numeric fields are
    /// reported together, in control order.
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self, AppError> {
        let mut values = [0.0f32; FEATURE_COUNT];
        let mut problems = Vec::new();

        for (slot, spec) in values.iter_mut().zip(FIELDS.iter()) {
            match form.get(spec.name).map(|raw| raw.trim()) {
                None | Some("") => problems.push(format!("{} is required", spec.column)),
                Some(raw) => match raw.parse::<f32>() {
                    Ok(value) => *slot = value,
                    Err(_) => problems.push(format!("{} must be a number", spec.column)),
                },
            }
        }

        if !problems.is_empty() {
            return Err(AppError::ValidationError(problems.join("; ")));
        }
        Ok(Readings::from(InputVector::from_array(values)))
    }
}

impl From<Readings> for InputVector {
    fn from(r: Readings) -> Self {
        InputVector {
            steam_flow: r.steam_flow,
            hrh_pressure: r.hrh_pressure,
            hrh_temperature: r.hrh_temperature,
            main_pressure: r.main_pressure,
            hp_temperature: r.hp_temperature,
            ambient_temperature: r.ambient_temperature,
        }
    }
}

impl From<InputVector> for Readings {
    fn from(v: InputVector) -> Self {
        Readings {
            steam_flow: v.steam_flow,
            hrh_pressure: v.hrh_pressure,
            hrh_temperature: v.hrh_temperature,
            main_pressure: v.main_pressure,
            hp_temperature: v.hp_temperature,
            ambient_temperature: v.ambient_temperature,
        }
    }
}

/// `Steam Flow must be between 180 and 910; Ambient must be between -4 and 50`
pub fn describe_range_errors(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let messages: Vec<String> = FIELDS
        .iter()
        .filter(|spec| field_errors.contains_key(spec.name))
        .map(range_message)
        .collect();

    if messages.is_empty() {
        errors.to_string()
    } else {
        messages.join("; ")
    }
}

fn range_message(spec: &FieldSpec) -> String {
    format!("{} must be between {} and {}", spec.column, spec.min, spec.max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(values: [f32; 6]) -> Readings {
        Readings::from(InputVector::from_array(values))
    }

    #[test]
    fn test_defaults_are_valid() {
        let input = Readings::from(InputVector::default()).validated().unwrap();
        assert_eq!(input, InputVector::default());
    }

    #[test]
    fn test_validator_ranges_match_field_table() {
        let defaults = FIELDS.map(|f| f.default);
        for (i, spec) in FIELDS.iter().enumerate() {
            for edge in [spec.min, spec.max] {
                let mut values = defaults;
                values[i] = edge;
                assert!(at(values).validate().is_ok(), "{} rejected {}", spec.name, edge);
            }
            for outside in [spec.min - 0.5, spec.max + 0.5] {
                let mut values = defaults;
                values[i] = outside;
                let err = at(values).validate().unwrap_err();
                assert!(err.field_errors().contains_key(spec.name), "{} accepted {}", spec.name, outside);
            }
        }
    }

    #[test]
    fn test_error_message_names_fields() {
        let mut values = FIELDS.map(|f| f.default);
        values[0] = 1000.0;
        values[5] = 60.0;

        let err = at(values).validated().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Steam Flow must be between 180 and 910; Ambient must be between -4 and 50"
        );
    }

    #[test]
    fn test_nan_is_rejected() {
        let mut values = FIELDS.map(|f| f.default);
        values[1] = f32::NAN;
        assert!(matches!(at(values).validated(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_integer_fields_reject_fractions() {
        let mut values = FIELDS.map(|f| f.default);
        values[2] = 525.5;
        let err = at(values).validated().unwrap_err();
        assert_eq!(err.to_string(), "HRH T must be a whole number");

        let mut values = FIELDS.map(|f| f.default);
        values[4] = 538.25;
        let err = at(values).validated().unwrap_err();
        assert_eq!(err.to_string(), "HP Temp must be a whole number");

        // Fractions stay allowed on the 0.01-step controls
        let mut values = FIELDS.map(|f| f.default);
        values[0] = 850.25;
        values[2] = 530.0;
        assert!(at(values).validated().is_ok());
    }

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_from_form_parses_all_fields() {
        let fields = form(&[
            ("steam_flow", "850"),
            ("hrh_pressure", "4"),
            ("hrh_temperature", "525"),
            ("main_pressure", "16"),
            ("hp_temperature", "538"),
            ("ambient_temperature", " 25 "),
        ]);
        let readings = Readings::from_form(&fields).unwrap();
        assert_eq!(InputVector::from(readings), InputVector::default());
    }

    #[test]
    fn test_from_form_reports_bad_fields() {
        let fields = form(&[
            ("steam_flow", ""),
            ("hrh_pressure", "4"),
            ("hrh_temperature", "abc"),
            ("main_pressure", "16"),
            ("hp_temperature", "538"),
        ]);
        let err = Readings::from_form(&fields).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Steam Flow is required; HRH T must be a number; Ambient is required"
        );
    }
}
