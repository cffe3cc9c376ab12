use serde::{Deserialize, Serialize};

use super::lenient;

/// A set of vital readings taken together. The API lists newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalSign {
    /// Systolic/diastolic, e.g. `120/80`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub blood_pressure: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub heart_rate: Option<String>,
    /// Fahrenheit.
    #[serde(default, deserialize_with = "lenient::text")]
    pub temperature: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub weight: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub oxygen_saturation: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub recorded_date: Option<String>,
}
