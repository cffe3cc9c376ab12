//! Read-only records returned by the hospital API.
//!
//! Records are projections of server state for the lifetime of a page view.
//! Nothing here is mutated client-side.

pub mod appointment;
pub mod doctor;
pub mod history;
pub mod lab;
pub mod patient;
pub mod prescription;
pub mod vital_sign;

pub use appointment::Appointment;
pub use doctor::Doctor;
pub use history::MedicalHistoryItem;
pub use lab::LabReport;
pub use patient::{Patient, PatientDashboard, PatientRecord};
pub use prescription::{Medication, Prescription};
pub use vital_sign::VitalSign;

/// Deserializers for loosely typed backend fields.
///
/// The backend sends ids, ages and vital readings as numbers or strings
/// depending on the row, so these fields are normalised to text.
pub(crate) mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// String, number or bool as text. `null`, missing and blank become `None`.
    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(D::Error::custom(format!(
                "expected a scalar, found {other}"
            ))),
        }
    }

    /// Like [`text`], but absent values become an empty string.
    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text(deserializer)?.unwrap_or_default())
    }

    /// Required identifier, numeric or textual.
    pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        text(deserializer)?.ok_or_else(|| D::Error::custom("record id is empty"))
    }
}
