//! Request and response bodies for the mutating endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::lenient;

/// Form body for `POST /api/patients`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub age: String,
    pub gender: String,
}

/// Form body for `POST /api/appointments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub patient_id: String,
    pub doctor_id: String,
    pub appointment_date: String,
    pub appointment_time: String,
}

/// Reply to `POST /api/patients`. Backends answer either `{status: "ok"}`
/// or the new row's `{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatePatientResponse {
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(default)]
    pub id: Value,
}

impl CreatePatientResponse {
    pub fn is_created(&self) -> bool {
        self.status.as_deref() == Some("ok") || is_truthy(&self.id)
    }
}

/// Outcome discriminant of `POST /api/appointments`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Ok,
    /// The time slot has no capacity left.
    SlotFull,
    /// The doctor's day is fully booked.
    DoctorBusy,
    /// The doctor does not work at the requested time.
    Unavailable,
    #[default]
    #[serde(other)]
    Other,
}

impl BookingStatus {
    pub fn is_booked(self) -> bool {
        self == BookingStatus::Ok
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResponse {
    #[serde(default, deserialize_with = "booking_status")]
    pub status: BookingStatus,
    /// Server-supplied text; preferred over the client's defaults.
    #[serde(default, deserialize_with = "lenient::text")]
    pub message: Option<String>,
}

/// Any status the client does not recognise, including `null` and numbers,
/// is `Other` rather than a decoding failure.
fn booking_status<'de, D>(deserializer: D) -> Result<BookingStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| BookingStatus::deserialize(v).ok())
        .unwrap_or_default())
}

/// JavaScript truthiness, which the backend's `id` contract relies on.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
