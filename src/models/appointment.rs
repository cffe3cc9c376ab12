use serde::{Deserialize, Serialize};

use super::lenient;

/// A booked appointment. Patient and doctor are display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(default, deserialize_with = "lenient::string")]
    pub patient: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub doctor: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub appointment_date: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub appointment_time: Option<String>,
    /// Only present on backends that expose the owning patient.
    #[serde(default, deserialize_with = "lenient::text")]
    pub patient_id: Option<String>,
}

impl Appointment {
    /// Whether this appointment may belong to `patient_id`.
    ///
    /// Rows without an owner cannot be ruled out and are kept.
    pub fn may_belong_to(&self, patient_id: &str) -> bool {
        self.patient_id
            .as_deref()
            .map_or(true, |owner| owner == patient_id)
    }
}
