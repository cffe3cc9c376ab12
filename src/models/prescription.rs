use serde::{Deserialize, Serialize};

use super::lenient;

/// A prescription header. Medications are fetched separately by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub doctor_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub diagnosis: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub prescription_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: Option<String>,
}

/// One line of a prescription, from `GET /api/medications`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    #[serde(default, deserialize_with = "lenient::string")]
    pub medicine_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub dosage: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub frequency: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub instructions: Option<String>,
}
