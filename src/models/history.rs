use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalHistoryItem {
    #[serde(default, deserialize_with = "lenient::string")]
    pub condition_name: String,
    /// Free text such as `Active`, `Resolved`, `Chronic`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub diagnosis_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: Option<String>,
}
