use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabReport {
    #[serde(default, deserialize_with = "lenient::string")]
    pub report_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub test_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub results: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub report_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: Option<String>,
}
