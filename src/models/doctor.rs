use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub specialization: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub cabin: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub timing: Option<String>,
    /// Years of practice.
    #[serde(default, deserialize_with = "lenient::text")]
    pub experience: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub phone: Option<String>,
}
