//! reqwest-backed `HospitalApi`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::ApiError;
use super::paths;
use super::types::{BookingRequest, BookingResponse, CreatePatientResponse, NewPatient};
use super::HospitalApi;
use crate::config::ClientConfig;
use crate::models::{
    Appointment, Doctor, LabReport, MedicalHistoryItem, Medication, Patient, PatientDashboard,
    Prescription, VitalSign,
};

/// HTTP client for the hospital API.
pub struct HospitalClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HospitalClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Http(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Client configured from `CAREPOINT_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        tracing::debug!(path, ?query, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Form-encoded POST. The body is decoded whatever the status code,
    /// since rejections are reported in JSON alongside 4xx statuses.
    async fn post_form<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        form: &B,
    ) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        tracing::debug!(path, "POST");

        let response = self
            .client
            .post(&url)
            .form(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            if status.is_success() {
                ApiError::Parse(e.to_string())
            } else {
                ApiError::Status {
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&bytes).into_owned(),
                }
            }
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_connect() {
            ApiError::Connection(self.config.base_url.clone())
        } else if e.is_timeout() {
            ApiError::Timeout(self.config.timeout_secs)
        } else if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else {
            ApiError::Http(e.to_string())
        }
    }
}

impl HospitalApi for HospitalClient {
    async fn list_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
        self.get_json(paths::DOCTORS, &[]).await
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, ApiError> {
        self.get_json(paths::PATIENTS, &[]).await
    }

    async fn create_patient(
        &self,
        patient: &NewPatient,
    ) -> Result<CreatePatientResponse, ApiError> {
        self.post_form(paths::PATIENTS, patient).await
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        self.get_json(paths::APPOINTMENTS, &[]).await
    }

    async fn book_appointment(
        &self,
        booking: &BookingRequest,
    ) -> Result<BookingResponse, ApiError> {
        self.post_form(paths::APPOINTMENTS, booking).await
    }

    async fn patient_dashboard(&self, patient_id: &str) -> Result<PatientDashboard, ApiError> {
        self.get_json(paths::PATIENT_DASHBOARD, &[("patient_id", patient_id)])
            .await
    }

    async fn vitals(&self, patient_id: &str) -> Result<Vec<VitalSign>, ApiError> {
        self.get_json(paths::VITALS, &[("patient_id", patient_id)]).await
    }

    async fn medical_history(
        &self,
        patient_id: &str,
    ) -> Result<Vec<MedicalHistoryItem>, ApiError> {
        self.get_json(paths::MEDICAL_HISTORY, &[("patient_id", patient_id)])
            .await
    }

    async fn prescriptions(&self, patient_id: &str) -> Result<Vec<Prescription>, ApiError> {
        self.get_json(paths::PRESCRIPTIONS, &[("patient_id", patient_id)])
            .await
    }

    async fn medications(&self, prescription_id: &str) -> Result<Vec<Medication>, ApiError> {
        self.get_json(paths::MEDICATIONS, &[("prescription_id", prescription_id)])
            .await
    }

    async fn lab_reports(&self, patient_id: &str) -> Result<Vec<LabReport>, ApiError> {
        self.get_json(paths::LAB_REPORTS, &[("patient_id", patient_id)])
            .await
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::net::SocketAddr;

    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Form, Json, Router};
    use serde_json::{json, Value};

    use crate::api::types::BookingStatus;

    /// Serve `app` on an ephemeral localhost port and return its origin.
    async fn spawn_backend(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("bind test backend");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    fn client_for(origin: &str) -> HospitalClient {
        HospitalClient::new(ClientConfig::new(origin)).unwrap()
    }

    fn backend() -> Router {
        Router::new()
            .route(
                "/api/doctors",
                get(|| async {
                    Json(json!([
                        {"id": 1, "name": "Meera Rao", "specialization": "Cardiology", "cabin": "B-12", "experience": 14},
                        {"id": "2", "name": "Tom Vance", "specialization": "Dermatology"}
                    ]))
                }),
            )
            .route(
                "/api/patients",
                get(|| async { Json(json!([{"id": 5, "name": "Asha", "age": 34, "gender": "Female"}])) })
                    .post(|Form(form): Form<HashMap<String, String>>| async move {
                        if form.get("name").map_or(true, |n| n.is_empty()) {
                            return Json(json!({"status": "error"}));
                        }
                        Json(json!({
                            "id": 77,
                            "echo": form
                        }))
                    }),
            )
            .route(
                "/api/appointments",
                get(|| async { Json(json!([])) }).post(
                    |Form(form): Form<HashMap<String, String>>| async move {
                        if form.get("appointment_time").map(String::as_str) == Some("09:00") {
                            (
                                StatusCode::CONFLICT,
                                Json(json!({"status": "slot_full", "message": "09:00 is taken"})),
                            )
                        } else {
                            (StatusCode::OK, Json(json!({"status": "ok"})))
                        }
                    },
                ),
            )
            .route(
                "/api/vitals",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    Json(json!([{
                        "heart_rate": 72,
                        "blood_pressure": "120/80",
                        "recorded_date": format!("for-{}", q.get("patient_id").cloned().unwrap_or_default())
                    }]))
                }),
            )
            .route(
                "/api/medical-history",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database offline") }),
            )
            .route("/api/lab-reports", get(|| async { "<html>maintenance</html>" }))
            .route(
                "/api/medications",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    let id = q.get("prescription_id").cloned().unwrap_or_default();
                    Json(json!([{"medicine_name": format!("drug-{id}"), "dosage": "5mg", "frequency": "daily", "duration": 7}]))
                }),
            )
            .route(
                "/api/patient-dashboard",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    Json(json!({"patient": {"name": format!("patient-{}", q["patient_id"]), "blood_group": "O+"}}))
                }),
            )
    }

    #[tokio::test]
    async fn lists_doctors() {
        let origin = spawn_backend(backend()).await;
        let doctors = client_for(&origin).list_doctors().await.unwrap();
        assert_eq!(doctors.len(), 2);
        assert_eq!(doctors[0].id, "1");
        assert_eq!(doctors[0].cabin.as_deref(), Some("B-12"));
        assert_eq!(doctors[0].experience.as_deref(), Some("14"));
        assert_eq!(doctors[1].id, "2");
    }

    #[tokio::test]
    async fn patient_scoped_query_is_sent() {
        let origin = spawn_backend(backend()).await;
        let client = client_for(&origin);

        let vitals = client.vitals("42").await.unwrap();
        assert_eq!(vitals[0].recorded_date.as_deref(), Some("for-42"));
        assert_eq!(vitals[0].heart_rate.as_deref(), Some("72"));

        let dashboard = client.patient_dashboard("42").await.unwrap();
        assert_eq!(dashboard.patient.name.as_deref(), Some("patient-42"));
        assert_eq!(dashboard.patient.blood_group.as_deref(), Some("O+"));

        let meds = client.medications("rx-9").await.unwrap();
        assert_eq!(meds[0].medicine_name, "drug-rx-9");
        assert_eq!(meds[0].duration, "7");
    }

    #[tokio::test]
    async fn create_patient_posts_form() {
        let origin = spawn_backend(backend()).await;
        let client = client_for(&origin);

        let response = client
            .create_patient(&NewPatient {
                name: "Ravi Kumar".into(),
                age: "51".into(),
                gender: "Male".into(),
            })
            .await
            .unwrap();
        assert!(response.is_created());
        assert_eq!(response.id, Value::from(77));
    }

    #[tokio::test]
    async fn booking_rejection_decoded_despite_conflict_status() {
        let origin = spawn_backend(backend()).await;
        let client = client_for(&origin);

        let booking = BookingRequest {
            patient_id: "5".into(),
            doctor_id: "1".into(),
            appointment_date: "2024-06-01".into(),
            appointment_time: "09:00".into(),
        };
        let response = client.book_appointment(&booking).await.unwrap();
        assert_eq!(response.status, BookingStatus::SlotFull);
        assert_eq!(response.message.as_deref(), Some("09:00 is taken"));

        let ok = client
            .book_appointment(&BookingRequest {
                appointment_time: "11:00".into(),
                ..booking
            })
            .await
            .unwrap();
        assert_eq!(ok.status, BookingStatus::Ok);
    }

    #[tokio::test]
    async fn server_error_maps_to_status() {
        let origin = spawn_backend(backend()).await;
        let err = client_for(&origin).medical_history("1").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 500,
                body: "database offline".into()
            }
        );
    }

    #[tokio::test]
    async fn non_json_body_maps_to_parse() {
        let origin = spawn_backend(backend()).await;
        let err = client_for(&origin).lab_reports("1").await.unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let origin = spawn_backend(backend()).await;
        let err = client_for(&origin).prescriptions("1").await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn closed_port_is_connection_error() {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let origin = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = client_for(&origin).list_patients().await.unwrap_err();
        assert_eq!(err, ApiError::Connection(origin));
    }
}
