//! Hospital HTTP/JSON API.
//!
//! `HospitalApi` is the seam both page controllers depend on. The real
//! implementation is `HospitalClient` (reqwest). GETs return JSON arrays or
//! objects; mutations are form-encoded POSTs.

use std::future::Future;

pub mod client;
pub mod error;
#[cfg(test)]
pub(crate) mod mock;
pub mod types;

pub use client::HospitalClient;
pub use error::ApiError;
pub use types::{BookingRequest, BookingResponse, BookingStatus, CreatePatientResponse, NewPatient};

use crate::models::{
    Appointment, Doctor, LabReport, MedicalHistoryItem, Medication, Patient, PatientDashboard,
    Prescription, VitalSign,
};

/// Endpoint paths, relative to the API origin.
pub mod paths {
    pub const DOCTORS: &str = "/api/doctors";
    pub const PATIENTS: &str = "/api/patients";
    pub const APPOINTMENTS: &str = "/api/appointments";
    pub const PATIENT_DASHBOARD: &str = "/api/patient-dashboard";
    pub const VITALS: &str = "/api/vitals";
    pub const MEDICAL_HISTORY: &str = "/api/medical-history";
    pub const PRESCRIPTIONS: &str = "/api/prescriptions";
    pub const MEDICATIONS: &str = "/api/medications";
    pub const LAB_REPORTS: &str = "/api/lab-reports";
}

/// One method per backend endpoint.
///
/// Implementations never retry; every error is terminal for the call. The
/// returned futures are `Send`, so controllers can be driven from spawned
/// tasks on a multi-threaded runtime.
pub trait HospitalApi {
    /// `GET /api/doctors`
    fn list_doctors(&self) -> impl Future<Output = Result<Vec<Doctor>, ApiError>> + Send;

    /// `GET /api/patients`
    fn list_patients(&self) -> impl Future<Output = Result<Vec<Patient>, ApiError>> + Send;

    /// `POST /api/patients` with `name`, `age`, `gender`.
    fn create_patient(
        &self,
        patient: &NewPatient,
    ) -> impl Future<Output = Result<CreatePatientResponse, ApiError>> + Send;

    /// `GET /api/appointments` (all patients).
    fn list_appointments(&self)
        -> impl Future<Output = Result<Vec<Appointment>, ApiError>> + Send;

    /// `POST /api/appointments`. Business rejections arrive as `Ok` with a
    /// non-`ok` status.
    fn book_appointment(
        &self,
        booking: &BookingRequest,
    ) -> impl Future<Output = Result<BookingResponse, ApiError>> + Send;

    /// `GET /api/patient-dashboard?patient_id=`
    fn patient_dashboard(
        &self,
        patient_id: &str,
    ) -> impl Future<Output = Result<PatientDashboard, ApiError>> + Send;

    /// `GET /api/vitals?patient_id=`, newest first.
    fn vitals(
        &self,
        patient_id: &str,
    ) -> impl Future<Output = Result<Vec<VitalSign>, ApiError>> + Send;

    /// `GET /api/medical-history?patient_id=`
    fn medical_history(
        &self,
        patient_id: &str,
    ) -> impl Future<Output = Result<Vec<MedicalHistoryItem>, ApiError>> + Send;

    /// `GET /api/prescriptions?patient_id=`
    fn prescriptions(
        &self,
        patient_id: &str,
    ) -> impl Future<Output = Result<Vec<Prescription>, ApiError>> + Send;

    /// `GET /api/medications?prescription_id=`
    fn medications(
        &self,
        prescription_id: &str,
    ) -> impl Future<Output = Result<Vec<Medication>, ApiError>> + Send;

    /// `GET /api/lab-reports?patient_id=`
    fn lab_reports(
        &self,
        patient_id: &str,
    ) -> impl Future<Output = Result<Vec<LabReport>, ApiError>> + Send;
}
