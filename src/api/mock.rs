//! In-memory `HospitalApi` for controller tests.
//!
//! Records every request as `"<METHOD> <path>[?<key>=<value>]"`, can stall
//! per-patient calls, and can fail whole endpoints.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::error::ApiError;
use super::paths;
use super::types::{BookingRequest, BookingResponse, CreatePatientResponse, NewPatient};
use super::HospitalApi;
use crate::models::{
    Appointment, Doctor, LabReport, MedicalHistoryItem, Medication, Patient, PatientDashboard,
    PatientRecord, Prescription, VitalSign,
};

/// Everything the dashboard loads for one patient.
#[derive(Debug, Clone, Default)]
pub struct PatientFixture {
    pub record: PatientRecord,
    pub vitals: Vec<VitalSign>,
    pub history: Vec<MedicalHistoryItem>,
    pub prescriptions: Vec<Prescription>,
    pub lab_reports: Vec<LabReport>,
}

pub struct MockHospitalApi {
    doctors: Vec<Doctor>,
    patients: Mutex<Vec<Patient>>,
    appointments: Mutex<Vec<Appointment>>,
    fixtures: HashMap<String, PatientFixture>,
    medications: HashMap<String, Vec<Medication>>,
    create_response: CreatePatientResponse,
    booking_response: BookingResponse,
    failing: HashSet<&'static str>,
    delays: HashMap<String, Duration>,
    medication_delay: Duration,
    requests: Mutex<Vec<String>>,
    created: Mutex<Vec<NewPatient>>,
    bookings: Mutex<Vec<BookingRequest>>,
    medications_in_flight: AtomicUsize,
    medications_peak: AtomicUsize,
}

impl Default for MockHospitalApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHospitalApi {
    pub fn new() -> Self {
        Self {
            doctors: Vec::new(),
            patients: Mutex::new(Vec::new()),
            appointments: Mutex::new(Vec::new()),
            fixtures: HashMap::new(),
            medications: HashMap::new(),
            create_response: CreatePatientResponse {
                status: Some("ok".into()),
                ..Default::default()
            },
            booking_response: BookingResponse::default(),
            failing: HashSet::new(),
            delays: HashMap::new(),
            medication_delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            bookings: Mutex::new(Vec::new()),
            medications_in_flight: AtomicUsize::new(0),
            medications_peak: AtomicUsize::new(0),
        }
    }

    pub fn with_doctor(mut self, doctor: Doctor) -> Self {
        self.doctors.push(doctor);
        self
    }

    pub fn with_patient(self, patient: Patient) -> Self {
        self.patients.lock().unwrap().push(patient);
        self
    }

    pub fn with_appointment(self, appointment: Appointment) -> Self {
        self.appointments.lock().unwrap().push(appointment);
        self
    }

    pub fn with_fixture(mut self, patient_id: &str, fixture: PatientFixture) -> Self {
        self.fixtures.insert(patient_id.to_string(), fixture);
        self
    }

    pub fn with_medications(mut self, prescription_id: &str, meds: Vec<Medication>) -> Self {
        self.medications.insert(prescription_id.to_string(), meds);
        self
    }

    pub fn with_create_response(mut self, response: CreatePatientResponse) -> Self {
        self.create_response = response;
        self
    }

    pub fn with_booking_response(mut self, response: BookingResponse) -> Self {
        self.booking_response = response;
        self
    }

    /// Every call to `path` fails with a 500.
    pub fn failing(mut self, path: &'static str) -> Self {
        self.failing.insert(path);
        self
    }

    /// Stall every patient-scoped call for `patient_id`.
    pub fn delay_for(mut self, patient_id: &str, delay: Duration) -> Self {
        self.delays.insert(patient_id.to_string(), delay);
        self
    }

    pub fn with_medication_delay(mut self, delay: Duration) -> Self {
        self.medication_delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests whose path (ignoring the query) equals `path`.
    pub fn count(&self, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.split(' ').nth(1).and_then(|p| p.split('?').next()) == Some(path))
            .count()
    }

    pub fn created_patients(&self) -> Vec<NewPatient> {
        self.created.lock().unwrap().clone()
    }

    pub fn bookings(&self) -> Vec<BookingRequest> {
        self.bookings.lock().unwrap().clone()
    }

    /// Highest number of medication requests observed in flight at once.
    pub fn medication_peak(&self) -> usize {
        self.medications_peak.load(Ordering::SeqCst)
    }

    fn record(
        &self,
        method: &str,
        path: &'static str,
        query: Option<(&str, &str)>,
    ) -> Result<(), ApiError> {
        let entry = match query {
            Some((key, value)) => format!("{method} {path}?{key}={value}"),
            None => format!("{method} {path}"),
        };
        self.requests.lock().unwrap().push(entry);

        if self.failing.contains(path) {
            return Err(ApiError::Status {
                status: 500,
                body: format!("{path} unavailable"),
            });
        }
        Ok(())
    }

    async fn stall(&self, patient_id: &str) {
        if let Some(delay) = self.delays.get(patient_id) {
            tokio::time::sleep(*delay).await;
        }
    }

    fn fixture(&self, patient_id: &str) -> Result<&PatientFixture, ApiError> {
        self.fixtures.get(patient_id).ok_or_else(|| ApiError::Status {
            status: 404,
            body: format!("patient {patient_id} not found"),
        })
    }
}

impl HospitalApi for MockHospitalApi {
    async fn list_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
        self.record("GET", paths::DOCTORS, None)?;
        Ok(self.doctors.clone())
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, ApiError> {
        self.record("GET", paths::PATIENTS, None)?;
        Ok(self.patients.lock().unwrap().clone())
    }

    async fn create_patient(
        &self,
        patient: &NewPatient,
    ) -> Result<CreatePatientResponse, ApiError> {
        self.record("POST", paths::PATIENTS, None)?;
        self.created.lock().unwrap().push(patient.clone());
        if self.create_response.is_created() {
            let mut patients = self.patients.lock().unwrap();
            let id = (patients.len() + 1).to_string();
            patients.push(Patient {
                id,
                name: patient.name.clone(),
                age: Some(patient.age.clone()).filter(|a| !a.is_empty()),
                gender: Some(patient.gender.clone()).filter(|g| !g.is_empty()),
            });
        }
        Ok(self.create_response.clone())
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        self.record("GET", paths::APPOINTMENTS, None)?;
        Ok(self.appointments.lock().unwrap().clone())
    }

    async fn book_appointment(
        &self,
        booking: &BookingRequest,
    ) -> Result<BookingResponse, ApiError> {
        self.record("POST", paths::APPOINTMENTS, None)?;
        self.bookings.lock().unwrap().push(booking.clone());
        if self.booking_response.status.is_booked() {
            self.appointments.lock().unwrap().push(Appointment {
                patient: booking.patient_id.clone(),
                doctor: booking.doctor_id.clone(),
                appointment_date: booking.appointment_date.clone(),
                appointment_time: Some(booking.appointment_time.clone()),
                patient_id: None,
            });
        }
        Ok(self.booking_response.clone())
    }

    async fn patient_dashboard(&self, patient_id: &str) -> Result<PatientDashboard, ApiError> {
        self.record("GET", paths::PATIENT_DASHBOARD, Some(("patient_id", patient_id)))?;
        self.stall(patient_id).await;
        Ok(PatientDashboard {
            patient: self.fixture(patient_id)?.record.clone(),
        })
    }

    async fn vitals(&self, patient_id: &str) -> Result<Vec<VitalSign>, ApiError> {
        self.record("GET", paths::VITALS, Some(("patient_id", patient_id)))?;
        self.stall(patient_id).await;
        Ok(self.fixture(patient_id)?.vitals.clone())
    }

    async fn medical_history(
        &self,
        patient_id: &str,
    ) -> Result<Vec<MedicalHistoryItem>, ApiError> {
        self.record("GET", paths::MEDICAL_HISTORY, Some(("patient_id", patient_id)))?;
        self.stall(patient_id).await;
        Ok(self.fixture(patient_id)?.history.clone())
    }

    async fn prescriptions(&self, patient_id: &str) -> Result<Vec<Prescription>, ApiError> {
        self.record("GET", paths::PRESCRIPTIONS, Some(("patient_id", patient_id)))?;
        self.stall(patient_id).await;
        Ok(self.fixture(patient_id)?.prescriptions.clone())
    }

    async fn medications(&self, prescription_id: &str) -> Result<Vec<Medication>, ApiError> {
        self.record("GET", paths::MEDICATIONS, Some(("prescription_id", prescription_id)))?;

        let now = self.medications_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.medications_peak.fetch_max(now, Ordering::SeqCst);
        if !self.medication_delay.is_zero() {
            tokio::time::sleep(self.medication_delay).await;
        }
        self.medications_in_flight.fetch_sub(1, Ordering::SeqCst);

        Ok(self
            .medications
            .get(prescription_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn lab_reports(&self, patient_id: &str) -> Result<Vec<LabReport>, ApiError> {
        self.record("GET", paths::LAB_REPORTS, Some(("patient_id", patient_id)))?;
        self.stall(patient_id).await;
        Ok(self.fixture(patient_id)?.lab_reports.clone())
    }
}
