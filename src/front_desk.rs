//! Front desk controller: doctor, patient and appointment lists, the
//! add-patient form and appointment booking.
//!
//! List loads never fail the caller. A failed fetch is logged and the list
//! shows its error placeholder. Form submissions return a `FrontDeskError`
//! so callers can tell validation, rejection and transport failures apart,
//! while the view already carries the user-facing text.

use thiserror::Error;

use crate::api::{ApiError, BookingRequest, BookingStatus, HospitalApi, NewPatient};
use crate::view::front_desk::{
    doctor_option, patient_option, render_page, BookingForm, BookingMessage, Card,
    FrontDeskTab, FrontDeskView, MessageTone, PatientForm,
};
use crate::view::{reselect, PanelState};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// A required form field was left blank. Displays the alert text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Enter name")]
    MissingName,

    #[error("Please fill all fields")]
    MissingFields,
}

#[derive(Debug, Error)]
pub enum FrontDeskError {
    #[error("Invalid form: {0}")]
    Validation(#[from] FormError),

    #[error("Server rejected the request")]
    Rejected,

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

const PATIENT_ADDED: &str = "Patient added";
const PATIENT_FAILED: &str = "Failed";

/// Text shown for a booking outcome when the server sends no message.
pub fn default_booking_message(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Ok => "Appointment booked successfully",
        BookingStatus::SlotFull => "This time slot is fully booked. Please choose another time.",
        BookingStatus::DoctorBusy => {
            "Doctor is fully booked for this day. Please select another date."
        }
        BookingStatus::Unavailable => "Doctor not available at this time",
        BookingStatus::Other => "Failed to book appointment",
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct FrontDesk<A> {
    api: A,
    view: FrontDeskView,
}

impl<A: HospitalApi> FrontDesk<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            view: FrontDeskView::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &FrontDeskView {
        &self.view
    }

    pub fn patient_form_mut(&mut self) -> &mut PatientForm {
        &mut self.view.patient_form
    }

    pub fn booking_form_mut(&mut self) -> &mut BookingForm {
        &mut self.view.booking_form
    }

    pub fn render(&self) -> askama::Result<String> {
        render_page(&self.view)
    }

    /// Initial page load: doctors, then patients, then appointments.
    pub async fn start(&mut self) {
        self.load_doctors().await;
        self.load_patients().await;
        self.load_appointments().await;
    }

    /// Switch the visible section. Nothing is reloaded; a pending alert is
    /// dismissed.
    pub fn select_tab(&mut self, tab: FrontDeskTab) {
        self.dismiss_alert();
        self.view.active_tab = tab;
    }

    pub fn dismiss_alert(&mut self) {
        self.view.alert = None;
    }

    pub async fn load_doctors(&mut self) {
        self.view.doctors = PanelState::Loading;
        match self.api.list_doctors().await {
            Ok(doctors) => {
                let options: Vec<_> = doctors.iter().map(doctor_option).collect();
                self.view.booking_form.doctor_id =
                    reselect(&options, &self.view.booking_form.doctor_id);
                self.view.doctor_options = options;
                self.view.doctors = PanelState::from_items(
                    doctors
                        .iter()
                        .enumerate()
                        .map(|(i, doctor)| Card::doctor(i, doctor))
                        .collect(),
                );
                tracing::debug!(count = doctors.len(), "Doctors loaded");
            }
            Err(error) => {
                tracing::warn!(panel = "doctors", %error, "List load failed");
                self.view.doctors = PanelState::Failed;
            }
        }
    }

    pub async fn load_patients(&mut self) {
        self.view.patients = PanelState::Loading;
        match self.api.list_patients().await {
            Ok(patients) => {
                let options: Vec<_> = patients.iter().map(patient_option).collect();
                self.view.booking_form.patient_id =
                    reselect(&options, &self.view.booking_form.patient_id);
                self.view.patient_options = options;
                self.view.patients = PanelState::from_items(
                    patients
                        .iter()
                        .enumerate()
                        .map(|(i, patient)| Card::patient(i, patient))
                        .collect(),
                );
                tracing::debug!(count = patients.len(), "Patients loaded");
            }
            Err(error) => {
                tracing::warn!(panel = "patients", %error, "List load failed");
                self.view.patients = PanelState::Failed;
            }
        }
    }

    pub async fn load_appointments(&mut self) {
        self.view.appointments = PanelState::Loading;
        match self.api.list_appointments().await {
            Ok(appointments) => {
                self.view.appointments = PanelState::from_items(
                    appointments
                        .iter()
                        .enumerate()
                        .map(|(i, appointment)| Card::appointment(i, appointment))
                        .collect(),
                );
                tracing::debug!(count = appointments.len(), "Appointments loaded");
            }
            Err(error) => {
                tracing::warn!(panel = "appointments", %error, "List load failed");
                self.view.appointments = PanelState::Failed;
            }
        }
    }

    /// Submit the add-patient form.
    ///
    /// On success the name and age inputs are cleared and the patient list
    /// reloaded. Every outcome leaves an alert in the view.
    pub async fn add_patient(&mut self) -> Result<(), FrontDeskError> {
        let form = &self.view.patient_form;
        let name = form.name.trim();
        if name.is_empty() {
            return Err(self.reject_form(FormError::MissingName));
        }

        let request = NewPatient {
            name: name.to_string(),
            age: form.age.trim().to_string(),
            gender: form.gender.clone(),
        };

        let response = match self.api.create_patient(&request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(%error, "Add patient failed");
                self.view.alert = Some(PATIENT_FAILED.to_string());
                return Err(error.into());
            }
        };

        if !response.is_created() {
            tracing::warn!(status = ?response.status, "Add patient rejected");
            self.view.alert = Some(PATIENT_FAILED.to_string());
            return Err(FrontDeskError::Rejected);
        }

        self.view.patient_form.name.clear();
        self.view.patient_form.age.clear();
        self.load_patients().await;
        self.view.alert = Some(PATIENT_ADDED.to_string());
        tracing::info!("Patient added");
        Ok(())
    }

    /// Submit the booking form.
    ///
    /// Business rejections are `Ok` with the server's status; the inline
    /// message shows the server's text or the default for that status.
    pub async fn book_appointment(&mut self) -> Result<BookingStatus, FrontDeskError> {
        let form = &self.view.booking_form;
        if !form.is_complete() {
            return Err(self.reject_form(FormError::MissingFields));
        }

        let request = BookingRequest {
            patient_id: form.patient_id.clone(),
            doctor_id: form.doctor_id.clone(),
            appointment_date: form.date.clone(),
            appointment_time: form.time.clone(),
        };

        let response = match self.api.book_appointment(&request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(%error, "Booking request failed");
                self.view.message = Some(BookingMessage {
                    text: default_booking_message(BookingStatus::Other).to_string(),
                    tone: MessageTone::Error,
                });
                return Err(error.into());
            }
        };

        let status = response.status;
        let text = response
            .message
            .unwrap_or_else(|| default_booking_message(status).to_string());

        if status.is_booked() {
            self.view.message = Some(BookingMessage {
                text,
                tone: MessageTone::Success,
            });
            self.load_appointments().await;
            self.view.booking_form.date.clear();
            tracing::info!(
                patient_id = %request.patient_id,
                doctor_id = %request.doctor_id,
                "Appointment booked"
            );
        } else {
            tracing::debug!(?status, "Booking rejected");
            self.view.message = Some(BookingMessage {
                text,
                tone: MessageTone::Error,
            });
        }

        Ok(status)
    }

    fn reject_form(&mut self, error: FormError) -> FrontDeskError {
        self.view.alert = Some(error.to_string());
        error.into()
    }
}
