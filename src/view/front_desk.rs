//! Front desk page: patient, doctor and appointment tabs plus the two forms.

use askama::Template;

use super::{option_rows, or_dash, render_panel, OptionRow, PanelState, Placeholders, SelectOption};
use crate::format::{animation_delay, format_time};
use crate::models::{Appointment, Doctor, Patient};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrontDeskTab {
    #[default]
    Patients,
    Doctors,
    Appointments,
}

impl FrontDeskTab {
    pub const ALL: [FrontDeskTab; 3] = [
        FrontDeskTab::Patients,
        FrontDeskTab::Doctors,
        FrontDeskTab::Appointments,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FrontDeskTab::Patients => "Patients",
            FrontDeskTab::Doctors => "Doctors",
            FrontDeskTab::Appointments => "Appointments",
        }
    }

    /// Element id of the tab button.
    pub fn button_id(self) -> &'static str {
        match self {
            FrontDeskTab::Patients => "tab-patients",
            FrontDeskTab::Doctors => "tab-doctors",
            FrontDeskTab::Appointments => "tab-appointments",
        }
    }

    /// Element id of the section the tab reveals.
    pub fn section_id(self) -> &'static str {
        match self {
            FrontDeskTab::Patients => "patients-section",
            FrontDeskTab::Doctors => "doctors-section",
            FrontDeskTab::Appointments => "appointments-section",
        }
    }
}

/// A rendered record in one of the three lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub class: &'static str,
    pub title: String,
    pub detail: String,
    pub meta: Vec<String>,
    /// CSS animation delay, staggered by list position.
    pub delay: String,
}

impl Card {
    pub fn doctor(index: usize, doctor: &Doctor) -> Self {
        let mut meta = Vec::new();
        if let Some(cabin) = &doctor.cabin {
            meta.push(cabin.clone());
        }
        if let Some(timing) = &doctor.timing {
            meta.push(timing.clone());
        }
        if let Some(years) = &doctor.experience {
            meta.push(format!("{years} years experience"));
        }
        if let Some(phone) = &doctor.phone {
            meta.push(phone.clone());
        }

        Self {
            class: "card doctor-card",
            title: doctor.name.clone(),
            detail: doctor.specialization.clone(),
            meta,
            delay: animation_delay(index),
        }
    }

    pub fn patient(index: usize, patient: &Patient) -> Self {
        Self {
            class: "card",
            title: patient.name.clone(),
            detail: format!(
                "Age {} • {}",
                or_dash(patient.age.as_deref()),
                or_dash(patient.gender.as_deref())
            ),
            meta: Vec::new(),
            delay: animation_delay(index),
        }
    }

    pub fn appointment(index: usize, appointment: &Appointment) -> Self {
        let detail = match appointment.appointment_time.as_deref() {
            Some(time) => format!("{} at {}", appointment.appointment_date, format_time(time)),
            None => appointment.appointment_date.clone(),
        };

        Self {
            class: "card",
            title: format!("{} → {}", appointment.patient, appointment.doctor),
            detail,
            meta: Vec::new(),
            delay: animation_delay(index),
        }
    }
}

pub fn doctor_option(doctor: &Doctor) -> SelectOption {
    SelectOption {
        value: doctor.id.clone(),
        label: format!("{} ({})", doctor.name, doctor.specialization),
    }
}

pub fn patient_option(patient: &Patient) -> SelectOption {
    SelectOption {
        value: patient.id.clone(),
        label: format!("{} (Age {})", patient.name, or_dash(patient.age.as_deref())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTone {
    Success,
    Error,
}

impl MessageTone {
    pub fn class(self) -> &'static str {
        match self {
            MessageTone::Success => "success",
            MessageTone::Error => "error",
        }
    }
}

/// Inline result of the last booking attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingMessage {
    pub text: String,
    pub tone: MessageTone,
}

/// Add-patient inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientForm {
    pub name: String,
    pub age: String,
    pub gender: String,
}

impl Default for PatientForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            gender: "Male".to_string(),
        }
    }
}

/// Booking inputs. The two ids mirror the select controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub patient_id: String,
    pub doctor_id: String,
    pub date: String,
    pub time: String,
}

impl BookingForm {
    pub fn is_complete(&self) -> bool {
        [&self.patient_id, &self.doctor_id, &self.date, &self.time]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Whole-page state of the front desk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontDeskView {
    pub active_tab: FrontDeskTab,
    pub doctors: PanelState<Vec<Card>>,
    pub patients: PanelState<Vec<Card>>,
    pub appointments: PanelState<Vec<Card>>,
    pub doctor_options: Vec<SelectOption>,
    pub patient_options: Vec<SelectOption>,
    pub patient_form: PatientForm,
    pub booking_form: BookingForm,
    pub message: Option<BookingMessage>,
    /// Pending blocking notice, cleared by the user.
    pub alert: Option<String>,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

const DOCTOR_TEXTS: Placeholders = Placeholders {
    empty: "No doctors found",
    failed: "Error loading doctors",
    icons: true,
};

const PATIENT_TEXTS: Placeholders = Placeholders {
    empty: "No patients yet",
    failed: "Error loading patients",
    icons: true,
};

const APPOINTMENT_TEXTS: Placeholders = Placeholders {
    empty: "No appointments booked",
    failed: "Error loading appointments",
    icons: true,
};

const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

#[derive(Template)]
#[template(path = "front_desk/cards.html")]
struct CardsTemplate<'a> {
    cards: &'a [Card],
}

struct TabRow {
    label: &'static str,
    button_id: &'static str,
    section_id: &'static str,
    active: bool,
}

#[derive(Template)]
#[template(path = "front_desk/page.html")]
struct PageTemplate<'a> {
    tabs: Vec<TabRow>,
    patients_html: String,
    doctors_html: String,
    appointments_html: String,
    gender_options: Vec<OptionRow<'a>>,
    patient_options: Vec<OptionRow<'a>>,
    doctor_options: Vec<OptionRow<'a>>,
    patient_form: &'a PatientForm,
    booking_form: &'a BookingForm,
    message_text: &'a str,
    message_class: &'a str,
    alert: &'a str,
}

impl PageTemplate<'_> {
    fn section_hidden(&self, section_id: &str) -> bool {
        self.tabs
            .iter()
            .any(|tab| tab.section_id == section_id && !tab.active)
    }
}

fn render_cards(state: &PanelState<Vec<Card>>, texts: Placeholders) -> askama::Result<String> {
    render_panel(state, texts, |cards| CardsTemplate { cards }.render())
}

pub fn render_doctors(view: &FrontDeskView) -> askama::Result<String> {
    render_cards(&view.doctors, DOCTOR_TEXTS)
}

pub fn render_patients(view: &FrontDeskView) -> askama::Result<String> {
    render_cards(&view.patients, PATIENT_TEXTS)
}

pub fn render_appointments(view: &FrontDeskView) -> askama::Result<String> {
    render_cards(&view.appointments, APPOINTMENT_TEXTS)
}

pub fn render_page(view: &FrontDeskView) -> askama::Result<String> {
    let (message_text, message_class) = match &view.message {
        Some(message) => (message.text.as_str(), message.tone.class()),
        None => ("", ""),
    };

    PageTemplate {
        tabs: FrontDeskTab::ALL
            .iter()
            .map(|&tab| TabRow {
                label: tab.label(),
                button_id: tab.button_id(),
                section_id: tab.section_id(),
                active: tab == view.active_tab,
            })
            .collect(),
        patients_html: render_patients(view)?,
        doctors_html: render_doctors(view)?,
        appointments_html: render_appointments(view)?,
        gender_options: GENDERS
            .iter()
            .map(|&gender| OptionRow {
                value: gender,
                label: gender,
                selected: gender == view.patient_form.gender,
            })
            .collect(),
        patient_options: option_rows(&view.patient_options, &view.booking_form.patient_id),
        doctor_options: option_rows(&view.doctor_options, &view.booking_form.doctor_id),
        patient_form: &view.patient_form,
        booking_form: &view.booking_form,
        message_text,
        message_class,
        alert: view.alert.as_deref().unwrap_or(""),
    }
    .render()
}
