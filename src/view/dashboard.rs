//! Patient dashboard page: selector, six tabbed panels and their cards.

use askama::Template;

use super::{option_rows, or_dash, render_panel, OptionRow, PanelState, Placeholders, SelectOption};
use crate::format::{format_date, format_date_time, format_time};
use crate::models::{
    Appointment, LabReport, MedicalHistoryItem, Medication, Patient, PatientRecord, Prescription,
    VitalSign,
};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DashboardTab {
    #[default]
    Info,
    Vitals,
    History,
    Prescriptions,
    Reports,
    Appointments,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 6] = [
        DashboardTab::Info,
        DashboardTab::Vitals,
        DashboardTab::History,
        DashboardTab::Prescriptions,
        DashboardTab::Reports,
        DashboardTab::Appointments,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DashboardTab::Info => "Patient Info",
            DashboardTab::Vitals => "Vital Signs",
            DashboardTab::History => "Medical History",
            DashboardTab::Prescriptions => "Prescriptions",
            DashboardTab::Reports => "Lab Reports",
            DashboardTab::Appointments => "Appointments",
        }
    }

    /// Value of the button's `data-tab` attribute.
    pub fn data_tab(self) -> &'static str {
        match self {
            DashboardTab::Info => "info",
            DashboardTab::Vitals => "vitals",
            DashboardTab::History => "history",
            DashboardTab::Prescriptions => "prescriptions",
            DashboardTab::Reports => "reports",
            DashboardTab::Appointments => "appointments",
        }
    }

    pub fn pane_id(self) -> String {
        format!("{}-tab", self.data_tab())
    }

    pub fn from_data_tab(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.data_tab() == value)
    }
}

/// Where the page is in its select-then-load cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DashboardPhase {
    /// No patient chosen yet.
    #[default]
    Idle,
    Loading,
    Loaded,
}

/// One labelled line of the patient info panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoField {
    /// Element id, e.g. `p-blood`.
    pub id: &'static str,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientInfoView {
    pub fields: Vec<InfoField>,
}

impl PatientInfoView {
    pub fn new(record: &PatientRecord) -> Self {
        Self {
            fields: vec![
                field("p-name", "Name", &record.name, "-"),
                field("p-age", "Age", &record.age, "-"),
                field("p-gender", "Gender", &record.gender, "-"),
                field("p-blood", "Blood Group", &record.blood_group, "Not specified"),
                field("p-phone", "Phone", &record.phone, "Not provided"),
                field("p-email", "Email", &record.email, "Not provided"),
                field("p-address", "Address", &record.address, "Not provided"),
                field("p-emergency", "Emergency Contact", &record.emergency_contact, "Not provided"),
                field(
                    "p-emergency-phone",
                    "Emergency Phone",
                    &record.emergency_phone,
                    "Not provided",
                ),
                field("p-allergies", "Allergies", &record.allergies, "None reported"),
                field(
                    "p-chronic",
                    "Chronic Conditions",
                    &record.chronic_conditions,
                    "None reported",
                ),
            ],
        }
    }

    /// Displayed text of the field with element id `id`.
    pub fn value(&self, id: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.id == id)
            .map(|field| field.value.as_str())
    }
}

fn field(
    id: &'static str,
    label: &'static str,
    value: &Option<String>,
    fallback: &str,
) -> InfoField {
    InfoField {
        id,
        label,
        value: value.clone().unwrap_or_else(|| fallback.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VitalCard {
    pub label: &'static str,
    pub class: &'static str,
    /// Reading with its unit, or `N/A`.
    pub value: String,
    pub recorded: String,
}

/// The five metric cards for the most recent reading.
pub fn vital_cards(latest: &VitalSign) -> Vec<VitalCard> {
    let recorded = format_date_time(latest.recorded_date.as_deref());
    [
        ("Blood Pressure", "bp", "mmHg", &latest.blood_pressure),
        ("Heart Rate", "hr", "bpm", &latest.heart_rate),
        ("Temperature", "temp", "°F", &latest.temperature),
        ("Weight", "weight", "kg", &latest.weight),
        ("Oxygen Saturation", "oxygen", "%", &latest.oxygen_saturation),
    ]
    .into_iter()
    .map(|(label, class, unit, reading)| VitalCard {
        label,
        class,
        value: match reading {
            Some(value) if !is_zero(value) => format!("{value} {unit}"),
            _ => "N/A".to_string(),
        },
        recorded: recorded.clone(),
    })
    .collect()
}

/// A zero reading means nothing was measured.
fn is_zero(reading: &str) -> bool {
    reading.trim().parse::<f64>().is_ok_and(|n| n == 0.0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryCard {
    pub condition: String,
    pub status: String,
    /// Lowercased status, used as the badge class.
    pub status_class: String,
    pub diagnosed: String,
    pub notes: String,
}

impl HistoryCard {
    pub fn new(item: &MedicalHistoryItem) -> Self {
        let status = item.status.clone().unwrap_or_else(|| "Unknown".to_string());
        Self {
            condition: item.condition_name.clone(),
            status_class: status.to_lowercase(),
            status,
            diagnosed: format_date(item.diagnosis_date.as_deref()),
            notes: item
                .notes
                .clone()
                .unwrap_or_else(|| "No additional notes".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationLine {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    /// Empty when the prescriber gave none.
    pub instructions: String,
}

impl MedicationLine {
    pub fn new(medication: &Medication) -> Self {
        Self {
            name: medication.medicine_name.clone(),
            dosage: medication.dosage.clone(),
            frequency: medication.frequency.clone(),
            duration: medication.duration.clone(),
            instructions: medication.instructions.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionCard {
    pub doctor: String,
    pub date: String,
    pub diagnosis: String,
    pub notes: String,
    pub medications: Vec<MedicationLine>,
}

impl PrescriptionCard {
    pub fn new(prescription: &Prescription, medications: &[Medication]) -> Self {
        Self {
            doctor: format!("Dr. {}", prescription.doctor_name),
            date: format_date(prescription.prescription_date.as_deref()),
            diagnosis: format!("Diagnosis: {}", prescription.diagnosis),
            notes: prescription.notes.clone().unwrap_or_default(),
            medications: medications.iter().map(MedicationLine::new).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCard {
    pub report_type: String,
    pub date: String,
    pub test_name: String,
    pub results: String,
    pub notes: String,
}

impl ReportCard {
    pub fn new(report: &LabReport) -> Self {
        Self {
            report_type: report.report_type.clone(),
            date: format_date(report.report_date.as_deref()),
            test_name: report.test_name.clone(),
            results: report.results.clone(),
            notes: report
                .notes
                .as_ref()
                .map(|notes| format!("Note: {notes}"))
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentCard {
    pub doctor: String,
    pub date: String,
    pub time: String,
}

impl AppointmentCard {
    pub fn new(appointment: &Appointment) -> Self {
        Self {
            doctor: appointment.doctor.clone(),
            date: format_date(Some(&appointment.appointment_date)),
            time: match appointment.appointment_time.as_deref() {
                Some(time) => format_time(time),
                None => "Time not specified".to_string(),
            },
        }
    }
}

pub fn patient_option(patient: &Patient) -> SelectOption {
    SelectOption {
        value: patient.id.clone(),
        label: format!(
            "{} (Age: {}, {})",
            patient.name,
            or_dash(patient.age.as_deref()),
            or_dash(patient.gender.as_deref())
        ),
    }
}

/// Whole-page state of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardView {
    pub patient_options: Vec<SelectOption>,
    pub selected_patient: Option<String>,
    pub phase: DashboardPhase,
    pub active_tab: DashboardTab,
    pub info: PanelState<PatientInfoView>,
    pub vitals: PanelState<Vec<VitalCard>>,
    pub history: PanelState<Vec<HistoryCard>>,
    pub prescriptions: PanelState<Vec<PrescriptionCard>>,
    pub reports: PanelState<Vec<ReportCard>>,
    pub appointments: PanelState<Vec<AppointmentCard>>,
}

impl DashboardView {
    pub fn loading_visible(&self) -> bool {
        self.phase == DashboardPhase::Loading
    }

    pub fn content_visible(&self) -> bool {
        self.phase == DashboardPhase::Loaded
    }

    /// Put every panel back into `Loading` for a new selection.
    pub fn begin_loading(&mut self, patient_id: &str) {
        self.selected_patient = Some(patient_id.to_string());
        self.phase = DashboardPhase::Loading;
        self.info = PanelState::Loading;
        self.vitals = PanelState::Loading;
        self.history = PanelState::Loading;
        self.prescriptions = PanelState::Loading;
        self.reports = PanelState::Loading;
        self.appointments = PanelState::Loading;
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

const INFO_TEXTS: Placeholders = Placeholders {
    empty: "No patient information",
    failed: "Unable to load patient information",
    icons: false,
};

const VITAL_TEXTS: Placeholders = Placeholders {
    empty: "No vital signs recorded",
    failed: "Unable to load vital signs",
    icons: false,
};

const HISTORY_TEXTS: Placeholders = Placeholders {
    empty: "No medical history recorded",
    failed: "Unable to load medical history",
    icons: false,
};

const PRESCRIPTION_TEXTS: Placeholders = Placeholders {
    empty: "No prescriptions found",
    failed: "Unable to load prescriptions",
    icons: false,
};

const REPORT_TEXTS: Placeholders = Placeholders {
    empty: "No lab reports available",
    failed: "Unable to load lab reports",
    icons: false,
};

const APPOINTMENT_TEXTS: Placeholders = Placeholders {
    empty: "No appointments scheduled",
    failed: "Unable to load appointments",
    icons: false,
};

#[derive(Template)]
#[template(path = "dashboard/info.html")]
struct InfoTemplate<'a> {
    fields: &'a [InfoField],
}

#[derive(Template)]
#[template(path = "dashboard/vitals.html")]
struct VitalsTemplate<'a> {
    cards: &'a [VitalCard],
}

#[derive(Template)]
#[template(path = "dashboard/history.html")]
struct HistoryTemplate<'a> {
    cards: &'a [HistoryCard],
}

#[derive(Template)]
#[template(path = "dashboard/prescriptions.html")]
struct PrescriptionsTemplate<'a> {
    cards: &'a [PrescriptionCard],
}

#[derive(Template)]
#[template(path = "dashboard/reports.html")]
struct ReportsTemplate<'a> {
    cards: &'a [ReportCard],
}

#[derive(Template)]
#[template(path = "dashboard/appointments.html")]
struct AppointmentsTemplate<'a> {
    cards: &'a [AppointmentCard],
}

struct PaneRow {
    label: &'static str,
    data_tab: &'static str,
    pane_id: String,
    active: bool,
    html: String,
}

#[derive(Template)]
#[template(path = "dashboard/page.html")]
struct PageTemplate<'a> {
    options: Vec<OptionRow<'a>>,
    loading_visible: bool,
    content_visible: bool,
    panes: Vec<PaneRow>,
}

pub fn render_info(view: &DashboardView) -> askama::Result<String> {
    render_panel(&view.info, INFO_TEXTS, |info| {
        InfoTemplate {
            fields: &info.fields,
        }
        .render()
    })
}

pub fn render_vitals(view: &DashboardView) -> askama::Result<String> {
    render_panel(&view.vitals, VITAL_TEXTS, |cards| {
        VitalsTemplate { cards }.render()
    })
}

pub fn render_history(view: &DashboardView) -> askama::Result<String> {
    render_panel(&view.history, HISTORY_TEXTS, |cards| {
        HistoryTemplate { cards }.render()
    })
}

pub fn render_prescriptions(view: &DashboardView) -> askama::Result<String> {
    render_panel(&view.prescriptions, PRESCRIPTION_TEXTS, |cards| {
        PrescriptionsTemplate { cards }.render()
    })
}

pub fn render_reports(view: &DashboardView) -> askama::Result<String> {
    render_panel(&view.reports, REPORT_TEXTS, |cards| {
        ReportsTemplate { cards }.render()
    })
}

pub fn render_appointments(view: &DashboardView) -> askama::Result<String> {
    render_panel(&view.appointments, APPOINTMENT_TEXTS, |cards| {
        AppointmentsTemplate { cards }.render()
    })
}

pub fn render_page(view: &DashboardView) -> askama::Result<String> {
    let mut panes = Vec::with_capacity(DashboardTab::ALL.len());
    for tab in DashboardTab::ALL {
        let html = match tab {
            DashboardTab::Info => render_info(view)?,
            DashboardTab::Vitals => render_vitals(view)?,
            DashboardTab::History => render_history(view)?,
            DashboardTab::Prescriptions => render_prescriptions(view)?,
            DashboardTab::Reports => render_reports(view)?,
            DashboardTab::Appointments => render_appointments(view)?,
        };
        panes.push(PaneRow {
            label: tab.label(),
            data_tab: tab.data_tab(),
            pane_id: tab.pane_id(),
            active: tab == view.active_tab,
            html,
        });
    }

    let selected = view.selected_patient.as_deref().unwrap_or("");
    PageTemplate {
        options: option_rows(&view.patient_options, selected),
        loading_visible: view.loading_visible(),
        content_visible: view.content_visible(),
        panes,
    }
    .render()
}
