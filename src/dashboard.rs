//! Patient dashboard controller.
//!
//! Selecting a patient starts a new generation and fetches six panels
//! concurrently. Each panel settles on its own; a failure only affects that
//! panel. Results are written to the view only while their generation is
//! still the current one, so a slow load for an earlier selection can never
//! overwrite a later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use futures_util::stream::{self, StreamExt, TryStreamExt};

use crate::api::{ApiError, HospitalApi};
use crate::config::ClientConfig;
use crate::models::{Medication, Prescription};
use crate::view::dashboard::{
    patient_option, render_page, vital_cards, AppointmentCard, DashboardPhase, DashboardTab,
    DashboardView, HistoryCard, PatientInfoView, PrescriptionCard, ReportCard,
};
use crate::view::PanelState;

/// What happened to a `select_patient` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// This selection's results are on screen.
    Applied,
    /// A newer selection started before this one settled; its results were dropped.
    Superseded,
    /// Blank selection, nothing loaded.
    Ignored,
}

pub struct Dashboard<A> {
    api: A,
    generation: AtomicU64,
    medication_concurrency: usize,
    view: RwLock<DashboardView>,
}

impl<A: HospitalApi> Dashboard<A> {
    pub fn new(api: A, config: &ClientConfig) -> Self {
        Self {
            api,
            generation: AtomicU64::new(0),
            medication_concurrency: config.medication_concurrency.max(1),
            view: RwLock::new(DashboardView::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Copy of the current view state.
    pub fn snapshot(&self) -> DashboardView {
        self.view
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn render(&self) -> askama::Result<String> {
        let view = self.view.read().unwrap_or_else(PoisonError::into_inner);
        render_page(&view)
    }

    /// Fill the patient selector. On failure the selector keeps its options.
    pub async fn load_patient_options(&self) {
        match self.api.list_patients().await {
            Ok(patients) => {
                let options = patients.iter().map(patient_option).collect();
                self.write().patient_options = options;
                tracing::debug!(count = patients.len(), "Patient selector loaded");
            }
            Err(error) => {
                tracing::warn!(panel = "patient_select", %error, "Patient selector load failed");
            }
        }
    }

    /// Switch the visible panel. Nothing is reloaded.
    pub fn select_tab(&self, tab: DashboardTab) {
        self.write().active_tab = tab;
    }

    /// Load every panel for `patient_id`.
    ///
    /// Returns once all six panels have settled. The loading indicator is
    /// cleared when the selection is still current at that point.
    pub async fn select_patient(&self, patient_id: &str) -> SelectionOutcome {
        let patient_id = patient_id.trim();
        if patient_id.is_empty() {
            return SelectionOutcome::Ignored;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.commit(generation, |view| view.begin_loading(patient_id)) {
            return self.superseded(generation, patient_id);
        }
        tracing::debug!(patient_id, generation, "Loading patient dashboard");

        tokio::join!(
            self.load_info(generation, patient_id),
            self.load_vitals(generation, patient_id),
            self.load_history(generation, patient_id),
            self.load_prescriptions(generation, patient_id),
            self.load_reports(generation, patient_id),
            self.load_appointments(generation, patient_id),
        );

        if self.commit(generation, |view| view.phase = DashboardPhase::Loaded) {
            tracing::info!(patient_id, "Patient dashboard loaded");
            SelectionOutcome::Applied
        } else {
            self.superseded(generation, patient_id)
        }
    }

    // -----------------------------------------------------------------------
    // Panels
    // -----------------------------------------------------------------------

    async fn load_info(&self, generation: u64, patient_id: &str) {
        let state = match self.api.patient_dashboard(patient_id).await {
            Ok(dashboard) => PanelState::Ready(PatientInfoView::new(&dashboard.patient)),
            Err(error) => failed("info", patient_id, &error),
        };
        self.settle(generation, "info", |view| view.info = state);
    }

    async fn load_vitals(&self, generation: u64, patient_id: &str) {
        // Newest reading first; only that one is shown.
        let state = match self.api.vitals(patient_id).await {
            Ok(vitals) => match vitals.first() {
                Some(latest) => PanelState::Ready(vital_cards(latest)),
                None => PanelState::Empty,
            },
            Err(error) => failed("vitals", patient_id, &error),
        };
        self.settle(generation, "vitals", |view| view.vitals = state);
    }

    async fn load_history(&self, generation: u64, patient_id: &str) {
        let state = match self.api.medical_history(patient_id).await {
            Ok(items) => PanelState::from_items(items.iter().map(HistoryCard::new).collect()),
            Err(error) => failed("history", patient_id, &error),
        };
        self.settle(generation, "history", |view| view.history = state);
    }

    async fn load_prescriptions(&self, generation: u64, patient_id: &str) {
        let prescriptions = match self.api.prescriptions(patient_id).await {
            Ok(prescriptions) => prescriptions,
            Err(error) => {
                let state = failed("prescriptions", patient_id, &error);
                self.settle(generation, "prescriptions", |view| view.prescriptions = state);
                return;
            }
        };

        if !self.is_current(generation) {
            tracing::debug!(patient_id, generation, "Skipping medications for stale selection");
            return;
        }

        let state = match self.fetch_medications(&prescriptions).await {
            Ok(medications) => PanelState::from_items(
                prescriptions
                    .iter()
                    .zip(&medications)
                    .map(|(prescription, meds)| PrescriptionCard::new(prescription, meds))
                    .collect(),
            ),
            Err(error) => failed("prescriptions", patient_id, &error),
        };
        self.settle(generation, "prescriptions", |view| view.prescriptions = state);
    }

    /// One medication list per prescription, in prescription order, with at
    /// most `medication_concurrency` requests in flight.
    async fn fetch_medications(
        &self,
        prescriptions: &[Prescription],
    ) -> Result<Vec<Vec<Medication>>, ApiError> {
        let requests: Vec<_> = prescriptions
            .iter()
            .map(|prescription| self.api.medications(&prescription.id))
            .collect();
        stream::iter(requests)
            .buffered(self.medication_concurrency)
            .try_collect()
            .await
    }

    async fn load_reports(&self, generation: u64, patient_id: &str) {
        let state = match self.api.lab_reports(patient_id).await {
            Ok(reports) => PanelState::from_items(reports.iter().map(ReportCard::new).collect()),
            Err(error) => failed("reports", patient_id, &error),
        };
        self.settle(generation, "reports", |view| view.reports = state);
    }

    async fn load_appointments(&self, generation: u64, patient_id: &str) {
        let state = match self.api.list_appointments().await {
            Ok(appointments) => PanelState::from_items(
                appointments
                    .iter()
                    .filter(|appointment| appointment.may_belong_to(patient_id))
                    .map(AppointmentCard::new)
                    .collect(),
            ),
            Err(error) => failed("appointments", patient_id, &error),
        };
        self.settle(generation, "appointments", |view| view.appointments = state);
    }

    // -----------------------------------------------------------------------
    // Generation bookkeeping
    // -----------------------------------------------------------------------

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Apply `update` if `generation` is still current. The check happens
    /// under the write lock so a newer selection cannot interleave.
    fn commit<F>(&self, generation: u64, update: F) -> bool
    where
        F: FnOnce(&mut DashboardView),
    {
        let mut view = self.write();
        if !self.is_current(generation) {
            return false;
        }
        update(&mut view);
        true
    }

    fn settle<F>(&self, generation: u64, panel: &'static str, update: F)
    where
        F: FnOnce(&mut DashboardView),
    {
        if !self.commit(generation, update) {
            tracing::debug!(panel, generation, "Dropping stale panel result");
        }
    }

    fn superseded(&self, generation: u64, patient_id: &str) -> SelectionOutcome {
        tracing::debug!(patient_id, generation, "Selection superseded");
        SelectionOutcome::Superseded
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, DashboardView> {
        self.view.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn failed<T>(panel: &'static str, patient_id: &str, error: &ApiError) -> PanelState<T> {
    if error.is_transport() {
        tracing::warn!(panel, patient_id, %error, "Panel load failed");
    } else {
        tracing::error!(panel, patient_id, %error, "Panel load rejected by hospital API");
    }
    PanelState::Failed
}
