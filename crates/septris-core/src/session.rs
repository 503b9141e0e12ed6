//! Live per-patient state and its snapshot form.
//!
//! A `PatientSession` is owned exclusively by the engine; the
//! presentation layer only ever sees borrowed references or
//! `SessionSnapshot` values.

use serde::{Deserialize, Serialize};

use septris_logic::config::SimConfig;
use septris_logic::orders::OrderKind;
use septris_logic::patients::{PatientTemplate, Vitals};
use septris_logic::rules::{self, PatientStatus};

/// One patient's live simulation state, distinct from its static template.
#[derive(Debug, Clone)]
pub struct PatientSession {
    pub id: u32,
    pub template: &'static PatientTemplate,
    pub health: f32,
    pub position: f32,
    /// Orders placed on this session, in placement order. No duplicates.
    pub applied_orders: Vec<OrderKind>,
    pub time_elapsed_secs: u64,
    pub status: PatientStatus,
    pub needs_attention: bool,
}

impl PatientSession {
    /// Admit a patient from its template with the configured starting values.
    pub fn admit(id: u32, template: &'static PatientTemplate, config: &SimConfig) -> Self {
        Self {
            id,
            template,
            health: config.start_health,
            position: config.start_position,
            applied_orders: Vec::new(),
            time_elapsed_secs: 0,
            status: PatientStatus::Active,
            needs_attention: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PatientStatus::Active
    }

    pub fn has_order(&self, order: OrderKind) -> bool {
        self.applied_orders.contains(&order)
    }

    /// Whether every essential correct order has been placed.
    pub fn bundle_complete(&self) -> bool {
        rules::bundle_complete(self.template.correct_orders, &self.applied_orders)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            name: self.template.name.to_string(),
            age: self.template.age.to_string(),
            weight: self.template.weight.to_string(),
            mrn: self.template.mrn.to_string(),
            location: self.template.location.to_string(),
            chief_complaint: self.template.chief_complaint.to_string(),
            history: self.template.history.to_string(),
            physical_exam: self.template.physical_exam.to_string(),
            vitals: self.template.vitals,
            correct_orders: self.template.correct_orders.to_vec(),
            health: self.health,
            position: self.position,
            applied_orders: self.applied_orders.clone(),
            time_elapsed_secs: self.time_elapsed_secs,
            status: self.status,
            needs_attention: self.needs_attention,
        }
    }
}

/// Serializable view of a session for the presentation boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: u32,
    pub name: String,
    pub age: String,
    pub weight: String,
    pub mrn: String,
    pub location: String,
    pub chief_complaint: String,
    pub history: String,
    pub physical_exam: String,
    pub vitals: Vitals,
    pub correct_orders: Vec<OrderKind>,
    pub health: f32,
    pub position: f32,
    pub applied_orders: Vec<OrderKind>,
    pub time_elapsed_secs: u64,
    pub status: PatientStatus,
    pub needs_attention: bool,
}
