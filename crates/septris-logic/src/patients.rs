//! Patient roster — vitals and case templates for each level.
//!
//! Static case definitions a live session is seeded from. Narrative
//! fields are what the chart-review panel renders; `correct_orders`
//! drives both scoring and the recovery gate.

use serde::{Deserialize, Serialize};

use crate::orders::OrderKind;

/// Admission vital signs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub temp_c: f32,
    pub heart_rate: u32,
    pub resp_rate: u32,
    pub bp_systolic: u32,
    pub bp_diastolic: u32,
    pub spo2: u32,
    pub mean_arterial_pressure: u32,
    pub weight_kg: f32,
}

/// A static case definition.
#[derive(Debug, Clone, Copy)]
pub struct PatientTemplate {
    pub name: &'static str,
    pub age: &'static str,
    pub weight: &'static str,
    pub mrn: &'static str,
    pub location: &'static str,
    pub chief_complaint: &'static str,
    pub history: &'static str,
    pub physical_exam: &'static str,
    pub vitals: Vitals,
    /// Orders clinically appropriate for this case. The essential subset
    /// of these gates the health-improving tick branch.
    pub correct_orders: &'static [OrderKind],
}

/// Number of defined levels.
pub const LEVEL_COUNT: u8 = 2;

const LEVEL_ONE: &[PatientTemplate] = &[
    PatientTemplate {
        name: "Jane Johnson",
        age: "3 years",
        weight: "15 kg",
        mrn: "12345678",
        location: "PICU Bed 204",
        chief_complaint: "Fever and decreased feeding",
        history: "Previously healthy 3-year-old with 2 days of fever, vomiting, and decreased oral intake",
        physical_exam: "Ill-appearing, poor capillary refill (3 sec), dry mucous membranes, no rash",
        vitals: Vitals {
            temp_c: 39.2,
            heart_rate: 140,
            resp_rate: 32,
            bp_systolic: 85,
            bp_diastolic: 45,
            spo2: 97,
            mean_arterial_pressure: 58,
            weight_kg: 15.0,
        },
        correct_orders: &[
            OrderKind::BloodCulture,
            OrderKind::IvAccess,
            OrderKind::FluidBolus,
            OrderKind::Ceftriaxone,
            OrderKind::SepsisPanel,
        ],
    },
    PatientTemplate {
        name: "Marcus Chen",
        age: "8 months",
        weight: "8 kg",
        mrn: "87654321",
        location: "PICU Bed 206",
        chief_complaint: "Respiratory distress and fever",
        history: "8-month-old with URI symptoms x 3 days, now with increased work of breathing",
        physical_exam: "Moderate respiratory distress, retractions, decreased breath sounds RLL",
        vitals: Vitals {
            temp_c: 38.8,
            heart_rate: 160,
            resp_rate: 45,
            bp_systolic: 70,
            bp_diastolic: 40,
            spo2: 92,
            mean_arterial_pressure: 50,
            weight_kg: 8.0,
        },
        correct_orders: &[
            OrderKind::BloodCulture,
            OrderKind::IvAccess,
            OrderKind::FluidBolus,
            OrderKind::Ceftriaxone,
            OrderKind::ChestXray,
            OrderKind::OxygenTherapy,
        ],
    },
];

const LEVEL_TWO: &[PatientTemplate] = &[PatientTemplate {
    name: "Sofia Rodriguez",
    age: "6 years",
    weight: "20 kg",
    mrn: "11122334",
    location: "PICU Bed 208",
    chief_complaint: "Abdominal pain and fever",
    history: "6-year-old with 24 hours of severe abdominal pain, fever, and vomiting",
    physical_exam: "Appears toxic, RLQ tenderness with guarding, positive McBurney's sign",
    vitals: Vitals {
        temp_c: 39.8,
        heart_rate: 150,
        resp_rate: 28,
        bp_systolic: 80,
        bp_diastolic: 50,
        spo2: 98,
        mean_arterial_pressure: 60,
        weight_kg: 20.0,
    },
    correct_orders: &[
        OrderKind::BloodCulture,
        OrderKind::IvAccess,
        OrderKind::FluidBolus,
        OrderKind::Ceftriaxone,
        OrderKind::SepsisPanel,
        OrderKind::CtAbdomen,
        OrderKind::SurgeryConsult,
    ],
}];

/// Roster for a level. Levels are numbered from 1; returns `None` outside
/// the defined set.
pub fn level_roster(level: u8) -> Option<&'static [PatientTemplate]> {
    match level {
        1 => Some(LEVEL_ONE),
        2 => Some(LEVEL_TWO),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_roster_bounds() {
        assert!(level_roster(0).is_none());
        assert!(level_roster(1).is_some());
        assert!(level_roster(2).is_some());
        assert!(level_roster(3).is_none());
        for level in 1..=LEVEL_COUNT {
            assert!(level_roster(level).is_some());
        }
    }

    #[test]
    fn test_roster_sizes() {
        assert_eq!(level_roster(1).unwrap().len(), 2);
        assert_eq!(level_roster(2).unwrap().len(), 1);
    }

    #[test]
    fn test_no_duplicate_correct_orders() {
        for level in 1..=LEVEL_COUNT {
            for patient in level_roster(level).unwrap() {
                let orders = patient.correct_orders;
                for (i, a) in orders.iter().enumerate() {
                    assert!(
                        !orders[i + 1..].contains(a),
                        "{} lists {:?} twice",
                        patient.name,
                        a
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_patient_has_essential_orders() {
        // Each case must be winnable: at least one essential correct order.
        for level in 1..=LEVEL_COUNT {
            for patient in level_roster(level).unwrap() {
                assert!(
                    patient.correct_orders.iter().any(|o| o.spec().essential),
                    "{} has no essential orders",
                    patient.name
                );
            }
        }
    }

    #[test]
    fn test_unique_mrns() {
        let mut mrns = Vec::new();
        for level in 1..=LEVEL_COUNT {
            for patient in level_roster(level).unwrap() {
                assert!(!mrns.contains(&patient.mrn), "duplicate MRN {}", patient.mrn);
                mrns.push(patient.mrn);
            }
        }
    }
}
