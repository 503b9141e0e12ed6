//! Order taxonomy — categories, order definitions, point values.
//!
//! The catalog of placeable clinical orders, grouped the way an
//! order-entry screen groups them. All data here is static and
//! shared freely; nothing mutates.

use serde::{Deserialize, Serialize};

/// A placeable clinical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OrderKind {
    /// Aerobic/anaerobic blood culture.
    BloodCulture = 0,
    /// CBC with differential, CMP, lactate.
    SepsisPanel = 1,
    /// Ceftriaxone 50 mg/kg IV.
    Ceftriaxone = 2,
    /// Normal saline 20 ml/kg IV bolus.
    FluidBolus = 3,
    /// Peripheral IV insertion.
    IvAccess = 4,
    /// Supplemental oxygen.
    OxygenTherapy = 5,
    /// Portable chest radiograph.
    ChestXray = 6,
    /// CT abdomen/pelvis with and without contrast.
    CtAbdomen = 7,
    /// Pediatric surgery consult.
    SurgeryConsult = 8,
}

/// Static definition of an order.
#[derive(Debug, Clone)]
pub struct OrderSpec {
    /// Short display name.
    pub name: &'static str,
    /// Formal order-entry name as it appears on the order screen.
    pub order_name: &'static str,
    /// Whether omitting this order blocks recovery for patients that need it.
    pub essential: bool,
    /// Points awarded when placed for a patient it is correct for.
    pub points: i32,
}

impl OrderKind {
    pub fn spec(&self) -> OrderSpec {
        match self {
            Self::BloodCulture => OrderSpec {
                name: "Blood Culture",
                order_name: "BLOOD CULTURE AEROBIC/ANAEROBIC",
                essential: true,
                points: 20,
            },
            Self::SepsisPanel => OrderSpec {
                name: "CBC w/ Diff, CMP, Lactate",
                order_name: "SEPSIS PANEL PEDIATRIC",
                essential: true,
                points: 20,
            },
            Self::Ceftriaxone => OrderSpec {
                name: "Ceftriaxone 50mg/kg IV",
                order_name: "cefTRIAXone injection",
                essential: true,
                points: 35,
            },
            Self::FluidBolus => OrderSpec {
                name: "NS 20ml/kg IV Bolus",
                order_name: "sodium chloride 0.9% bolus",
                essential: true,
                points: 30,
            },
            Self::IvAccess => OrderSpec {
                name: "IV Access",
                order_name: "PERIPHERAL IV INSERTION",
                essential: true,
                points: 25,
            },
            Self::OxygenTherapy => OrderSpec {
                name: "Oxygen Therapy",
                order_name: "OXYGEN THERAPY",
                essential: false,
                points: 25,
            },
            Self::ChestXray => OrderSpec {
                name: "Chest X-ray",
                order_name: "XR CHEST PA AND LAT PORTABLE",
                essential: false,
                points: 15,
            },
            Self::CtAbdomen => OrderSpec {
                name: "CT Abdomen/Pelvis",
                order_name: "CT ABDOMEN PELVIS W/WO CONTRAST",
                essential: false,
                points: 20,
            },
            Self::SurgeryConsult => OrderSpec {
                name: "Pediatric Surgery Consult",
                order_name: "CONSULT PEDIATRIC SURGERY",
                essential: false,
                points: 30,
            },
        }
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::BloodCulture),
            1 => Some(Self::SepsisPanel),
            2 => Some(Self::Ceftriaxone),
            3 => Some(Self::FluidBolus),
            4 => Some(Self::IvAccess),
            5 => Some(Self::OxygenTherapy),
            6 => Some(Self::ChestXray),
            7 => Some(Self::CtAbdomen),
            8 => Some(Self::SurgeryConsult),
            _ => None,
        }
    }

    pub fn all() -> &'static [OrderKind] {
        &[
            Self::BloodCulture,
            Self::SepsisPanel,
            Self::Ceftriaxone,
            Self::FluidBolus,
            Self::IvAccess,
            Self::OxygenTherapy,
            Self::ChestXray,
            Self::CtAbdomen,
            Self::SurgeryConsult,
        ]
    }
}

/// Order-entry screen grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OrderCategory {
    Laboratory = 0,
    Medications = 1,
    Procedures = 2,
    Imaging = 3,
    Consults = 4,
}

impl OrderCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Laboratory => "Laboratory",
            Self::Medications => "Medications",
            Self::Procedures => "Procedures",
            Self::Imaging => "Radiology",
            Self::Consults => "Consults",
        }
    }

    /// Orders in this category, in display order.
    pub fn orders(&self) -> &'static [OrderKind] {
        match self {
            Self::Laboratory => &[OrderKind::BloodCulture, OrderKind::SepsisPanel],
            Self::Medications => &[OrderKind::Ceftriaxone, OrderKind::FluidBolus],
            Self::Procedures => &[OrderKind::IvAccess, OrderKind::OxygenTherapy],
            Self::Imaging => &[OrderKind::ChestXray, OrderKind::CtAbdomen],
            Self::Consults => &[OrderKind::SurgeryConsult],
        }
    }

    /// All categories in catalog declaration order.
    pub fn all() -> &'static [OrderCategory] {
        &[
            Self::Laboratory,
            Self::Medications,
            Self::Procedures,
            Self::Imaging,
            Self::Consults,
        ]
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Laboratory),
            1 => Some(Self::Medications),
            2 => Some(Self::Procedures),
            3 => Some(Self::Imaging),
            4 => Some(Self::Consults),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_roundtrip() {
        for i in 0..9u8 {
            let order = OrderKind::from_u8(i).unwrap();
            assert_eq!(order as u8, i);
        }
        assert!(OrderKind::from_u8(99).is_none());
    }

    #[test]
    fn test_category_roundtrip() {
        for i in 0..5u8 {
            let cat = OrderCategory::from_u8(i).unwrap();
            assert_eq!(cat as u8, i);
        }
        assert!(OrderCategory::from_u8(99).is_none());
    }

    #[test]
    fn test_every_order_in_exactly_one_category() {
        for order in OrderKind::all() {
            let count = OrderCategory::all()
                .iter()
                .filter(|c| c.orders().contains(order))
                .count();
            assert_eq!(count, 1, "{:?} must appear in exactly one category", order);
        }
    }

    #[test]
    fn test_category_order_count_matches_catalog() {
        let total: usize = OrderCategory::all().iter().map(|c| c.orders().len()).sum();
        assert_eq!(total, OrderKind::all().len());
    }

    #[test]
    fn test_essential_orders() {
        let essential: Vec<_> = OrderKind::all()
            .iter()
            .filter(|o| o.spec().essential)
            .collect();
        assert_eq!(essential.len(), 5);
        assert!(OrderKind::BloodCulture.spec().essential);
        assert!(OrderKind::Ceftriaxone.spec().essential);
        assert!(!OrderKind::ChestXray.spec().essential);
        assert!(!OrderKind::SurgeryConsult.spec().essential);
    }

    #[test]
    fn test_point_values_positive() {
        for order in OrderKind::all() {
            assert!(order.spec().points > 0, "{:?} must be worth points", order);
        }
    }

    #[test]
    fn test_category_display_names() {
        assert_eq!(OrderCategory::Laboratory.display_name(), "Laboratory");
        assert_eq!(OrderCategory::Imaging.display_name(), "Radiology");
        assert_eq!(OrderCategory::all().len(), 5);
    }

    #[test]
    fn test_order_names_nonempty() {
        for order in OrderKind::all() {
            let spec = order.spec();
            assert!(!spec.name.is_empty());
            assert!(!spec.order_name.is_empty());
        }
    }
}
