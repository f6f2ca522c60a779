//! A hospital floor plan in the kiosk's JSON map format.
//!
//! Layout (x grows east, y grows south):
//!
//! ```text
//!            internal(2,0)        orthopedic(6,0)
//! surgery(0,2) -- n3(2,2) ------------ n4(6,2) -- payment(8,2)
//!                  |                    |
//! registration(0,6) -- n2(2,6)         n5(6,6) -- pharmacy(8,6)
//!                  |                    |
//! entrance(0,10) -- n1(2,10) -------- n6(6,10) -- toilet(8,10)
//!                                       |
//!                                     quit(6,12)
//! ```
//!
//! Edge costs are omitted and computed on load.

#![allow(dead_code)]

use triage_router::graph::Map;
use triage_router::map_data::load_map_from_json;

pub const HOSPITAL_MAP_JSON: &str = r#"{
    "nodes": [
        {"id": "entrance", "x": 0, "y": 10, "type": "main", "name": "Entrance", "description": "Main hospital entrance"},
        {"id": "registration_center", "x": 0, "y": 6, "type": "main", "name": "Registration", "description": "Patient registration desk"},
        {"id": "surgery_clinic", "x": 0, "y": 2, "type": "main", "name": "Surgery Clinic", "description": "Injuries, wounds and operations"},
        {"id": "internal_clinic", "x": 2, "y": 0, "type": "main", "name": "Internal Medicine", "description": "Fever, cough and general illness"},
        {"id": "orthopedic", "x": 6, "y": 0, "type": "main", "name": "Orthopedics", "description": "Bones, joints and muscles"},
        {"id": "payment_center", "x": 8, "y": 2, "type": "main", "name": "Payment"},
        {"id": "pharmacy", "x": 8, "y": 6, "type": "main", "name": "Pharmacy"},
        {"id": "toilet", "x": 8, "y": 10, "type": "main", "name": "Restroom"},
        {"id": "quit", "x": 6, "y": 12, "type": "main", "name": "Exit"},
        {"id": "storage", "x": 20, "y": 20, "type": "main", "name": "Storage"},
        {"id": "n1", "x": 2, "y": 10, "type": "nav"},
        {"id": "n2", "x": 2, "y": 6, "type": "nav"},
        {"id": "n3", "x": 2, "y": 2, "type": "nav"},
        {"id": "n4", "x": 6, "y": 2, "type": "nav"},
        {"id": "n5", "x": 6, "y": 6, "type": "nav"},
        {"id": "n6", "x": 6, "y": 10, "type": "nav"}
    ],
    "edges": [
        {"u": "n1", "v": "n2"},
        {"u": "n2", "v": "n3"},
        {"u": "n3", "v": "n4"},
        {"u": "n4", "v": "n5"},
        {"u": "n5", "v": "n6"},
        {"u": "n6", "v": "n1"},
        {"u": "entrance", "v": "n1"},
        {"u": "registration_center", "v": "n2"},
        {"u": "surgery_clinic", "v": "n3"},
        {"u": "internal_clinic", "v": "n3"},
        {"u": "orthopedic", "v": "n4"},
        {"u": "payment_center", "v": "n4"},
        {"u": "pharmacy", "v": "n5"},
        {"u": "toilet", "v": "n6"},
        {"u": "quit", "v": "n6"}
    ]
}"#;

pub fn hospital_map() -> Map {
    load_map_from_json(HOSPITAL_MAP_JSON).expect("hospital fixture loads")
}
