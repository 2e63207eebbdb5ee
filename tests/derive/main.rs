//! Integration tests for `#[derive(Record)]`.

use keyed_store::{InMemoryRepository, Quantity, Record, RecordId, RecordStore, RepositoryError};
use serde::{Deserialize, Serialize};

/// Fields named by convention, collection name derived from the type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Record)]
struct SparePart {
    id: RecordId,
    name: String,
    quantity: Quantity,
    bin: String,
}

/// Every role mapped explicitly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Record)]
#[record(collection = "prescriptions")]
struct Prescription {
    #[record(id)]
    prescription_id: RecordId,
    patient_id: RecordId,
    #[record(name)]
    medication: String,
    #[record(quantity)]
    doses_remaining: Quantity,
}

fn prescription(
    id: RecordId,
    patient_id: RecordId,
    medication: &str,
    doses: Quantity,
) -> Prescription {
    Prescription {
        prescription_id: id,
        patient_id,
        medication: medication.to_string(),
        doses_remaining: doses,
    }
}

#[test]
fn default_collection_is_snake_case_plural() {
    assert_eq!(SparePart::COLLECTION, "spare_parts");
}

#[test]
fn conventional_fields_back_accessors() {
    let mut part = SparePart {
        id: 9,
        name: "Gasket".into(),
        quantity: 4,
        bin: "A-3".into(),
    };
    assert_eq!(part.id(), 9);
    assert_eq!(Record::name(&part), "Gasket");

    part.set_quantity(11);
    assert_eq!(part.quantity, 11);
    assert_eq!(part.bin, "A-3");
}

#[test]
fn attributed_fields_back_accessors() {
    let mut rx = prescription(101, 1, "Amoxicillin", 14);
    assert_eq!(Prescription::COLLECTION, "prescriptions");
    assert_eq!(rx.id(), 101);
    assert_eq!(rx.name(), "Amoxicillin");
    assert_eq!(rx.quantity(), 14);

    rx.set_quantity(13);
    assert_eq!(rx.doses_remaining, 13);
}

#[test]
fn derived_records_work_in_a_repository() {
    let repo = InMemoryRepository::<Prescription>::new();
    repo.insert_all(vec![
        prescription(101, 1, "Amoxicillin", 14),
        prescription(102, 2, "Ibuprofen", 20),
        prescription(103, 1, "Lisinopril", 30),
    ])
    .unwrap();

    let for_patient: Vec<RecordId> = repo
        .find(&|rx: &Prescription| rx.patient_id == 1)
        .unwrap()
        .iter()
        .map(|rx| rx.prescription_id)
        .collect();
    assert_eq!(for_patient, vec![101, 103]);

    let err = repo.update_quantity(102, -1).unwrap_err();
    assert_eq!(
        err,
        RepositoryError::InvalidValue {
            collection: "prescriptions",
            id: 102,
            attempted: -1
        }
    );
}
