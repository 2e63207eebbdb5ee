//! Integration tests for the keyed repository contract.

mod fixtures;

use chrono::Duration;
use fixtures::{electronics, groceries, today};
use keyed_store::{
    ElectronicItem, ErrorKind, GroceryItem, InMemoryRepository, Record, RecordId, RecordStore,
    RepositoryError,
};

fn ids<R: Record>(records: &[R]) -> Vec<RecordId> {
    records.iter().map(Record::id).collect()
}

#[test]
fn duplicate_insert_fails_and_keeps_original() {
    let repo = groceries();

    let yogurt = GroceryItem::new(101, "Yogurt", 50, today() + Duration::days(10));
    let err = repo.insert(yogurt).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DuplicateKey);
    assert_eq!(err.id(), Some(101));
    assert_eq!(repo.get(101).unwrap().name, "Milk");
    assert_eq!(repo.len().unwrap(), 2);
}

#[test]
fn duplicate_insert_into_single_record_repository() {
    let repo = InMemoryRepository::<GroceryItem>::new();
    repo.insert(GroceryItem::new(101, "Milk", 1, today())).unwrap();

    let err = repo
        .insert(GroceryItem::new(101, "Milk again", 2, today()))
        .unwrap_err();
    assert!(matches!(err, RepositoryError::DuplicateKey { id: 101, .. }));
    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn remove_from_empty_repository_is_not_found() {
    let repo = InMemoryRepository::<GroceryItem>::new();
    let err = repo.remove(99).unwrap_err();
    assert_eq!(
        err,
        RepositoryError::NotFound {
            collection: "groceries",
            id: 99
        }
    );
}

#[test]
fn remove_missing_electronic_is_not_found() {
    let repo = electronics();
    let err = repo.remove(99).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(ids(&repo.list_all().unwrap()), vec![1, 2]);
}

#[test]
fn invalid_quantity_leaves_stored_value() {
    let repo = groceries();

    let err = repo.update_quantity(102, -10).unwrap_err();
    assert_eq!(
        err,
        RepositoryError::InvalidValue {
            collection: "groceries",
            id: 102,
            attempted: -10
        }
    );
    assert_eq!(repo.get(102).unwrap().quantity, 150);
}

#[test]
fn list_all_follows_insertion_order() {
    let repo = electronics();
    assert_eq!(ids(&repo.list_all().unwrap()), vec![1, 2]);
}

#[test]
fn list_length_tracks_inserts_and_removes() {
    let repo = InMemoryRepository::<GroceryItem>::new();
    let mut inserted = 0;
    let mut removed = 0;

    for id in [10, 20, 30, 20, 40] {
        if repo.insert(GroceryItem::new(id, "x", 1, today())).is_ok() {
            inserted += 1;
        }
    }
    for id in [30, 30, 99] {
        if repo.remove(id).is_ok() {
            removed += 1;
        }
    }

    let listed = repo.list_all().unwrap();
    assert_eq!(listed.len(), inserted - removed);
    assert_eq!(ids(&listed), vec![10, 20, 40]);
}

#[test]
fn increase_stock_in_one_step() {
    let repo = groceries();

    let updated = repo.adjust_quantity(101, 30).unwrap();
    assert_eq!(updated.quantity, 230);
    assert_eq!(repo.get(101).unwrap().quantity, 230);

    let err = repo.adjust_quantity(555, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn errors_are_recoverable_by_kind() {
    let repo = groceries();
    let attempts: Vec<Result<(), RepositoryError>> = vec![
        repo.insert(GroceryItem::new(101, "Yogurt", 50, today())),
        repo.remove(99),
        repo.update_quantity(102, -10),
        repo.update_quantity(102, 140),
    ];

    let kinds: Vec<Option<ErrorKind>> = attempts
        .iter()
        .map(|r| r.as_ref().err().map(RepositoryError::kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            Some(ErrorKind::DuplicateKey),
            Some(ErrorKind::NotFound),
            Some(ErrorKind::InvalidValue),
            None
        ]
    );
    assert_eq!(repo.get(102).unwrap().quantity, 140);
}

#[test]
fn expired_groceries_can_be_swept() {
    let repo = groceries();
    repo.insert(GroceryItem::new(103, "Cheese", 10, today() - Duration::days(1)))
        .unwrap();

    let later = today() + Duration::days(4);
    assert_eq!(repo.count(&|g: &GroceryItem| g.is_expired(later)).unwrap(), 2);

    let removed = repo.remove_where(&|g: &GroceryItem| g.is_expired(later)).unwrap();
    assert_eq!(ids(&removed), vec![102, 103]);
    assert_eq!(ids(&repo.list_all().unwrap()), vec![101]);
}

#[test]
fn find_by_predicate() {
    let repo = electronics();

    let samsung = repo
        .find_one(&|e: &ElectronicItem| e.brand == "Samsung")
        .unwrap()
        .unwrap();
    assert_eq!(samsung.id, 2);
    assert!(repo.find_one(&|e: &ElectronicItem| e.brand == "Apple").unwrap().is_none());
    assert!(repo.exists(&|e: &ElectronicItem| e.warranty_months >= 24).unwrap());
}

#[test]
fn generic_code_over_any_store() {
    fn total_stock<R: Record, S: RecordStore<R>>(store: &S) -> u64 {
        store
            .list_all()
            .unwrap()
            .iter()
            .map(|r| u64::from(r.quantity()))
            .sum()
    }

    assert_eq!(total_stock(&electronics()), 170);
    assert_eq!(total_stock(&groceries()), 350);
}
