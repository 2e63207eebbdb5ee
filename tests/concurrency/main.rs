//! Concurrent access to a shared repository.

use std::thread;

use keyed_store::{ElectronicItem, ErrorKind, InMemoryRepository, RecordStore};

const THREADS: usize = 8;
const ROUNDS: usize = 250;

#[test]
fn concurrent_adjustments_lose_no_updates() {
    let repo = InMemoryRepository::<ElectronicItem>::new();
    repo.insert(ElectronicItem::new(1, "Laptop", 0, "Dell", 12))
        .unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let repo = repo.clone();
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    repo.adjust_quantity(1, 1).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(repo.get(1).unwrap().quantity as usize, THREADS * ROUNDS);
}

#[test]
fn racing_inserts_have_one_winner() {
    let repo = InMemoryRepository::<ElectronicItem>::new();

    let handles: Vec<_> = (0..THREADS)
        .map(|n| {
            let repo = repo.clone();
            thread::spawn(move || {
                repo.insert(ElectronicItem::new(7, format!("writer-{}", n), 1, "Acme", 6))
                    .map(|_| n)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners: Vec<usize> = results.iter().filter_map(|r| r.as_ref().ok().copied()).collect();

    assert_eq!(winners.len(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| e.kind() == ErrorKind::DuplicateKey));
    assert_eq!(
        repo.get(7).unwrap().name,
        format!("writer-{}", winners[0])
    );
    assert_eq!(repo.len().unwrap(), 1);
}

#[test]
fn snapshots_are_consistent_under_writes() {
    let repo = InMemoryRepository::<ElectronicItem>::new();

    let writer = {
        let repo = repo.clone();
        thread::spawn(move || {
            for id in 0..500 {
                repo.insert(ElectronicItem::new(id, "cable", 1, "Acme", 0))
                    .unwrap();
            }
        })
    };

    for _ in 0..50 {
        let snapshot = repo.list_all().unwrap();
        let ids: Vec<i64> = snapshot.iter().map(|e| e.id).collect();
        let expected: Vec<i64> = (0..ids.len() as i64).collect();
        assert_eq!(ids, expected);
    }

    writer.join().unwrap();
    assert_eq!(repo.len().unwrap(), 500);
}
