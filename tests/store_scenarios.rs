mod common;

use finance_tracker::{
    core::services::Aggregates,
    domain::TransactionKind,
    errors::{TrackerError, ValidationError},
    storage::MemorySlot,
};

use common::memory_store;

#[test]
fn salary_then_groceries_then_rejections() {
    let slot = MemorySlot::new();
    let mut store = memory_store(&slot);

    store
        .add_transaction("Salary", 3000.0, TransactionKind::Income)
        .expect("salary is valid");
    assert_eq!(
        store.aggregates(),
        Aggregates {
            total_income: 3000.0,
            total_expenses: 0.0,
            savings: 3000.0,
        }
    );

    let outcome = store
        .add_transaction("Groceries", 45.5, TransactionKind::Expense)
        .expect("groceries are valid");
    assert_eq!(outcome.aggregates.savings, 2954.5);
    assert_eq!(store.aggregates().savings, 2954.5);
    assert_eq!(store.filtered_by_kind(TransactionKind::Expense).len(), 1);

    let before = store.transactions().to_vec();
    let stored_before = slot.contents();

    let empty = store.add_transaction("", 10.0, TransactionKind::Expense);
    assert!(matches!(
        empty,
        Err(TrackerError::Validation(ValidationError::EmptyDescription))
    ));
    assert_eq!(store.transactions(), before.as_slice());

    let negative = store.add_transaction("Bad", -5.0, TransactionKind::Income);
    assert!(matches!(
        negative,
        Err(TrackerError::Validation(ValidationError::NonPositiveAmount(_)))
    ));
    assert_eq!(store.transactions(), before.as_slice());
    assert_eq!(slot.contents(), stored_before);
}

#[test]
fn invalid_inputs_never_change_state() {
    let mut store = memory_store(&MemorySlot::new());
    store
        .add_transaction("Seed", 1.0, TransactionKind::Income)
        .unwrap();
    let snapshot = store.transactions().to_vec();

    let descriptions = ["", " ", "\t\n"];
    let amounts = [0.0, -0.01, -1000.0, f64::NAN, f64::INFINITY];
    for kind in TransactionKind::ALL {
        for description in descriptions {
            assert!(store.add_transaction(description, 10.0, kind).is_err());
        }
        for amount in amounts {
            assert!(store.add_transaction("Valid text", amount, kind).is_err());
        }
        for text in ["", "abc", "0", "-3", "NaN", "12abc"] {
            assert!(store
                .add_transaction_from_input("Valid text", text, kind)
                .is_err());
        }
    }
    assert_eq!(store.transactions(), snapshot.as_slice());
}

#[test]
fn appends_come_back_most_recent_first() {
    let mut store = memory_store(&MemorySlot::new());
    let names: Vec<String> = (0..25).map(|i| format!("entry {i}")).collect();
    for (i, name) in names.iter().enumerate() {
        let kind = if i % 3 == 0 {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        store.add_transaction(name, (i + 1) as f64, kind).unwrap();
    }

    let listed: Vec<&str> = store
        .transactions()
        .iter()
        .map(|txn| txn.description())
        .collect();
    let expected: Vec<&str> = names.iter().rev().map(String::as_str).collect();
    assert_eq!(listed, expected);

    let incomes: Vec<&str> = store
        .filtered_by_kind(TransactionKind::Income)
        .iter()
        .map(|txn| txn.description())
        .collect();
    assert_eq!(incomes.first(), Some(&"entry 24"));
    assert_eq!(incomes.last(), Some(&"entry 0"));
}

#[test]
fn aggregates_match_independent_sums() {
    let mut store = memory_store(&MemorySlot::new());
    let entries = [
        ("Salary", "2500.10", TransactionKind::Income),
        ("Rent", "1200", TransactionKind::Expense),
        ("Freelance", "310.45", TransactionKind::Income),
        ("Utilities", "89.99", TransactionKind::Expense),
        ("Dinner", "42.3", TransactionKind::Expense),
    ];
    for (description, amount, kind) in entries {
        store
            .add_transaction_from_input(description, amount, kind)
            .unwrap();
    }

    let derived = store.derive_aggregates();
    let income: f64 = derived
        .income_transactions
        .iter()
        .fold(0.0, |acc, txn| acc + txn.amount());
    let expenses: f64 = derived
        .expense_transactions
        .iter()
        .fold(0.0, |acc, txn| acc + txn.amount());

    assert_eq!(derived.aggregates.total_income, income);
    assert_eq!(derived.aggregates.total_expenses, expenses);
    assert_eq!(derived.aggregates.savings, income - expenses);
    assert_eq!(derived.income_transactions.len(), 2);
    assert_eq!(derived.expense_transactions.len(), 3);
}

#[test]
fn ids_stay_unique_across_appends() {
    let mut store = memory_store(&MemorySlot::new());
    for _ in 0..50 {
        store
            .add_transaction("Same text", 1.0, TransactionKind::Expense)
            .unwrap();
    }
    let mut ids: Vec<_> = store.transactions().iter().map(|txn| txn.id()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

#[test]
fn distribution_follows_store_totals() {
    let mut store = memory_store(&MemorySlot::new());
    assert!(!store.distribution().has_data);

    store
        .add_transaction("Salary", 400.0, TransactionKind::Income)
        .unwrap();
    store
        .add_transaction("Rent", 100.0, TransactionKind::Expense)
        .unwrap();
    let distribution = store.distribution();
    assert!(distribution.has_data);
    assert_eq!(distribution.expenses.share, 0.25);
    assert_eq!(distribution.savings.value, 300.0);
}
