//! Aggregation helpers for income, expense, and savings summaries.

use crate::domain::common::total;
use crate::domain::{Transaction, TransactionKind};

/// Totals derived from a transaction sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aggregates {
    pub total_income: f64,
    pub total_expenses: f64,
    /// `total_income - total_expenses`; negative when spending exceeds income.
    pub savings: f64,
}

/// Everything a dashboard needs, borrowed from the current sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Derived<'a> {
    pub aggregates: Aggregates,
    pub income_transactions: Vec<&'a Transaction>,
    pub expense_transactions: Vec<&'a Transaction>,
}

/// One slice of the income distribution chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionSlice {
    pub label: &'static str,
    pub value: f64,
    /// Fraction of the chart total in `0.0..=1.0`.
    pub share: f64,
}

/// How income splits between expenses and what is left over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distribution {
    pub expenses: DistributionSlice,
    pub savings: DistributionSlice,
    /// False until some income exists; there is nothing to chart before that.
    pub has_data: bool,
}

impl Distribution {
    pub fn slices(&self) -> [DistributionSlice; 2] {
        [self.expenses, self.savings]
    }
}

/// Stateless aggregation over transaction slices.
pub struct SummaryService;

impl SummaryService {
    pub fn aggregates(transactions: &[Transaction]) -> Aggregates {
        let total_income = total(transactions.iter().filter(|txn| txn.is_income()));
        let total_expenses = total(transactions.iter().filter(|txn| txn.is_expense()));
        Aggregates {
            total_income,
            total_expenses,
            savings: total_income - total_expenses,
        }
    }

    /// Filters by kind, keeping the sequence's order.
    pub fn filter_by_kind(transactions: &[Transaction], kind: TransactionKind) -> Vec<&Transaction> {
        transactions.iter().filter(|txn| txn.kind() == kind).collect()
    }

    pub fn derive(transactions: &[Transaction]) -> Derived<'_> {
        Derived {
            aggregates: Self::aggregates(transactions),
            income_transactions: Self::filter_by_kind(transactions, TransactionKind::Income),
            expense_transactions: Self::filter_by_kind(transactions, TransactionKind::Expense),
        }
    }

    /// Splits income into spent and saved portions. Savings never go below zero here.
    pub fn distribution(aggregates: &Aggregates) -> Distribution {
        let expenses = aggregates.total_expenses;
        let savings = (aggregates.total_income - aggregates.total_expenses).max(0.0);
        let chart_total = expenses + savings;
        let share = |value: f64| {
            if chart_total > 0.0 {
                value / chart_total
            } else {
                0.0
            }
        };
        Distribution {
            expenses: DistributionSlice {
                label: "Expenses",
                value: expenses,
                share: share(expenses),
            },
            savings: DistributionSlice {
                label: "Savings",
                value: savings,
                share: share(savings),
            },
            has_data: aggregates.total_income > 0.0,
        }
    }
}
