use std::collections::BTreeMap;

use serde::Serialize;

/// Dashboard metrics over everything the store holds.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Summary {
    pub total_users: i64,
    pub total_offers: i64,
    pub total_transactions: i64,
    pub total_fraud_checks: i64,
    pub total_processed: f64,
    pub offer_status_counts: BTreeMap<String, i64>,
    pub fraud_status_counts: BTreeMap<String, i64>,
    pub average_fraud_score: f64,
}
