use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Approved,
    ApprovedInstallments,
    ManualReview,
}

impl OfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Approved => "approved",
            OfferStatus::ApprovedInstallments => "approved_installments",
            OfferStatus::ManualReview => "manual_review",
        }
    }

    /// Only approved offers may be paid.
    pub fn is_payable(&self) -> bool {
        matches!(
            self,
            OfferStatus::Approved | OfferStatus::ApprovedInstallments
        )
    }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(OfferStatus::Approved),
            "approved_installments" => Ok(OfferStatus::ApprovedInstallments),
            "manual_review" => Ok(OfferStatus::ManualReview),
            other => Err(format!("unknown offer status '{}'", other)),
        }
    }
}

/// Output of the underwriting rules, before an id or timestamp is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferDecision {
    pub status: OfferStatus,
    pub amount_offered: f64,
    pub term_months: i32,
    pub interest_rate: f64,
    pub monthly_payment: f64,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub offer_id: String,
    pub user_id: String,
    pub order_amount: f64,
    pub status: OfferStatus,
    pub amount_offered: f64,
    pub term_months: i32,
    pub interest_rate: f64,
    pub monthly_payment: f64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl Offer {
    pub fn from_decision(
        offer_id: String,
        user_id: String,
        order_amount: f64,
        decision: OfferDecision,
        created_at: DateTime<Utc>,
    ) -> Self {
        Offer {
            offer_id,
            user_id,
            order_amount,
            status: decision.status,
            amount_offered: decision.amount_offered,
            term_months: decision.term_months,
            interest_rate: decision.interest_rate,
            monthly_payment: decision.monthly_payment,
            reason: decision.reason.to_string(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            OfferStatus::Approved,
            OfferStatus::ApprovedInstallments,
            OfferStatus::ManualReview,
        ] {
            assert_eq!(status.as_str().parse::<OfferStatus>(), Ok(status));
        }
        assert!("declined".parse::<OfferStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&OfferStatus::ApprovedInstallments).unwrap();
        assert_eq!(json, "\"approved_installments\"");
    }

    #[test]
    fn test_only_approved_states_are_payable() {
        assert!(OfferStatus::Approved.is_payable());
        assert!(OfferStatus::ApprovedInstallments.is_payable());
        assert!(!OfferStatus::ManualReview.is_payable());
    }
}
