//! Loan offer underwriting.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. `amount <= 200`: instant approval over one month at 3%.
//! 2. `amount <= 1000` with at least three recent successful payments:
//!    two monthly installments at 4% annual.
//! 3. Anything else goes to manual review with nothing offered.

use crate::dtos::offer_dtos::OfferRequest;
use crate::models::offer::{OfferDecision, OfferStatus};

pub const INSTANT_APPROVAL_LIMIT: f64 = 200.0;
pub const INSTALLMENT_LIMIT: f64 = 1000.0;
pub const MIN_RECENT_PAYMENTS: i64 = 3;

const INSTANT_RATE_PERCENT: f64 = 3.0;
const INSTALLMENT_RATE_PERCENT: f64 = 4.0;
const INSTALLMENT_TERM_MONTHS: i32 = 2;

/// Rounds to cents.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn decide_offer(request: &OfferRequest) -> OfferDecision {
    decide(request.order_amount, request.recent_payments)
}

pub fn decide(order_amount: f64, recent_payments: i64) -> OfferDecision {
    if order_amount <= INSTANT_APPROVAL_LIMIT {
        return OfferDecision {
            status: OfferStatus::Approved,
            amount_offered: order_amount,
            term_months: 1,
            interest_rate: INSTANT_RATE_PERCENT,
            monthly_payment: round2(order_amount * (1.0 + INSTANT_RATE_PERCENT / 100.0)),
            reason: "Small amount instant approval",
        };
    }

    if order_amount <= INSTALLMENT_LIMIT && recent_payments >= MIN_RECENT_PAYMENTS {
        // Monthly compounding of the annual rate over the term, split evenly.
        let monthly_factor = 1.0 + INSTALLMENT_RATE_PERCENT / 100.0 / 12.0;
        let total = order_amount * monthly_factor.powi(INSTALLMENT_TERM_MONTHS);
        return OfferDecision {
            status: OfferStatus::ApprovedInstallments,
            amount_offered: order_amount,
            term_months: INSTALLMENT_TERM_MONTHS,
            interest_rate: INSTALLMENT_RATE_PERCENT,
            monthly_payment: round2(total / f64::from(INSTALLMENT_TERM_MONTHS)),
            reason: "Good payment history - installment approval",
        };
    }

    OfferDecision {
        status: OfferStatus::ManualReview,
        amount_offered: 0.0,
        term_months: 0,
        interest_rate: 0.0,
        monthly_payment: 0.0,
        reason: "Requires manual review due to amount or insufficient payment history",
    }
}
