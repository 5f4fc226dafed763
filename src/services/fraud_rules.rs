//! Additive fraud scoring over four independent checks.

use crate::dtos::fraud_dtos::FraudRequest;
use crate::models::fraud_check::{FraudAction, FraudAssessment, FraudStatus};

pub const MAX_SCORE: i32 = 100;
pub const FLAGGED_THRESHOLD: i32 = 50;
pub const SUSPICIOUS_THRESHOLD: i32 = 30;

pub const FLAG_COUNTRY_MISMATCH: &str = "Device and billing country mismatch";
pub const FLAG_FAILED_PAYMENTS: &str = "High number of failed payments in last 30 days";
pub const FLAG_HIGH_AMOUNT: &str = "Unusual high transaction amount";
pub const FLAG_MULTIPLE_DEVICES: &str = "Multiple devices detected";

/// Inputs the checks look at.
#[derive(Debug, Clone, Copy)]
pub struct FraudSignals<'a> {
    pub transaction_amount: f64,
    pub device_country: &'a str,
    pub billing_country: &'a str,
    pub device_count: i64,
    pub failed_payments_last_30_days: i64,
}

impl<'a> From<&'a FraudRequest> for FraudSignals<'a> {
    fn from(request: &'a FraudRequest) -> Self {
        FraudSignals {
            transaction_amount: request.transaction_amount,
            device_country: &request.device_country,
            billing_country: &request.billing_country,
            device_count: request.device_count,
            failed_payments_last_30_days: request.failed_payments_last_30_days,
        }
    }
}

struct Check {
    weight: i32,
    flag: &'static str,
    applies: fn(&FraudSignals<'_>) -> bool,
}

// Evaluation order is the order flags are reported in.
const CHECKS: [Check; 4] = [
    Check {
        weight: 30,
        flag: FLAG_COUNTRY_MISMATCH,
        applies: |s| s.device_country.trim() != s.billing_country.trim(),
    },
    Check {
        weight: 40,
        flag: FLAG_FAILED_PAYMENTS,
        applies: |s| s.failed_payments_last_30_days > 3,
    },
    Check {
        weight: 20,
        flag: FLAG_HIGH_AMOUNT,
        applies: |s| s.transaction_amount > 5000.0,
    },
    Check {
        weight: 25,
        flag: FLAG_MULTIPLE_DEVICES,
        applies: |s| s.device_count > 3,
    },
];

pub fn score(signals: &FraudSignals<'_>) -> FraudAssessment {
    let mut raw = 0;
    let mut flags = Vec::new();

    for check in &CHECKS {
        if (check.applies)(signals) {
            raw += check.weight;
            flags.push(check.flag.to_string());
        }
    }

    let score = raw.min(MAX_SCORE);
    let (status, action) = classify(score);

    FraudAssessment {
        score,
        status,
        action,
        flags,
    }
}

pub fn classify(score: i32) -> (FraudStatus, FraudAction) {
    if score >= FLAGGED_THRESHOLD {
        (FraudStatus::Flagged, FraudAction::Block)
    } else if score >= SUSPICIOUS_THRESHOLD {
        (FraudStatus::Suspicious, FraudAction::Review)
    } else {
        (FraudStatus::Approved, FraudAction::Allow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals<'a>(
        amount: f64,
        device: &'a str,
        billing: &'a str,
        devices: i64,
        failed: i64,
    ) -> FraudSignals<'a> {
        FraudSignals {
            transaction_amount: amount,
            device_country: device,
            billing_country: billing,
            device_count: devices,
            failed_payments_last_30_days: failed,
        }
    }

    #[test]
    fn test_clean_request_is_approved() {
        let result = score(&signals(200.0, "US", "US", 1, 0));
        assert_eq!(result.score, 0);
        assert_eq!(result.status, FraudStatus::Approved);
        assert_eq!(result.action, FraudAction::Allow);
        assert!(result.flags.is_empty());
    }

    #[test]
    fn test_high_risk_request_is_flagged() {
        let result = score(&signals(1000.0, "US", "CA", 5, 5));
        assert_eq!(result.score, 95);
        assert_eq!(result.status, FraudStatus::Flagged);
        assert_eq!(result.action, FraudAction::Block);
        assert_eq!(
            result.flags,
            vec![
                FLAG_COUNTRY_MISMATCH.to_string(),
                FLAG_FAILED_PAYMENTS.to_string(),
                FLAG_MULTIPLE_DEVICES.to_string(),
            ]
        );
    }

    #[test]
    fn test_all_checks_fire_and_score_is_capped() {
        let result = score(&signals(6000.0, "US", "CA", 5, 5));
        assert_eq!(result.score, MAX_SCORE);
        assert_eq!(result.flags.len(), 4);
        assert_eq!(result.flags[2], FLAG_HIGH_AMOUNT);
    }

    #[test]
    fn test_country_mismatch_alone_is_suspicious() {
        let result = score(&signals(100.0, "DE", "FR", 1, 0));
        assert_eq!(result.score, 30);
        assert_eq!(result.status, FraudStatus::Suspicious);
        assert_eq!(result.action, FraudAction::Review);
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Each check fires only strictly above its threshold.
        let result = score(&signals(5000.0, "US", "US", 3, 3));
        assert_eq!(result.score, 0);

        assert_eq!(score(&signals(5000.01, "US", "US", 1, 0)).score, 20);
        assert_eq!(score(&signals(10.0, "US", "US", 4, 0)).score, 25);
        assert_eq!(score(&signals(10.0, "US", "US", 1, 4)).score, 40);
    }

    #[test]
    fn test_single_heavy_check_stays_below_flagged() {
        let result = score(&signals(10.0, "US", "US", 1, 10));
        assert_eq!(result.score, 40);
        assert_eq!(result.status, FraudStatus::Suspicious);
    }

    #[test]
    fn test_amount_and_devices_combine_to_flagged() {
        let result = score(&signals(9000.0, "US", "US", 4, 0));
        assert_eq!(result.score, 45);
        assert_eq!(result.status, FraudStatus::Suspicious);

        let result = score(&signals(9000.0, "US", "GB", 1, 0));
        assert_eq!(result.score, 50);
        assert_eq!(result.status, FraudStatus::Flagged);
    }

    #[test]
    fn test_country_comparison_trims_whitespace() {
        assert_eq!(score(&signals(10.0, "US ", "US", 1, 0)).score, 0);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(29).0, FraudStatus::Approved);
        assert_eq!(classify(30).0, FraudStatus::Suspicious);
        assert_eq!(classify(49).0, FraudStatus::Suspicious);
        assert_eq!(classify(50).0, FraudStatus::Flagged);
        assert_eq!(classify(100).1, FraudAction::Block);
    }
}
