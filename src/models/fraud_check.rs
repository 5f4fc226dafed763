use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudStatus {
    Approved,
    Suspicious,
    Flagged,
}

impl FraudStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FraudStatus::Approved => "approved",
            FraudStatus::Suspicious => "suspicious",
            FraudStatus::Flagged => "flagged",
        }
    }
}

impl fmt::Display for FraudStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FraudStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(FraudStatus::Approved),
            "suspicious" => Ok(FraudStatus::Suspicious),
            "flagged" => Ok(FraudStatus::Flagged),
            other => Err(format!("unknown fraud status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudAction {
    Allow,
    Review,
    Block,
}

impl FraudAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FraudAction::Allow => "allow",
            FraudAction::Review => "review",
            FraudAction::Block => "block",
        }
    }
}

impl fmt::Display for FraudAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FraudAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(FraudAction::Allow),
            "review" => Ok(FraudAction::Review),
            "block" => Ok(FraudAction::Block),
            other => Err(format!("unknown fraud action '{}'", other)),
        }
    }
}

/// Result of the scoring rules for a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct FraudAssessment {
    pub score: i32,
    pub status: FraudStatus,
    pub action: FraudAction,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudCheck {
    pub fraud_check_id: String,
    pub user_id: String,
    pub transaction_amount: f64,
    pub fraud_score: i32,
    pub status: FraudStatus,
    pub flags: Vec<String>, // in evaluation order
    pub action: FraudAction,
    pub created_at: DateTime<Utc>,
}

impl FraudCheck {
    pub fn from_assessment(
        fraud_check_id: String,
        user_id: String,
        transaction_amount: f64,
        assessment: FraudAssessment,
        created_at: DateTime<Utc>,
    ) -> Self {
        FraudCheck {
            fraud_check_id,
            user_id,
            transaction_amount,
            fraud_score: assessment.score,
            status: assessment.status,
            flags: assessment.flags,
            action: assessment.action,
            created_at,
        }
    }
}

/// Flat shape of a fraud check for CSV export.
#[derive(Debug, Serialize)]
pub struct FraudCheckRow<'a> {
    pub fraud_check_id: &'a str,
    pub user_id: &'a str,
    pub transaction_amount: f64,
    pub fraud_score: i32,
    pub status: FraudStatus,
    pub flags: String,
    pub action: FraudAction,
    pub created_at: String,
}

impl<'a> From<&'a FraudCheck> for FraudCheckRow<'a> {
    fn from(check: &'a FraudCheck) -> Self {
        FraudCheckRow {
            fraud_check_id: &check.fraud_check_id,
            user_id: &check.user_id,
            transaction_amount: check.transaction_amount,
            fraud_score: check.fraud_score,
            status: check.status,
            flags: check.flags.join("; "),
            action: check.action,
            created_at: check.created_at.to_rfc3339(),
        }
    }
}
