use chrono::Utc;
use uuid::Uuid;

use crate::database::Store;
use crate::errors::{AppError, Result};
use crate::models::transaction::{Transaction, TransactionStatus};

/// Records a completed payment against an approved offer. The transaction
/// amount is whatever the offer granted, not what was originally requested.
pub async fn process_payment(store: &dyn Store, offer_id: &str) -> Result<Transaction> {
    let offer = store
        .get_offer(offer_id)
        .await?
        .ok_or_else(|| AppError::OfferNotFound(offer_id.to_string()))?;

    if !offer.status.is_payable() {
        tracing::info!(
            "Rejected payment for offer {} in status {}",
            offer_id,
            offer.status
        );
        return Err(AppError::OfferNotApproved(offer_id.to_string()));
    }

    let transaction = Transaction {
        transaction_id: Uuid::new_v4().to_string(),
        offer_id: offer.offer_id,
        user_id: offer.user_id,
        amount: offer.amount_offered,
        status: TransactionStatus::Completed,
        created_at: Utc::now(),
    };

    store.insert_transaction(&transaction).await?;

    tracing::info!(
        "💸 Payment {} recorded for offer {} - Amount: {:.2}",
        transaction.transaction_id,
        transaction.offer_id,
        transaction.amount
    );
    Ok(transaction)
}
