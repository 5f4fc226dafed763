use std::collections::BTreeMap;
use std::fmt::Write;

use axum::{extract::State, response::Html};

use crate::{
    database::Page,
    errors::Result,
    models::{fraud_check::FraudCheck, offer::Offer, summary::Summary},
    state::AppState,
};

const RECENT_ROWS: i64 = 5;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem; color: #222; }
h1 { color: #1f77b4; }
.cards { display: flex; gap: 1rem; flex-wrap: wrap; }
.card { background: #f0f2f6; padding: 1rem; border-radius: .5rem; border-left: 4px solid #1f77b4; min-width: 10rem; }
.card .value { font-size: 1.6rem; font-weight: bold; }
table { border-collapse: collapse; margin: 1rem 0; }
th, td { border: 1px solid #ddd; padding: .35rem .7rem; text-align: left; }
th { background: #f7f7f7; }
.approved, .allow { color: #28a745; }
.approved_installments, .suspicious, .review { color: #b8860b; }
.manual_review, .flagged, .block { color: #dc3545; }
"#;

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// The last `n` rows of a listing with `total` rows.
fn tail(total: i64, n: i64) -> Page {
    Page {
        skip: (total - n).max(0),
        limit: n,
    }
}

fn card(html: &mut String, label: &str, value: &str) {
    let _ = write!(
        html,
        r#"<div class="card"><div>{}</div><div class="value">{}</div></div>"#,
        escape(label),
        escape(value)
    );
}

fn distribution(html: &mut String, title: &str, counts: &BTreeMap<String, i64>) {
    let _ = write!(html, "<h3>{}</h3>", escape(title));
    if counts.is_empty() {
        html.push_str("<p>No data yet.</p>");
        return;
    }
    html.push_str("<table><tr><th>Status</th><th>Count</th></tr>");
    for (status, count) in counts {
        let _ = write!(
            html,
            r#"<tr><td class="{0}">{0}</td><td>{1}</td></tr>"#,
            escape(status),
            count
        );
    }
    html.push_str("</table>");
}

fn offers_table(html: &mut String, offers: &[Offer]) {
    html.push_str("<h3>Recent offers</h3>");
    if offers.is_empty() {
        html.push_str("<p>No offers yet.</p>");
        return;
    }
    html.push_str(
        "<table><tr><th>Offer</th><th>User</th><th>Status</th><th>Offered</th>\
         <th>Term</th><th>Rate</th><th>Monthly</th><th>Created</th></tr>",
    );
    for offer in offers.iter().rev() {
        let _ = write!(
            html,
            r#"<tr><td>{0}…</td><td>{1}</td><td class="{2}">{2}</td><td>${3:.2}</td><td>{4}</td><td>{5:.1}%</td><td>${6:.2}</td><td>{7}</td></tr>"#,
            escape(short_id(&offer.offer_id)),
            escape(&offer.user_id),
            offer.status,
            offer.amount_offered,
            offer.term_months,
            offer.interest_rate,
            offer.monthly_payment,
            offer.created_at.format("%Y-%m-%d %H:%M:%S"),
        );
    }
    html.push_str("</table>");
}

fn fraud_table(html: &mut String, checks: &[FraudCheck]) {
    html.push_str("<h3>Recent fraud checks</h3>");
    if checks.is_empty() {
        html.push_str("<p>No fraud checks yet.</p>");
        return;
    }
    html.push_str(
        "<table><tr><th>Check</th><th>User</th><th>Score</th><th>Status</th>\
         <th>Action</th><th>Flags</th></tr>",
    );
    for check in checks.iter().rev() {
        let flags = if check.flags.is_empty() {
            "-".to_string()
        } else {
            escape(&check.flags.join("; "))
        };
        let _ = write!(
            html,
            r#"<tr><td>{0}…</td><td>{1}</td><td>{2}</td><td class="{3}">{3}</td><td class="{4}">{4}</td><td>{5}</td></tr>"#,
            escape(short_id(&check.fraud_check_id)),
            escape(&check.user_id),
            check.fraud_score,
            check.status,
            check.action,
            flags,
        );
    }
    html.push_str("</table>");
}

pub fn render(summary: &Summary, offers: &[Offer], checks: &[FraudCheck]) -> String {
    let mut html = String::with_capacity(8 * 1024);
    let _ = write!(
        html,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>Ruua - Embedded Finance Platform</title><style>{}</style></head><body>\
         <h1>Ruua - Embedded Finance Platform</h1>",
        STYLE
    );

    html.push_str(r#"<div class="cards">"#);
    card(&mut html, "Total Offers", &summary.total_offers.to_string());
    card(&mut html, "Total Transactions", &summary.total_transactions.to_string());
    card(&mut html, "Fraud Checks", &summary.total_fraud_checks.to_string());
    card(&mut html, "Total Processed", &format!("${:.2}", summary.total_processed));
    card(
        &mut html,
        "Avg Fraud Score",
        &format!("{:.1}", summary.average_fraud_score),
    );
    html.push_str("</div>");

    distribution(&mut html, "Loan offer status", &summary.offer_status_counts);
    distribution(&mut html, "Fraud check results", &summary.fraud_status_counts);
    offers_table(&mut html, offers);
    fraud_table(&mut html, checks);

    html.push_str(
        r#"<p>Export: <a href="/admin/export/offers">offers</a> · <a href="/admin/export/transactions">transactions</a> · <a href="/admin/export/fraud-checks">fraud checks</a></p>"#,
    );
    html.push_str("</body></html>");
    html
}

pub async fn dashboard(State(state): State<AppState>) -> Result<Html<String>> {
    let summary = state.store.summary().await?;
    let offers = state
        .store
        .list_offers(tail(summary.total_offers, RECENT_ROWS))
        .await?;
    let checks = state
        .store
        .list_fraud_checks(tail(summary.total_fraud_checks, RECENT_ROWS))
        .await?;

    Ok(Html(render(&summary, &offers, &checks)))
}
