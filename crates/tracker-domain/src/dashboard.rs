//! Dashboard Aggregation
//!
//! Summary counts, monthly cost estimate and status breakdowns for the charts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::document::{expiry_bucket, Document, ExpiryBucket};
use crate::loan::{Loan, LoanStage};
use crate::subscription::{renewal_candidates, Subscription, SubscriptionStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyCost {
    pub total: Decimal,
    /// Subscriptions that contributed to `total`
    pub counted: usize,
    /// Approved/paid subscriptions whose price or frequency could not be read
    pub unparsed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub document_count: usize,
    pub subscription_count: usize,
    pub loan_count: usize,
    pub renewals_due: usize,
    pub monthly_cost: MonthlyCost,
    pub subscription_status: Vec<(SubscriptionStatus, usize)>,
    pub expiry: Vec<(ExpiryBucket, usize)>,
    pub loan_stages: Vec<(LoanStage, usize)>,
    pub outstanding_loan_amount: Decimal,
}

impl DashboardSummary {
    pub fn count_for_status(&self, status: SubscriptionStatus) -> usize {
        self.subscription_status
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn count_for_bucket(&self, bucket: ExpiryBucket) -> usize {
        self.expiry
            .iter()
            .find(|(b, _)| *b == bucket)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

fn monthly_cost(subs: &[Subscription]) -> MonthlyCost {
    let mut cost = MonthlyCost::default();
    for sub in subs
        .iter()
        .filter(|s| matches!(s.status, SubscriptionStatus::Approved | SubscriptionStatus::Paid))
    {
        match sub.monthly_cost() {
            Some(amount) => {
                cost.total = cost.total.saturating_add(amount);
                cost.counted += 1;
            }
            None => cost.unparsed += 1,
        }
    }
    cost.total = cost.total.round_dp(2);
    cost
}

pub fn summarize(
    documents: &[Document],
    subscriptions: &[Subscription],
    loans: &[Loan],
    today: NaiveDate,
    renewal_window_days: i64,
    expiry_window_days: i64,
) -> DashboardSummary {
    let subscription_status = SubscriptionStatus::ALL
        .iter()
        .map(|status| (*status, subscriptions.iter().filter(|s| s.status == *status).count()))
        .collect();

    let expiry = [ExpiryBucket::Active, ExpiryBucket::Expiring, ExpiryBucket::Expired]
        .iter()
        .map(|bucket| {
            let n = documents
                .iter()
                .filter(|d| expiry_bucket(d.renewal_date, today, expiry_window_days) == *bucket)
                .count();
            (*bucket, n)
        })
        .collect();

    let loan_stages = LoanStage::ALL
        .iter()
        .map(|stage| (*stage, loans.iter().filter(|l| l.stage == *stage).count()))
        .collect();

    let outstanding_loan_amount = loans
        .iter()
        .filter(|l| l.stage != LoanStage::Settled)
        .filter_map(|l| l.amount_value)
        .fold(Decimal::ZERO, Decimal::saturating_add);

    DashboardSummary {
        document_count: documents.len(),
        subscription_count: subscriptions.len(),
        loan_count: loans.len(),
        renewals_due: renewal_candidates(subscriptions, today, renewal_window_days).len(),
        monthly_cost: monthly_cost(subscriptions),
        subscription_status,
        expiry,
        loan_stages,
        outstanding_loan_amount,
    }
}
