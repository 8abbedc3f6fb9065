//! Subscription Entity
//!
//! Software/service subscriptions moving through request → approval → payment → renewal.

use chrono::{NaiveDate, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dates::parse_opt;
use crate::entity::{Entity, EntityKind};
use crate::error::{DomainError, DomainResult};
use crate::flag::{self, Flag};
use crate::money::parse_price;

/// Days ahead of today within which a renewal is due
pub const RENEWAL_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Monthly,
    Quarterly,
    HalfYearly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::HalfYearly,
        Frequency::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::HalfYearly => "Half-Yearly",
            Frequency::Yearly => "Yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "monthly" | "month" => Some(Frequency::Monthly),
            "quarterly" | "quarter" => Some(Frequency::Quarterly),
            "halfyearly" | "semiannual" | "semiannually" => Some(Frequency::HalfYearly),
            "yearly" | "annual" | "annually" | "year" => Some(Frequency::Yearly),
            _ => None,
        }
    }

    /// Billing period length in months
    pub fn months(&self) -> u32 {
        match self {
            Frequency::Monthly => 1,
            Frequency::Quarterly => 3,
            Frequency::HalfYearly => 6,
            Frequency::Yearly => 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    Pending,
    Approved,
    Paid,
    Rejected,
}

impl SubscriptionStatus {
    pub const ALL: [SubscriptionStatus; 4] = [
        SubscriptionStatus::Pending,
        SubscriptionStatus::Approved,
        SubscriptionStatus::Paid,
        SubscriptionStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Pending => "Pending",
            SubscriptionStatus::Approved => "Approved",
            SubscriptionStatus::Paid => "Paid",
            SubscriptionStatus::Rejected => "Rejected",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            SubscriptionStatus::Pending => "badge pending",
            SubscriptionStatus::Approved => "badge approved",
            SubscriptionStatus::Paid => "badge paid",
            SubscriptionStatus::Rejected => "badge rejected",
        }
    }
}

/// Most advanced marker wins: payment, then approval, then nothing.
pub fn derive_status(approval: Option<&Flag>, payment: Option<&Flag>, decision: Option<&str>) -> SubscriptionStatus {
    if flag::is_set(payment) {
        return SubscriptionStatus::Paid;
    }
    if flag::is_set(approval) {
        let rejected = decision
            .map(|d| d.trim().eq_ignore_ascii_case("rejected"))
            .unwrap_or(false);
        return if rejected {
            SubscriptionStatus::Rejected
        } else {
            SubscriptionStatus::Approved
        };
    }
    SubscriptionStatus::Pending
}

/// Subscription as the backend sends it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub id: u32,
    #[serde(alias = "companyName", default)]
    pub company_name: String,
    #[serde(alias = "subscriberName", default)]
    pub subscriber_name: String,
    #[serde(alias = "subscriptionName", default)]
    pub subscription_name: String,
    #[serde(default, deserialize_with = "flag::text_or_number")]
    pub price: Option<String>,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(alias = "requestedOn", alias = "timestamp", default)]
    pub requested_on: Option<String>,
    #[serde(alias = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(alias = "endDate", default)]
    pub end_date: Option<String>,
    #[serde(alias = "plannedRenewal", default)]
    pub planned_renewal: Option<String>,
    /// Approval marker
    #[serde(alias = "actual2", default)]
    pub actual_2: Option<Flag>,
    /// Payment marker
    #[serde(alias = "actual3", default)]
    pub actual_3: Option<Flag>,
    #[serde(alias = "approvalStatus", default)]
    pub approval_status: Option<String>,
    #[serde(alias = "approvalRemarks", default)]
    pub approval_remarks: Option<String>,
}

/// Subscription display shape
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subscription {
    pub id: u32,
    pub serial: String,
    pub company: String,
    pub subscriber: String,
    pub name: String,
    pub price: String,
    pub price_amount: Option<Decimal>,
    pub frequency: Option<Frequency>,
    pub purpose: String,
    pub requested_on: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub planned_renewal: Option<NaiveDate>,
    pub remarks: Option<String>,
    pub status: SubscriptionStatus,
}

impl Entity for Subscription {
    const KIND: EntityKind = EntityKind::Subscription;

    fn id(&self) -> u32 {
        self.id
    }
}

impl From<SubscriptionRecord> for Subscription {
    fn from(record: SubscriptionRecord) -> Self {
        let status = derive_status(
            record.actual_2.as_ref(),
            record.actual_3.as_ref(),
            record.approval_status.as_deref(),
        );
        let price = record.price.unwrap_or_default().trim().to_string();
        let end_date = parse_opt(record.end_date.as_deref());
        let mut sub = Self {
            id: record.id,
            serial: String::new(),
            company: record.company_name.trim().to_string(),
            subscriber: record.subscriber_name.trim().to_string(),
            name: record.subscription_name.trim().to_string(),
            price_amount: parse_price(&price),
            price,
            frequency: Frequency::parse(&record.frequency),
            purpose: record.purpose,
            requested_on: parse_opt(record.requested_on.as_deref()),
            start_date: parse_opt(record.start_date.as_deref()),
            end_date,
            planned_renewal: parse_opt(record.planned_renewal.as_deref()).or(end_date),
            remarks: record.approval_remarks.filter(|r| !r.trim().is_empty()),
            status,
        };
        sub.serial = sub.serial();
        sub
    }
}

impl Subscription {
    /// Monthly share of the price, when both price and frequency are known
    pub fn monthly_cost(&self) -> Option<Decimal> {
        let amount = self.price_amount?;
        let months = self.frequency?.months();
        Some(amount / Decimal::from(months))
    }

    pub fn frequency_label(&self) -> &'static str {
        self.frequency.map(|f| f.as_str()).unwrap_or("-")
    }
}

/// `planned <= today + window_days`; past dates count as due
pub fn due_for_renewal(planned: NaiveDate, today: NaiveDate, window_days: i64) -> bool {
    match TimeDelta::try_days(window_days).and_then(|w| today.checked_add_signed(w)) {
        Some(limit) => planned <= limit,
        // Past the calendar's end: every date is inside a forward window, none inside a backward one
        None => window_days > 0,
    }
}

/// Non-rejected subscriptions whose planned renewal falls inside the window,
/// soonest first
pub fn renewal_candidates(subs: &[Subscription], today: NaiveDate, window_days: i64) -> Vec<Subscription> {
    let mut due: Vec<Subscription> = subs
        .iter()
        .filter(|s| s.status != SubscriptionStatus::Rejected)
        .filter(|s| {
            s.planned_renewal
                .map(|planned| due_for_renewal(planned, today, window_days))
                .unwrap_or(false)
        })
        .cloned()
        .collect();
    due.sort_by_key(|s| s.planned_renewal);
    due
}

/// Body of the add subscription form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionDraft {
    pub company_name: String,
    pub subscriber_name: String,
    pub subscription_name: String,
    pub price: String,
    pub frequency: String,
    pub purpose: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SubscriptionDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.subscription_name.trim().is_empty() {
            return Err(DomainError::InvalidInput("subscription name is required".into()));
        }
        if self.company_name.trim().is_empty() {
            return Err(DomainError::InvalidInput("company is required".into()));
        }
        if Frequency::parse(&self.frequency).is_none() {
            return Err(DomainError::InvalidInput(format!(
                "unknown frequency '{}'",
                self.frequency
            )));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(DomainError::InvalidInput("end date is before start date".into()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApprovalRequest {
    pub approved: bool,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    pub payment_date: NaiveDate,
    pub amount_paid: String,
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenewSubscriptionRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: String,
}

impl RenewSubscriptionRequest {
    /// Next period for `sub`, starting the day after its current end
    pub fn next_period(sub: &Subscription, today: NaiveDate) -> Option<Self> {
        let months = sub.frequency?.months();
        let start = match sub.end_date {
            Some(d) => d.succ_opt()?,
            None => today,
        };
        let end = start.checked_add_months(chrono::Months::new(months))?.pred_opt()?;
        Some(Self {
            start_date: start,
            end_date: end,
            price: sub.price.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sub(id: u32, end: Option<NaiveDate>, status: SubscriptionStatus) -> Subscription {
        Subscription {
            id,
            serial: format!("SUB-{:04}", id),
            company: "Acme".into(),
            subscriber: "Ops".into(),
            name: format!("Tool {}", id),
            price: "1200".into(),
            price_amount: Some(Decimal::from(1200)),
            frequency: Some(Frequency::Yearly),
            purpose: String::new(),
            requested_on: None,
            start_date: None,
            end_date: end,
            planned_renewal: end,
            remarks: None,
            status,
        }
    }

    #[test]
    fn test_derive_status_order() {
        let set = Flag::from("2026-10-01");
        let unset = Flag::from("");
        assert_eq!(derive_status(None, None, None), SubscriptionStatus::Pending);
        assert_eq!(derive_status(Some(&unset), Some(&unset), None), SubscriptionStatus::Pending);
        assert_eq!(derive_status(Some(&set), None, None), SubscriptionStatus::Approved);
        assert_eq!(derive_status(Some(&set), None, Some("Rejected")), SubscriptionStatus::Rejected);
        assert_eq!(derive_status(Some(&set), Some(&set), None), SubscriptionStatus::Paid);
        // Inconsistent markers: payment without approval still reads as paid
        assert_eq!(derive_status(None, Some(&set), Some("rejected")), SubscriptionStatus::Paid);
    }

    #[test]
    fn test_status_recomputed_from_record() {
        let json = r#"{"id":9,"companyName":"Acme","subscriptionName":"Figma","price":1499,
            "frequency":"Half Yearly","startDate":"2026-04-01","endDate":"2026-09-30",
            "status":"Paid","actual_2":"2026-03-20","actual_3":null}"#;
        let sub = Subscription::from(serde_json::from_str::<SubscriptionRecord>(json).unwrap());
        assert_eq!(sub.status, SubscriptionStatus::Approved);
        assert_eq!(sub.serial, "SUB-0009");
        assert_eq!(sub.price, "1499");
        assert_eq!(sub.frequency, Some(Frequency::HalfYearly));
        assert_eq!(sub.planned_renewal, Some(ymd(2026, 9, 30)));
    }

    #[test]
    fn test_frequency_parse_and_monthly_cost() {
        assert_eq!(Frequency::parse("Half-Yearly"), Some(Frequency::HalfYearly));
        assert_eq!(Frequency::parse("ANNUAL"), Some(Frequency::Yearly));
        assert_eq!(Frequency::parse("weekly"), None);

        let mut s = sub(1, None, SubscriptionStatus::Paid);
        assert_eq!(s.monthly_cost(), Some(Decimal::from(100)));
        s.frequency = Some(Frequency::Quarterly);
        s.price_amount = Some(Decimal::from_str("300").unwrap());
        assert_eq!(s.monthly_cost(), Some(Decimal::from(100)));
        s.frequency = None;
        assert_eq!(s.monthly_cost(), None);
    }

    #[test]
    fn test_due_for_renewal_window() {
        let today = ymd(2026, 10, 18);
        assert!(due_for_renewal(ymd(2026, 10, 25), today, 7));
        assert!(!due_for_renewal(ymd(2026, 10, 26), today, 7));
        assert!(due_for_renewal(ymd(2026, 9, 1), today, 7));
    }

    #[test]
    fn test_due_for_renewal_huge_window() {
        let today = ymd(2026, 10, 18);
        assert!(due_for_renewal(ymd(2030, 1, 1), today, 1_000_000_000_000));
        assert!(!due_for_renewal(ymd(2026, 10, 1), today, -1_000_000_000_000));

        let subs = vec![sub(1, Some(ymd(2026, 12, 1)), SubscriptionStatus::Paid)];
        assert_eq!(renewal_candidates(&subs, today, i64::MAX).len(), 1);
    }

    #[test]
    fn test_next_period_at_calendar_end() {
        let s = sub(1, Some(NaiveDate::MAX), SubscriptionStatus::Paid);
        assert_eq!(RenewSubscriptionRequest::next_period(&s, ymd(2026, 10, 18)), None);
    }

    #[test]
    fn test_renewal_candidates() {
        let today = ymd(2026, 10, 18);
        let subs = vec![
            sub(1, Some(ymd(2026, 10, 24)), SubscriptionStatus::Paid),
            sub(2, Some(ymd(2026, 12, 1)), SubscriptionStatus::Paid),
            sub(3, Some(ymd(2026, 10, 1)), SubscriptionStatus::Paid),
            sub(4, Some(ymd(2026, 10, 20)), SubscriptionStatus::Rejected),
            sub(5, None, SubscriptionStatus::Approved),
        ];
        let due = renewal_candidates(&subs, today, RENEWAL_WINDOW_DAYS);
        assert_eq!(due.iter().map(|s| s.id).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn test_next_period() {
        let s = sub(1, Some(ymd(2026, 10, 31)), SubscriptionStatus::Paid);
        let req = RenewSubscriptionRequest::next_period(&s, ymd(2026, 10, 18)).unwrap();
        assert_eq!(req.start_date, ymd(2026, 11, 1));
        assert_eq!(req.end_date, ymd(2027, 10, 31));
        assert_eq!(req.price, "1200");
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = SubscriptionDraft {
            company_name: "Acme".into(),
            subscription_name: "Slack".into(),
            frequency: "Monthly".into(),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());
        draft.start_date = Some(ymd(2026, 10, 1));
        draft.end_date = Some(ymd(2026, 9, 1));
        assert!(draft.validate().is_err());
        draft.end_date = None;
        draft.frequency = "fortnightly".into();
        assert!(draft.validate().is_err());
    }
}
