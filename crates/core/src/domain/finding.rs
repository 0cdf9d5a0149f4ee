use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::analysis::AnalysisItem;
use crate::tenant::{AgencyId, TenantContext};

/// Identifier of the account the finding is about, as assigned by the
/// surrounding book-of-business records.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FindingId(pub Uuid);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    Gap,
    Upsell,
    CrossSell,
}

impl FindingKind {
    /// Gaps are informational; only upsell and cross-sell findings count as
    /// revenue opportunities once verified.
    pub fn is_opportunity(self) -> bool {
        matches!(self, FindingKind::Upsell | FindingKind::CrossSell)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingStatus {
    PendingReview,
    Verified,
    Rejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Lenient parse of whatever label the analysis producer emitted.
    pub fn from_label(raw: Option<&str>) -> Self {
        let Some(raw) = raw else { return Priority::Medium };
        let normalized = raw.to_ascii_lowercase();
        if normalized.contains("high") || normalized.contains("urgent") {
            Priority::High
        } else if normalized.contains("low") {
            Priority::Low
        } else {
            Priority::Medium
        }
    }
}

/// An account insight surfaced by an analysis run, under independent review.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub id: FindingId,
    pub customer_id: CustomerId,
    pub agency_id: AgencyId,
    pub kind: FindingKind,
    pub status: FindingStatus,
    pub title: String,
    pub description: String,
    pub benefit: Option<String>,
    pub analysis_id: String,
    pub priority: Priority,
    pub financial_impact: Option<String>,
    pub estimated_value: Decimal,
    pub sales_script: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Finding {
    /// Materialize one pending finding from an analysis item. The cost
    /// string is kept verbatim in `financial_impact` and parsed into
    /// `estimated_value` for aggregation.
    pub fn from_analysis_item(
        ctx: &TenantContext,
        customer_id: &CustomerId,
        analysis_id: &str,
        kind: FindingKind,
        item: &AnalysisItem,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: FindingId(Uuid::new_v4()),
            customer_id: customer_id.clone(),
            agency_id: ctx.agency_id,
            kind,
            status: FindingStatus::PendingReview,
            title: item.area.clone(),
            description: item.recommendation.clone(),
            benefit: item.benefit.clone(),
            analysis_id: analysis_id.to_string(),
            priority: Priority::from_label(item.priority.as_deref()),
            financial_impact: item.cost.clone(),
            estimated_value: parse_estimated_value(item.cost.as_deref()),
            sales_script: item.sales_script.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Pull a numeric value out of a currency-like string: the first run of
/// digits, commas, and periods, with thousands separators stripped.
/// `"€200/year"` yields 200; anything unparsable yields zero.
pub fn parse_estimated_value(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw else { return Decimal::ZERO };
    let Some(start) = raw.find(|c: char| c.is_ascii_digit() || c == ',' || c == '.') else {
        return Decimal::ZERO;
    };
    let run: String = raw[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    let cleaned = run.replace(',', "");
    Decimal::from_str(cleaned.trim_end_matches('.')).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{parse_estimated_value, Priority};

    #[test]
    fn parses_currency_strings_with_units() {
        assert_eq!(parse_estimated_value(Some("€200/year")), Decimal::new(200, 0));
        assert_eq!(parse_estimated_value(Some("$1,250.50 annually")), Decimal::new(125_050, 2));
        assert_eq!(parse_estimated_value(Some("~980 EUR")), Decimal::new(980, 0));
    }

    #[test]
    fn first_separator_run_wins_even_when_not_numeric() {
        // Mirrors the lenient extraction rule: the run starts at the first
        // digit, comma, or period, so a stray period short-circuits to zero.
        assert_eq!(parse_estimated_value(Some("approx. 980 EUR")), Decimal::ZERO);
    }

    #[test]
    fn missing_or_unparsable_cost_yields_zero() {
        assert_eq!(parse_estimated_value(None), Decimal::ZERO);
        assert_eq!(parse_estimated_value(Some("to be determined")), Decimal::ZERO);
        assert_eq!(parse_estimated_value(Some("")), Decimal::ZERO);
    }

    #[test]
    fn priority_labels_parse_leniently() {
        assert_eq!(Priority::from_label(Some("HIGH")), Priority::High);
        assert_eq!(Priority::from_label(Some("rather low")), Priority::Low);
        assert_eq!(Priority::from_label(Some("normal")), Priority::Medium);
        assert_eq!(Priority::from_label(None), Priority::Medium);
    }
}
