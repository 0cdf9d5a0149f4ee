//! Wire shape of an account analysis result as delivered by the analysis
//! producer. Three categorized lists, each item carrying at least an area
//! and a recommendation.

use serde::{Deserialize, Serialize};

use crate::domain::finding::FindingKind;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisItem {
    pub area: String,
    pub recommendation: String,
    #[serde(default)]
    pub benefit: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub cost: Option<String>,
    #[serde(default)]
    pub sales_script: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub gaps: Vec<AnalysisItem>,
    #[serde(default)]
    pub upsell_opportunities: Vec<AnalysisItem>,
    #[serde(default)]
    pub cross_sell_opportunities: Vec<AnalysisItem>,
}

impl AnalysisResult {
    /// Flatten the three lists into `(kind, item)` pairs, gaps first.
    pub fn categorized(&self) -> impl Iterator<Item = (FindingKind, &AnalysisItem)> {
        self.gaps
            .iter()
            .map(|item| (FindingKind::Gap, item))
            .chain(self.upsell_opportunities.iter().map(|item| (FindingKind::Upsell, item)))
            .chain(
                self.cross_sell_opportunities.iter().map(|item| (FindingKind::CrossSell, item)),
            )
    }

    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
            && self.upsell_opportunities.is_empty()
            && self.cross_sell_opportunities.is_empty()
    }
}
