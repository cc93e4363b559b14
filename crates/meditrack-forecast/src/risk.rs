//! High-risk category lookup: union of the season table and the climate table.

use meditrack_core::config::{ClimateRiskTable, RiskTablesConfig, SeasonRiskTable};
use meditrack_core::models::{Climate, Conditions, Season};

/// Static category tables, loaded from config.
#[derive(Debug, Clone, Default)]
pub struct RiskTables {
    season: SeasonRiskTable,
    climate: ClimateRiskTable,
}

impl RiskTables {
    pub fn from_config(config: &RiskTablesConfig) -> Self {
        Self {
            season: config.season.clone(),
            climate: config.climate.clone(),
        }
    }

    /// Season categories first, then climate categories, duplicates dropped.
    pub fn high_risk_categories(&self, season: Season, climate: Climate) -> HighRiskCategories {
        let mut out = HighRiskCategories::default();
        for category in self
            .season
            .categories(season)
            .iter()
            .chain(self.climate.categories(climate))
        {
            out.insert(category);
        }
        out
    }

    pub fn for_conditions(&self, conditions: Conditions) -> HighRiskCategories {
        self.high_risk_categories(conditions.season, conditions.climate)
    }
}

/// Insertion-ordered set of category names. Iteration order drives the
/// substitute pass, so it must stay stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighRiskCategories {
    ordered: Vec<String>,
}

impl HighRiskCategories {
    fn insert(&mut self, category: &str) {
        if !self.contains(category) {
            self.ordered.push(category.to_string());
        }
    }

    pub fn contains(&self, category: &str) -> bool {
        self.ordered.iter().any(|c| c == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for HighRiskCategories {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut out = Self::default();
        for category in iter {
            out.insert(category.as_ref());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winter_cold_dedupes_identical_lists() {
        let tables = RiskTables::default();
        let cats = tables.high_risk_categories(Season::Winter, Climate::Cold);
        let listed: Vec<&str> = cats.iter().collect();
        assert_eq!(listed, ["Cough & Cold", "Antibiotics", "Vitamins", "Analgesics"]);
    }

    #[test]
    fn spring_rainy_keeps_season_order_then_climate() {
        let tables = RiskTables::default();
        let cats = tables.high_risk_categories(Season::Spring, Climate::Rainy);
        let listed: Vec<&str> = cats.iter().collect();
        assert_eq!(
            listed,
            [
                "Antihistamines",
                "Allergy",
                "Vitamins",
                "Analgesics",
                "Antibiotics",
                "Antipyretics",
                "Cough & Cold",
            ]
        );
    }

    #[test]
    fn lookup_is_exact_match() {
        let cats: HighRiskCategories = ["Vitamins"].into_iter().collect();
        assert!(cats.contains("Vitamins"));
        assert!(!cats.contains("vitamins"));
        assert!(!cats.contains("Vitamin"));
    }

    #[test]
    fn custom_tables_replace_defaults() {
        let mut config = RiskTablesConfig::default();
        config.season.summer = vec!["Sunscreen".into()];
        config.climate.hot = vec![];
        let tables = RiskTables::from_config(&config);
        let cats = tables.high_risk_categories(Season::Summer, Climate::Hot);
        assert_eq!(cats.len(), 1);
        assert!(cats.contains("Sunscreen"));
    }
}
