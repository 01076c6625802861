//! Model Card
//!
//! Static facts about the shipped model: training date, algorithm and the
//! relative input importance shown in the info panel.

use serde::Serialize;

use crate::logic::labels::Language;

/// Input importance in model input order
pub const FEATURE_IMPORTANCE: [(&str, f32); 6] = [
    ("Steam Flow", 0.25),
    ("HRH P", 0.20),
    ("HRH T", 0.15),
    ("Main Steam P", 0.15),
    ("HP Temp", 0.15),
    ("Ambient", 0.10),
];

/// Width of a 100% importance bar
const BAR_WIDTH: f32 = 20.0;

#[derive(Debug, Clone, Serialize)]
pub struct FeatureImportance {
    pub name: &'static str,
    pub weight: f32,
    pub bar: String,
    pub percent: u32,
}

impl FeatureImportance {
    pub fn new(name: &'static str, weight: f32) -> Self {
        Self {
            name,
            weight,
            bar: importance_bar(weight),
            percent: (weight * 100.0).round() as u32,
        }
    }

    /// `Steam Flow: █████ 25%`
    pub fn line(&self) -> String {
        format!("{}: {} {}%", self.name, self.bar, self.percent)
    }
}

/// Model card in one language
#[derive(Debug, Clone, Serialize)]
pub struct ModelCard {
    pub trained: &'static str,
    pub algorithm: &'static str,
    pub importance: Vec<FeatureImportance>,
}

impl ModelCard {
    pub fn for_language(lang: Language) -> Self {
        let labels = lang.labels();
        Self {
            trained: labels.trained,
            algorithm: labels.algo,
            importance: FEATURE_IMPORTANCE
                .iter()
                .map(|(name, weight)| FeatureImportance::new(name, *weight))
                .collect(),
        }
    }
}

/// Block-character bar, one block per 5%
pub fn importance_bar(weight: f32) -> String {
    let blocks = (weight * BAR_WIDTH + 1e-4).floor().max(0.0) as usize;
    "█".repeat(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importance_bar_widths() {
        assert_eq!(importance_bar(0.25).chars().count(), 5);
        assert_eq!(importance_bar(0.15).chars().count(), 3);
        assert_eq!(importance_bar(0.10).chars().count(), 2);
        assert_eq!(importance_bar(0.0), "");
    }

    #[test]
    fn test_importance_sums_to_one() {
        let total: f32 = FEATURE_IMPORTANCE.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_card_lines() {
        let card = ModelCard::for_language(Language::English);
        assert_eq!(card.importance.len(), 6);
        assert_eq!(card.importance[0].line(), "Steam Flow: █████ 25%");
        assert_eq!(card.importance[5].line(), "Ambient: ██ 10%");
        assert_eq!(card.trained, "Trained Date: 2025-08-20");
    }
}
