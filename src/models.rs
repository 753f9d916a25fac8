// src/models.rs
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::charset::Category;

/// Password generation options.
///
/// Defaults match the service documentation: every category enabled,
/// ambiguous characters avoided, at least one character per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GenerationOptions {
    /// Include uppercase letters [A-Z]
    pub upper: bool,
    /// Include lowercase letters [a-z]
    pub lower: bool,
    /// Include digits [0-9]
    pub digits: bool,
    /// Include special symbols
    pub symbols: bool,
    /// Skip visually ambiguous characters (I, l, 1, O, 0, o)
    pub avoid_ambiguous: bool,
    /// Characters to exclude explicitly
    pub exclude: String,
    /// Guarantee at least one character from each selected category
    pub require_each: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            upper: true,
            lower: true,
            digits: true,
            symbols: true,
            avoid_ambiguous: true,
            exclude: String::new(),
            require_each: true,
        }
    }
}

impl GenerationOptions {
    pub fn category_enabled(&self, category: Category) -> bool {
        match category {
            Category::Upper => self.upper,
            Category::Lower => self.lower,
            Category::Digits => self.digits,
            Category::Symbols => self.symbols,
        }
    }

    /// Number of categories currently enabled.
    pub fn active_categories(&self) -> usize {
        Category::ALL
            .iter()
            .filter(|c| self.category_enabled(**c))
            .count()
    }
}

/// Strength bucket derived from the 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl StrengthLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => StrengthLevel::VeryStrong,
            60..=79 => StrengthLevel::Strong,
            40..=59 => StrengthLevel::Moderate,
            20..=39 => StrengthLevel::Weak,
            _ => StrengthLevel::VeryWeak,
        }
    }

    /// Human-readable form of the level.
    pub fn label(self) -> &'static str {
        match self {
            StrengthLevel::VeryWeak => "Very Weak",
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Moderate => "Moderate",
            StrengthLevel::Strong => "Strong",
            StrengthLevel::VeryStrong => "Very Strong",
        }
    }
}

/// Substring signatures correlated with low real-world entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WeakPattern {
    NumericSequence,
    AlphabeticSequence,
    Repetition,
    KeyboardPattern,
}

/// Per-class character counts and presence flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Composition {
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_digits: bool,
    pub has_symbols: bool,
    pub uppercase_count: usize,
    pub lowercase_count: usize,
    pub digit_count: usize,
    pub symbol_count: usize,
}

/// Uniqueness and pattern findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Analysis {
    pub unique_characters: usize,
    pub diversity_percentage: f64,
    pub has_ambiguous_chars: bool,
    pub weak_patterns_detected: Vec<WeakPattern>,
}

/// Brute-force resistance estimate at one trillion attempts per second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Security {
    pub estimated_crack_time: String,
    pub possible_combinations: String,
}

/// Full strength analysis of a password. Derived purely from the input
/// string; running the analyzer twice on the same input yields the same
/// report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StrengthReport {
    /// Whether the password scores at least the minimum acceptable score
    pub is_valid: bool,
    pub strength: StrengthLevel,
    pub strength_label: String,
    /// Strength score between 0 and 100
    pub score: u8,
    pub length: usize,
    pub composition: Composition,
    pub analysis: Analysis,
    pub security: Security,
    pub recommendations: Vec<String>,
}
