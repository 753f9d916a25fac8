// src/core/analyzer.rs
use std::collections::HashSet;

use crate::core::charset;
use crate::models::{
    Analysis, Composition, Security, StrengthLevel, StrengthReport, WeakPattern,
};

/// Score below which a password is not considered acceptable.
pub const MIN_VALID_SCORE: u8 = 40;
/// Longest password the HTTP boundary will hand to the analyzer.
pub const MAX_PASSWORD_LENGTH: usize = 1000;

/// Assumed brute-force rate for the crack-time estimate.
const ATTEMPTS_PER_SECOND: f64 = 1e12;

const NUMERIC_RUNS: [&str; 9] = [
    "012", "123", "234", "345", "456", "567", "678", "789", "890",
];
const KEYBOARD_RUNS: [&str; 4] = ["qwerty", "asdfgh", "zxcvbn", "12345"];

/// Analyzes the strength of a password. Pure and infallible: any string,
/// including the empty one, produces a report.
pub fn analyze(password: &str) -> StrengthReport {
    let chars: Vec<char> = password.chars().collect();
    let length = chars.len();

    let uppercase_count = chars.iter().filter(|c| c.is_ascii_uppercase()).count();
    let lowercase_count = chars.iter().filter(|c| c.is_ascii_lowercase()).count();
    let digit_count = chars.iter().filter(|c| c.is_ascii_digit()).count();
    let symbol_count = chars.iter().filter(|c| !c.is_ascii_alphanumeric()).count();

    let composition = Composition {
        has_uppercase: uppercase_count > 0,
        has_lowercase: lowercase_count > 0,
        has_digits: digit_count > 0,
        has_symbols: symbol_count > 0,
        uppercase_count,
        lowercase_count,
        digit_count,
        symbol_count,
    };

    let has_ambiguous = chars.iter().any(|c| charset::AMBIGUOUS.contains(*c));
    let weak_patterns = detect_weak_patterns(password, &chars);

    let unique_characters = chars.iter().copied().collect::<HashSet<char>>().len();
    let diversity_percentage = if length > 0 {
        (unique_characters as f64 / length as f64 * 100.0 * 100.0).round() / 100.0
    } else {
        0.0
    };

    let score = score(length, &composition, diversity_percentage, &weak_patterns, has_ambiguous);
    let strength = StrengthLevel::from_score(score);

    let possible_chars = possible_chars(&composition);
    let combinations = (possible_chars as f64).powi(length as i32);
    let crack_seconds = combinations / ATTEMPTS_PER_SECOND;

    let recommendations = recommendations(
        length,
        &composition,
        diversity_percentage,
        &weak_patterns,
    );

    StrengthReport {
        is_valid: score >= MIN_VALID_SCORE,
        strength,
        strength_label: strength.label().to_string(),
        score,
        length,
        composition,
        analysis: Analysis {
            unique_characters,
            diversity_percentage,
            has_ambiguous_chars: has_ambiguous,
            weak_patterns_detected: weak_patterns,
        },
        security: Security {
            estimated_crack_time: format_crack_time(crack_seconds),
            possible_combinations: format_combinations(possible_chars, combinations),
        },
        recommendations,
    }
}

fn detect_weak_patterns(password: &str, chars: &[char]) -> Vec<WeakPattern> {
    let lowered = password.to_lowercase();
    let mut found = Vec::new();

    if NUMERIC_RUNS.iter().any(|run| password.contains(run)) {
        found.push(WeakPattern::NumericSequence);
    }
    if has_alphabetic_run(&lowered) {
        found.push(WeakPattern::AlphabeticSequence);
    }
    if chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2]) {
        found.push(WeakPattern::Repetition);
    }
    if KEYBOARD_RUNS.iter().any(|run| lowered.contains(run)) {
        found.push(WeakPattern::KeyboardPattern);
    }

    found
}

/// Any three-letter ascending run "abc".."xyz", checked on the lowercased
/// input.
fn has_alphabetic_run(lowered: &str) -> bool {
    let chars: Vec<char> = lowered.chars().collect();
    chars.windows(3).any(|w| {
        w[0].is_ascii_lowercase()
            && w[2].is_ascii_lowercase()
            && w[1] as u32 == w[0] as u32 + 1
            && w[2] as u32 == w[1] as u32 + 1
    })
}

fn score(
    length: usize,
    composition: &Composition,
    diversity: f64,
    weak_patterns: &[WeakPattern],
    has_ambiguous: bool,
) -> u8 {
    let mut score: i32 = 0;

    // Length bonus, up to 30 points. An empty password falls through every
    // bracket and earns nothing.
    score += match length {
        16.. => 30,
        12..=15 => 25,
        8..=11 => 15,
        6..=7 => 10,
        1..=5 => 5,
        0 => 0,
    };

    // Character class bonus, up to 40 points.
    if composition.has_uppercase {
        score += 10;
    }
    if composition.has_lowercase {
        score += 10;
    }
    if composition.has_digits {
        score += 10;
    }
    if composition.has_symbols {
        score += 10;
    }

    // Diversity bonus, up to 20 points.
    score += if diversity >= 90.0 {
        20
    } else if diversity >= 75.0 {
        15
    } else if diversity >= 50.0 {
        10
    } else {
        5
    };

    score -= 10 * weak_patterns.len() as i32;
    if has_ambiguous {
        score -= 5;
    }

    score.clamp(0, 100) as u8
}

/// Alphabet size an attacker has to cover, based on the classes actually
/// present (26 upper, 26 lower, 10 digits, 32 symbols).
fn possible_chars(composition: &Composition) -> u32 {
    let mut possible = 0;
    if composition.has_uppercase {
        possible += 26;
    }
    if composition.has_lowercase {
        possible += 26;
    }
    if composition.has_digits {
        possible += 10;
    }
    if composition.has_symbols {
        possible += 32;
    }
    possible
}

fn format_crack_time(seconds: f64) -> String {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 3600.0;
    const DAY: f64 = 86_400.0;
    const YEAR: f64 = 31_536_000.0;

    // `seconds` saturates to infinity for long passwords with large
    // alphabets, which lands in the terminal bucket.
    if seconds < 1.0 {
        "instant".to_string()
    } else if seconds < MINUTE {
        format!("{} seconds", seconds.round() as u64)
    } else if seconds < HOUR {
        format!("{} minutes", (seconds / MINUTE).round() as u64)
    } else if seconds < DAY {
        format!("{} hours", (seconds / HOUR).round() as u64)
    } else if seconds < YEAR {
        format!("{} days", (seconds / DAY).round() as u64)
    } else if seconds < YEAR * 1000.0 {
        format!("{} years", (seconds / YEAR).round() as u64)
    } else {
        "millions of years".to_string()
    }
}

fn format_combinations(possible_chars: u32, combinations: f64) -> String {
    if possible_chars == 0 {
        "0".to_string()
    } else if combinations < 1e15 {
        group_thousands(combinations.round() as u64)
    } else if combinations.is_finite() {
        format!("{:.2e}", combinations)
    } else {
        "inf".to_string()
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn recommendations(
    length: usize,
    composition: &Composition,
    diversity: f64,
    weak_patterns: &[WeakPattern],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if length < 12 {
        recommendations.push("Increase the length to at least 12 characters".to_string());
    }
    if !composition.has_uppercase {
        recommendations.push("Add uppercase letters".to_string());
    }
    if !composition.has_lowercase {
        recommendations.push("Add lowercase letters".to_string());
    }
    if !composition.has_digits {
        recommendations.push("Add digits".to_string());
    }
    if !composition.has_symbols {
        recommendations.push("Add special symbols".to_string());
    }
    if diversity < 70.0 {
        recommendations.push("Use more distinct characters (avoid repetition)".to_string());
    }
    if weak_patterns.contains(&WeakPattern::NumericSequence) {
        recommendations.push("Avoid numeric sequences (123, 456, ...)".to_string());
    }
    if weak_patterns.contains(&WeakPattern::AlphabeticSequence) {
        recommendations.push("Avoid alphabetic sequences (abc, def, ...)".to_string());
    }
    if weak_patterns.contains(&WeakPattern::Repetition) {
        recommendations.push("Avoid consecutively repeated characters".to_string());
    }
    if weak_patterns.contains(&WeakPattern::KeyboardPattern) {
        recommendations.push("Avoid keyboard patterns (qwerty, asdfgh, ...)".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_score_for_reference_password() {
        // 16 chars (+30), all four classes (+40), 4 unique of 16 = 25%
        // diversity (+5), no weak patterns, contains the ambiguous '1' (-5).
        let report = analyze("Aa1!Aa1!Aa1!Aa1!");
        assert_eq!(report.score, 70);
        assert_eq!(report.strength, StrengthLevel::Strong);
        assert!(report.is_valid);
        assert!(report.analysis.weak_patterns_detected.is_empty());
        assert!(report.analysis.has_ambiguous_chars);
        assert_eq!(report.analysis.unique_characters, 4);
        assert_eq!(report.analysis.diversity_percentage, 25.0);
        assert_eq!(report.security.estimated_crack_time, "millions of years");
    }

    #[test]
    fn empty_password_earns_no_length_bonus() {
        let report = analyze("");
        assert_eq!(report.length, 0);
        // Only the diversity else-bracket contributes.
        assert_eq!(report.score, 5);
        assert_eq!(report.strength, StrengthLevel::VeryWeak);
        assert!(!report.is_valid);
        assert_eq!(report.analysis.diversity_percentage, 0.0);
        assert_eq!(report.security.possible_combinations, "0");
        assert_eq!(report.security.estimated_crack_time, "instant");
    }

    #[test]
    fn analyzer_is_idempotent() {
        let password = "Tr0ub4dor&3";
        assert_eq!(analyze(password), analyze(password));
    }

    #[test]
    fn composition_counts_each_class() {
        let report = analyze("Ab3!x");
        assert_eq!(report.composition.uppercase_count, 1);
        assert_eq!(report.composition.lowercase_count, 2);
        assert_eq!(report.composition.digit_count, 1);
        assert_eq!(report.composition.symbol_count, 1);
        assert!(report.composition.has_symbols);
    }

    #[test]
    fn numeric_sequences_are_detected() {
        let report = analyze("pass678word");
        assert!(report
            .analysis
            .weak_patterns_detected
            .contains(&WeakPattern::NumericSequence));
        // Digits present but out of sequence do not count.
        let report = analyze("p1a3s5s7");
        assert!(!report
            .analysis
            .weak_patterns_detected
            .contains(&WeakPattern::NumericSequence));
    }

    #[test]
    fn alphabetic_sequences_are_detected_case_insensitively() {
        for password in ["xyzzy", "aBcDeF", "XYZ"] {
            let report = analyze(password);
            assert!(
                report
                    .analysis
                    .weak_patterns_detected
                    .contains(&WeakPattern::AlphabeticSequence),
                "expected an alphabetic run in '{}'",
                password
            );
        }
        assert!(!analyze("acegik")
            .analysis
            .weak_patterns_detected
            .contains(&WeakPattern::AlphabeticSequence));
    }

    #[test]
    fn repetition_requires_three_consecutive() {
        assert!(analyze("paaass")
            .analysis
            .weak_patterns_detected
            .contains(&WeakPattern::Repetition));
        assert!(!analyze("paass")
            .analysis
            .weak_patterns_detected
            .contains(&WeakPattern::Repetition));
    }

    #[test]
    fn keyboard_patterns_are_detected_case_insensitively() {
        assert!(analyze("QwErTy99")
            .analysis
            .weak_patterns_detected
            .contains(&WeakPattern::KeyboardPattern));
        assert!(analyze("x12345x")
            .analysis
            .weak_patterns_detected
            .contains(&WeakPattern::KeyboardPattern));
    }

    #[test]
    fn each_weak_pattern_costs_ten_points() {
        // "abc123aaaqwerty": 15 chars (+25), lower+digits (+20), diversity
        // 12/15 = 80% (+15), all four patterns (-40: 123 numeric, abc
        // alphabetic, aaa repetition, qwerty keyboard), ambiguous '1' (-5).
        let report = analyze("abc123aaaqwerty");
        assert_eq!(report.analysis.weak_patterns_detected.len(), 4);
        assert_eq!(report.score, 15);
        assert_eq!(report.strength, StrengthLevel::VeryWeak);
    }

    #[test]
    fn score_never_goes_below_zero() {
        // "111abc12345": 11 chars (+15), lower+digits (+20), diversity 8/11
        // = 72.73% (+10), all four patterns (-40), ambiguous '1' (-5).
        let report = analyze("111abc12345");
        assert_eq!(report.analysis.weak_patterns_detected.len(), 4);
        assert_eq!(report.score, 0);
        assert_eq!(report.strength, StrengthLevel::VeryWeak);
    }

    #[test]
    fn crack_time_buckets() {
        // Digits only: 10^length / 1e12 attempts per second.
        assert_eq!(analyze("24682468").security.estimated_crack_time, "instant");
        assert_eq!(
            analyze("2468024680246").security.estimated_crack_time,
            "10 seconds"
        );
        assert_eq!(
            analyze("246802468024680").security.estimated_crack_time,
            "17 minutes"
        );
        assert_eq!(
            analyze("2468024680246802").security.estimated_crack_time,
            "3 hours"
        );
        // Lowercase only, 12 chars: 26^12 / 1e12 ~ 95,000 seconds.
        assert_eq!(
            analyze("bcdfghjkmnpq").security.estimated_crack_time,
            "1 days"
        );
        // Lowercase only, 15 chars: ~53 years.
        assert_eq!(
            analyze("bcdfghjkmnpqwzy").security.estimated_crack_time,
            "53 years"
        );
        // All classes, 16 chars: effectively unreachable.
        assert_eq!(
            analyze("Aa1!Aa1!Aa1!Aa1!").security.estimated_crack_time,
            "millions of years"
        );
    }

    #[test]
    fn combinations_are_grouped_for_small_pools() {
        // Digits only, 4 chars: 10^4 combinations.
        assert_eq!(analyze("2468").security.possible_combinations, "10,000");
    }

    #[test]
    fn recommendations_follow_check_order() {
        let report = analyze("abc");
        assert_eq!(
            report.recommendations,
            vec![
                "Increase the length to at least 12 characters".to_string(),
                "Add uppercase letters".to_string(),
                "Add digits".to_string(),
                "Add special symbols".to_string(),
                "Avoid alphabetic sequences (abc, def, ...)".to_string(),
            ]
        );
    }

    #[test]
    fn strong_password_yields_no_recommendations() {
        let report = analyze("K7#mPw9$Xq2&Vz4t");
        assert!(report.recommendations.is_empty(), "{:?}", report.recommendations);
        assert!(report.is_valid);
    }
}
