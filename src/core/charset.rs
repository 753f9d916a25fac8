// src/core/charset.rs
use std::fmt;

/// Uppercase letters available for generation.
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Lowercase letters available for generation.
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Decimal digits available for generation.
pub const DIGITS: &str = "0123456789";

/// Special symbols available for generation.
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|;:,.<>?";

/// Characters that are easy to confuse with one another in many fonts.
pub const AMBIGUOUS: &str = "Il1O0o";

/// One of the four character classes a password can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Upper,
    Lower,
    Digits,
    Symbols,
}

impl Category {
    /// Categories in declaration order. The require-each pass draws one
    /// character per category in exactly this order, so the order is part of
    /// the generator's contract rather than an accident of iteration.
    pub const ALL: [Category; 4] = [
        Category::Upper,
        Category::Lower,
        Category::Digits,
        Category::Symbols,
    ];

    /// The full (unfiltered) alphabet for this category.
    pub fn alphabet(self) -> &'static str {
        match self {
            Category::Upper => UPPERCASE,
            Category::Lower => LOWERCASE,
            Category::Digits => DIGITS,
            Category::Symbols => SYMBOLS,
        }
    }

    /// The name used in API options and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Category::Upper => "upper",
            Category::Lower => "lower",
            Category::Digits => "digits",
            Category::Symbols => "symbols",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
