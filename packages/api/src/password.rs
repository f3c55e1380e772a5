//! Sign-up password checklist, recomputed on every keystroke.

pub const MIN_LENGTH: usize = 8;
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordStrength {
    pub length: bool,
    pub lowercase: bool,
    pub uppercase: bool,
    pub special: bool,
    pub digit: bool,
}

impl PasswordStrength {
    pub fn evaluate(password: &str) -> Self {
        Self {
            length: password.chars().count() >= MIN_LENGTH,
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            special: password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
            digit: password.chars().any(|c| c.is_ascii_digit()),
        }
    }

    /// Checklist rows in display order.
    pub fn rules(&self) -> [(&'static str, bool); 5] {
        [
            ("At least 8 characters", self.length),
            ("One lowercase letter", self.lowercase),
            ("One uppercase letter", self.uppercase),
            ("One special character", self.special),
            ("One number", self.digit),
        ]
    }

    pub fn unmet(&self) -> usize {
        self.rules().iter().filter(|(_, ok)| !ok).count()
    }

    pub fn is_strong(&self) -> bool {
        self.unmet() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules_met() {
        let strength = PasswordStrength::evaluate("Aa1!aaaa");
        assert!(strength.is_strong());
        assert_eq!(strength.unmet(), 0);
    }

    #[test]
    fn test_lowercase_only() {
        let strength = PasswordStrength::evaluate("aaaaaaaa");
        assert_eq!(strength.unmet(), 3);
        assert!(strength.length && strength.lowercase);
        assert!(!strength.uppercase && !strength.special && !strength.digit);
    }

    #[test]
    fn test_empty_and_short() {
        assert_eq!(PasswordStrength::evaluate("").unmet(), 5);
        let short = PasswordStrength::evaluate("A1!b");
        assert!(!short.length);
        assert_eq!(short.unmet(), 1);
    }

    #[test]
    fn test_backslash_and_quote_count_as_special() {
        assert!(PasswordStrength::evaluate("\\").special);
        assert!(PasswordStrength::evaluate("\"").special);
        assert!(!PasswordStrength::evaluate("~").special);
    }
}
