//! Strength evaluator - score and per-requirement checks.

use super::{char_count, Requirement, POINTS_PER_DEFICIENCY, REQUIREMENTS, SHORT_PASSWORD_MAX};
use serde::Serialize;

/// Outcome of testing one requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequirementCheck {
    pub requirement: Requirement,
    pub met: bool,
}

impl Serialize for RequirementCheck {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("RequirementCheck", 2)?;
        state.serialize_field("label", self.requirement.label)?;
        state.serialize_field("met", &self.met)?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrengthResult {
    /// One of 0, 25, 50, 75 or 100.
    pub score: u8,
    pub checks: Vec<RequirementCheck>,
}

/// Scores a password.
///
/// A password of five characters or fewer takes one deficiency, and so does
/// every unmet requirement. Each deficiency costs
/// [`POINTS_PER_DEFICIENCY`](super::POINTS_PER_DEFICIENCY) points; the score
/// never drops below zero.
#[must_use]
pub fn score(password: &str) -> u8 {
    let length_penalty = u8::from(char_count(password) <= SHORT_PASSWORD_MAX);
    let unmet = REQUIREMENTS.iter().filter(|r| !r.is_met(password)).count();
    let unmet = u8::try_from(unmet).unwrap_or(u8::MAX);

    let deficiencies = length_penalty.saturating_add(unmet);

    100u8.saturating_sub(POINTS_PER_DEFICIENCY.saturating_mul(deficiencies))
}

/// Tests every requirement independently, in display order. The length
/// penalty is not part of the result.
#[must_use]
pub fn check_requirements(password: &str) -> Vec<RequirementCheck> {
    REQUIREMENTS
        .iter()
        .map(|&requirement| RequirementCheck {
            requirement,
            met: requirement.is_met(password),
        })
        .collect()
}

#[must_use]
pub fn evaluate(password: &str) -> StrengthResult {
    StrengthResult {
        score: score(password),
        checks: check_requirements(password),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCORES: [u8; 5] = [0, 25, 50, 75, 100];

    #[test]
    fn test_evaluate_empty_password() {
        let result = evaluate("");
        assert_eq!(result.score, 0);
        assert!(result.checks.iter().all(|c| !c.met));
    }

    #[test]
    fn test_evaluate_letters_only() {
        assert_eq!(evaluate("abcdefgh").score, 75);
    }

    #[test]
    fn test_evaluate_all_requirements() {
        let result = evaluate("abc123!@");
        assert_eq!(result.score, 100);
        assert!(result.checks.iter().all(|c| c.met));
    }

    #[test]
    fn test_evaluate_short_but_varied() {
        let result = evaluate("a1!");
        assert_eq!(result.score, 75);
        // the length penalty does not show up as a failed requirement
        assert!(result.checks.iter().all(|c| c.met));
    }

    #[test]
    fn test_length_penalty_boundary() {
        // five characters still take the penalty, six do not
        assert_eq!(score("ab1!c"), 75);
        assert_eq!(score("ab1!cd"), 100);
    }

    #[test]
    fn test_length_counts_characters() {
        // five UTF-16 units but seven bytes: still short
        assert_eq!(score("a1!öö"), 75);
        assert_eq!(score("a1!ööö"), 100);
    }

    #[test]
    fn test_length_counts_utf16_units() {
        // five scalar values, seven UTF-16 units: past the cutoff
        assert_eq!(score("a1!😀😀"), 100);
        assert_eq!(score("a1!😀"), 75);
    }

    #[test]
    fn test_score_floor() {
        // short and missing all three requirements: 4 deficiencies
        assert_eq!(score("~"), 0);
        assert_eq!(score("   "), 0);
    }

    #[test]
    fn test_score_is_always_a_quarter_step() {
        let passwords = [
            "",
            "a",
            "1",
            "!",
            "a1",
            "a!",
            "1!",
            "aaaaaa",
            "111111",
            "!!!!!!",
            "abc123",
            "abc!!!",
            "123!!!",
            "abc123!@",
            "пароль",
            "日本語のパスワード",
            "Tr0ub4dor&3",
            "correct horse battery staple",
        ];
        for password in passwords {
            let result = evaluate(password);
            assert!(
                SCORES.contains(&result.score),
                "score {} for {password:?} is not a quarter step",
                result.score
            );
        }
    }

    #[test]
    fn test_every_class_mix_on_both_sides_of_the_cutoff() {
        // one sample per requirement, in REQUIREMENTS order; "~" meets none
        let samples = ["1", "a", "!"];
        for mask in 0u8..8 {
            let mut base = String::new();
            for (bit, sample) in samples.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    base.push_str(sample);
                }
            }
            let unmet = samples.len() - mask.count_ones() as usize;

            for length in [SHORT_PASSWORD_MAX, SHORT_PASSWORD_MAX + 1] {
                let password = format!("{base:~<length$}");
                assert_eq!(char_count(&password), length);
                let short = usize::from(length <= SHORT_PASSWORD_MAX);
                let expected = 100 - 25 * u8::try_from(short + unmet).unwrap_or(u8::MAX);

                let result = evaluate(&password);
                assert!(SCORES.contains(&result.score), "{password:?}");
                assert_eq!(result.score, expected, "{password:?}");
                assert_eq!(
                    result.checks.iter().filter(|c| !c.met).count(),
                    unmet,
                    "{password:?}"
                );
            }
        }
    }

    #[test]
    fn test_checks_keep_display_order() {
        let labels: Vec<_> = check_requirements("x")
            .iter()
            .map(|c| c.requirement.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "Includes at least one number",
                "Includes at least one letter",
                "Includes at least one special symbol",
            ]
        );
    }

    #[test]
    fn test_checks_are_independent() {
        let checks = check_requirements("12345678");
        let met: Vec<_> = checks.iter().map(|c| c.met).collect();
        assert_eq!(met, vec![true, false, false]);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        for password in ["", "abc", "abc123!@", "Pa$$w0rd"] {
            assert_eq!(evaluate(password), evaluate(password));
        }
    }

    #[test]
    fn test_serialize_checks() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(evaluate("a1"))?;
        // short and no special symbol
        assert_eq!(value["score"], 50);
        assert_eq!(value["checks"][0]["label"], "Includes at least one number");
        assert_eq!(value["checks"][0]["met"], true);
        assert_eq!(value["checks"][2]["met"], false);
        Ok(())
    }
}
