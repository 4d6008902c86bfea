//! Strength feedback view model: a four segment bar and a requirement
//! checklist. The HTML lives in `templates/strength.hbs`; this module only
//! decides what is lit, in which colour, and what is ticked.

use crate::strength::{self, char_count, StrengthResult};
use serde::Serialize;

pub const SEGMENT_COUNT: usize = 4;

/// Passwords longer than this satisfy the checklist's length line.
pub const MIN_LENGTH_EXCLUSIVE: usize = 7;

pub const LENGTH_LABEL: &str = "Has at least 8 characters";

/// Colour applied to every lit segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    #[must_use]
    pub const fn for_score(score: u8) -> Self {
        if score > 80 {
            Self::High
        } else if score > 50 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "red",
            Self::Medium => "yellow",
            Self::High => "teal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub on: bool,
    /// Colour when lit, `None` when off.
    pub color: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub label: &'static str,
    pub met: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub score: u8,
    pub tier: Tier,
    pub segments: [Segment; SEGMENT_COUNT],
    pub checklist: Vec<ChecklistItem>,
}

impl Feedback {
    /// Builds the feedback for `password`.
    #[must_use]
    pub fn for_password(password: &str) -> Self {
        Self::from_result(password, &strength::evaluate(password))
    }

    /// Builds the feedback from an evaluation that was already made for
    /// `password`.
    #[must_use]
    pub fn from_result(password: &str, result: &StrengthResult) -> Self {
        let tier = Tier::for_score(result.score);
        let typed = !password.is_empty();

        let segments = std::array::from_fn(|index| {
            let on = segment_lit(index, result.score, typed);
            Segment {
                on,
                color: on.then(|| tier.color()),
            }
        });

        let mut checklist = Vec::with_capacity(result.checks.len() + 1);
        checklist.push(ChecklistItem {
            label: LENGTH_LABEL,
            met: char_count(password) > MIN_LENGTH_EXCLUSIVE,
        });
        checklist.extend(result.checks.iter().map(|check| ChecklistItem {
            label: check.requirement.label,
            met: check.met,
        }));

        Self {
            score: result.score,
            tier,
            segments,
            checklist,
        }
    }

    #[must_use]
    pub fn lit_segments(&self) -> usize {
        self.segments.iter().filter(|s| s.on).count()
    }
}

/// The first segment lights as soon as anything is typed; the rest follow the
/// score in quarters.
fn segment_lit(index: usize, score: u8, typed: bool) -> bool {
    if index == 0 && typed {
        return true;
    }
    // score >= (index + 1) / SEGMENT_COUNT * 100
    usize::from(score) * SEGMENT_COUNT >= (index + 1) * 100
}
