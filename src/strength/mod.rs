//! Password strength scoring.
//!
//! Scoring and requirement checks are separate pure functions; [`evaluate`]
//! composes them into a [`StrengthResult`].

mod evaluator;
mod requirements;

pub use evaluator::{check_requirements, evaluate, score, RequirementCheck, StrengthResult};
pub use requirements::{char_count, Requirement, REQUIREMENTS, SPECIAL_SYMBOLS};

/// Passwords at or below this many characters take the length penalty.
pub const SHORT_PASSWORD_MAX: usize = 5;

/// Points lost per unmet condition: 100 split over the requirements plus the
/// length penalty.
pub const POINTS_PER_DEFICIENCY: u8 = 100 / (REQUIREMENTS.len() as u8 + 1);
