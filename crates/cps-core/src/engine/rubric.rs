//! Rubric scoring: 100 minus 5 per feedback item, floored at 60.

use super::feedback::Issue;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BASE_SCORE: u8 = 100;
pub const PENALTY_PER_ISSUE: u8 = 5;
pub const SCORE_FLOOR: u8 = 60;

/// Letter rank derived from the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricScore {
    pub total: u8,
    pub rank: Grade,
}

pub fn grade_for(total: u8) -> Grade {
    match total {
        90.. => Grade::S,
        80..=89 => Grade::A,
        70..=79 => Grade::B,
        60..=69 => Grade::C,
        _ => Grade::D,
    }
}

/// Score a feedback list. Every item counts, acknowledgments included.
pub fn score(feedback: &[Issue]) -> RubricScore {
    let count = u8::try_from(feedback.len()).unwrap_or(u8::MAX);
    let penalty = count.saturating_mul(PENALTY_PER_ISSUE);
    let total = BASE_SCORE.saturating_sub(penalty).max(SCORE_FLOOR);
    RubricScore {
        total,
        rank: grade_for(total),
    }
}
