use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeSet;

use crate::error::{Result, ScoringError};
use crate::model::{Hole, Participant};

/// Holes per stroke-allocation cycle on a full course.
pub const FULL_ROUND_HOLES: u32 = 18;

/// Round override, then tournament override, then the snapshot taken when the player joined.
///
/// # Errors
/// `MissingHandicap` when none of the three is set.
pub fn resolve_effective_handicap(participant: &Participant) -> Result<Decimal> {
    participant
        .handicap_override
        .or(participant.tournament_handicap_override)
        .or(participant.handicap_snapshot)
        .ok_or_else(|| ScoringError::MissingHandicap {
            participant_id: participant.id.clone(),
        })
}

/// Nearest whole stroke, halves rounded away from zero.
#[must_use]
pub fn playing_handicap(effective_handicap: Decimal) -> i32 {
    effective_handicap
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i32()
        .unwrap_or(if effective_handicap.is_sign_negative() {
            i32::MIN
        } else {
            i32::MAX
        })
}

/// Strokes received on a hole of an 18-hole allocation.
#[must_use]
pub fn strokes_on_hole(playing_handicap: i32, stroke_index: u32) -> i32 {
    strokes_on_hole_for(playing_handicap, stroke_index, FULL_ROUND_HOLES)
}

/// Strokes received on a hole when stroke indices cycle every `cycle` holes.
///
/// Plus handicaps give strokes back starting from the easiest hole, so the result is negative.
#[must_use]
pub fn strokes_on_hole_for(playing_handicap: i32, stroke_index: u32, cycle: u32) -> i32 {
    let cycle = cycle.max(1);
    let magnitude = playing_handicap.unsigned_abs();
    let base = magnitude / cycle;
    let remainder = magnitude % cycle;
    let extra = if playing_handicap >= 0 {
        u32::from(stroke_index <= remainder)
    } else {
        u32::from(stroke_index > cycle - remainder)
    };
    let strokes = i32::try_from(base + extra).unwrap_or(i32::MAX);
    if playing_handicap >= 0 { strokes } else { -strokes }
}

/// A course's holes in play order with a validated stroke-index permutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoleTable {
    holes: Vec<Hole>,
}

impl HoleTable {
    /// # Errors
    /// `InvalidStrokeIndexTable` when hole numbers repeat or the stroke indices are not a
    /// permutation of `1..=N`.
    pub fn new(holes: &[Hole]) -> Result<Self> {
        let mut sorted = holes.to_vec();
        sorted.sort_by_key(|h| h.hole_number);

        let n = sorted.len() as u32;
        let numbers: BTreeSet<u32> = sorted.iter().map(|h| h.hole_number).collect();
        if numbers.len() != sorted.len() {
            return Err(ScoringError::InvalidStrokeIndexTable(
                "duplicate hole numbers".to_string(),
            ));
        }
        let indices: BTreeSet<u32> = sorted.iter().map(|h| h.stroke_index).collect();
        let expected: BTreeSet<u32> = (1..=n).collect();
        if indices != expected {
            let found: Vec<u32> = sorted.iter().map(|h| h.stroke_index).collect();
            return Err(ScoringError::InvalidStrokeIndexTable(format!(
                "stroke indices {found:?} are not a permutation of 1..={n}"
            )));
        }
        Ok(Self { holes: sorted })
    }

    #[must_use]
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.holes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }

    #[must_use]
    pub fn total_par(&self) -> i32 {
        self.holes.iter().map(|h| h.par).sum()
    }

    #[must_use]
    pub fn strokes_received(&self, playing_handicap: i32, hole: &Hole) -> i32 {
        strokes_on_hole_for(playing_handicap, hole.stroke_index, self.holes.len() as u32)
    }
}
