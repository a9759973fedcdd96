//! Property checks for handicap allocation, stableford scoring and ranking.
mod common;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rusty_golf_comps::build_round_results;
use rusty_golf_comps::formats::CompetitionResult;
use rusty_golf_comps::handicap::strokes_on_hole_for;
use rusty_golf_comps::model::{ParticipantScope, Round};
use rusty_golf_comps::score::aggregate::stableford_points;
use rusty_golf_comps::score::sort_utils::competition_ranks;
use serde_json::json;

use crate::common::{RoundBuilder, player, resolve, round_result};

// four players, 18 holes each, 0 meaning not yet scored
fn cards_strategy() -> impl Strategy<Value = Vec<Vec<i32>>> {
    prop::collection::vec(prop::collection::vec(0i32..=8, 18), 4)
}

fn four_ball_round(cards: &[Vec<i32>], handicaps: &[i64]) -> Round {
    let ids = ["p1", "p2", "p3", "p4"];
    let mut builder = RoundBuilder::new("r1");
    for (id, &hcp) in ids.iter().zip(handicaps) {
        builder = builder.participant(player(id, Decimal::from(hcp)));
    }
    for (id, strokes) in ids.iter().zip(cards) {
        builder = builder.scores(id, strokes);
    }
    builder
        .team("t1", "One", &["p1", "p2"])
        .team("t2", "Two", &["p3", "p4"])
        .competition("sf", "stableford", json!(null), ParticipantScope::Round)
        .competition("six", "six_point", json!(null), ParticipantScope::Round)
        .competition("hl", "hi_lo", json!(null), ParticipantScope::Round)
        .build()
}

proptest! {
    #[test]
    fn allocation_hands_out_the_whole_handicap(hcp in -18i32..=54, nine in any::<bool>()) {
        let cycle = if nine { 9 } else { 18 };
        let total: i32 = (1..=cycle).map(|si| strokes_on_hole_for(hcp, si, cycle)).sum();
        prop_assert_eq!(total, hcp);
    }

    #[test]
    fn harder_holes_never_get_fewer_strokes(hcp in -18i32..=54, si in 1u32..18) {
        prop_assert!(strokes_on_hole_for(hcp, si, 18) >= strokes_on_hole_for(hcp, si + 1, 18));
    }

    #[test]
    fn stableford_is_monotone(gross in 1i32..=12, par in 3i32..=5, received in -2i32..=4) {
        let points = stableford_points(gross, par, received);
        prop_assert!(points >= 0);
        prop_assert!(points >= stableford_points(gross + 1, par, received));
        prop_assert!(stableford_points(gross, par, received + 1) >= points);
    }

    #[test]
    fn ties_share_a_rank_and_skip_the_next(mut scores in prop::collection::vec(0i32..6, 1..12)) {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        let ranks = competition_ranks(&scores, |a, b| a == b);
        prop_assert_eq!(ranks[0], 1);
        for i in 1..scores.len() {
            if scores[i] == scores[i - 1] {
                prop_assert_eq!(ranks[i], ranks[i - 1]);
            } else {
                prop_assert_eq!(ranks[i], i as u32 + 1);
            }
        }
    }

    #[test]
    fn round_results_are_deterministic(
        cards in cards_strategy(),
        handicaps in prop::collection::vec(-2i64..=30, 4),
    ) {
        let round = four_ball_round(&cards, &handicaps);
        let first = build_round_results(&round);
        let second = build_round_results(&round);
        prop_assert!(first.as_ref().is_ok_and(|r| r.failed_competitions.is_empty()));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn six_point_hands_out_six_per_hole(cards in cards_strategy()) {
        let round = four_ball_round(&cards, &[0, 5, 10, 20]);
        let outcome = resolve(&round, "six").map(round_result);
        let Ok(CompetitionResult::SixPoint(result)) = outcome else {
            return Err(TestCaseError::fail("six point did not resolve"));
        };
        let total: f64 = result.leaderboard.iter().map(|e| e.points).sum();
        prop_assert!((total - 6.0 * f64::from(result.holes_played)).abs() < 1e-9);
    }
}
