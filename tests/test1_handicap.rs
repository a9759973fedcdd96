mod common;

use rust_decimal_macros::dec;
use rusty_golf_comps::ScoringError;
use rusty_golf_comps::handicap::{
    HoleTable, playing_handicap, resolve_effective_handicap, strokes_on_hole, strokes_on_hole_for,
};
use rusty_golf_comps::model::{Hole, ScoreEntry, Scorecard};
use rusty_golf_comps::score::aggregate_participant;

use crate::common::{par_four_holes, player};

#[test]
fn test1_playing_handicap_rounds_half_away_from_zero() {
    assert_eq!(playing_handicap(dec!(18.5)), 19);
    assert_eq!(playing_handicap(dec!(-2.5)), -3);
    assert_eq!(playing_handicap(dec!(18.4)), 18);
    assert_eq!(playing_handicap(dec!(0.5)), 1);
    assert_eq!(playing_handicap(dec!(-0.4)), 0);
}

#[test]
fn test1_strokes_on_hole_allocation() {
    // 20 strokes: two on the two hardest holes, one everywhere else
    assert_eq!(strokes_on_hole(20, 1), 2);
    assert_eq!(strokes_on_hole(20, 2), 2);
    assert_eq!(strokes_on_hole(20, 3), 1);
    assert_eq!(strokes_on_hole(20, 18), 1);

    assert_eq!(strokes_on_hole(0, 1), 0);
    assert_eq!(strokes_on_hole(5, 5), 1);
    assert_eq!(strokes_on_hole(5, 6), 0);
}

#[test]
fn test1_plus_handicap_gives_strokes_back_on_easiest_holes() {
    assert_eq!(strokes_on_hole(-2, 18), -1);
    assert_eq!(strokes_on_hole(-2, 17), -1);
    assert_eq!(strokes_on_hole(-2, 16), 0);
    assert_eq!(strokes_on_hole(-2, 1), 0);
    let total: i32 = (1..=18).map(|si| strokes_on_hole(-20, si)).sum();
    assert_eq!(total, -20);
}

#[test]
fn test1_override_cascade() -> Result<(), Box<dyn std::error::Error>> {
    let mut p = player("a", dec!(12.4));
    assert_eq!(resolve_effective_handicap(&p)?, dec!(12.4));

    p.tournament_handicap_override = Some(dec!(10));
    assert_eq!(resolve_effective_handicap(&p)?, dec!(10));

    p.handicap_override = Some(dec!(8.6));
    assert_eq!(resolve_effective_handicap(&p)?, dec!(8.6));
    Ok(())
}

#[test]
fn test1_missing_handicap_is_an_error_not_scratch() {
    let mut p = player("nohcp", dec!(0));
    p.handicap_snapshot = None;
    assert_eq!(
        resolve_effective_handicap(&p),
        Err(ScoringError::MissingHandicap {
            participant_id: "nohcp".to_string()
        })
    );
}

#[test]
fn test1_hole_table_rejects_bad_stroke_indices() {
    let mut holes = par_four_holes(9);
    holes[3].stroke_index = 1;
    assert!(matches!(
        HoleTable::new(&holes),
        Err(ScoringError::InvalidStrokeIndexTable(_))
    ));

    let mut holes = par_four_holes(9);
    holes[8].stroke_index = 10;
    assert!(matches!(
        HoleTable::new(&holes),
        Err(ScoringError::InvalidStrokeIndexTable(_))
    ));

    let mut holes = par_four_holes(3);
    holes.push(Hole {
        hole_number: 3,
        par: 4,
        stroke_index: 4,
        yardage: None,
    });
    assert!(matches!(
        HoleTable::new(&holes),
        Err(ScoringError::InvalidStrokeIndexTable(_))
    ));
}

#[test]
fn test1_hole_table_sorts_and_allocates_over_its_own_length()
-> Result<(), Box<dyn std::error::Error>> {
    let mut holes = par_four_holes(9);
    holes.reverse();
    let table = HoleTable::new(&holes)?;
    let numbers: Vec<u32> = table.holes().iter().map(|h| h.hole_number).collect();
    assert_eq!(numbers, (1..=9).collect::<Vec<_>>());
    assert_eq!(table.total_par(), 36);

    // 10 strokes over nine holes: two on stroke index 1, one on the rest
    let received: Vec<i32> = table
        .holes()
        .iter()
        .map(|h| table.strokes_received(10, h))
        .collect();
    assert_eq!(received, vec![2, 1, 1, 1, 1, 1, 1, 1, 1]);
    Ok(())
}

#[test]
fn test1_extreme_plus_handicap_saturates() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(playing_handicap(dec!(-3000000000)), i32::MIN);

    // 2^31 over 18 holes: 119304647 each, the two easiest holes give one more back
    assert_eq!(strokes_on_hole_for(i32::MIN, 1, 18), -119_304_647);
    assert_eq!(strokes_on_hole_for(i32::MIN, 18, 18), -119_304_648);
    assert_eq!(strokes_on_hole_for(i32::MIN, 1, 1), -i32::MAX);
    assert_eq!(strokes_on_hole_for(i32::MAX, 1, 1), i32::MAX);

    let table = HoleTable::new(&par_four_holes(1))?;
    let p = player("plus", dec!(-3000000000));
    let mut card = Scorecard::default();
    card.record(
        "plus",
        1,
        ScoreEntry {
            strokes: 4,
            recorded_by_role: Default::default(),
        },
    );
    let totals = aggregate_participant(&p, &table, &card)?;
    assert_eq!(totals.playing_handicap, i32::MIN);
    assert_eq!(totals.net_strokes, i32::MAX);
    assert_eq!(totals.stableford_points, 0);
    Ok(())
}
