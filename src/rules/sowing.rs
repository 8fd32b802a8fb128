//! The sowing engine: applying one action to a board.
//!
//! Sowing walks a 13-slot ring from the acting side's perspective:
//! slots 0-5 are its own pits, slot 6 its own score store, slots 7-12
//! the opponent's pits. The opponent's store is never a ring member.
//! Starting just after the source pit, one seed drops into each
//! successive slot until the lifted seeds run out.
//!
//! Only the final seed decides the extras:
//! - landing in the own store grants another turn
//! - landing in an own pit that was empty captures that pit and its
//!   mirror on the opposite side into the mover's score
//!
//! [`sow`] is a pure function: it never touches the input board and
//! identical inputs always produce identical outputs.

use crate::core::{Action, Board, EngineError, Side, PIT_COUNT};

/// Slots visited while sowing, excluding the opponent's store.
pub const RING_SIZE: usize = 2 * PIT_COUNT + 1;

/// One slot of the sowing ring, relative to the acting side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RingSlot {
    /// One of the acting side's own pits.
    Own(usize),
    /// The acting side's score store.
    Store,
    /// One of the opponent's pits.
    Theirs(usize),
}

/// The ring slot at `offset` steps from the acting side's first pit.
fn ring_slot(offset: usize) -> RingSlot {
    match offset % RING_SIZE {
        i if i < PIT_COUNT => RingSlot::Own(i),
        i if i == PIT_COUNT => RingSlot::Store,
        i => RingSlot::Theirs(i - PIT_COUNT - 1),
    }
}

/// A capture applied during sowing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capture {
    /// The mover's own pit the final seed landed in.
    pub pit: usize,
    /// The mirrored pit on the opponent's side (`5 - pit`).
    pub mirror: usize,
    /// Seeds moved into the mover's score (both pits' contents).
    pub seeds: u8,
}

/// Outcome of applying one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SowResult {
    /// The board after sowing (and any capture).
    pub board: Board,
    /// Whether the mover earned an extra turn.
    pub plays_again: bool,
    /// The capture, if the final seed triggered one.
    pub capture: Option<Capture>,
}

/// Sow the seeds from `side`'s pit named by `action`.
///
/// Returns `InvalidAction` if the source pit is empty; callers are
/// expected to have run a legality check first.
pub fn sow(board: &Board, side: Side, action: Action) -> Result<SowResult, EngineError> {
    let mut own = *board.pits(side);
    let mut theirs = *board.pits(side.opposite());
    let mut own_score = board.score(side);
    let other_score = board.score(side.opposite());

    let gems = own[action.index()];
    if gems == 0 {
        return Err(EngineError::InvalidAction {
            action: action.index(),
        });
    }
    own[action.index()] = 0;

    // gems >= 1, so `last` is always overwritten.
    let mut last = RingSlot::Store;
    for step in 1..=usize::from(gems) {
        let slot = ring_slot(action.index() + step);
        match slot {
            RingSlot::Own(i) => own[i] += 1,
            RingSlot::Store => own_score += 1,
            RingSlot::Theirs(i) => theirs[i] += 1,
        }
        last = slot;
    }

    let plays_again = last == RingSlot::Store;

    let mut capture = None;
    if let RingSlot::Own(pit) = last {
        // Count of exactly 1 means the pit was empty before this seed.
        if own[pit] == 1 {
            let mirror = PIT_COUNT - 1 - pit;
            let seeds = own[pit] + theirs[mirror];
            own[pit] = 0;
            theirs[mirror] = 0;
            own_score += seeds;
            capture = Some(Capture { pit, mirror, seeds });
        }
    }

    Ok(SowResult {
        board: Board::from_side_parts(side, own, own_score, theirs, other_score),
        plays_again,
        capture,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TOTAL_SEEDS;

    fn action(i: usize) -> Action {
        Action::new(i).unwrap()
    }

    #[test]
    fn test_ring_skips_opponent_store() {
        // Walking a full lap visits 6 own pits, the own store, and
        // 6 opponent pits - 13 slots, no opponent store.
        let slots: Vec<_> = (0..RING_SIZE).map(ring_slot).collect();

        assert_eq!(slots[0], RingSlot::Own(0));
        assert_eq!(slots[5], RingSlot::Own(5));
        assert_eq!(slots[6], RingSlot::Store);
        assert_eq!(slots[7], RingSlot::Theirs(0));
        assert_eq!(slots[12], RingSlot::Theirs(5));
        // Wraps back to the first own pit.
        assert_eq!(ring_slot(RING_SIZE), RingSlot::Own(0));
    }

    #[test]
    fn test_extra_turn_on_store_landing() {
        // From the opening position, sowing pit 2 drops seeds into
        // pits 3, 4, 5 and the store: extra turn.
        let board = Board::new();
        let result = sow(&board, Side::Player, action(2)).unwrap();

        assert!(result.plays_again);
        assert!(result.capture.is_none());
        assert_eq!(result.board.pits(Side::Player), &[4, 4, 0, 5, 5, 5]);
        assert_eq!(result.board.score(Side::Player), 1);
        assert_eq!(result.board.pits(Side::Opponent), &[4, 4, 4, 4, 4, 4]);
        assert_eq!(result.board.score(Side::Opponent), 0);
        assert_eq!(result.board.total_seeds(), TOTAL_SEEDS);
    }

    #[test]
    fn test_no_extra_turn_past_store() {
        // Pit 3 holds 4 seeds: they land in pits 4, 5, the store, and
        // the opponent's first pit. No extra turn.
        let board = Board::new();
        let result = sow(&board, Side::Player, action(3)).unwrap();

        assert!(!result.plays_again);
        assert_eq!(result.board.pits(Side::Player), &[4, 4, 4, 0, 5, 5]);
        assert_eq!(result.board.score(Side::Player), 1);
        assert_eq!(result.board.pits(Side::Opponent), &[5, 4, 4, 4, 4, 4]);
    }

    #[test]
    fn test_capture_on_empty_own_pit() {
        let board = Board::from_parts([2, 1, 0, 4, 4, 4], 5, [4, 4, 4, 4, 4, 4], 4);
        assert_eq!(board.total_seeds(), TOTAL_SEEDS);

        // Two seeds from pit 0 land in pits 1 and 2; pit 2 was empty,
        // so it and mirror pit 3 are captured.
        let result = sow(&board, Side::Player, action(0)).unwrap();

        let capture = result.capture.unwrap();
        assert_eq!(capture.pit, 2);
        assert_eq!(capture.mirror, 3);
        assert_eq!(capture.seeds, 5);

        assert_eq!(result.board.pits(Side::Player), &[0, 2, 0, 4, 4, 4]);
        assert_eq!(result.board.pits(Side::Opponent), &[4, 4, 4, 0, 4, 4]);
        assert_eq!(result.board.score(Side::Player), 10);
        assert_eq!(result.board.total_seeds(), TOTAL_SEEDS);
        assert!(!result.plays_again);
    }

    #[test]
    fn test_capture_with_empty_mirror() {
        // The capture still fires when the mirror pit holds nothing;
        // only the single landing seed moves to the score.
        let board = Board::from_parts([2, 1, 0, 4, 4, 4], 5, [4, 4, 4, 0, 4, 4], 8);
        assert_eq!(board.total_seeds(), TOTAL_SEEDS);

        let result = sow(&board, Side::Player, action(0)).unwrap();

        let capture = result.capture.unwrap();
        assert_eq!(capture.seeds, 1);
        assert_eq!(result.board.score(Side::Player), 6);
        assert_eq!(result.board.pits(Side::Player)[2], 0);
        assert_eq!(result.board.total_seeds(), TOTAL_SEEDS);
    }

    #[test]
    fn test_no_capture_on_occupied_own_pit() {
        // The final seed lands in own pit 1 which already held seeds.
        let board = Board::from_parts([1, 2, 4, 4, 4, 4], 5, [4, 4, 4, 4, 4, 4], 0);
        let result = sow(&board, Side::Player, action(0)).unwrap();

        assert!(result.capture.is_none());
        assert_eq!(result.board.pits(Side::Player), &[0, 3, 4, 4, 4, 4]);
    }

    #[test]
    fn test_no_capture_on_opponent_pit() {
        // Landing in an empty opponent pit never captures.
        let board = Board::from_parts([4, 4, 4, 4, 4, 3], 1, [0, 4, 4, 4, 4, 4], 4);
        assert_eq!(board.total_seeds(), TOTAL_SEEDS);

        // Three seeds from pit 5: store, then opponent pits 0 and 1.
        let result = sow(&board, Side::Player, action(5)).unwrap();

        assert!(result.capture.is_none());
        assert_eq!(result.board.pits(Side::Opponent), &[1, 5, 4, 4, 4, 4]);
        assert_eq!(result.board.score(Side::Player), 2);
    }

    #[test]
    fn test_full_lap_skips_opponent_store_and_reseeds_source() {
        // 13 seeds walk the whole ring exactly once and land back in
        // the source pit. The opponent's score must be untouched.
        let board = Board::from_parts([13, 0, 0, 0, 0, 0], 10, [0, 0, 0, 0, 0, 5], 20);
        assert_eq!(board.total_seeds(), TOTAL_SEEDS);

        let result = sow(&board, Side::Player, action(0)).unwrap();

        // Final seed lands in the emptied source pit with count 1:
        // capture of pit 0 and mirror 5.
        let capture = result.capture.unwrap();
        assert_eq!(capture.pit, 0);
        assert_eq!(capture.mirror, 5);
        assert_eq!(capture.seeds, 1 + 5 + 1);

        assert_eq!(result.board.score(Side::Opponent), 20);
        assert_eq!(result.board.total_seeds(), TOTAL_SEEDS);
    }

    #[test]
    fn test_sow_from_opponent_side() {
        // The ring is relative: the opponent sowing behaves like the
        // player sowing on a flipped board.
        let board = Board::new();
        let result = sow(&board, Side::Opponent, action(2)).unwrap();

        assert!(result.plays_again);
        assert_eq!(result.board.pits(Side::Opponent), &[4, 4, 0, 5, 5, 5]);
        assert_eq!(result.board.score(Side::Opponent), 1);
        assert_eq!(result.board.pits(Side::Player), &[4, 4, 4, 4, 4, 4]);
        assert_eq!(result.board.score(Side::Player), 0);
    }

    #[test]
    fn test_empty_pit_rejected() {
        let board = Board::from_parts([0, 4, 4, 4, 4, 8], 0, [4, 4, 4, 4, 4, 4], 0);

        assert_eq!(
            sow(&board, Side::Player, action(0)),
            Err(EngineError::InvalidAction { action: 0 })
        );
        // The input board is untouched by construction (pure function).
        assert_eq!(board.pits(Side::Player), &[0, 4, 4, 4, 4, 8]);
    }

    #[test]
    fn test_sow_is_deterministic() {
        let board = Board::new();

        let a = sow(&board, Side::Player, action(1)).unwrap();
        let b = sow(&board, Side::Player, action(1)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_invariant_across_all_opening_moves() {
        let board = Board::new();

        for a in Action::ALL {
            let result = sow(&board, Side::Player, a).unwrap();
            assert_eq!(result.board.total_seeds(), TOTAL_SEEDS);
        }
    }
}
