//! Property tests for the engine's core invariants.

use proptest::prelude::*;

use mancala_engine::{sow, Action, Board, Side, WireState, PIT_COUNT, TOTAL_SEEDS};

/// Scatter all 48 seeds over the 14 slots (12 pits + 2 stores) by
/// assigning each seed a slot index. Every generated board satisfies
/// the seed invariant by construction.
fn arb_board() -> impl Strategy<Value = Board> {
    prop::collection::vec(0usize..2 * PIT_COUNT + 2, TOTAL_SEEDS as usize).prop_map(|slots| {
        let mut player_pits = [0u8; PIT_COUNT];
        let mut opponent_pits = [0u8; PIT_COUNT];
        let mut player_score = 0u8;
        let mut opponent_score = 0u8;

        for slot in slots {
            match slot {
                s if s < PIT_COUNT => player_pits[s] += 1,
                s if s < 2 * PIT_COUNT => opponent_pits[s - PIT_COUNT] += 1,
                s if s == 2 * PIT_COUNT => player_score += 1,
                _ => opponent_score += 1,
            }
        }

        Board::from_parts(player_pits, player_score, opponent_pits, opponent_score)
    })
}

fn arb_side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Player), Just(Side::Opponent)]
}

proptest! {
    /// Sowing any legal action preserves the 48-seed total.
    #[test]
    fn sow_preserves_seed_total(board in arb_board(), side in arb_side()) {
        for action in board.allowed_moves(side) {
            let result = sow(&board, side, action).unwrap();
            prop_assert_eq!(result.board.total_seeds(), TOTAL_SEEDS);
        }
    }

    /// Sowing is a pure function of its inputs.
    #[test]
    fn sow_is_deterministic(board in arb_board(), side in arb_side()) {
        for action in board.allowed_moves(side) {
            let first = sow(&board, side, action).unwrap();
            let second = sow(&board, side, action).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    /// A capture always pays the landing pit plus its mirror into the
    /// mover's score.
    #[test]
    fn captures_zero_both_pits(board in arb_board(), side in arb_side()) {
        for action in board.allowed_moves(side) {
            let result = sow(&board, side, action).unwrap();
            if let Some(capture) = result.capture {
                prop_assert_eq!(capture.mirror, PIT_COUNT - 1 - capture.pit);
                prop_assert_eq!(result.board.pits(side)[capture.pit], 0);
                prop_assert_eq!(
                    result.board.pits(side.opposite())[capture.mirror],
                    0
                );
                prop_assert!(result.board.score(side) >= capture.seeds);
            }
        }
    }

    /// The opponent's store is never touched by the mover.
    #[test]
    fn opponent_store_is_never_sown(board in arb_board(), side in arb_side()) {
        for action in board.allowed_moves(side) {
            let result = sow(&board, side, action).unwrap();
            // Captures pay into the mover's score only; the other
            // store can never grow from this side's sowing.
            prop_assert_eq!(
                result.board.score(side.opposite()),
                board.score(side.opposite())
            );
        }
    }

    /// An empty source pit is always rejected and mutates nothing.
    #[test]
    fn empty_pits_are_rejected(board in arb_board(), side in arb_side()) {
        for action in Action::ALL {
            if board.pits(side)[action.index()] == 0 {
                prop_assert!(sow(&board, side, action).is_err());
            }
        }
    }

    /// allowed_moves is exactly the set of nonzero pits, ascending.
    #[test]
    fn allowed_moves_match_nonzero_pits(board in arb_board(), side in arb_side()) {
        let moves = board.allowed_moves(side);

        let expected: Vec<usize> = (0..PIT_COUNT)
            .filter(|&i| board.pits(side)[i] > 0)
            .collect();
        let actual: Vec<usize> = moves.iter().map(|a| a.index()).collect();

        prop_assert_eq!(actual, expected);
        prop_assert_eq!(moves.is_empty(), board.side_sum(side) == 0);
    }

    /// decode(encode(position)) is the identity on valid positions.
    #[test]
    fn wire_round_trip(board in arb_board(), other_to_start in any::<bool>()) {
        let to_act = if other_to_start { Side::Opponent } else { Side::Player };
        let position = mancala_engine::GamePosition::new(board, to_act);

        let wire = WireState::encode(&position);
        prop_assert_eq!(wire.decode().unwrap(), position);
    }

    /// Payloads whose seed total is off by any amount never decode.
    #[test]
    fn wire_rejects_wrong_totals(
        board in arb_board(),
        extra in 1u8..=20,
        surplus in any::<bool>(),
    ) {
        let mut wire = WireState::encode(&mancala_engine::GamePosition::new(board, Side::Player));
        if surplus {
            wire.side_score = wire.side_score.saturating_add(extra);
        } else {
            // Drain seeds from wherever they are until the deficit is
            // reached.
            let mut to_remove = extra;
            for pit in wire.side_pits.iter_mut().chain(wire.other_side_pits.iter_mut()) {
                let take = (*pit).min(to_remove);
                *pit -= take;
                to_remove -= take;
            }
            wire.other_side_score -= to_remove.min(wire.other_side_score);
            prop_assume!(wire.total_seeds() != TOTAL_SEEDS);
        }

        prop_assert!(wire.decode().is_err());
    }
}
