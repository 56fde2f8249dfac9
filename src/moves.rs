//! Legal move generation.
//!
//! Amphipods move in two kinds of steps: out of a room to a hallway stop, or
//! from the hallway straight into their own room. Both are generated here as
//! new [`Burrow`] values together with the energy they cost.

use crate::burrow::{Burrow, StepCosts, DOORWAYS, HALLWAY_STOPS};

/// What a move did, kept for inspection and replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Top occupant of `room` (at `depth`) walked out to hallway cell `stop`
    RoomToHallway {
        room: usize,
        depth: usize,
        stop: usize,
    },
    /// Hallway occupant at `position` walked into slot `depth` of `room`
    HallwayToRoom {
        position: usize,
        room: usize,
        depth: usize,
    },
}

/// A successor state and the energy spent reaching it
#[derive(Debug, Clone)]
pub struct Move {
    pub next: Burrow,
    pub cost: u64,
    pub kind: MoveKind,
}

/// All legal moves from `burrow`: room exits first, then hallway entries
pub fn successors(burrow: &Burrow, costs: &StepCosts) -> Vec<Move> {
    let mut moves = room_exits(burrow, costs);
    moves.extend(hallway_entries(burrow, costs));
    moves
}

/// Moves taking the top occupant of an unsettled room out to a hallway stop
pub fn room_exits(burrow: &Burrow, costs: &StepCosts) -> Vec<Move> {
    let mut moves = Vec::new();

    for (room_index, room) in burrow.rooms().iter().enumerate() {
        if room.is_settled(room_index) {
            continue;
        }
        // An unsettled room always has an occupant
        let Some((depth, amphipod)) = room.top_occupant() else {
            continue;
        };
        let doorway = DOORWAYS[room_index];

        for stop in HALLWAY_STOPS {
            if !burrow.hallway_clear(doorway, stop) {
                continue;
            }
            let steps = depth + 1 + doorway.abs_diff(stop);
            moves.push(Move {
                next: burrow.with_exit(room_index, depth, stop),
                cost: steps as u64 * costs.get(amphipod),
                kind: MoveKind::RoomToHallway {
                    room: room_index,
                    depth,
                    stop,
                },
            });
        }
    }

    moves
}

/// Moves taking hallway occupants home, at most one per occupant
pub fn hallway_entries(burrow: &Burrow, costs: &StepCosts) -> Vec<Move> {
    let mut moves = Vec::new();

    for (position, slot) in burrow.hallway().iter().enumerate() {
        let Some(amphipod) = *slot else {
            continue;
        };
        let room_index = amphipod.target_room();
        let doorway = DOORWAYS[room_index];
        if !burrow.hallway_clear(position, doorway) {
            continue;
        }

        let room = burrow.room(room_index);
        if !room.accepts(amphipod) {
            continue;
        }
        let Some(depth) = room.deepest_empty() else {
            continue;
        };

        let steps = position.abs_diff(doorway) + depth + 1;
        moves.push(Move {
            next: burrow.with_entry(position, room_index, depth),
            cost: steps as u64 * costs.get(amphipod),
            kind: MoveKind::HallwayToRoom {
                position,
                room: room_index,
                depth,
            },
        });
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::burrow::Amphipod::*;
    use crate::burrow::{Room, HALLWAY_LEN};
    use crate::diagram::parse_diagram;

    const EXAMPLE: &str = "\
#############
#...........#
###B#C#B#D###
  #A#D#C#A#
  #########";

    #[test]
    fn test_initial_moves_are_all_exits() {
        let burrow = parse_diagram(EXAMPLE).unwrap();
        let moves = successors(&burrow, &StepCosts::default());

        // Empty hallway: every room can reach every stop
        assert_eq!(moves.len(), 4 * HALLWAY_STOPS.len());
        assert!(moves
            .iter()
            .all(|m| matches!(m.kind, MoveKind::RoomToHallway { depth: 0, .. })));
        assert!(hallway_entries(&burrow, &StepCosts::default()).is_empty());
    }

    #[test]
    fn test_exit_cost() {
        let burrow = parse_diagram(EXAMPLE).unwrap();
        let moves = room_exits(&burrow, &StepCosts::default());

        // Bronze from room 2 (doorway 6) to stop 3: 1 up + 3 across
        let m = moves
            .iter()
            .find(|m| m.kind == MoveKind::RoomToHallway { room: 2, depth: 0, stop: 3 })
            .unwrap();
        assert_eq!(m.cost, 40);
        assert_eq!(m.next.hallway()[3], Some(Bronze));
        assert_eq!(m.next.room(2).slots(), &[None, Some(Copper)]);
    }

    #[test]
    fn test_exits_blocked_by_hallway_occupant() {
        let burrow = parse_diagram(EXAMPLE).unwrap().with_exit(2, 0, 5);
        let moves = room_exits(&burrow, &StepCosts::default());

        // Room 3 (doorway 8) can no longer pass cell 5
        let stops: Vec<usize> = moves
            .iter()
            .filter_map(|m| match m.kind {
                MoveKind::RoomToHallway { room: 3, stop, .. } => Some(stop),
                _ => None,
            })
            .collect();
        assert_eq!(stops, vec![7, 9, 10]);

        // Nobody may stop on the occupied cell itself
        assert!(moves
            .iter()
            .all(|m| !matches!(m.kind, MoveKind::RoomToHallway { stop: 5, .. })));
    }

    #[test]
    fn test_settled_rooms_produce_no_exits() {
        let burrow = Burrow::new(
            [None; HALLWAY_LEN],
            [
                Room::new([None, Some(Amber)]),
                Room::new([Some(Bronze), Some(Bronze)]),
                Room::new([Some(Amber), Some(Copper)]),
                Room::new([Some(Desert), Some(Desert)]),
            ],
        );
        let moves = room_exits(&burrow, &StepCosts::default());
        assert!(moves
            .iter()
            .all(|m| matches!(m.kind, MoveKind::RoomToHallway { room: 2, .. })));
        assert!(!moves.is_empty());
    }

    #[test]
    fn test_entry_into_deepest_slot() {
        let mut hallway = [None; HALLWAY_LEN];
        hallway[10] = Some(Desert);
        let burrow = Burrow::new(
            hallway,
            [
                Room::filled(Amber, 2),
                Room::filled(Bronze, 2),
                Room::filled(Copper, 2),
                Room::new([None, Some(Desert)]),
            ],
        );
        let moves = hallway_entries(&burrow, &StepCosts::default());
        assert_eq!(moves.len(), 1);
        assert_eq!(
            moves[0].kind,
            MoveKind::HallwayToRoom { position: 10, room: 3, depth: 0 }
        );
        // 2 across + 1 down
        assert_eq!(moves[0].cost, 3000);
        assert!(moves[0].next.is_target());
    }

    #[test]
    fn test_entry_refused_by_foreign_occupant() {
        let mut hallway = [None; HALLWAY_LEN];
        hallway[0] = Some(Amber);
        let burrow = Burrow::new(
            hallway,
            [
                Room::new([None, Some(Bronze)]),
                Room::new([None, Some(Amber)]),
                Room::filled(Copper, 2),
                Room::filled(Desert, 2),
            ],
        );
        assert!(hallway_entries(&burrow, &StepCosts::default()).is_empty());
    }

    #[test]
    fn test_entry_blocked_on_path() {
        let mut hallway = [None; HALLWAY_LEN];
        hallway[0] = Some(Bronze);
        hallway[1] = Some(Amber);
        let burrow = Burrow::new(
            hallway,
            [
                Room::new([None, Some(Amber)]),
                Room::new([None, Some(Bronze)]),
                Room::filled(Copper, 2),
                Room::filled(Desert, 2),
            ],
        );
        let moves = hallway_entries(&burrow, &StepCosts::default());
        // Only the Amber at 1 is free; the Bronze at 0 is stuck behind it
        assert_eq!(moves.len(), 1);
        assert_eq!(
            moves[0].kind,
            MoveKind::HallwayToRoom { position: 1, room: 0, depth: 0 }
        );
        assert_eq!(moves[0].cost, 2);
    }

    #[test]
    fn test_custom_costs() {
        let burrow = parse_diagram(EXAMPLE).unwrap();
        let moves = room_exits(&burrow, &StepCosts::uniform(7));
        let m = moves
            .iter()
            .find(|m| m.kind == MoveKind::RoomToHallway { room: 0, depth: 0, stop: 0 })
            .unwrap();
        assert_eq!(m.cost, 3 * 7);
    }

    #[test]
    fn test_moves_conserve_tokens() {
        let burrow = parse_diagram(EXAMPLE).unwrap();
        let mut frontier = vec![burrow];
        for _ in 0..3 {
            let mut next = Vec::new();
            for state in &frontier {
                for m in successors(state, &StepCosts::default()) {
                    assert_eq!(m.next.token_counts(), [2, 2, 2, 2]);
                    next.push(m.next);
                }
            }
            frontier = next;
        }
        assert!(!frontier.is_empty());
    }
}
