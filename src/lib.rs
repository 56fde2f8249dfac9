//! Minimum-energy solver for sorting amphipods into their side rooms.
//!
//! A burrow diagram is parsed into a [`Burrow`], and an A* search over
//! burrow states finds the cheapest sequence of legal moves that leaves
//! every amphipod in its own room.

pub mod burrow;
pub mod diagram;
pub mod heuristic;
pub mod moves;
pub mod solver;

// Re-export main types
pub use burrow::{Amphipod, Burrow, Room, Slot, StepCosts, DOORWAYS, HALLWAY_LEN, HALLWAY_STOPS};
pub use diagram::{parse_diagram, ParseError};
pub use heuristic::estimate_remaining_cost;
pub use moves::{hallway_entries, room_exits, successors, Move, MoveKind};
pub use solver::{
    find_minimum_cost, minimum_cost, AbortReason, SearchOutcome, SolverConfig, SolverResult,
    TieBreak,
};
