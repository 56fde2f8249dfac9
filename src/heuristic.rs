//! Lower bound on the energy still needed to sort a burrow.
//!
//! Every amphipod that still has to move is charged the cost of walking
//! straight home as if nothing stood in its way. Real moves can only be
//! longer, so the estimate never exceeds the true remaining cost.

use crate::burrow::{Burrow, StepCosts, DOORWAYS};

/// Admissible estimate of the remaining energy from `burrow` to the sorted
/// state. Zero for the sorted state itself.
pub fn estimate_remaining_cost(burrow: &Burrow, costs: &StepCosts) -> u64 {
    let mut total = 0;

    for (position, slot) in burrow.hallway().iter().enumerate() {
        if let Some(amphipod) = *slot {
            let steps = position.abs_diff(amphipod.target_doorway()) + 1;
            total += steps as u64 * costs.get(amphipod);
        }
    }

    for (room_index, room) in burrow.rooms().iter().enumerate() {
        let slots = room.slots();
        for (depth, slot) in slots.iter().enumerate() {
            let Some(amphipod) = *slot else {
                continue;
            };
            let misplaced = amphipod.target_room() != room_index;
            // Something of another type further down has to get out first
            let blocking = slots[depth..]
                .iter()
                .flatten()
                .any(|&below| below != amphipod);
            if misplaced || blocking {
                let across = DOORWAYS[room_index].abs_diff(amphipod.target_doorway());
                let steps = depth + 1 + across + 1;
                total += steps as u64 * costs.get(amphipod);
            }
        }
    }

    total
}
