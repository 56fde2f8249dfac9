//! Burrow representation: the hallway, the four side rooms, and the
//! amphipods occupying them.
//!
//! A [`Burrow`] is an immutable value. Every transformation returns a new
//! burrow, so states can be used directly as keys in the solver's best-cost
//! table.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of cells in the hallway
pub const HALLWAY_LEN: usize = 11;

/// Number of side rooms (one per amphipod type)
pub const ROOM_COUNT: usize = 4;

/// Hallway cell directly outside each room, indexed by room
pub const DOORWAYS: [usize; ROOM_COUNT] = [2, 4, 6, 8];

/// Hallway cells an amphipod may stop on (everything except the doorways)
pub const HALLWAY_STOPS: [usize; 7] = [0, 1, 3, 5, 7, 9, 10];

/// Amphipod type. Each type belongs in the room with the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Amphipod {
    Amber,
    Bronze,
    Copper,
    Desert,
}

impl Amphipod {
    pub const ALL: [Amphipod; ROOM_COUNT] = [
        Amphipod::Amber,
        Amphipod::Bronze,
        Amphipod::Copper,
        Amphipod::Desert,
    ];

    /// Parse the single-letter diagram form (`A`..`D`)
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Amphipod::Amber),
            'B' => Some(Amphipod::Bronze),
            'C' => Some(Amphipod::Copper),
            'D' => Some(Amphipod::Desert),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Amphipod::Amber => 'A',
            Amphipod::Bronze => 'B',
            Amphipod::Copper => 'C',
            Amphipod::Desert => 'D',
        }
    }

    pub fn index(self) -> usize {
        match self {
            Amphipod::Amber => 0,
            Amphipod::Bronze => 1,
            Amphipod::Copper => 2,
            Amphipod::Desert => 3,
        }
    }

    /// Index of the room this amphipod must end up in
    pub fn target_room(self) -> usize {
        self.index()
    }

    /// Hallway cell outside the target room
    pub fn target_doorway(self) -> usize {
        DOORWAYS[self.target_room()]
    }
}

/// A hallway or room cell: empty, or holding exactly one amphipod
pub type Slot = Option<Amphipod>;

fn slot_char(slot: Slot) -> char {
    slot.map_or('.', Amphipod::to_char)
}

/// Energy spent per step, by amphipod type.
///
/// Deserializes from JSON with lowercase type names; missing entries fall
/// back to the standard costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepCosts {
    pub amber: u64,
    pub bronze: u64,
    pub copper: u64,
    pub desert: u64,
}

impl StepCosts {
    /// Same cost for every type
    pub fn uniform(cost: u64) -> Self {
        Self {
            amber: cost,
            bronze: cost,
            copper: cost,
            desert: cost,
        }
    }

    pub fn get(&self, amphipod: Amphipod) -> u64 {
        match amphipod {
            Amphipod::Amber => self.amber,
            Amphipod::Bronze => self.bronze,
            Amphipod::Copper => self.copper,
            Amphipod::Desert => self.desert,
        }
    }
}

impl Default for StepCosts {
    fn default() -> Self {
        Self {
            amber: 1,
            bronze: 10,
            copper: 100,
            desert: 1000,
        }
    }
}

/// A side room. Slot 0 is next to the doorway, the last slot is the floor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Room {
    slots: SmallVec<[Slot; 4]>,
}

impl Room {
    pub fn new(slots: impl IntoIterator<Item = Slot>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
        }
    }

    pub fn empty(depth: usize) -> Self {
        Self::new(std::iter::repeat(None).take(depth))
    }

    /// A room completely filled with one type
    pub fn filled(amphipod: Amphipod, depth: usize) -> Self {
        Self::new(std::iter::repeat(Some(amphipod)).take(depth))
    }

    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The occupant nearest the doorway, with its depth.
    /// Anything below it cannot leave until it does.
    pub fn top_occupant(&self) -> Option<(usize, Amphipod)> {
        self.slots
            .iter()
            .enumerate()
            .find_map(|(depth, slot)| slot.map(|amphipod| (depth, amphipod)))
    }

    /// True if nobody in this room ever needs to leave it
    pub fn is_settled(&self, room_index: usize) -> bool {
        self.slots
            .iter()
            .flatten()
            .all(|amphipod| amphipod.target_room() == room_index)
    }

    /// True if the room holds nothing but empty slots and `amphipod`'s kind
    pub fn accepts(&self, amphipod: Amphipod) -> bool {
        self.slots.iter().flatten().all(|&other| other == amphipod)
    }

    /// Deepest empty slot; rooms fill from the floor up
    pub fn deepest_empty(&self) -> Option<usize> {
        self.slots.iter().rposition(Option::is_none)
    }

    fn with_slot(&self, depth: usize, slot: Slot) -> Self {
        let mut room = self.clone();
        room.slots[depth] = slot;
        room
    }
}

/// Full burrow state
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Burrow {
    hallway: [Slot; HALLWAY_LEN],
    rooms: [Room; ROOM_COUNT],
}

impl Burrow {
    /// Build a burrow from its hallway and rooms.
    ///
    /// Panics if the rooms are empty or do not all share one depth.
    pub fn new(hallway: [Slot; HALLWAY_LEN], rooms: [Room; ROOM_COUNT]) -> Self {
        let depth = rooms[0].depth();
        assert!(depth >= 1, "rooms must have at least one slot");
        assert!(
            rooms.iter().all(|room| room.depth() == depth),
            "all rooms must have the same depth"
        );
        Self { hallway, rooms }
    }

    /// The sorted burrow: empty hallway, every room full of its own type
    pub fn target(depth: usize) -> Self {
        Self::new(
            [None; HALLWAY_LEN],
            Amphipod::ALL.map(|amphipod| Room::filled(amphipod, depth)),
        )
    }

    pub fn hallway(&self) -> &[Slot; HALLWAY_LEN] {
        &self.hallway
    }

    pub fn rooms(&self) -> &[Room; ROOM_COUNT] {
        &self.rooms
    }

    pub fn room(&self, index: usize) -> &Room {
        &self.rooms[index]
    }

    pub fn depth(&self) -> usize {
        self.rooms[0].depth()
    }

    pub fn is_target(&self) -> bool {
        self.hallway.iter().all(Option::is_none)
            && self
                .rooms
                .iter()
                .zip(Amphipod::ALL)
                .all(|(room, amphipod)| room.slots().iter().all(|&slot| slot == Some(amphipod)))
    }

    /// Number of amphipods of each type, indexed by [`Amphipod::index`]
    pub fn token_counts(&self) -> [usize; ROOM_COUNT] {
        let mut counts = [0; ROOM_COUNT];
        let rooms = self.rooms.iter().flat_map(|room| room.slots().iter());
        for amphipod in self.hallway.iter().chain(rooms).flatten() {
            counts[amphipod.index()] += 1;
        }
        counts
    }

    /// True if each type appears exactly `depth` times, i.e. the burrow can
    /// in principle be sorted
    pub fn is_conserving(&self) -> bool {
        let depth = self.depth();
        self.token_counts().iter().all(|&count| count == depth)
    }

    /// True if every hallway cell after `from` up to and including `to` is
    /// empty. `from` itself is the mover's own cell and is not checked.
    pub fn hallway_clear(&self, from: usize, to: usize) -> bool {
        let cells = if from < to {
            &self.hallway[from + 1..=to]
        } else {
            &self.hallway[to..from]
        };
        cells.iter().all(Option::is_none)
    }

    /// Move the occupant at `depth` of `room` out to hallway cell `stop`
    pub fn with_exit(&self, room: usize, depth: usize, stop: usize) -> Self {
        let mut next = self.clone();
        next.hallway[stop] = self.rooms[room].slots[depth];
        next.rooms[room] = self.rooms[room].with_slot(depth, None);
        next
    }

    /// Move the hallway occupant at `position` into slot `depth` of `room`
    pub fn with_entry(&self, position: usize, room: usize, depth: usize) -> Self {
        let mut next = self.clone();
        next.hallway[position] = None;
        next.rooms[room] = self.rooms[room].with_slot(depth, self.hallway[position]);
        next
    }
}

impl fmt::Display for Burrow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", "#".repeat(HALLWAY_LEN + 2))?;
        let hallway: String = self.hallway.iter().map(|&slot| slot_char(slot)).collect();
        writeln!(f, "#{}#", hallway)?;
        for depth in 0..self.depth() {
            let cells: Vec<String> = self
                .rooms
                .iter()
                .map(|room| slot_char(room.slots[depth]).to_string())
                .collect();
            let (left, right) = if depth == 0 { ("###", "###") } else { ("  #", "#") };
            writeln!(f, "{}{}{}", left, cells.join("#"), right)?;
        }
        write!(f, "  {}", "#".repeat(HALLWAY_LEN - 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use Amphipod::*;

    fn mixed_burrow() -> Burrow {
        Burrow::new(
            [None; HALLWAY_LEN],
            [
                Room::new([Some(Bronze), Some(Amber)]),
                Room::new([Some(Copper), Some(Desert)]),
                Room::new([Some(Bronze), Some(Copper)]),
                Room::new([Some(Desert), Some(Amber)]),
            ],
        )
    }

    #[test]
    fn test_amphipod_chars_round_trip() {
        for amphipod in Amphipod::ALL {
            assert_eq!(Amphipod::from_char(amphipod.to_char()), Some(amphipod));
        }
        assert_eq!(Amphipod::from_char('E'), None);
        assert_eq!(Amphipod::from_char('.'), None);
    }

    #[test]
    fn test_target_doorways() {
        assert_eq!(Amber.target_doorway(), 2);
        assert_eq!(Desert.target_doorway(), 8);
    }

    #[test]
    fn test_stops_exclude_doorways() {
        for stop in HALLWAY_STOPS {
            assert!(!DOORWAYS.contains(&stop));
        }
        assert_eq!(HALLWAY_STOPS.len() + DOORWAYS.len(), HALLWAY_LEN);
    }

    #[test]
    fn test_room_queries() {
        let room = Room::new([None, Some(Bronze), Some(Amber)]);
        assert_eq!(room.top_occupant(), Some((1, Bronze)));
        assert_eq!(room.deepest_empty(), Some(0));
        assert!(!room.is_settled(0));
        assert!(!room.accepts(Amber));

        let settling = Room::new([None, None, Some(Copper)]);
        assert!(settling.is_settled(2));
        assert!(settling.accepts(Copper));
        assert_eq!(settling.deepest_empty(), Some(1));

        let empty = Room::empty(2);
        assert_eq!(empty.top_occupant(), None);
        assert!(empty.is_settled(3));
        assert_eq!(empty.deepest_empty(), Some(1));
    }

    #[test]
    fn test_target_state() {
        let target = Burrow::target(2);
        assert!(target.is_target());
        assert!(target.is_conserving());
        assert!(!mixed_burrow().is_target());
    }

    #[test]
    fn test_token_counts() {
        assert_eq!(mixed_burrow().token_counts(), [2, 2, 2, 2]);
        assert!(mixed_burrow().is_conserving());
    }

    #[test]
    fn test_transformations_leave_source_untouched() {
        let burrow = mixed_burrow();
        let exited = burrow.with_exit(0, 0, 1);
        assert_eq!(exited.hallway()[1], Some(Bronze));
        assert_eq!(exited.room(0).slots(), &[None, Some(Amber)]);
        assert_eq!(burrow, mixed_burrow());

        let entered = exited.with_entry(1, 0, 0);
        assert_eq!(entered, burrow);
    }

    #[test]
    fn test_hallway_clear() {
        let burrow = mixed_burrow().with_exit(1, 0, 5);
        // The mover's own cell is skipped
        assert!(burrow.hallway_clear(5, 3));
        assert!(burrow.hallway_clear(5, 10));
        assert!(!burrow.hallway_clear(2, 5));
        assert!(!burrow.hallway_clear(8, 5));
        assert!(burrow.hallway_clear(2, 0));
    }

    #[test]
    #[should_panic(expected = "same depth")]
    fn test_uneven_rooms_panic() {
        Burrow::new(
            [None; HALLWAY_LEN],
            [Room::empty(2), Room::empty(2), Room::empty(1), Room::empty(2)],
        );
    }

    #[test]
    fn test_display() {
        let expected = "#############\n\
                        #...........#\n\
                        ###B#C#B#D###\n  \
                        #A#D#C#A#\n  \
                        #########";
        assert_eq!(mixed_burrow().to_string(), expected);
    }
}
