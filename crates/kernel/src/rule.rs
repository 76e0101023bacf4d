//! Conway's B3/S23 rule.

/// Next state of a cell given its current state and number of live neighbors.
///
/// Live cells survive with 2 or 3 neighbors; dead cells are born with exactly 3.
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    match (alive, live_neighbors) {
        (true, 2) | (true, 3) => true, // survival
        (false, 3) => true,            // birth
        _ => false,                    // under/overpopulation, or stays dead
    }
}
