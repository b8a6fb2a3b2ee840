//! Circular position arithmetic shared by every store.
//!
//! Positions are indexes into the ordered record sequence. `None` as input
//! means "the id is not in the store"; `None` as output means the store is
//! empty and the caller should fall back to its Blank Record.

pub fn first_position(len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(0)
    }
}

pub fn last_position(len: usize) -> Option<usize> {
    len.checked_sub(1)
}

/// Position following `current`, wrapping past the end.
/// An unknown `current` behaves as "before first".
pub fn next_position(current: Option<usize>, len: usize) -> Option<usize> {
    match current {
        Some(pos) if pos + 1 < len => Some(pos + 1),
        _ => first_position(len),
    }
}

/// Position preceding `current`, wrapping past the start.
/// An unknown `current` behaves as "after last".
pub fn previous_position(current: Option<usize>, len: usize) -> Option<usize> {
    match current {
        Some(pos) if pos > 0 && pos < len => Some(pos - 1),
        _ => last_position(len),
    }
}
