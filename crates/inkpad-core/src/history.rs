//! Snapshot-based undo/redo history.

use crate::surface::Snapshot;

/// Two-stack undo/redo history of full-surface snapshots.
///
/// `past` runs oldest to newest and its top always mirrors what the surface
/// currently shows. `future` holds undone states, most recently undone on top.
/// Once seeded, `past` never drops below one entry: the floor snapshot.
#[derive(Debug, Clone, Default)]
pub struct HistoryManager {
    past: Vec<Snapshot>,
    future: Vec<Snapshot>,
    /// Maximum length of `past`. `None` keeps everything.
    max_depth: Option<usize>,
}

impl HistoryManager {
    /// Create an empty, unbounded history. Seed it before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `max_depth` committed states.
    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Drop everything and start over from `floor`.
    pub fn seed(&mut self, floor: Snapshot) {
        self.past.clear();
        self.future.clear();
        self.past.push(floor);
    }

    /// Record a new state. Pending redo states are discarded.
    pub fn commit(&mut self, snapshot: Snapshot) {
        let bytes = snapshot.byte_len();
        self.past.push(snapshot);
        self.future.clear();

        if let Some(depth) = self.max_depth {
            let keep = depth.max(1);
            if self.past.len() > keep {
                let excess = self.past.len() - keep;
                self.past.drain(..excess);
            }
        }
        log::debug!("History commit ({} bytes): {} past, 0 future", bytes, self.past.len());
    }

    /// Step back one state and return the state to restore.
    ///
    /// Returns `None` without changing anything at the floor.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.past.len() <= 1 {
            return None;
        }
        let top = self.past.pop()?;
        self.future.push(top);
        log::debug!("History undo: {} past, {} future", self.past.len(), self.future.len());
        self.past.last()
    }

    /// Step forward one state and return the state to restore.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.future.pop()?;
        self.past.push(next);
        log::debug!("History redo: {} past, {} future", self.past.len(), self.future.len());
        self.past.last()
    }

    /// The state `undo` would return, without moving anything.
    pub fn undo_target(&self) -> Option<&Snapshot> {
        match self.past.len() {
            0 | 1 => None,
            n => self.past.get(n - 2),
        }
    }

    /// The state `redo` would return, without moving anything.
    pub fn redo_target(&self) -> Option<&Snapshot> {
        self.future.last()
    }

    /// The state the surface should currently show.
    pub fn current(&self) -> Option<&Snapshot> {
        self.past.last()
    }

    pub fn can_undo(&self) -> bool {
        self.past.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }
}
