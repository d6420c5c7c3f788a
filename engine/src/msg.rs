//! Reporting what happened during a turn to the presentation layer.

use strum::Display;

/// Tag for the most notable thing that happened on a level this tick.
///
/// Clients use it to pick sound effects and animations.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display)]
pub enum GameEvent {
    Move,
    DoorOpen,
    Attack,
    Hit,
    Portal,
    PickUp,
    Drop,
    Equip,
}

/// Fixed-size log of text lines, new lines overwrite the oldest ones.
#[derive(Clone, Debug, PartialEq)]
pub struct EventLog {
    lines: Vec<String>,
    capacity: usize,
    /// Slot the next line will be written into.
    cursor: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        EventLog {
            lines: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        if self.lines.len() < self.capacity {
            self.lines.push(line);
        } else {
            self.lines[self.cursor] = line;
        }
        self.cursor = (self.cursor + 1) % self.capacity;
    }

    /// Iterate lines from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        // Until the log fills up the cursor points past the end and the
        // first slice is empty.
        let split = self.cursor.min(self.lines.len());
        self.lines[split..].iter().chain(self.lines[..split].iter())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn contents(log: &EventLog) -> Vec<&str> {
        log.iter().map(String::as_str).collect()
    }

    #[test]
    fn fills_up() {
        let mut log = EventLog::new(3);
        assert!(log.is_empty());
        log.push("a");
        log.push("b");
        assert_eq!(contents(&log), vec!["a", "b"]);
    }

    #[test]
    fn overwrites_oldest() {
        let mut log = EventLog::new(3);
        for c in ["a", "b", "c", "d", "e"] {
            log.push(c);
        }
        assert_eq!(log.len(), 3);
        assert_eq!(contents(&log), vec!["c", "d", "e"]);

        log.push("f");
        assert_eq!(contents(&log), vec!["d", "e", "f"]);
    }

    #[test]
    fn zero_capacity() {
        let mut log = EventLog::new(0);
        log.push("a");
        log.push("b");
        assert_eq!(contents(&log), vec!["b"]);
    }
}
