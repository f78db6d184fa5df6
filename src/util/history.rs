use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Fixed-capacity ring buffer of samples. Oldest entry is overwritten when full.
///
/// Iteration borrows the buffer, so a traversal can never observe a
/// concurrent `add`; use [`History::snapshot`] to keep the values around.
#[derive(Debug, Clone)]
pub struct History {
    slots:   Vec<Option<f64>>,
    cursor:  Option<usize>,   // most recently written slot
    wrapped: bool,            // every slot written at least once
}

impl History {
    pub fn new(capacity: usize) -> Result<Self, HistoryError> {
        if capacity == 0 {
            return Err(HistoryError::InvalidArgument(
                "history capacity must be at least 1".into(),
            ));
        }
        Ok(Self { slots: vec![None; capacity], cursor: None, wrapped: false })
    }

    /// Advance the write position, then store `value` there.
    pub fn add(&mut self, value: f64) {
        let cap = self.slots.len();
        let pos = match self.cursor {
            Some(c) => (c + 1) % cap,
            None    => 0,
        };
        self.slots[pos] = Some(value);
        self.cursor = Some(pos);
        if pos == cap - 1 {
            self.wrapped = true;
        }
    }

    /// Arithmetic mean of the populated slots; 0.0 when nothing has been added.
    pub fn mean(&self) -> f64 {
        let (sum, n) = self.slots.iter()
            .flatten()
            .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
        if n == 0 { 0.0 } else { sum / n as f64 }
    }

    /// Retained values, oldest first.
    pub fn iter(&self) -> Iter<'_> {
        let start = match (self.wrapped, self.cursor) {
            (true, Some(c)) => (c + 1) % self.slots.len(),
            _               => 0,
        };
        Iter { history: self, pos: start, remaining: self.len() }
    }

    pub fn snapshot(&self) -> Vec<f64> {
        self.iter().collect()
    }

    pub fn latest(&self) -> Option<f64> {
        self.cursor.and_then(|c| self.slots[c])
    }

    pub fn max(&self) -> Option<f64> {
        self.slots.iter().flatten().copied().reduce(f64::max)
    }

    pub fn capacity(&self) -> usize { self.slots.len() }

    pub fn len(&self) -> usize {
        if self.wrapped {
            self.slots.len()
        } else {
            self.cursor.map_or(0, |c| c + 1)
        }
    }

    pub fn is_empty(&self) -> bool { self.cursor.is_none() }
    pub fn is_full(&self) -> bool { self.wrapped }
}

impl<'a> IntoIterator for &'a History {
    type Item = f64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Chronological traversal over a [`History`]. Ends after the newest value.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    history:   &'a History,
    pos:       usize,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        while self.remaining > 0 {
            let slot = self.history.slots[self.pos];
            self.pos = (self.pos + 1) % self.history.slots.len();
            self.remaining -= 1;
            if slot.is_some() {
                return slot;
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
