/// Which side a position sticks to when content is inserted exactly at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    /// Stay before the inserted content
    Before,
    /// Move past the inserted content
    After,
}

/// Result of mapping a position through one or more steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapResult {
    pub pos: usize,
    /// The original position was strictly inside a removed range
    pub deleted: bool,
}

/// How a single step moved positions: `old_size` positions starting at
/// `start` were replaced by `new_size` positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepMap {
    pub start: usize,
    pub old_size: usize,
    pub new_size: usize,
}

impl StepMap {
    /// A step that moved nothing (attribute changes)
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn map_result(&self, pos: usize, assoc: Assoc) -> MapResult {
        let end = self.start + self.old_size;
        if pos < self.start {
            return MapResult {
                pos,
                deleted: false,
            };
        }
        if pos > end {
            return MapResult {
                pos: pos - self.old_size + self.new_size,
                deleted: false,
            };
        }

        let side = if self.old_size == 0 {
            assoc
        } else if pos == self.start {
            Assoc::Before
        } else if pos == end {
            Assoc::After
        } else {
            assoc
        };
        let mapped = match side {
            Assoc::Before => self.start,
            Assoc::After => self.start + self.new_size,
        };
        MapResult {
            pos: mapped,
            deleted: pos > self.start && pos < end,
        }
    }
}

/// The accumulated step maps of a transform.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    maps: Vec<StepMap>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, map: StepMap) {
        self.maps.push(map);
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Map a position through every step recorded so far.
    pub fn map(&self, pos: usize, assoc: Assoc) -> usize {
        self.map_from(0, pos, assoc).pos
    }

    /// Map a position through the steps recorded from index `from` onwards.
    ///
    /// Used to carry a position computed against an intermediate tree
    /// forward to the current one.
    pub fn map_from(&self, from: usize, pos: usize, assoc: Assoc) -> MapResult {
        self.maps.iter().skip(from).fold(
            MapResult {
                pos,
                deleted: false,
            },
            |acc, map| {
                let next = map.map_result(acc.pos, assoc);
                MapResult {
                    pos: next.pos,
                    deleted: acc.deleted || next.deleted,
                }
            },
        )
    }
}
