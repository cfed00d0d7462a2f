use super::geometry::Point;

/// Platform-assigned identifier of one physical contact.
pub type TouchId = u32;

/// One tracked contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: TouchId,
    /// Absolute screen position.
    pub position: Point,
    /// Frozen once the last contact lifts.
    pub locked: bool,
}

/// A raw contact as delivered by the input layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawTouch {
    pub id: TouchId,
    pub x: f64,
    pub y: f64,
}

impl RawTouch {
    pub fn new(id: TouchId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// Active touch points in insertion order, at most one per id.
///
/// The registry does not gate input; callers check whether the session is
/// accepting touches before applying moves.
#[derive(Debug, Clone, Default)]
pub struct TouchRegistry {
    points: Vec<TouchPoint>,
}

impl TouchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an unknown id, move an unlocked one, ignore a locked one.
    pub fn apply_move(&mut self, id: TouchId, position: Point) {
        match self.points.iter_mut().find(|p| p.id == id) {
            Some(p) if p.locked => {}
            Some(p) => p.position = position,
            None => self.points.push(TouchPoint {
                id,
                position,
                locked: false,
            }),
        }
    }

    /// Lock every entry. Entries are never removed here.
    pub fn apply_release_all(&mut self) {
        for p in &mut self.points {
            p.locked = true;
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[cfg(test)]
    pub fn get(&self, id: TouchId) -> Option<&TouchPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Entry at `index` in insertion order.
    pub fn nth(&self, index: usize) -> Option<&TouchPoint> {
        self.points.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TouchPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[cfg(test)]
    pub fn all_locked(&self) -> bool {
        self.points.iter().all(|p| p.locked)
    }
}
