//! Keyboard focus containment for the open modal.

/// Elements inside the overlay that can take keyboard focus.
pub const FOCUSABLE_SELECTOR: &str =
    "button, [href], input, select, textarea, [tabindex]:not([tabindex=\"-1\"])";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Ordered focus-trap list, in document order.
///
/// Tab navigation is fully owned by the trap: every Tab/Shift+Tab lands on a
/// member of the list, wrapping at both ends. Focus that has somehow left the
/// list re-enters at the first (forward) or last (backward) element.
#[derive(Debug, Clone)]
pub struct FocusTrap<E> {
    elements: Vec<E>,
}

impl<E> Default for FocusTrap<E> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
        }
    }
}

impl<E: PartialEq> FocusTrap<E> {
    pub fn new(elements: Vec<E>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, element: &E) -> bool {
        self.elements.contains(element)
    }

    /// Element that should receive focus after a Tab press from `active`.
    ///
    /// `None` only when the list is empty, in which case the key is left to
    /// the browser.
    pub fn step(&self, active: Option<&E>, direction: Direction) -> Option<&E> {
        let len = self.elements.len();
        if len == 0 {
            return None;
        }
        let position = active.and_then(|a| self.elements.iter().position(|e| e == a));
        let next = match (position, direction) {
            (Some(i), Direction::Forward) => (i + 1) % len,
            (Some(i), Direction::Backward) => (i + len - 1) % len,
            (None, Direction::Forward) => 0,
            (None, Direction::Backward) => len - 1,
        };
        self.elements.get(next)
    }
}
