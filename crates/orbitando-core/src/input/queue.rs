/// Keys the modal reacts to. The platform bridge maps raw key codes here;
/// everything else never reaches the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab,
    Enter,
    Backspace,
    Up,
    Down,
    PageUp,
    PageDown,
    Plus,
    Minus,
}

/// Input event types the core understands. Carries no widget semantics;
/// the controller decides what a press means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A click/touch began at viewport coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A click/touch ended at viewport coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// The cursor moved to viewport coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// Wheel scroll; positive `dy` scrolls up (toward row 0).
    Wheel { dy: f32 },
    /// A key was pressed.
    KeyDown { key: Key, shift: bool },
    /// A text-input character. The bridge splits host strings into chars.
    Text { ch: char },
    /// The host window is closing.
    Quit,
}

/// A queue of input events.
/// The host writes events into the queue; the app drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from the platform bridge).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key: Key::Tab, shift: false });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn text_event_carries_char() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Text { ch: '7' });
        match q.drain()[0] {
            InputEvent::Text { ch } => assert_eq!(ch, '7'),
            _ => panic!("Expected Text event"),
        }
    }
}
