pub const SUCCESS_MESSAGE: &str = "Setup complete. We’ll take it from here.";
pub const FAILURE_MESSAGE: &str = "Couldn't submit. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// Single-slot message area. Setting a message replaces whatever was there.
/// Every change bumps `generation`, so a delayed clear can tell whether the
/// message it was scheduled for is still the one on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageSlot {
    current: Option<Message>,
    generation: u64,
}

impl MessageSlot {
    /// Returns the generation of the new message, or `None` when `text` is
    /// empty, in which case the slot is cleared.
    pub fn set(&mut self, kind: MessageKind, text: &str) -> Option<u64> {
        if text.is_empty() {
            self.clear();
            return None;
        }

        self.generation += 1;
        self.current = Some(Message {
            kind,
            text: text.to_string(),
        });
        Some(self.generation)
    }

    pub fn clear(&mut self) {
        self.generation += 1;
        self.current = None;
    }

    /// Clear only if nothing replaced the message since `generation`.
    pub fn clear_if(&mut self, generation: u64) -> bool {
        if self.generation != generation {
            return false;
        }
        self.clear();
        true
    }

    pub fn current(&self) -> Option<&Message> {
        self.current.as_ref()
    }
}
