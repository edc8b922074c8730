//! Keystroke automaton for the hashtag list in edit mode.
//!
//! Extracted from the input handler so it runs without any rendering
//! harness: `TagKey::from_keyboard_event` is the only DOM-facing seam,
//! everything else is a pure transition over `(tags, buffer)`.

/// The only keys the automaton reacts to. Everything else is plain text
/// input and flows through `set_buffer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TagKey {
    Enter,
    Backspace,
}

impl TagKey {
    /// Classify a DOM keydown. Returns `None` for keys the automaton
    /// ignores and for keystrokes that belong to an in-progress IME
    /// composition (isComposing, or the legacy keyCode 229 marker).
    pub fn from_keyboard_event(ev: &web_sys::KeyboardEvent) -> Option<Self> {
        if ev.is_composing() || ev.key_code() == 229 {
            return None;
        }
        match ev.key().as_str() {
            "Enter" => Some(TagKey::Enter),
            "Backspace" => Some(TagKey::Backspace),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct TagEditor {
    /// Addition-ordered; duplicates allowed.
    pub tags: Vec<String>,
    /// The pending, not-yet-committed input.
    pub buffer: String,
}

impl TagEditor {
    /// Seed from the canonical post's tags with an empty buffer.
    pub fn seeded(tags: Vec<String>) -> Self {
        Self {
            tags,
            buffer: String::new(),
        }
    }

    /// Normal text-input assignment; no automaton transition.
    pub fn set_buffer(&mut self, value: &str) {
        self.buffer = value.to_string();
    }

    /// Apply one keystroke. Returns `true` when the browser default must be
    /// suppressed (Enter would otherwise submit the enclosing form).
    ///
    /// Enter: if the buffer trims non-empty, append it with every
    /// whitespace character removed (deleted, not collapsed) and clear the
    /// buffer; the buffer is only cleared on a successful append.
    /// Backspace: only while the buffer is empty, pop the most recently
    /// added tag.
    pub fn handle_key(&mut self, key: TagKey) -> bool {
        match key {
            TagKey::Enter => {
                if !self.buffer.trim().is_empty() {
                    let tag: String = self.buffer.chars().filter(|c| !c.is_whitespace()).collect();
                    self.tags.push(tag);
                    self.buffer.clear();
                }
                true
            }
            TagKey::Backspace => {
                if self.buffer.is_empty() {
                    self.tags.pop();
                }
                false
            }
        }
    }
}
