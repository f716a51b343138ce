//! Input field and the affordances that feed text into it.

/// The text field the user types into.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputField {
    value: String,
    focused: bool,
}

impl InputField {
    /// Returns the current value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the current value.
    #[inline]
    pub fn set_value<S: Into<String>>(&mut self, value: S) {
        self.value = value.into();
    }

    /// Appends text to the current value.
    #[inline]
    pub fn append(&mut self, text: &str) {
        self.value.push_str(text);
    }

    /// Empties the field.
    #[inline]
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Returns the trimmed value, or `None` if there is nothing to send.
    pub fn trimmed(&self) -> Option<&str> {
        let value = self.value.trim();
        (!value.is_empty()).then_some(value)
    }

    /// Gives the field keyboard focus.
    #[inline]
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Returns `true` if the field has keyboard focus.
    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

/// A panel of emoji glyphs whose visibility can be toggled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmojiPicker {
    glyphs: Vec<String>,
    visible: bool,
}

impl EmojiPicker {
    /// Creates a hidden picker offering `glyphs`.
    pub fn new<I, S>(glyphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            glyphs: glyphs.into_iter().map(Into::into).collect(),
            visible: false,
        }
    }

    /// Returns the offered glyphs.
    #[inline]
    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    /// Returns the glyph of the item at `idx`.
    #[inline]
    pub fn glyph(&self, idx: usize) -> Option<&str> {
        self.glyphs.get(idx).map(String::as_str)
    }

    /// Returns `true` if the picker is shown.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows the picker if hidden, hides it otherwise.
    #[inline]
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Hides the picker.
    #[inline]
    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// A preset button that sends a fixed text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QuickReply {
    label: String,
    text: String,
}

impl QuickReply {
    /// Creates a quick reply showing `label` and sending `text`.
    #[inline]
    pub fn new<L: Into<String>, T: Into<String>>(label: L, text: T) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    /// Returns the button label.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the literal text that is sent.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}
