//! UI events and the elements they target.

/// Identifies an element of the widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// Anything that is not part of the widget.
    Document,
    /// The scrolling message panel.
    MessagePanel,
    /// The text field.
    InputField,
    /// The send button.
    SendButton,
    /// The button that shows and hides the emoji picker.
    EmojiToggle,
    /// The emoji picker panel itself, outside any of its items.
    EmojiPicker,
    /// The emoji item at the given index.
    EmojiItem(usize),
    /// The quick-reply button at the given index.
    QuickReply(usize),
    /// The typing indicator.
    TypingIndicator,
}

impl ElementId {
    /// Returns `true` if the element is the emoji picker or inside it.
    #[inline]
    pub fn is_within_emoji_picker(self) -> bool {
        matches!(self, ElementId::EmojiPicker | ElementId::EmojiItem(_))
    }
}

/// A key on the keyboard, as far as the widget cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The enter/return key.
    Enter,
    /// A key that produces a character.
    Char(char),
}

/// An event raised by the host UI.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum UiEvent {
    /// An element was clicked.
    Click(ElementId),
    /// A key was pressed while `target` had focus.
    KeyPress {
        /// The focused element.
        target: ElementId,
        /// The pressed key.
        key: Key,
        /// Whether Shift was held.
        shift: bool,
    },
    /// The user edited the value of `target` to `value`.
    Input {
        /// The edited element.
        target: ElementId,
        /// The new value.
        value: String,
    },
}

impl UiEvent {
    /// A click on `target`.
    #[inline]
    pub fn click(target: ElementId) -> Self {
        UiEvent::Click(target)
    }

    /// Enter pressed in the input field.
    #[inline]
    pub fn enter(shift: bool) -> Self {
        UiEvent::KeyPress {
            target: ElementId::InputField,
            key: Key::Enter,
            shift,
        }
    }

    /// The input field's value edited to `value`.
    #[inline]
    pub fn input<S: Into<String>>(value: S) -> Self {
        UiEvent::Input {
            target: ElementId::InputField,
            value: value.into(),
        }
    }

    /// Returns the element the event targets.
    #[inline]
    pub fn target(&self) -> ElementId {
        match self {
            UiEvent::Click(target)
            | UiEvent::KeyPress { target, .. }
            | UiEvent::Input { target, .. } => *target,
        }
    }
}
