#![forbid(unsafe_code)]

//! Minimal SGR styling for prompt text and notices.
//!
//! A deliberately small vocabulary: the 16 ANSI colors plus bold/dim.
//! Styled text is produced eagerly as a `String` wrapped in SGR set and
//! reset sequences, ready to travel inside a [`RenderOp::Text`]
//! directive.
//!
//! [`RenderOp::Text`]: crate::op::RenderOp::Text

/// The 16 standard ANSI foreground colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ansi16 {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Ansi16 {
    /// SGR foreground code for this color.
    #[must_use]
    pub const fn fg_code(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
            Self::BrightBlack => 90,
            Self::BrightRed => 91,
            Self::BrightGreen => 92,
            Self::BrightYellow => 93,
            Self::BrightBlue => 94,
            Self::BrightMagenta => 95,
            Self::BrightCyan => 96,
            Self::BrightWhite => 97,
        }
    }
}

/// A text style: optional foreground color plus bold/dim flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    fg: Option<Ansi16>,
    bold: bool,
    dim: bool,
}

impl Style {
    /// Create an empty style (paints text unchanged).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bold: false,
            dim: false,
        }
    }

    /// Set the foreground color (builder).
    #[must_use]
    pub const fn fg(mut self, color: Ansi16) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set bold (builder).
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set dim (builder).
    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    /// Check whether this style changes anything.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        self.fg.is_none() && !self.bold && !self.dim
    }

    /// Wrap `text` in SGR set/reset sequences for this style.
    ///
    /// A plain style returns the text unchanged, with no reset appended.
    #[must_use]
    pub fn paint(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }
        let mut codes: Vec<String> = Vec::with_capacity(3);
        if self.bold {
            codes.push("1".to_string());
        }
        if self.dim {
            codes.push("2".to_string());
        }
        if let Some(fg) = self.fg {
            codes.push(fg.fg_code().to_string());
        }
        format!("\x1b[{}m{}\x1b[0m", codes.join(";"), text)
    }
}
