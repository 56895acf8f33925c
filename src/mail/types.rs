use std::fmt;

/// Message headers a card can be taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    From,
    To,
    Cc,
    Bcc,
}

impl HeaderKind {
    /// Header field name as it appears in the message
    pub fn name(self) -> &'static str {
        match self {
            HeaderKind::From => "From",
            HeaderKind::To => "To",
            HeaderKind::Cc => "Cc",
            HeaderKind::Bcc => "Bcc",
        }
    }
}

impl fmt::Display for HeaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
