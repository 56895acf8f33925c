use serde::{Deserialize, Serialize};

/// Minimal contact card: a display name and one mail address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub address: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// Label for titles and log lines
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.address.clone()
        } else {
            format!("{} <{}>", self.name, self.address)
        }
    }
}

/// Lifecycle tag stored with each book entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Freshly filed from a message, unreviewed
    New,
    /// Saved from the editor after the user changed it
    Edited,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_falls_back_to_address() {
        let contact = Contact::new("", "jane@example.com");
        assert_eq!(contact.label(), "jane@example.com");

        let contact = Contact::new("Jane Doe", "jane@example.com");
        assert_eq!(contact.label(), "Jane Doe <jane@example.com>");
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::New).unwrap(), "\"new\"");
        assert_eq!(serde_json::to_string(&Status::Edited).unwrap(), "\"edited\"");
    }
}
