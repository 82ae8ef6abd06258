use super::{replace_optional_text, replace_text};
use crate::store::{ImportPolicy, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Contact {
    pub fn new(id: u32, name: String, phone: Option<String>, email: Option<String>) -> Self {
        Self {
            id,
            name,
            phone: phone.filter(|p| !p.trim().is_empty()),
            email: email.filter(|e| !e.trim().is_empty()),
        }
    }

    pub fn apply(&mut self, update: ContactUpdate) {
        replace_text(&mut self.name, update.name);
        replace_optional_text(&mut self.phone, update.phone);
        replace_optional_text(&mut self.email, update.email);
    }

    /// Case-insensitive substring match on name or phone.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self
                .phone
                .as_deref()
                .is_some_and(|p| p.to_lowercase().contains(&query))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Record for Contact {
    const LABEL: &'static str = "Contact";
    const CSV_HEADERS: &'static [&'static str] = &["id", "name", "phone", "email"];
    const IMPORT_POLICY: ImportPolicy = ImportPolicy::KeepIds;

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn summary(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_name_or_phone() {
        let c = Contact::new(1, "Ivan Petrov".into(), Some("+7 912 345-67-89".into()), None);
        assert!(c.matches("petrov"));
        assert!(c.matches("IVAN"));
        assert!(c.matches("345-67"));
        assert!(!c.matches("maria"));
    }

    #[test]
    fn email_is_not_searched() {
        let c = Contact::new(1, "Ann".into(), None, Some("secret@example.com".into()));
        assert!(!c.matches("secret"));
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let c = Contact::new(1, "Ann".into(), Some("  ".into()), Some("".into()));
        assert_eq!(c.phone, None);
        assert_eq!(c.email, None);
    }

    #[test]
    fn update_keeps_fields_that_are_not_given() {
        let mut c = Contact::new(1, "Ann".into(), Some("89123456789".into()), None);
        c.apply(ContactUpdate {
            email: Some("ann@example.com".into()),
            ..Default::default()
        });
        assert_eq!(c.name, "Ann");
        assert_eq!(c.phone.as_deref(), Some("89123456789"));
        assert_eq!(c.email.as_deref(), Some("ann@example.com"));
    }
}
