use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Contact, ContactUpdate};
use crate::store::{Collection, StorageBackend};

/// Phone and email are expected to be validated by the caller
/// (see [`crate::validation`]).
pub fn add<B: StorageBackend>(
    contacts: &mut Collection<Contact, B>,
    name: String,
    phone: Option<String>,
    email: Option<String>,
) -> Result<CmdResult<Contact>> {
    let contact = contacts.add(|id| Contact::new(id, name, phone, email))?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Contact created ({}): {}",
        contact.id, contact.name
    )));
    Ok(result.with_affected(vec![contact]))
}

pub fn search<B: StorageBackend>(
    contacts: &Collection<Contact, B>,
    query: &str,
) -> CmdResult<Contact> {
    let listed = contacts
        .list()
        .iter()
        .filter(|c| c.matches(query))
        .cloned()
        .collect();
    CmdResult::default().with_listed(listed)
}

pub fn edit<B: StorageBackend>(
    contacts: &mut Collection<Contact, B>,
    id: u32,
    update: ContactUpdate,
) -> Result<CmdResult<Contact>> {
    let mut result = CmdResult::default();
    match contacts.update(id, |contact| contact.apply(update))? {
        Some(contact) => {
            result.add_message(CmdMessage::success(format!(
                "Contact updated ({}): {}",
                contact.id, contact.name
            )));
            result.affected.push(contact);
        }
        None => result.add_message(CmdMessage::warning(format!("Contact {} not found", id))),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemBackend;

    fn sample() -> Collection<Contact, MemBackend> {
        let mut contacts = Collection::open(MemBackend::new()).unwrap();
        add(
            &mut contacts,
            "Ivan Petrov".into(),
            Some("8 912 345-67-89".into()),
            None,
        )
        .unwrap();
        add(
            &mut contacts,
            "Maria Ivanova".into(),
            None,
            Some("maria@example.com".into()),
        )
        .unwrap();
        contacts
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_phone() {
        let contacts = sample();

        let by_name = search(&contacts, "IVAN");
        assert_eq!(by_name.listed.len(), 2);

        let by_phone = search(&contacts, "345-67");
        assert_eq!(by_phone.listed.len(), 1);
        assert_eq!(by_phone.listed[0].name, "Ivan Petrov");

        assert!(search(&contacts, "example.com").listed.is_empty());
    }

    #[test]
    fn edit_updates_only_given_fields() {
        let mut contacts = sample();
        edit(
            &mut contacts,
            2,
            ContactUpdate {
                phone: Some("89001112233".into()),
                ..Default::default()
            },
        )
        .unwrap();

        let maria = contacts.find(2).unwrap();
        assert_eq!(maria.name, "Maria Ivanova");
        assert_eq!(maria.phone.as_deref(), Some("89001112233"));
        assert_eq!(maria.email.as_deref(), Some("maria@example.com"));
    }
}
