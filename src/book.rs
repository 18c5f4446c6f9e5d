//! Address book façade over the contact store
//!
//! Adds nothing but a readable log line per operation; every call goes
//! straight to [`ContactStore`].

use crate::contact::Contact;
use crate::storage::ContactStore;
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct AddressBook {
    store: ContactStore,
}

impl AddressBook {
    pub fn new(store: ContactStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn load_contacts(&self) -> Result<Vec<Contact>> {
        let contacts = self.store.list_all()?;
        tracing::info!("{} contacts loaded", contacts.len());
        Ok(contacts)
    }

    pub fn add_contact(&self, contact: &Contact) -> Result<()> {
        log_outcome(self.store.insert(contact), || {
            tracing::info!("Contact {} added", contact.full_name());
        })
    }

    pub fn modify_contact(&self, old_first_name: &str, old_last_name: &str, contact: &Contact) -> Result<()> {
        log_outcome(self.store.update(old_first_name, old_last_name, contact), || {
            if contact.has_name(old_first_name, old_last_name) {
                tracing::info!("Contact {} {} modified", old_first_name, old_last_name);
            } else {
                tracing::info!(
                    "Contact {} {} renamed to {}",
                    old_first_name,
                    old_last_name,
                    contact.full_name()
                );
            }
        })
    }

    pub fn delete_contact(&self, first_name: &str, last_name: &str) -> Result<()> {
        log_outcome(self.store.delete(first_name, last_name), || {
            tracing::info!("Contact {} {} deleted", first_name, last_name);
        })
    }
}

/// Log the success line, or a warning for the expected failures
fn log_outcome(result: Result<()>, on_success: impl FnOnce()) -> Result<()> {
    match &result {
        Ok(()) => on_success(),
        Err(e @ (Error::AlreadyExists { .. } | Error::NotFound { .. })) => tracing::warn!("{}", e),
        Err(e) => tracing::error!("Contact store failure: {}", e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        let book = AddressBook::new(ContactStore::open(dir.path().join("book.db")).unwrap());

        book.add_contact(&Contact::new("Alice", "Smith")).unwrap();
        assert!(matches!(
            book.add_contact(&Contact::new("Alice", "Smith")),
            Err(Error::AlreadyExists { .. })
        ));

        book.modify_contact("Alice", "Smith", &Contact::new("Alice", "Jones"))
            .unwrap();
        assert_eq!(book.load_contacts().unwrap(), vec![Contact::new("Alice", "Jones")]);

        book.delete_contact("Alice", "Jones").unwrap();
        assert!(matches!(
            book.delete_contact("Alice", "Jones"),
            Err(Error::NotFound { .. })
        ));
        assert_eq!(book.store().count().unwrap(), 0);
    }
}
