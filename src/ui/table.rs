use tabled::{settings::Style, Table, Tabled};

use crate::contact::Contact;

#[derive(Tabled)]
pub struct ContactRow {
    #[tabled(rename = "First name")]
    pub first_name: String,
    #[tabled(rename = "Last name")]
    pub last_name: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Phone")]
    pub phone_number: String,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Address")]
    pub address: String,
}

impl From<&Contact> for ContactRow {
    fn from(contact: &Contact) -> Self {
        Self {
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            category: contact.category.clone(),
            phone_number: contact.phone_number.clone(),
            email: contact.email.clone(),
            address: contact.address.clone(),
        }
    }
}

/// Render contacts as a rounded table; empty input renders nothing
pub fn contacts_table(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return String::new();
    }

    let rows: Vec<ContactRow> = contacts.iter().map(ContactRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
