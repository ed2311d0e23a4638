use super::*;
use tracing::{debug, warn};

type Observer = Box<dyn FnMut(&[Contact])>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns the ordered contact list and republishes it after every mutation.
///
/// Observers are called synchronously, in subscription order, with the
/// full list. Lookups that miss leave the list untouched and notify no one.
#[derive(Default)]
pub struct ContactStore {
    contacts: Vec<Contact>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the seed contacts.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.initialize();
        store
    }

    pub fn initialize(&mut self) {
        let seed = [
            ("Ruben Alves", "987654321", "ruben@atec.com"),
            ("João Alves", "987654321", "joao_alves@atec.com"),
        ];

        for (name, phone, email) in seed {
            self.contacts.push(Contact::new(
                None,
                name.to_string(),
                phone.to_string(),
                email.to_string(),
            ));
        }

        debug!(count = self.contacts.len(), "seeded contact store");
        self.notify();
    }

    pub fn list(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, id: &Uuid) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.id() == id)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Appends a new contact. Input is stored as given; callers validate first.
    pub fn create(
        &mut self,
        image_bytes: Option<Vec<u8>>,
        name: String,
        phone: String,
        email: String,
    ) -> Contact {
        let contact = Contact::new(image_bytes, name, phone, email);
        debug!(id = %contact.id(), "contact created");

        self.contacts.push(contact.clone());
        self.notify();
        contact
    }

    /// Replaces the contact in place, keeping its id and photo.
    pub fn update(
        &mut self,
        id: &Uuid,
        name: String,
        phone: String,
        email: String,
    ) -> Result<(), AppError> {
        let index = self.position(id)?;

        self.contacts[index] = self.contacts[index].with_details(name, phone, email);
        debug!(%id, "contact updated");
        self.notify();
        Ok(())
    }

    /// Swaps the photo of a contact. `None` clears it.
    pub fn replace_image(&mut self, id: &Uuid, image_bytes: Option<Vec<u8>>) -> Result<(), AppError> {
        let index = self.position(id)?;

        self.contacts[index] = self.contacts[index].with_image(image_bytes);
        debug!(%id, "contact photo replaced");
        self.notify();
        Ok(())
    }

    /// Removes every contact carrying `id`.
    pub fn remove(&mut self, id: &Uuid) -> Result<(), AppError> {
        let before = self.contacts.len();
        self.contacts.retain(|c| &c.id() != id);

        if self.contacts.len() == before {
            warn!(%id, "remove skipped, no contact with this id");
            return Err(AppError::NotFound("Contact".to_string()));
        }

        debug!(%id, "contact removed");
        self.notify();
        Ok(())
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&[Contact]) + 'static,
    {
        let subscription = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((subscription, Box::new(observer)));
        subscription
    }

    /// Returns false when the subscription was not registered.
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(s, _)| *s != subscription);
        self.observers.len() != before
    }

    fn notify(&mut self) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.contacts);
        }
    }

    fn position(&self, id: &Uuid) -> Result<usize, AppError> {
        match self.contacts.iter().position(|c| &c.id() == id) {
            Some(index) => Ok(index),
            None => {
                warn!(%id, "no contact with this id");
                Err(AppError::NotFound("Contact".to_string()))
            }
        }
    }
}
