use crate::{
    cli::command::{Cli, MenuCommand},
    domain::{Contact, ContactDraft, ContactStore, Uuid},
    errors::AppError,
    media,
};
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

pub fn run_app() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut store = if cli.no_seed {
        ContactStore::new()
    } else {
        ContactStore::seeded()
    };
    store.subscribe(|contacts| debug!(count = contacts.len(), "contact list published"));
    info!(count = store.len(), "contact list ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(store, stdin.lock(), stdout.lock()).run()
}

/// Menu-driven front end over a [`ContactStore`].
///
/// Every answer is read as one line. `*` at any prompt goes back to the
/// menu, and end of input ends the session.
pub struct Session<R, W> {
    store: ContactStore,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(store: ContactStore, input: R, output: W) -> Self {
        Session {
            store,
            input,
            output,
        }
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn into_store(self) -> ContactStore {
        self.store
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "\n--- Contacts ---")?;

        loop {
            self.show_menu()?;

            let Some(action) = self.read_line()? else {
                writeln!(self.output, "\nBye!")?;
                return Ok(());
            };

            let command = match MenuCommand::parse(&action) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(self.output, "{}", e)?;
                    continue;
                }
            };

            let outcome = match command {
                MenuCommand::AddContact => self.add_contact(),
                MenuCommand::ListContacts => self.list_contacts(),
                MenuCommand::ShowContact => self.show_contact(),
                MenuCommand::EditContact => self.edit_contact(),
                MenuCommand::ChangePhoto => self.change_photo(),
                MenuCommand::DeleteContact => self.delete_contact(),
                MenuCommand::ExportContacts => self.export_contacts(),
                MenuCommand::Exit => {
                    writeln!(self.output, "\nBye!")?;
                    return Ok(());
                }
            };

            match outcome {
                // Broken terminal, nothing left to talk to
                Err(AppError::Io(e)) => return Err(AppError::Io(e)),
                Err(e) => writeln!(self.output, "{}", e)?,
                Ok(()) => {}
            }
        }
    }

    fn add_contact(&mut self) -> Result<(), AppError> {
        let Some(name) = self.prompt("Enter contact name")? else {
            return Ok(());
        };
        let Some(phone) = self.prompt("Enter contact phone")? else {
            return Ok(());
        };
        let Some(email) = self.prompt("Enter contact email (may be empty)")? else {
            return Ok(());
        };

        let draft = ContactDraft::new(name, phone, email);
        draft.validate()?;

        let Some(photo_path) = self.prompt("Enter photo path (empty for none)")? else {
            return Ok(());
        };
        let photo = load_photo(&photo_path)?;

        let contact = self
            .store
            .create(photo, draft.name, draft.phone, draft.email);

        writeln!(self.output, "Contact added successfully!")?;
        writeln!(self.output, "{}", display_contact(&contact))?;
        Ok(())
    }

    fn list_contacts(&mut self) -> Result<(), AppError> {
        if self.store.is_empty() {
            writeln!(self.output, "No contact in contact list!")?;
            return Ok(());
        }

        for (mut i, c) in self.store.list().iter().enumerate() {
            i += 1;
            let photo = if c.has_photo() { "[photo]" } else { "" };
            writeln!(
                self.output,
                "{i:>3}. {:<20} {:15} {:^30} {}",
                c.name(),
                c.phone(),
                c.email(),
                photo
            )?;
        }
        Ok(())
    }

    fn show_contact(&mut self) -> Result<(), AppError> {
        let Some(id) = self.select_contact()? else {
            return Ok(());
        };

        let contact = self.find(&id)?;
        let details = display_contact(contact);
        writeln!(self.output, "\n{}", details)?;
        Ok(())
    }

    fn edit_contact(&mut self) -> Result<(), AppError> {
        let Some(id) = self.select_contact()? else {
            return Ok(());
        };
        let mut draft = ContactDraft::from_contact(self.find(&id)?);

        // Empty answers keep the current value, "-" clears it
        let Some(name) = self.prompt(&format!("Name [{}]", draft.name))? else {
            return Ok(());
        };
        let Some(phone) = self.prompt(&format!("Phone [{}]", draft.phone))? else {
            return Ok(());
        };
        let Some(email) = self.prompt(&format!("Email [{}] (- to clear)", draft.email))? else {
            return Ok(());
        };

        apply_answer(&mut draft.name, name);
        apply_answer(&mut draft.phone, phone);
        apply_answer(&mut draft.email, email);
        draft.validate()?;

        self.store.update(&id, draft.name, draft.phone, draft.email)?;

        writeln!(self.output, "Contact updated successfully!")?;
        let details = display_contact(self.find(&id)?);
        writeln!(self.output, "{}", details)?;
        Ok(())
    }

    fn change_photo(&mut self) -> Result<(), AppError> {
        let Some(id) = self.select_contact()? else {
            return Ok(());
        };
        let Some(photo_path) = self.prompt("Enter photo path (empty to remove photo)")? else {
            return Ok(());
        };

        let photo = load_photo(&photo_path)?;
        self.store.replace_image(&id, photo)?;

        writeln!(self.output, "Photo updated successfully!")?;
        Ok(())
    }

    fn delete_contact(&mut self) -> Result<(), AppError> {
        let Some(id) = self.select_contact()? else {
            return Ok(());
        };

        let message = format!(
            "\nAre you sure you want to delete this contact from your contact list \n{}\n? (y/n)",
            display_contact(self.find(&id)?)
        );
        let Some(consent) = self.prompt(&message)? else {
            return Ok(());
        };
        if consent.to_lowercase() != "y" {
            return Ok(());
        }

        self.store.remove(&id)?;
        writeln!(self.output, "Contact deleted successfully!")?;
        Ok(())
    }

    fn export_contacts(&mut self) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(self.store.list())?;
        writeln!(self.output, "{}", json)?;
        Ok(())
    }

    /// Asks for a position in the listing and resolves it to a contact id.
    fn select_contact(&mut self) -> Result<Option<Uuid>, AppError> {
        if self.store.is_empty() {
            writeln!(self.output, "No contact in contact list!")?;
            return Ok(None);
        }
        self.list_contacts()?;

        let Some(answer) = self.prompt("Enter contact number from the list")? else {
            return Ok(None);
        };
        let position = answer.parse::<usize>()?;

        match position.checked_sub(1).and_then(|i| self.store.list().get(i)) {
            Some(contact) => Ok(Some(contact.id())),
            None => Err(AppError::NotFound(format!("Contact #{}", position))),
        }
    }

    fn find(&self, id: &Uuid) -> Result<&Contact, AppError> {
        self.store
            .get(id)
            .ok_or_else(|| AppError::NotFound("Contact".to_string()))
    }

    fn show_menu(&mut self) -> Result<(), AppError> {
        writeln!(self.output)?;
        for (key, label) in MenuCommand::MENU {
            writeln!(self.output, "{}. {}", key, label)?;
        }
        write!(self.output, "> ")?;
        self.output.flush()?;
        Ok(())
    }

    /// `None` when the user backs out with `*` or input ends.
    fn prompt(&mut self, message: &str) -> Result<Option<String>, AppError> {
        writeln!(self.output, "\n{} \n* to go back: ", message)?;
        write!(self.output, "> ")?;
        self.output.flush()?;

        match self.read_line()? {
            Some(input) if input == "*" => Ok(None),
            other => Ok(other),
        }
    }

    fn read_line(&mut self) -> Result<Option<String>, AppError> {
        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }
}

/// Photo bytes for a path answer. Empty means no photo.
///
/// A file that cannot be read is bad input, not a broken session.
fn load_photo(path: &str) -> Result<Option<Vec<u8>>, AppError> {
    if path.is_empty() {
        return Ok(None);
    }

    match media::read_photo(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(AppError::Io(e)) => Err(AppError::Validation(format!(
            "Could not read photo {}: {}",
            path, e
        ))),
        Err(e) => Err(e),
    }
}

fn apply_answer(field: &mut String, answer: String) {
    if answer == "-" {
        field.clear();
    } else if !answer.is_empty() {
        *field = answer;
    }
}

pub fn display_contact(contact: &Contact) -> String {
    let photo = match contact.image_bytes() {
        Some(bytes) => format!("{} bytes ({})", bytes.len(), contact.image_ref()),
        None => "none".to_string(),
    };

    format!(
        "Name: {}\n\
        Phone: {}\n\
        Email: {}\n\
        Photo: {}",
        contact.name(),
        contact.phone(),
        contact.email(),
        photo
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(store: ContactStore, script: &str) -> Result<(String, ContactStore), AppError> {
        let mut output = Vec::new();
        let store = {
            let mut session = Session::new(store, Cursor::new(script.as_bytes()), &mut output);
            session.run()?;
            session.into_store()
        };
        Ok((String::from_utf8_lossy(&output).into_owned(), store))
    }

    #[test]
    fn lists_seed_contacts() -> Result<(), AppError> {
        let (out, _) = run_script(ContactStore::seeded(), "2\n8\n")?;

        assert!(out.contains("  1. Ruben Alves"));
        assert!(out.contains("  2. João Alves"));
        assert!(out.contains("Bye!"));
        Ok(())
    }

    #[test]
    fn adds_contact_without_photo() -> Result<(), AppError> {
        let (out, store) = run_script(
            ContactStore::new(),
            "1\nAna Sousa\n+351912345678\nana@mail.pt\n\n8\n",
        )?;

        assert!(out.contains("Contact added successfully!"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].name(), "Ana Sousa");
        assert!(!store.list()[0].has_photo());
        Ok(())
    }

    #[test]
    fn rejects_invalid_phone() -> Result<(), AppError> {
        let (out, store) = run_script(ContactStore::new(), "1\nAna\n91a2\n\n8\n")?;

        assert!(out.contains("Validation failed: Number may contain only digits and +"));
        assert!(store.is_empty());
        Ok(())
    }

    #[test]
    fn edit_keeps_blank_fields() -> Result<(), AppError> {
        let (out, store) = run_script(ContactStore::seeded(), "4\n2\n\n123456\n\n8\n")?;

        assert!(out.contains("Contact updated successfully!"));
        let edited = &store.list()[1];
        assert_eq!(edited.name(), "João Alves");
        assert_eq!(edited.phone(), "123456");
        assert_eq!(edited.email(), "joao_alves@atec.com");
        Ok(())
    }

    #[test]
    fn delete_needs_confirmation() -> Result<(), AppError> {
        let (_, store) = run_script(ContactStore::seeded(), "6\n1\nn\n8\n")?;
        assert_eq!(store.len(), 2);

        let (out, store) = run_script(store, "6\n1\ny\n8\n")?;
        assert!(out.contains("Contact deleted successfully!"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].name(), "João Alves");
        Ok(())
    }

    #[test]
    fn dash_clears_email_on_edit() -> Result<(), AppError> {
        let (out, store) = run_script(ContactStore::seeded(), "4\n1\n\n\n-\n8\n")?;

        assert!(out.contains("Contact updated successfully!"));
        assert_eq!(store.list()[0].email(), "");
        assert_eq!(store.list()[0].phone(), "987654321");
        Ok(())
    }

    #[test]
    fn clearing_phone_on_edit_is_rejected() -> Result<(), AppError> {
        let (out, store) = run_script(ContactStore::seeded(), "4\n1\n\n-\n\n8\n")?;

        assert!(out.contains("Validation failed: Phone is required"));
        assert_eq!(store.list()[0].phone(), "987654321");
        Ok(())
    }

    #[test]
    fn unreadable_photo_keeps_session_alive() -> Result<(), AppError> {
        let (out, store) = run_script(
            ContactStore::new(),
            "1\nAna\n912\n\n/no/such/photo.jpg\n2\n8\n",
        )?;

        assert!(out.contains("Validation failed: Could not read photo /no/such/photo.jpg"));
        assert!(out.contains("No contact in contact list!"));
        assert!(out.contains("Bye!"));
        assert!(store.is_empty());
        Ok(())
    }

    #[test]
    fn unreadable_photo_on_change_leaves_contact_alone() -> Result<(), AppError> {
        let (out, store) = run_script(ContactStore::seeded(), "5\n1\n/no/such/photo.jpg\n8\n")?;

        assert!(out.contains("Could not read photo"));
        assert!(out.contains("Bye!"));
        assert!(!store.list()[0].has_photo());
        Ok(())
    }

    #[test]
    fn session_exposes_store_while_running() -> Result<(), AppError> {
        let mut output = Vec::new();
        let mut session = Session::new(
            ContactStore::new(),
            Cursor::new("1\nAna\n912\n\n\n8\n".as_bytes()),
            &mut output,
        );
        assert!(session.store().is_empty());

        session.run()?;
        assert_eq!(session.store().len(), 1);
        assert_eq!(session.store().list()[0].name(), "Ana");
        Ok(())
    }

    #[test]
    fn out_of_range_selection() -> Result<(), AppError> {
        let (out, _) = run_script(ContactStore::seeded(), "3\n7\n8\n")?;
        assert!(out.contains("Contact #7 Not found"));
        Ok(())
    }

    #[test]
    fn star_goes_back_to_menu() -> Result<(), AppError> {
        let (_, store) = run_script(ContactStore::seeded(), "1\n*\n8\n")?;
        assert_eq!(store.len(), 2);
        Ok(())
    }

    #[test]
    fn end_of_input_ends_session() -> Result<(), AppError> {
        let (out, _) = run_script(ContactStore::seeded(), "")?;
        assert!(out.contains("Bye!"));
        Ok(())
    }

    #[test]
    fn unknown_command_is_reported() -> Result<(), AppError> {
        let (out, _) = run_script(ContactStore::seeded(), "abc\n8\n")?;
        assert!(out.contains("Unrecognized command: 'abc'"));
        Ok(())
    }
}
