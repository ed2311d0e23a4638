use clap::{Parser, builder::BoolishValueParser};

use crate::errors::AppError;

#[derive(Parser, Debug)]
#[command(name = "contacts", version, about = "Interactive contact list")]
pub struct Cli {
    /// Start with an empty list instead of the example contacts
    #[arg(long, env = "CONTACTS_NO_SEED", value_parser = BoolishValueParser::new())]
    pub no_seed: bool,
}

/// Entries of the interactive menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    AddContact,
    ListContacts,
    ShowContact,
    EditContact,
    ChangePhoto,
    DeleteContact,
    ExportContacts,
    Exit,
}

impl MenuCommand {
    pub const MENU: [(&'static str, &'static str); 8] = [
        ("1", "Add Contact"),
        ("2", "List Contacts"),
        ("3", "Show Contact"),
        ("4", "Edit Contact"),
        ("5", "Change Photo"),
        ("6", "Delete Contact"),
        ("7", "Export Contacts (JSON)"),
        ("8", "Exit"),
    ];

    pub fn parse(action: &str) -> Result<Self, AppError> {
        match action.trim() {
            "1" => Ok(MenuCommand::AddContact),
            "2" => Ok(MenuCommand::ListContacts),
            "3" => Ok(MenuCommand::ShowContact),
            "4" => Ok(MenuCommand::EditContact),
            "5" => Ok(MenuCommand::ChangePhoto),
            "6" => Ok(MenuCommand::DeleteContact),
            "7" => Ok(MenuCommand::ExportContacts),
            "8" => Ok(MenuCommand::Exit),
            other => Err(AppError::ParseCommand(other.to_string())),
        }
    }
}
