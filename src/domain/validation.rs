use super::*;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$"));

pub fn is_valid_phone(phone: &str) -> bool {
    // Only digits and '+', anywhere. Empty passes.
    phone.chars().all(|c| c.is_ascii_digit() || c == '+')
}

pub fn is_valid_email(email: &str) -> bool {
    match &*EMAIL_RE {
        Ok(re) => re.is_match(email),
        Err(_) => false,
    }
}

pub enum ValidationReq {
    __,
}

impl ValidationReq {
    pub fn phone_required() -> String {
        "Phone is required".to_string()
    }

    pub fn phone_req() -> String {
        "Number may contain only digits and +".to_string()
    }

    pub fn email_req() -> String {
        "Email can be empty, or must look like name@domain.tld".to_string()
    }
}

/// Field values entered by a user, checked before they reach the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ContactDraft {
    pub fn new(name: String, phone: String, email: String) -> Self {
        ContactDraft { name, phone, email }
    }

    /// Draft prefilled from an existing contact, as the edit form starts out.
    pub fn from_contact(contact: &Contact) -> Self {
        ContactDraft {
            name: contact.name().to_string(),
            phone: contact.phone().to_string(),
            email: contact.email().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.phone.is_empty() {
            return Err(AppError::Validation(ValidationReq::phone_required()));
        }

        if !is_valid_phone(&self.phone) {
            return Err(AppError::Validation(ValidationReq::phone_req()));
        }

        if !self.email.is_empty() && !is_valid_email(&self.email) {
            return Err(AppError::Validation(ValidationReq::email_req()));
        }

        Ok(())
    }
}
