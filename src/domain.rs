pub mod contact;
pub mod store;
pub mod validation;

pub use crate::errors::AppError;
pub use uuid::{self, Uuid};

pub use contact::Contact;
pub use store::{ContactStore, SubscriptionId};
pub use validation::{ContactDraft, ValidationReq, is_valid_email, is_valid_phone};
