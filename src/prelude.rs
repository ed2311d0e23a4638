pub use crate::cli::{Session, command, display_contact, run_app};
pub use crate::domain::{
    contact::{self, Contact, DEFAULT_IMAGE_REF},
    store::{ContactStore, SubscriptionId},
    uuid::{self, Uuid},
    validation::{ContactDraft, ValidationReq, is_valid_email, is_valid_phone},
};
pub use crate::errors::AppError;
pub use crate::media::read_photo;
