pub mod command;
pub mod run;

pub use run::{Session, display_contact, run_app};
