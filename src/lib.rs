pub mod cli;
pub mod domain;
pub mod errors;
pub mod media;
pub mod prelude;
