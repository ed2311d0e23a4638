use core::fmt;

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    Json(serde_json::Error),
    NotFound(String),
    ParseCommand(String),
    ParseInt(std::num::ParseIntError),
    Validation(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::ParseInt(err)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "I/O error on terminal or file: {}", e),
            AppError::Json(e) => write!(f, "Could not encode contacts as JSON: {}", e),
            AppError::NotFound(item) => write!(f, "{} Not found", item),
            AppError::ParseCommand(cmd) => write!(f, "Unrecognized command: '{}'", cmd),
            AppError::ParseInt(e) => write!(f, "Invalid number format: {}", e),
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {

    use crate::domain::validation::{ValidationReq, is_valid_phone};

    use super::*;

    #[test]
    fn confirm_parse_int_error_message() {
        let wrong_string = "abc".parse::<usize>().unwrap_err();
        let err = AppError::ParseInt(wrong_string);

        assert!(format!("{}", err).contains("Invalid number format: "));
    }

    #[test]
    fn confirm_validation_error() {
        assert!(!is_valid_phone("12a34"));

        let err = AppError::Validation(ValidationReq::phone_req());
        assert_eq!(
            err.to_string(),
            "Validation failed: Number may contain only digits and +"
        );
    }

    #[test]
    fn confirm_json_error_message() {
        let err = AppError::from(serde_json::from_str::<u8>("x").unwrap_err());
        assert!(err.to_string().starts_with("Could not encode contacts as JSON: "));
    }

    #[test]
    fn confirm_not_found_message() {
        let err = AppError::NotFound("Contact".to_string());
        assert_eq!(err.to_string(), "Contact Not found");
    }
}
