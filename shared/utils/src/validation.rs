use crate::error::{LeadformError, LeadformResult};
use validator::{Validate, ValidationErrors};

pub fn validate_model<T: Validate>(model: &T) -> LeadformResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_messages = format_validation_errors(&errors);
            Err(LeadformError::validation("model", error_messages))
        }
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = match &error.code {
                std::borrow::Cow::Borrowed("email") => "Invalid email format".to_string(),
                std::borrow::Cow::Borrowed("length") => {
                    format!("Length validation failed for field '{}'", field)
                }
                std::borrow::Cow::Borrowed("range") => {
                    format!("Value out of range for field '{}'", field)
                }
                std::borrow::Cow::Borrowed("required") => {
                    format!("Field '{}' is required", field)
                }
                _ => format!("Validation failed for field '{}': {}", field, error.code),
            };
            messages.push(message);
        }
    }

    messages.join(", ")
}

/// Parse the comma-formatted order total the form submits (`"1,234,000"`).
///
/// A trailing currency suffix is tolerated; only the leading digit run after
/// comma removal is read.
pub fn parse_total_amount(raw: &str) -> LeadformResult<i64> {
    let cleaned = raw.trim().replace(',', "");
    let digits: String = cleaned.chars().take_while(|c| c.is_ascii_digit()).collect();

    digits.parse::<i64>().map_err(|_| {
        LeadformError::validation("total", format!("Not a parseable amount: '{raw}'"))
    })
}
