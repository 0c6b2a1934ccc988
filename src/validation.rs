use crate::types::ValidationError;

/// Rejects a form field that is empty once surrounding whitespace is removed.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub fn validate_post(title: &str, body: &str) -> Result<(), ValidationError> {
    require("title", title)?;
    require("body", body)?;
    Ok(())
}

pub fn validate_report(title: &str, description: &str) -> Result<(), ValidationError> {
    require("title", title)?;
    require("description", description)?;
    Ok(())
}
