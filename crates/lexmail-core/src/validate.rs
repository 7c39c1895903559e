use thiserror::Error;

/// A local precondition that blocks a request before any I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please paste an email first")]
    EmptyEmail,
    #[error("Run analysis first or use Process")]
    MissingAnalysis,
}

/// Reject email text that is empty once surrounding whitespace is removed.
///
/// Returns the text untrimmed: the service receives exactly what was pasted.
pub fn validate_email_text(text: &str) -> Result<&str, ValidationError> {
    if text.trim().is_empty() {
        Err(ValidationError::EmptyEmail)
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        for text in ["", " ", "\n\t  \r\n"] {
            assert_eq!(validate_email_text(text), Err(ValidationError::EmptyEmail));
        }
    }

    #[test]
    fn text_is_returned_untrimmed() {
        assert_eq!(validate_email_text("  Hi\n"), Ok("  Hi\n"));
    }

    #[test]
    fn messages_match_notices() {
        assert_eq!(
            ValidationError::EmptyEmail.to_string(),
            "Please paste an email first"
        );
        assert_eq!(
            ValidationError::MissingAnalysis.to_string(),
            "Run analysis first or use Process"
        );
    }
}
