//! Contact form model and validation.
//!
//! Submission is local only: a valid form produces a thank-you notice and is
//! cleared, nothing leaves the process.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Shown after a successful submit.
pub const THANK_YOU: &str = "Thank you for your message! We will get back to you soon.";

/// Why a submit was rejected.  The display text is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Input fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Name,
    Email,
    Message,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Message,
            Field::Message => Field::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Name => Field::Message,
            Field::Email => Field::Name,
            Field::Message => Field::Email,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    /// Check trimmed values without touching the form.
    pub fn validate(&self) -> Result<(), FormError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(FormError::MissingFields);
        }
        if !is_valid_email(email) {
            return Err(FormError::InvalidEmail);
        }
        Ok(())
    }

    /// Validate and, on success, reset every field.  Returns the notice to
    /// show the user.
    pub fn submit(&mut self) -> Result<&'static str, FormError> {
        self.validate()?;
        tracing::debug!(email = %self.email.trim(), "contact form accepted");
        *self = Self::default();
        Ok(THANK_YOU)
    }
}

/// `something@something.something`, no whitespace, exactly one `@` split.
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE
        .get_or_init(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern must compile")
        })
        .is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[test]
    fn blank_or_whitespace_fields_are_missing() {
        assert_eq!(ContactForm::default().validate(), Err(FormError::MissingFields));
        assert_eq!(
            filled("Ana", "ana@example.com", "   ").validate(),
            Err(FormError::MissingFields)
        );
        assert_eq!(
            FormError::MissingFields.to_string(),
            "Please fill in all fields."
        );
    }

    #[test]
    fn email_shape_is_checked() {
        for bad in ["ana", "ana@example", "@example.com", "a na@example.com", "ana@@x.io"] {
            assert_eq!(
                filled("Ana", bad, "hi").validate(),
                Err(FormError::InvalidEmail),
                "{bad} should be rejected"
            );
        }
        assert!(is_valid_email("ana@example.co.uk"));
        assert_eq!(
            FormError::InvalidEmail.to_string(),
            "Please enter a valid email address."
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(filled(" Ana ", "  ana@example.com ", " hi ").validate(), Ok(()));
    }

    #[test]
    fn successful_submit_resets_form() {
        let mut form = filled("Ana", "ana@example.com", "Hello");
        assert_eq!(form.submit(), Ok(THANK_YOU));
        assert_eq!(form, ContactForm::default());
    }

    #[test]
    fn failed_submit_keeps_input() {
        let mut form = filled("Ana", "nope", "Hello");
        assert_eq!(form.submit(), Err(FormError::InvalidEmail));
        assert_eq!(form.email, "nope");
    }

    #[test]
    fn fields_cycle_in_tab_order() {
        assert_eq!(Field::Name.next(), Field::Email);
        assert_eq!(Field::Message.next(), Field::Name);
        assert_eq!(Field::Name.prev(), Field::Message);
        let mut form = ContactForm::default();
        form.value_mut(Field::Email).push_str("x@y.z");
        assert_eq!(form.value(Field::Email), "x@y.z");
    }
}
