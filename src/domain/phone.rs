use crate::error::FlowError;
use serde::Serialize;
use std::fmt;

pub const PHONE_DIGITS: usize = 10;

/// The editable contents of a phone number field.
///
/// Accepts partial input, but never more than [`PHONE_DIGITS`] characters and
/// never anything other than ASCII digits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneInput(String);

impl PhoneInput {
    /// Replaces the field contents, leaving them untouched if `value` is rejected.
    pub fn edit(&mut self, value: &str) -> Result<(), FlowError> {
        if value.len() > PHONE_DIGITS || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FlowError::InvalidPhoneInput(value.to_string()));
        }
        self.0.clear();
        self.0.push_str(value);
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_complete(&self) -> bool {
        self.0.len() == PHONE_DIGITS
    }

    /// Returns the number once exactly [`PHONE_DIGITS`] digits have been entered.
    pub fn to_number(&self) -> Option<PhoneNumber> {
        self.is_complete().then(|| PhoneNumber(self.0.clone()))
    }
}

/// A complete phone number of exactly [`PHONE_DIGITS`] digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(value: &str) -> Result<Self, FlowError> {
        let mut input = PhoneInput::default();
        input.edit(value)?;
        input.to_number().ok_or(FlowError::IncompleteForm)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_input_is_accepted() {
        let mut input = PhoneInput::default();
        input.edit("0712").unwrap();
        assert_eq!(input.as_str(), "0712");
        assert!(!input.is_complete());
        assert!(input.to_number().is_none());
    }

    #[test]
    fn test_rejected_edit_keeps_previous_value() {
        let mut input = PhoneInput::default();
        input.edit("0712345678").unwrap();

        assert_eq!(
            input.edit("07123456789"),
            Err(FlowError::InvalidPhoneInput("07123456789".to_string()))
        );
        assert!(input.edit("07123-5678").is_err());
        assert!(input.edit("+254712345").is_err());
        assert_eq!(input.as_str(), "0712345678");
    }

    #[test]
    fn test_complete_input_yields_number() {
        let mut input = PhoneInput::default();
        input.edit("0798765432").unwrap();
        assert_eq!(input.to_number().unwrap().as_str(), "0798765432");
    }

    #[test]
    fn test_phone_number_parse() {
        assert!(PhoneNumber::parse("0712345678").is_ok());
        assert_eq!(PhoneNumber::parse("071234"), Err(FlowError::IncompleteForm));
        assert!(matches!(
            PhoneNumber::parse("abc"),
            Err(FlowError::InvalidPhoneInput(_))
        ));
    }
}
