use serde::Deserialize;
use validator::Validate;

/// Fields a visitor submits through the contact form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_subject_is_invalid() {
        let input = ContactInput { email: "parent@mail.test".into(), subject: String::new(), message: "hello".into() };
        assert!(input.validate().is_err());
    }

    #[test]
    fn well_formed_input_passes() {
        let input = ContactInput { email: "parent@mail.test".into(), subject: "Tuition".into(), message: "How much?".into() };
        assert!(input.validate().is_ok());
    }
}
