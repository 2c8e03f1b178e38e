use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("valid regex"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+.,/|}{\";<>?";

/// Raw signup form body. Field names match the HTML form.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SignupForm {
    #[serde(default, rename = "firstName")]
    pub first_name: String,
    #[serde(default, rename = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default, rename = "userType")]
    pub user_type: String,
    #[serde(default)]
    pub terms: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Trimmed, lowercased form used for the uniqueness check and storage.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check every signup rule and return the failures in declaration order.
/// Plain values in, plain errors out.
#[must_use]
pub fn validate_signup(form: &SignupForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let first_name = form.first_name.trim();
    if first_name.chars().count() < 2 {
        errors.push(FieldError::new(
            "firstName",
            "First Name should be atleast 2 character long",
        ));
    }
    if !NAME_RE.is_match(first_name) {
        errors.push(FieldError::new(
            "firstName",
            "First Name should contain only alphabets",
        ));
    }

    if !form.last_name.is_empty() && !NAME_RE.is_match(&form.last_name) {
        errors.push(FieldError::new(
            "lastName",
            "last Name should contain only alphabets",
        ));
    }

    if !EMAIL_RE.is_match(normalize_email(&form.email).as_str()) {
        errors.push(FieldError::new("email", "Please enter a valid email"));
    }

    let password = form.password.trim();
    if password.chars().count() < 8 {
        errors.push(FieldError::new(
            "password",
            "Password should be atleast 8 characters long",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push(FieldError::new(
            "password",
            "Password should have atleast 1 lower character",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push(FieldError::new(
            "password",
            "Password should have atleast 1 uppercase character",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(FieldError::new(
            "password",
            "Password should have atleast 1 number",
        ));
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        errors.push(FieldError::new(
            "password",
            "Password should have atleast 1 special character",
        ));
    }

    if form.confirm_password.trim() != form.password {
        errors.push(FieldError::new("confirm_password", "Passwords do not match"));
    }

    if form.user_type.is_empty() {
        errors.push(FieldError::new("userType", "UserType is required"));
    } else if form.user_type != "guest" && form.user_type != "host" {
        errors.push(FieldError::new("userType", "Invalid user type"));
    }

    if form.terms.is_empty() {
        errors.push(FieldError::new("terms", "please fill this"));
    } else if form.terms != "on" {
        errors.push(FieldError::new(
            "terms",
            "please accept the terms and condition",
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignupForm {
        SignupForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "Aa1!aaaa".to_string(),
            confirm_password: "Aa1!aaaa".to_string(),
            user_type: "guest".to_string(),
            terms: "on".to_string(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(validate_signup(&valid_form()).is_empty());
    }

    #[test]
    fn short_first_name() {
        let mut form = valid_form();
        form.first_name = "A".to_string();
        let errors = validate_signup(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "First Name should be atleast 2 character long");
    }

    #[test]
    fn numeric_first_name() {
        let mut form = valid_form();
        form.first_name = "Ada99".to_string();
        let errors = validate_signup(&form);
        assert_eq!(errors[0].message, "First Name should contain only alphabets");
    }

    #[test]
    fn empty_last_name_is_fine() {
        let mut form = valid_form();
        form.last_name = String::new();
        assert!(validate_signup(&form).is_empty());
    }

    #[test]
    fn bad_email() {
        let mut form = valid_form();
        form.email = "not-an-email".to_string();
        let errors = validate_signup(&form);
        assert_eq!(errors[0].message, "Please enter a valid email");
    }

    #[test]
    fn weak_passwords_collect_every_failure() {
        let mut form = valid_form();
        form.password = "short".to_string();
        form.confirm_password = "short".to_string();
        let messages: Vec<_> = validate_signup(&form)
            .iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Password should be atleast 8 characters long",
                "Password should have atleast 1 uppercase character",
                "Password should have atleast 1 number",
                "Password should have atleast 1 special character",
            ]
        );
    }

    #[test]
    fn mismatched_confirmation() {
        let mut form = valid_form();
        form.confirm_password = "Bb2@bbbb".to_string();
        let errors = validate_signup(&form);
        assert_eq!(errors[0].message, "Passwords do not match");
    }

    #[test]
    fn user_type_must_be_known() {
        let mut form = valid_form();
        form.user_type = "admin".to_string();
        assert_eq!(validate_signup(&form)[0].message, "Invalid user type");

        form.user_type = String::new();
        assert_eq!(validate_signup(&form)[0].message, "UserType is required");
    }

    #[test]
    fn terms_must_be_accepted() {
        let mut form = valid_form();
        form.terms = String::new();
        assert_eq!(validate_signup(&form)[0].message, "please fill this");

        form.terms = "off".to_string();
        assert_eq!(
            validate_signup(&form)[0].message,
            "please accept the terms and condition"
        );
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }
}
