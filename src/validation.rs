//! Form validation for the login and registration screens

use crate::binding::Binding;

/// Minimum password length used when no other policy is configured
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

/// Pure validity rules for credential forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormValidator {
    min_password_length: usize,
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PASSWORD_LENGTH)
    }
}

impl FormValidator {
    /// Rules with the given minimum password length
    pub fn new(min_password_length: usize) -> Self {
        Self {
            min_password_length,
        }
    }

    /// Minimum password length in characters
    pub fn min_password_length(&self) -> usize {
        self.min_password_length
    }

    /// Email is present, non-empty and has an `@`
    pub fn is_email_valid(&self, email: Option<&str>) -> bool {
        matches!(email, Some(email) if !email.is_empty() && email.contains('@'))
    }

    /// Password is present and at least the policy length, counted in characters
    pub fn is_password_valid(&self, password: Option<&str>) -> bool {
        matches!(password, Some(password) if password.chars().count() >= self.min_password_length)
    }

    /// Login validity: both the email and the password rule hold
    pub fn validate_login(&self, email: Option<&str>, password: Option<&str>) -> bool {
        self.is_email_valid(email) && self.is_password_valid(password)
    }

    /// Registration validity: a non-blank full name plus the login rules
    pub fn validate_registration(
        &self,
        full_name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> bool {
        let has_name = matches!(full_name, Some(name) if !name.trim().is_empty());
        has_name && self.validate_login(email, password)
    }
}

/// Current login input and its derived validity
#[derive(Debug, Default)]
pub struct LoginFormState {
    email: Option<String>,
    password: Option<String>,
    validator: FormValidator,
    /// Published on every edit
    pub is_form_valid: Binding<bool>,
}

impl LoginFormState {
    /// An empty form checked by `validator`
    pub fn new(validator: FormValidator) -> Self {
        Self {
            email: None,
            password: None,
            validator,
            is_form_valid: Binding::new(),
        }
    }

    /// Replace the email and publish validity
    pub fn set_email(&mut self, email: Option<&str>) {
        self.email = email.map(str::to_string);
        self.publish();
    }

    /// Replace the password and publish validity
    pub fn set_password(&mut self, password: Option<&str>) {
        self.password = password.map(str::to_string);
        self.publish();
    }

    /// Current email input
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Current password input
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Whether the current input passes the login rules
    pub fn is_valid(&self) -> bool {
        self.validator
            .validate_login(self.email.as_deref(), self.password.as_deref())
    }

    fn publish(&mut self) {
        let valid = self.is_valid();
        self.is_form_valid.set(valid);
    }
}

/// Current registration input and its derived validity
#[derive(Debug, Default)]
pub struct RegistrationFormState {
    full_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    validator: FormValidator,
    pub is_form_valid: Binding<bool>,
}

impl RegistrationFormState {
    /// An empty form checked by `validator`
    pub fn new(validator: FormValidator) -> Self {
        Self {
            validator,
            ..Default::default()
        }
    }

    /// Replace the full name and publish validity
    pub fn set_full_name(&mut self, full_name: Option<&str>) {
        self.full_name = full_name.map(str::to_string);
        self.publish();
    }

    /// Replace the email and publish validity
    pub fn set_email(&mut self, email: Option<&str>) {
        self.email = email.map(str::to_string);
        self.publish();
    }

    /// Replace the password and publish validity
    pub fn set_password(&mut self, password: Option<&str>) {
        self.password = password.map(str::to_string);
        self.publish();
    }

    /// Current full name input
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    /// Current email input
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Current password input
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Whether the current input passes the registration rules
    pub fn is_valid(&self) -> bool {
        self.validator.validate_registration(
            self.full_name.as_deref(),
            self.email.as_deref(),
            self.password.as_deref(),
        )
    }

    fn publish(&mut self) {
        let valid = self.is_valid();
        self.is_form_valid.set(valid);
    }
}
