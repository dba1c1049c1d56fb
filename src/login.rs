//! Login screen flow
//!
//! Keystrokes feed the form, the form publishes its validity, and the submit
//! control is enabled only while the form is valid and no attempt is in
//! flight.

use log::{info, warn};

use crate::auth::{IdentityProvider, Session};
use crate::binding::Binding;
use crate::error::{Error, Result};
use crate::validation::{FormValidator, LoginFormState};

/// Login screen state: form input, in-flight flag and submit control
pub struct LoginFlow {
    form: LoginFormState,
    is_logging_in: Binding<bool>,
    submit_enabled: Binding<bool>,
}

impl LoginFlow {
    /// A flow whose form applies `validator`
    pub fn new(validator: FormValidator) -> Self {
        Self {
            form: LoginFormState::new(validator),
            is_logging_in: Binding::with_value(false),
            submit_enabled: Binding::with_value(false),
        }
    }

    /// The underlying form input
    pub fn form(&self) -> &LoginFormState {
        &self.form
    }

    /// Replace the email and refresh the submit control
    pub fn set_email(&mut self, email: Option<&str>) {
        self.form.set_email(email);
        self.refresh_submit();
    }

    /// Replace the password and refresh the submit control
    pub fn set_password(&mut self, password: Option<&str>) {
        self.form.set_password(password);
        self.refresh_submit();
    }

    /// Observe form validity after every edit
    pub fn on_validity_change<F>(&mut self, observer: F)
    where
        F: FnMut(&bool) + 'static,
    {
        self.form.is_form_valid.on_change(observer);
    }

    /// Observe the in-flight flag
    pub fn on_logging_in_change<F>(&mut self, observer: F)
    where
        F: FnMut(&bool) + 'static,
    {
        self.is_logging_in.on_change(observer);
    }

    /// Observe whether the submit control is enabled
    pub fn on_submit_enabled_change<F>(&mut self, observer: F)
    where
        F: FnMut(&bool) + 'static,
    {
        self.submit_enabled.on_change(observer);
    }

    /// An attempt is in flight
    pub fn is_logging_in(&self) -> bool {
        self.is_logging_in.value().unwrap_or(false)
    }

    /// The form is valid and nothing is in flight
    pub fn can_submit(&self) -> bool {
        self.form.is_valid() && !self.is_logging_in()
    }

    /// Authenticate with the current form values.
    ///
    /// Rejected with `Error::SubmissionBlocked` while invalid or in flight.
    /// On failure the control is re-enabled and the error returned; on
    /// success the caller hands over to the session gate.
    pub async fn submit(&mut self, identity: &dyn IdentityProvider) -> Result<Session> {
        if !self.can_submit() {
            return Err(Error::SubmissionBlocked);
        }

        let email = self.form.email().unwrap_or_default().to_string();
        let password = self.form.password().unwrap_or_default().to_string();

        self.is_logging_in.set(true);
        self.refresh_submit();

        let result = identity.authenticate(&email, &password).await;

        self.is_logging_in.set(false);
        self.refresh_submit();

        match &result {
            Ok(session) => info!("Login succeeded for {}", session.user_id),
            Err(err) => warn!("Login failed: {}", err),
        }
        result
    }

    /// Unlock the form after an abandoned submission
    pub fn cancel_submission(&mut self) {
        if self.is_logging_in() {
            self.is_logging_in.set(false);
            self.refresh_submit();
        }
    }

    fn refresh_submit(&mut self) {
        let enabled = self.can_submit();
        self.submit_enabled.set(enabled);
    }
}

impl Default for LoginFlow {
    fn default() -> Self {
        Self::new(FormValidator::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_submit_enabled_follows_form() {
        let enabled = Rc::new(RefCell::new(Vec::new()));
        let mut flow = LoginFlow::default();
        let sink = Rc::clone(&enabled);
        flow.on_submit_enabled_change(move |e| sink.borrow_mut().push(*e));

        flow.set_email(Some("jane@example.com"));
        flow.set_password(Some("secret1"));
        flow.set_password(Some("sec"));

        assert_eq!(*enabled.borrow(), vec![false, true, false]);
        assert!(!flow.can_submit());
    }

    #[test]
    fn test_cancel_submission_is_noop_when_idle() {
        let mut flow = LoginFlow::default();
        flow.cancel_submission();
        assert!(!flow.is_logging_in());
    }
}
