//! Session state: the value store, the last-result slot, and the login.
//!
//! The executor only commits to the session after a whole line succeeds,
//! so nothing here is provisional. Pending bindings for the line being
//! executed live in the executor, not here.

use std::collections::BTreeMap;

use grush_types::Value;

use crate::store::User;

/// Per-session mutable state.
#[derive(Debug, Default)]
pub struct Session {
    vars: BTreeMap<String, Value>,
    last_result: Value,
    current_user: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a variable.
    pub fn get_var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Set or replace a variable.
    pub fn set_var(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// All variables, sorted by name.
    pub fn vars(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Result of the last successful line.
    pub fn last_result(&self) -> &Value {
        &self.last_result
    }

    pub fn set_last_result(&mut self, value: Value) {
        self.last_result = value;
    }

    /// The logged-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn login(&mut self, user: User) {
        self.current_user = Some(user);
    }

    /// Clear the login; returns the user that was logged in.
    pub fn logout(&mut self) -> Option<User> {
        self.current_user.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let mut session = Session::new();
        session.set_var("bob", Value::String("u1".into()));
        assert_eq!(session.get_var("bob"), Some(&Value::String("u1".into())));
        session.set_var("bob", Value::Int(2));
        assert_eq!(session.get_var("bob"), Some(&Value::Int(2)));
    }

    #[test]
    fn login_logout() {
        let mut session = Session::new();
        assert!(session.current_user().is_none());
        session.login(User {
            id: "u1".into(),
            name: "ana".into(),
        });
        assert_eq!(session.current_user().unwrap().id, "u1");
        let out = session.logout().unwrap();
        assert_eq!(out.name, "ana");
        assert!(session.current_user().is_none());
    }
}
