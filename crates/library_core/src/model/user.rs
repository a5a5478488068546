//! Library user record and partial-update request.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A registered borrower, keyed by `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub user_id: String,
}

impl User {
    pub fn new(name: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            user_id: user_id.into(),
        }
    }

    pub(crate) fn apply(&mut self, update: &UserUpdate) -> bool {
        match &update.name {
            Some(name) => {
                self.name = name.clone();
                true
            }
            None => false,
        }
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "User ID: {}, Name: {}", self.user_id, self.name)
    }
}

/// Field-level patch for `UserDirectory::update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: Option<String>,
}

impl UserUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
