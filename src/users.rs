//! In-memory user directory.
//!
//! Holds the locally edited copy of the remote user list. Nothing here is
//! ever written back to the server.

use tracing::{debug, warn};

use crate::api::{Company, User, UserId};

/// The locally held user collection.
///
/// Identifiers handed out by [`UserDirectory::add`] come from a counter that
/// only moves forward, so an identifier is never reused after a delete.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    /// Users in display order.
    users: Vec<User>,
    /// The identifier the next created user receives, `None` once the
    /// identifier space is used up.
    next_id: Option<UserId>,
}

/// Fields of a user as entered in the form, without an identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    /// Company name only.
    pub company: String,
    pub street: String,
    pub city: String,
    pub zipcode: String,
}

impl UserDraft {
    /// Build a draft from an existing user, collapsing the company to its name.
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            website: user.website.clone(),
            company: user.company.name.clone(),
            street: user.address.street.clone(),
            city: user.address.city.clone(),
            zipcode: user.address.zipcode.clone(),
        }
    }

    /// Write the draft's fields into `user`.
    ///
    /// Fields the form does not edit (company catch phrase, suite, ...) keep
    /// their current values.
    pub fn apply_to(&self, user: &mut User) {
        user.name = self.name.clone();
        user.username = self.username.clone();
        user.email = self.email.clone();
        user.phone = self.phone.clone();
        user.website = self.website.clone();
        user.company.name = self.company.clone();
        user.address.street = self.street.clone();
        user.address.city = self.city.clone();
        user.address.zipcode = self.zipcode.clone();
    }

    /// Turn the draft into a new user with the given identifier.
    pub fn into_user(self, id: UserId) -> User {
        let mut user = User {
            id,
            name: String::new(),
            username: String::new(),
            email: String::new(),
            phone: String::new(),
            website: String::new(),
            company: Company::default(),
            address: Default::default(),
        };
        self.apply_to(&mut user);
        user
    }
}

impl UserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            next_id: Some(1),
        }
    }

    /// Replace the whole collection with a freshly fetched list.
    ///
    /// The identifier counter restarts just above the largest identifier.
    pub fn load(&mut self, users: Vec<User>) {
        self.next_id = match users.iter().map(|u| u.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        if self.next_id.is_none() {
            warn!("Fetched users use the largest identifier; adding is disabled");
        }
        self.users = users;
        debug!(count = self.users.len(), next_id = ?self.next_id, "Directory loaded");
    }

    /// Drop every user.
    pub fn clear(&mut self) {
        self.users.clear();
        self.next_id = Some(1);
    }

    /// Number of users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Append a new user built from `draft` and return its identifier.
    ///
    /// Returns `None`, leaving the directory untouched, when no identifier
    /// is left to hand out.
    pub fn add(&mut self, draft: UserDraft) -> Option<UserId> {
        let id = self.next_id?;
        self.next_id = id.checked_add(1);
        self.users.push(draft.into_user(id));
        debug!(id, "User added");
        Some(id)
    }

    /// Overwrite the editable fields of the user with identifier `id`.
    ///
    /// Returns `false` when no such user exists.
    pub fn update(&mut self, id: UserId, draft: &UserDraft) -> bool {
        match self.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                draft.apply_to(user);
                debug!(id, "User updated");
                true
            }
            None => false,
        }
    }

    /// Remove the user with identifier `id`.
    ///
    /// Returns the removed user, or `None` when no such user exists.
    pub fn remove(&mut self, id: UserId) -> Option<User> {
        let index = self.users.iter().position(|u| u.id == id)?;
        debug!(id, "User removed");
        Some(self.users.remove(index))
    }

    /// Users whose name contains `query`, ignoring case.
    ///
    /// An empty query matches everyone.
    pub fn filter<'a>(&'a self, query: &str) -> Vec<&'a User> {
        let query_lower = query.to_lowercase();
        self.users
            .iter()
            .filter(|u| u.name_matches(&query_lower))
            .collect()
    }
}

#[cfg(test)]
impl UserDirectory {
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn next_id(&self) -> Option<UserId> {
        self.next_id
    }
}
