//! User directory manager.
//!
//! Same shape as the book catalog, keyed on `user_id`.

use crate::model::dataset::DatasetSection;
use crate::model::user::{User, UserUpdate};
use crate::service::{EntityKind, ManagerError, ManagerResult};
use crate::storage::DatasetStore;
use log::{debug, info, warn};

/// In-memory user collection synchronized with a `DatasetStore`.
pub struct UserDirectory<'s, S: DatasetStore + ?Sized> {
    store: &'s S,
    users: Vec<User>,
}

impl<'s, S: DatasetStore + ?Sized> UserDirectory<'s, S> {
    /// Loads the `users` section from `store`.
    pub fn load(store: &'s S) -> ManagerResult<Self> {
        let users = store.read()?.users;
        info!(
            "event=directory_load module=users status=ok count={}",
            users.len()
        );
        Ok(Self { store, users })
    }

    pub fn add(&mut self, user: User) -> ManagerResult<()> {
        if self.position(&user.user_id).is_some() {
            warn!(
                "event=user_add module=users status=rejected reason=duplicate_user_id user_id={}",
                user.user_id
            );
            return Err(ManagerError::duplicate(EntityKind::User, user.user_id));
        }

        let user_id = user.user_id.clone();
        self.users.push(user);
        self.persist()?;
        info!("event=user_add module=users status=ok user_id={user_id}");
        Ok(())
    }

    pub fn update(&mut self, user_id: &str, update: &UserUpdate) -> ManagerResult<()> {
        let Some(index) = self.position(user_id) else {
            warn!(
                "event=user_update module=users status=rejected reason=not_found user_id={user_id}"
            );
            return Err(ManagerError::not_found(EntityKind::User, user_id));
        };

        if !self.users[index].apply(update) {
            debug!("event=user_update module=users status=noop user_id={user_id}");
            return Ok(());
        }

        self.persist()?;
        info!("event=user_update module=users status=ok user_id={user_id}");
        Ok(())
    }

    pub fn delete(&mut self, user_id: &str) -> ManagerResult<User> {
        let Some(index) = self.position(user_id) else {
            warn!(
                "event=user_delete module=users status=rejected reason=not_found user_id={user_id}"
            );
            return Err(ManagerError::not_found(EntityKind::User, user_id));
        };

        let removed = self.users.remove(index);
        self.persist()?;
        info!("event=user_delete module=users status=ok user_id={user_id}");
        Ok(removed)
    }

    pub fn find_by_id(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.user_id == user_id)
    }

    /// Case-insensitive substring match on name.
    pub fn find_by_name(&self, text: &str) -> Vec<&User> {
        let needle = text.to_lowercase();
        self.users
            .iter()
            .filter(|user| user.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn list_all(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn position(&self, user_id: &str) -> Option<usize> {
        self.users.iter().position(|user| user.user_id == user_id)
    }

    fn persist(&self) -> ManagerResult<()> {
        self.store
            .write_section(DatasetSection::Users(&self.users))?;
        debug!(
            "event=users_saved module=users status=ok count={}",
            self.users.len()
        );
        Ok(())
    }
}
