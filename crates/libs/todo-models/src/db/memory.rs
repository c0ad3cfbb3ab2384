//! In-memory backend.
//!
//! Applies the same unique constraints as the MongoDB indexes, checked and
//! written under one lock so concurrent duplicates cannot both succeed.

use async_trait::async_trait;
use bson::{DateTime, oid::ObjectId};
use tokio::sync::RwLock;

use crate::deleted::{DeletedDoc, DeletedStore};
use crate::prelude::*;
use crate::todo::{TodoDoc, TodoStore};
use crate::user::{UserDoc, UserStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<UserDoc>>,
    todos: RwLock<Vec<TodoDoc>>,
    deleted: RwLock<Vec<DeletedDoc>>,
}

fn title_taken(todos: &[TodoDoc], skip: Option<&ObjectId>, user_id: &str, title: &str) -> bool {
    todos
        .iter()
        .filter(|t| Some(&t.id) != skip)
        .any(|t| t.user_id == user_id && t.title == title)
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: &UserDoc) -> Result<()> {
        let mut users = self.users.write().await;
        let duplicate = users.iter().any(|u| {
            u.email == user.email || u.phone == user.phone || u.user_id == user.user_id
        });
        if duplicate {
            return Err(Error::DuplicateKey);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn exists_with_email_or_phone(&self, email: &str, phone: &str) -> Result<bool> {
        let users = self.users.read().await;
        Ok(users.iter().any(|u| u.email == email || u.phone == phone))
    }

    async fn fetch_by_email(&self, email: &str) -> Result<Option<UserDoc>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn fetch_by_user_id(&self, user_id: &str) -> Result<Option<UserDoc>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn update_tokens(
        &self,
        user_id: &str,
        token: &str,
        refresh_token: &str,
        updated_at: DateTime,
    ) -> Result<bool> {
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|u| u.user_id == user_id) else {
            return Ok(false);
        };
        user.token = token.to_string();
        user.refresh_token = refresh_token.to_string();
        user.updated_at = updated_at;
        Ok(true)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn fetch_page(&self, skip: u64, limit: u64) -> Result<Vec<UserDoc>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn delete_by_user_id(&self, user_id: &str) -> Result<Option<UserDoc>> {
        let mut users = self.users.write().await;
        Ok(users
            .iter()
            .position(|u| u.user_id == user_id)
            .map(|index| users.remove(index)))
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert(&self, todo: &TodoDoc) -> Result<()> {
        let mut todos = self.todos.write().await;
        if title_taken(&todos, None, &todo.user_id, &todo.title) {
            return Err(Error::DuplicateKey);
        }
        todos.push(todo.clone());
        Ok(())
    }

    async fn exists_with_title(&self, user_id: &str, title: &str) -> Result<bool> {
        Ok(title_taken(&self.todos.read().await, None, user_id, title))
    }

    async fn fetch_by_id(&self, id: &ObjectId) -> Result<Option<TodoDoc>> {
        let todos = self.todos.read().await;
        Ok(todos.iter().find(|t| &t.id == id).cloned())
    }

    async fn fetch_all(&self) -> Result<Vec<TodoDoc>> {
        Ok(self.todos.read().await.clone())
    }

    async fn fetch_by_user(&self, user_id: &str) -> Result<Vec<TodoDoc>> {
        let todos = self.todos.read().await;
        Ok(todos
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn count_by_user(&self, user_id: &str) -> Result<u64> {
        let todos = self.todos.read().await;
        Ok(todos.iter().filter(|t| t.user_id == user_id).count() as u64)
    }

    async fn fetch_checked(&self) -> Result<Vec<TodoDoc>> {
        let todos = self.todos.read().await;
        Ok(todos.iter().filter(|t| t.check).cloned().collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.todos.read().await.len() as u64)
    }

    async fn count_unchecked(&self) -> Result<u64> {
        let todos = self.todos.read().await;
        Ok(todos.iter().filter(|t| !t.check).count() as u64)
    }

    async fn set_check(&self, id: &ObjectId, check: bool, updated_at: DateTime) -> Result<bool> {
        let mut todos = self.todos.write().await;
        let Some(todo) = todos.iter_mut().find(|t| &t.id == id) else {
            return Ok(false);
        };
        todo.check = check;
        todo.updated_at = updated_at;
        Ok(true)
    }

    async fn edit(
        &self,
        id: &ObjectId,
        title: &str,
        description: &str,
        updated_at: DateTime,
    ) -> Result<bool> {
        let mut todos = self.todos.write().await;
        let Some(owner) = todos.iter().find(|t| &t.id == id).map(|t| t.user_id.clone()) else {
            return Ok(false);
        };
        if title_taken(&todos, Some(id), &owner, title) {
            return Err(Error::DuplicateKey);
        }
        if let Some(todo) = todos.iter_mut().find(|t| &t.id == id) {
            todo.title = title.to_string();
            todo.description = description.to_string();
            todo.updated_at = updated_at;
        }
        Ok(true)
    }

    async fn delete_by_id(&self, id: &ObjectId) -> Result<Option<TodoDoc>> {
        let mut todos = self.todos.write().await;
        Ok(todos
            .iter()
            .position(|t| &t.id == id)
            .map(|index| todos.remove(index)))
    }

    async fn delete_owned(&self, user_id: &str, ids: &[ObjectId]) -> Result<u64> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|t| t.user_id != user_id || !ids.contains(&t.id));
        Ok((before - todos.len()) as u64)
    }
}

#[async_trait]
impl DeletedStore for MemoryStore {
    async fn insert(&self, deleted: &DeletedDoc) -> Result<()> {
        self.deleted.write().await.push(deleted.clone());
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<DeletedDoc>> {
        Ok(self.deleted.read().await.clone())
    }

    async fn fetch_by_id(&self, id: &ObjectId) -> Result<Option<DeletedDoc>> {
        let deleted = self.deleted.read().await;
        Ok(deleted.iter().find(|d| &d.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_sdk::role::UserRole;

    fn user(email: &str, phone: &str) -> UserDoc {
        let id = ObjectId::new();
        UserDoc {
            id,
            user_id: id.to_hex(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            phone: phone.into(),
            password: "hash".into(),
            user_type: UserRole::User,
            token: String::new(),
            refresh_token: String::new(),
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        }
    }

    fn todo(user_id: &str, title: &str) -> TodoDoc {
        TodoDoc {
            id: ObjectId::new(),
            title: title.into(),
            description: "desc".into(),
            user_id: user_id.into(),
            check: false,
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        }
    }

    #[tokio::test]
    async fn test_unique_email_and_phone() {
        let store = MemoryStore::default();
        UserStore::insert(&store, &user("a@x.com", "111")).await.unwrap();
        assert!(matches!(
            UserStore::insert(&store, &user("a@x.com", "222")).await,
            Err(Error::DuplicateKey)
        ));
        assert!(matches!(
            UserStore::insert(&store, &user("b@x.com", "111")).await,
            Err(Error::DuplicateKey)
        ));
        assert_eq!(UserStore::count(&store).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unique_title_per_owner() {
        let store = MemoryStore::default();
        TodoStore::insert(&store, &todo("a", "milk")).await.unwrap();
        TodoStore::insert(&store, &todo("b", "milk")).await.unwrap();
        assert!(matches!(
            TodoStore::insert(&store, &todo("a", "milk")).await,
            Err(Error::DuplicateKey)
        ));
    }

    #[tokio::test]
    async fn test_edit_keeps_title_unique() {
        let store = MemoryStore::default();
        let first = todo("a", "milk");
        let second = todo("a", "eggs");
        TodoStore::insert(&store, &first).await.unwrap();
        TodoStore::insert(&store, &second).await.unwrap();

        let now = DateTime::now();
        assert!(matches!(
            store.edit(&second.id, "milk", "d", now).await,
            Err(Error::DuplicateKey)
        ));
        assert!(store.edit(&second.id, "eggs", "brown", now).await.unwrap());
        assert!(!store.edit(&ObjectId::new(), "x", "y", now).await.unwrap());
    }

    #[tokio::test]
    async fn test_page_and_counts() {
        let store = MemoryStore::default();
        for i in 0..5 {
            UserStore::insert(&store, &user(&format!("{i}@x.com"), &i.to_string()))
                .await
                .unwrap();
        }
        let page = store.fetch_page(2, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].email, "2@x.com");
        assert!(store.fetch_page(10, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_owned_spares_unlisted_todos() {
        let store = MemoryStore::default();
        let (a1, a2, b1) = (todo("a", "1"), todo("a", "2"), todo("b", "1"));
        for t in [&a1, &a2, &b1] {
            TodoStore::insert(&store, t).await.unwrap();
        }
        let late = todo("a", "3");
        TodoStore::insert(&store, &late).await.unwrap();

        let removed = store
            .delete_owned("a", &[a1.id, a2.id, b1.id])
            .await
            .unwrap();
        assert_eq!(removed, 2);
        assert!(TodoStore::fetch_by_id(&store, &late.id).await.unwrap().is_some());
        assert!(TodoStore::fetch_by_id(&store, &b1.id).await.unwrap().is_some());
        assert_eq!(TodoStore::count(&store).await.unwrap(), 2);
    }
}
