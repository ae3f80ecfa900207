use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub pro: bool,
    pub todos: Vec<Todo>,
}

impl User {
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            username: username.into(),
            pro: false,
            todos: Vec::new(),
        }
    }

    pub fn todo(&self, id: &Uuid) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == *id)
    }

    pub fn todo_mut(&mut self, id: &Uuid) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id == *id)
    }

    /// Removes the todo while keeping the order of the rest.
    pub fn remove_todo(&mut self, id: &Uuid) -> Option<Todo> {
        let index = self.todos.iter().position(|todo| todo.id == *id)?;
        Some(self.todos.remove(index))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub deadline: DateTime<Utc>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(title: impl Into<String>, deadline: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            deadline,
            done: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_starts_on_free_plan_without_todos() {
        let user = User::new("Ann", "ann");
        assert!(!user.pro);
        assert!(user.todos.is_empty());
    }

    #[test]
    fn remove_todo_keeps_remaining_order() {
        let mut user = User::new("Ann", "ann");
        let deadline = Utc::now();
        for title in ["a", "b", "c"] {
            user.todos.push(Todo::new(title, deadline));
        }
        let middle = user.todos[1].id;

        let removed = user.remove_todo(&middle).expect("todo should be removed");

        assert_eq!(removed.title, "b");
        let titles: Vec<_> = user.todos.iter().map(|todo| todo.title.as_str()).collect();
        assert_eq!(titles, ["a", "c"]);
        assert!(user.remove_todo(&middle).is_none());
    }
}
