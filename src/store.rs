use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{Task, TaskDraft, User};

const ID_LEN: usize = 9;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("Task {task_id} belongs to another family member")]
    NotOwner { task_id: String },
}

/// Result of asking the store to complete a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The task went from incomplete to completed.
    Completed,
    /// The task was already completed; nothing changed.
    AlreadyCompleted,
    /// No task with that id exists.
    Missing,
}

/// In-memory collection of every task in the family.
///
/// The store is the only place tasks are mutated. Edit, delete and complete
/// are restricted to the task's owner; other members only read.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    rng: fastrand::Rng,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with a deterministic id sequence, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            tasks: Vec::new(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn add_task(&mut self, owner: &User, draft: TaskDraft) -> Task {
        let task = Task {
            id: self.fresh_id(),
            title: draft.title,
            description: draft.description,
            date: draft.date,
            time: draft.time,
            completed: false,
            user_id: owner.id.clone(),
            family_id: owner.family_id.clone(),
        };
        info!(task_id = %task.id, user_id = %owner.id, date = %task.date, "Task added");
        self.tasks.push(task.clone());
        task
    }

    /// Replace the stored task that has `task.id`.
    ///
    /// Returns `Ok(false)` when no such task exists. The stored owner and
    /// family are kept regardless of what `task` carries.
    pub fn update_task(&mut self, actor: &User, task: Task) -> Result<bool, TaskError> {
        let Some(index) = self.owned_index(actor, &task.id)? else {
            debug!(task_id = %task.id, "Update skipped, task not found");
            return Ok(false);
        };

        let stored = &mut self.tasks[index];
        stored.title = task.title;
        stored.description = task.description;
        stored.date = task.date;
        stored.time = task.time;
        stored.completed = stored.completed || task.completed;
        info!(task_id = %stored.id, "Task updated");
        Ok(true)
    }

    pub fn delete_task(&mut self, actor: &User, id: &str) -> Result<bool, TaskError> {
        let Some(index) = self.owned_index(actor, id)? else {
            debug!(task_id = %id, "Delete skipped, task not found");
            return Ok(false);
        };

        self.tasks.remove(index);
        info!(task_id = %id, "Task deleted");
        Ok(true)
    }

    pub fn complete_task(&mut self, actor: &User, id: &str) -> Result<Completion, TaskError> {
        let Some(index) = self.owned_index(actor, id)? else {
            return Ok(Completion::Missing);
        };

        let task = &mut self.tasks[index];
        if task.completed {
            return Ok(Completion::AlreadyCompleted);
        }
        task.completed = true;
        info!(task_id = %id, "Task completed");
        Ok(Completion::Completed)
    }

    fn owned_index(&self, actor: &User, id: &str) -> Result<Option<usize>, TaskError> {
        match self.tasks.iter().position(|t| t.id == id) {
            Some(index) if !self.tasks[index].is_owned_by(&actor.id) => {
                warn!(task_id = %id, user_id = %actor.id, "Mutation denied for non-owner");
                Err(TaskError::NotOwner {
                    task_id: id.to_string(),
                })
            }
            other => Ok(other),
        }
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id: String = (0..ID_LEN)
                .map(|_| ID_ALPHABET[self.rng.usize(..ID_ALPHABET.len())] as char)
                .collect();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent() -> User {
        User::new("1", "parent@example.com", "Parent", "family1", "password")
    }

    #[test]
    fn ids_are_nine_base36_chars() {
        let mut store = TaskStore::with_seed(7);
        let task = store.add_task(&parent(), TaskDraft::new("a", "2024-03-15", "09:00"));
        assert_eq!(task.id.len(), 9);
        assert!(task.id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn ids_stay_unique_across_many_adds() {
        let mut store = TaskStore::with_seed(1);
        for i in 0..200 {
            store.add_task(&parent(), TaskDraft::new(&format!("t{i}"), "2024-03-15", "09:00"));
        }
        let mut ids: Vec<&str> = store.tasks().iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn update_cannot_reassign_owner() {
        let mut store = TaskStore::with_seed(3);
        let mut task = store.add_task(&parent(), TaskDraft::new("a", "2024-03-15", "09:00"));
        task.user_id = "2".to_string();
        task.title = "b".to_string();
        assert_eq!(store.update_task(&parent(), task.clone()), Ok(true));
        let stored = store.get(&task.id).unwrap();
        assert_eq!(stored.user_id, "1");
        assert_eq!(stored.title, "b");
    }
}
