//! Todo request and response models

use serde::{Deserialize, Serialize};

use crate::db::repos::TodoRecord;

use super::validation::{self, ValidationError};
use super::{patch_field, resolve_patch};

/// Maximum length of a todo task description.
pub const TASK_MAX: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub task: String,
    pub completed: bool,
}

impl From<TodoRecord> for Todo {
    fn from(r: TodoRecord) -> Self {
        Self {
            id: r.id,
            task: r.task,
            completed: r.completed,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodo {
    pub task: String,
    #[serde(default)]
    pub completed: bool,
}

impl CreateTodo {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require_length("task", &self.task, TASK_MAX)
    }
}

/// Partial update payload. An absent field leaves the stored value untouched;
/// the completed flag is mutable independently of the task text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodo {
    #[serde(default, deserialize_with = "patch_field")]
    pub task: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_field")]
    pub completed: Option<Option<bool>>,
}

impl UpdateTodo {
    pub fn task_patch(&self) -> Result<Option<&str>, ValidationError> {
        let task = resolve_patch("task", &self.task)?;
        if let Some(task) = task {
            validation::require_length("task", task, TASK_MAX)?;
        }
        Ok(task.map(String::as_str))
    }

    pub fn completed_patch(&self) -> Result<Option<bool>, ValidationError> {
        Ok(resolve_patch("completed", &self.completed)?.copied())
    }
}

/// One item of a batch update; carries its own id plus the same patch fields
/// as a single update.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchTodoUpdate {
    pub id: i64,
    #[serde(flatten)]
    pub patch: UpdateTodo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_completed_to_false() {
        let todo: CreateTodo = serde_json::from_str(r#"{"task":"Buy milk"}"#).unwrap();
        assert!(!todo.completed);
        assert!(todo.validate().is_ok());
    }

    #[test]
    fn task_bounds() {
        let empty = CreateTodo {
            task: String::new(),
            completed: false,
        };
        assert_eq!(
            empty.validate(),
            Err(ValidationError::Empty { field: "task" })
        );

        let long = CreateTodo {
            task: "x".repeat(201),
            completed: false,
        };
        assert_eq!(
            long.validate(),
            Err(ValidationError::TooLong {
                field: "task",
                max: TASK_MAX
            })
        );
    }

    #[test]
    fn patch_fields_distinguish_absent_from_null() {
        let absent: UpdateTodo = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.completed_patch(), Ok(None));

        let null: UpdateTodo = serde_json::from_str(r#"{"completed":null}"#).unwrap();
        assert_eq!(
            null.completed_patch(),
            Err(ValidationError::Null { field: "completed" })
        );

        let set: UpdateTodo = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert_eq!(set.completed_patch(), Ok(Some(true)));
    }

    #[test]
    fn batch_item_flattens_patch_fields() {
        let item: BatchTodoUpdate =
            serde_json::from_str(r#"{"id":3,"task":"Walk dog","completed":true}"#).unwrap();
        assert_eq!(item.id, 3);
        assert_eq!(item.patch.task_patch(), Ok(Some("Walk dog")));
        assert_eq!(item.patch.completed_patch(), Ok(Some(true)));

        let sparse: BatchTodoUpdate = serde_json::from_str(r#"{"id":4}"#).unwrap();
        assert_eq!(sparse.patch.task_patch(), Ok(None));
    }
}
