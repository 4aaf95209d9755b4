//! Eisenhower-matrix task board.
//!
//! The board holds one ordered list of tasks per [`Quadrant`]. All mutations are
//! plain state transitions; persistence lives in `echo-db`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors from task board operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Task text was empty after trimming.
    #[error("task text cannot be empty")]
    EmptyText,

    /// No task matched the given ID.
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// An ID prefix matched more than one task.
    #[error("task ID prefix {prefix:?} is ambiguous ({matches} matches)")]
    AmbiguousId { prefix: String, matches: usize },

    /// Unrecognized quadrant name.
    #[error("unknown quadrant: {0}")]
    UnknownQuadrant(String),
}

/// One of the four Eisenhower-matrix buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Quadrant {
    UrgentImportant,
    NotUrgentImportant,
    UrgentNotImportant,
    NotUrgentNotImportant,
}

impl Quadrant {
    /// All quadrants in priority order.
    pub const ALL: [Self; 4] = [
        Self::UrgentImportant,
        Self::NotUrgentImportant,
        Self::UrgentNotImportant,
        Self::NotUrgentNotImportant,
    ];

    /// Storage key, matching the serialized board layout.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UrgentImportant => "urgentImportant",
            Self::NotUrgentImportant => "notUrgentImportant",
            Self::UrgentNotImportant => "urgentNotImportant",
            Self::NotUrgentNotImportant => "notUrgentNotImportant",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::UrgentImportant => "Do First - Urgent & Important",
            Self::NotUrgentImportant => "Schedule - Important, Not Urgent",
            Self::UrgentNotImportant => "Delegate - Urgent, Not Important",
            Self::NotUrgentNotImportant => "Eliminate - Neither Urgent nor Important",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::UrgentImportant => "Crisis, emergencies, deadline-driven projects",
            Self::NotUrgentImportant => "Strategic planning, personal development, prevention",
            Self::UrgentNotImportant => "Interruptions, some calls/emails, some meetings",
            Self::NotUrgentNotImportant => "Time wasters, some social media, trivial activities",
        }
    }

    /// Priority from 1 (highest) to 4.
    pub const fn priority(self) -> u8 {
        match self {
            Self::UrgentImportant => 1,
            Self::NotUrgentImportant => 2,
            Self::UrgentNotImportant => 3,
            Self::NotUrgentNotImportant => 4,
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Quadrant {
    type Err = BoardError;

    /// Accepts the storage key, a kebab-case form, or the matrix action name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "urgentImportant" | "urgent-important" | "do" => Ok(Self::UrgentImportant),
            "notUrgentImportant" | "not-urgent-important" | "schedule" => {
                Ok(Self::NotUrgentImportant)
            }
            "urgentNotImportant" | "urgent-not-important" | "delegate" => {
                Ok(Self::UrgentNotImportant)
            }
            "notUrgentNotImportant" | "not-urgent-not-important" | "eliminate" => {
                Ok(Self::NotUrgentNotImportant)
            }
            _ => Err(BoardError::UnknownQuadrant(s.to_string())),
        }
    }
}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub text: String,

    /// Merged time-slot label, e.g. `9:00 AM - 11:00 AM`. Empty when unscheduled.
    #[serde(default)]
    pub times: String,

    #[serde(default)]
    pub completed: bool,

    pub created_at: DateTime<Utc>,
}

impl Task {
    fn new(text: String, times: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            times,
            completed: false,
            created_at: Utc::now(),
        }
    }
}

/// Field changes applied by [`TaskBoard::update_task`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub text: Option<String>,
    pub times: Option<String>,
}

/// Tasks grouped by quadrant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBoard {
    #[serde(default)]
    urgent_important: Vec<Task>,
    #[serde(default)]
    not_urgent_important: Vec<Task>,
    #[serde(default)]
    urgent_not_important: Vec<Task>,
    #[serde(default)]
    not_urgent_not_important: Vec<Task>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks of one quadrant in display order.
    pub fn tasks(&self, quadrant: Quadrant) -> &[Task] {
        match quadrant {
            Quadrant::UrgentImportant => &self.urgent_important,
            Quadrant::NotUrgentImportant => &self.not_urgent_important,
            Quadrant::UrgentNotImportant => &self.urgent_not_important,
            Quadrant::NotUrgentNotImportant => &self.not_urgent_not_important,
        }
    }

    fn tasks_mut(&mut self, quadrant: Quadrant) -> &mut Vec<Task> {
        match quadrant {
            Quadrant::UrgentImportant => &mut self.urgent_important,
            Quadrant::NotUrgentImportant => &mut self.not_urgent_important,
            Quadrant::UrgentNotImportant => &mut self.urgent_not_important,
            Quadrant::NotUrgentNotImportant => &mut self.not_urgent_not_important,
        }
    }

    fn position(&self, quadrant: Quadrant, id: &str) -> Result<usize, BoardError> {
        self.tasks(quadrant)
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| BoardError::TaskNotFound { id: id.to_string() })
    }

    /// Appends a new, uncompleted task to `quadrant`.
    pub fn add_task(
        &mut self,
        quadrant: Quadrant,
        text: &str,
        times: impl Into<String>,
    ) -> Result<&Task, BoardError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(BoardError::EmptyText);
        }
        let tasks = self.tasks_mut(quadrant);
        tasks.push(Task::new(text.to_string(), times.into()));
        tracing::debug!(%quadrant, count = tasks.len(), "added task");
        Ok(&tasks[tasks.len() - 1])
    }

    /// Replaces the fields present in `update`.
    pub fn update_task(
        &mut self,
        quadrant: Quadrant,
        id: &str,
        update: TaskUpdate,
    ) -> Result<&Task, BoardError> {
        if update.text.as_deref().is_some_and(|text| text.trim().is_empty()) {
            return Err(BoardError::EmptyText);
        }
        let index = self.position(quadrant, id)?;
        let task = &mut self.tasks_mut(quadrant)[index];
        if let Some(text) = update.text {
            task.text = text.trim().to_string();
        }
        if let Some(times) = update.times {
            task.times = times;
        }
        Ok(task)
    }

    /// Removes a task and returns it.
    pub fn delete_task(&mut self, quadrant: Quadrant, id: &str) -> Result<Task, BoardError> {
        let index = self.position(quadrant, id)?;
        Ok(self.tasks_mut(quadrant).remove(index))
    }

    /// Flips a task's completion flag, then orders the quadrant so that open
    /// tasks come before completed ones (relative order otherwise preserved).
    ///
    /// Returns the new completion state.
    pub fn toggle_complete(&mut self, quadrant: Quadrant, id: &str) -> Result<bool, BoardError> {
        let index = self.position(quadrant, id)?;
        let tasks = self.tasks_mut(quadrant);
        tasks[index].completed = !tasks[index].completed;
        let completed = tasks[index].completed;
        tasks.sort_by_key(|task| task.completed);
        Ok(completed)
    }

    /// Moves the task at `from_index` in `from` to `to_index` in `to`.
    ///
    /// Indices are checked against the lists as they are before the move;
    /// out-of-range indices leave the board untouched and return `false`.
    pub fn move_task(
        &mut self,
        from: Quadrant,
        from_index: usize,
        to: Quadrant,
        to_index: usize,
    ) -> bool {
        if from_index >= self.tasks(from).len() || to_index > self.tasks(to).len() {
            return false;
        }
        let task = self.tasks_mut(from).remove(from_index);
        let target = self.tasks_mut(to);
        let to_index = to_index.min(target.len());
        target.insert(to_index, task);
        true
    }

    /// Drops every completed task and returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.total_tasks();
        for quadrant in Quadrant::ALL {
            self.tasks_mut(quadrant).retain(|task| !task.completed);
        }
        before - self.total_tasks()
    }

    /// Removes all tasks.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total_tasks(&self) -> usize {
        Quadrant::ALL.iter().map(|q| self.tasks(*q).len()).sum()
    }

    pub fn completed_tasks(&self) -> usize {
        Quadrant::ALL
            .iter()
            .map(|q| self.tasks(*q).iter().filter(|t| t.completed).count())
            .sum()
    }

    /// Finds the single task whose ID starts with `prefix`.
    pub fn find(&self, prefix: &str) -> Result<(Quadrant, usize, &Task), BoardError> {
        let mut matches = Quadrant::ALL.into_iter().flat_map(move |quadrant| {
            self.tasks(quadrant)
                .iter()
                .enumerate()
                .filter(move |(_, task)| task.id.starts_with(prefix))
                .map(move |(index, task)| (quadrant, index, task))
        });

        let first = matches.next().ok_or_else(|| BoardError::TaskNotFound {
            id: prefix.to_string(),
        })?;
        let extra = matches.count();
        if extra > 0 {
            return Err(BoardError::AmbiguousId {
                prefix: prefix.to_string(),
                matches: extra + 1,
            });
        }
        Ok(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(board: &TaskBoard, quadrant: Quadrant) -> Vec<String> {
        board.tasks(quadrant).iter().map(|t| t.text.clone()).collect()
    }

    fn board_with(texts: &[&str]) -> TaskBoard {
        let mut board = TaskBoard::new();
        for text in texts {
            board.add_task(Quadrant::UrgentImportant, text, "").unwrap();
        }
        board
    }

    fn id_of(board: &TaskBoard, quadrant: Quadrant, index: usize) -> String {
        board.tasks(quadrant)[index].id.clone()
    }

    #[test]
    fn add_task_trims_and_appends() {
        let mut board = TaskBoard::new();
        let task = board
            .add_task(Quadrant::NotUrgentImportant, "  plan week  ", "9:00 AM - 10:00 AM")
            .unwrap();
        assert_eq!(task.text, "plan week");
        assert_eq!(task.times, "9:00 AM - 10:00 AM");
        assert!(!task.completed);
        assert_eq!(board.total_tasks(), 1);
        assert!(board.tasks(Quadrant::UrgentImportant).is_empty());
    }

    #[test]
    fn add_task_rejects_blank_text() {
        let mut board = TaskBoard::new();
        assert_eq!(
            board.add_task(Quadrant::UrgentImportant, "   ", "").unwrap_err(),
            BoardError::EmptyText
        );
        assert_eq!(board.total_tasks(), 0);
    }

    #[test]
    fn update_task_changes_given_fields() {
        let mut board = board_with(&["draft"]);
        let id = id_of(&board, Quadrant::UrgentImportant, 0);
        let update = TaskUpdate {
            text: None,
            times: Some("2:00 PM - 3:00 PM".to_string()),
        };
        let task = board.update_task(Quadrant::UrgentImportant, &id, update).unwrap();
        assert_eq!(task.text, "draft");
        assert_eq!(task.times, "2:00 PM - 3:00 PM");

        let missing = board.update_task(Quadrant::UrgentImportant, "nope", TaskUpdate::default());
        assert!(matches!(missing, Err(BoardError::TaskNotFound { .. })));
    }

    #[test]
    fn delete_task_removes_only_target() {
        let mut board = board_with(&["a", "b", "c"]);
        let id = id_of(&board, Quadrant::UrgentImportant, 1);
        let removed = board.delete_task(Quadrant::UrgentImportant, &id).unwrap();
        assert_eq!(removed.text, "b");
        assert_eq!(texts(&board, Quadrant::UrgentImportant), vec!["a", "c"]);
    }

    #[test]
    fn toggle_complete_sinks_completed_tasks() {
        let mut board = board_with(&["a", "b", "c"]);
        let a = id_of(&board, Quadrant::UrgentImportant, 0);
        assert!(board.toggle_complete(Quadrant::UrgentImportant, &a).unwrap());
        assert_eq!(texts(&board, Quadrant::UrgentImportant), vec!["b", "c", "a"]);
        assert_eq!(board.completed_tasks(), 1);

        assert!(!board.toggle_complete(Quadrant::UrgentImportant, &a).unwrap());
        assert_eq!(board.completed_tasks(), 0);
    }

    #[test]
    fn move_within_quadrant() {
        let mut board = board_with(&["a", "b", "c"]);
        assert!(board.move_task(Quadrant::UrgentImportant, 0, Quadrant::UrgentImportant, 2));
        assert_eq!(texts(&board, Quadrant::UrgentImportant), vec!["b", "c", "a"]);

        // Index equal to the original length clamps to the end.
        assert!(board.move_task(Quadrant::UrgentImportant, 0, Quadrant::UrgentImportant, 3));
        assert_eq!(texts(&board, Quadrant::UrgentImportant), vec!["c", "a", "b"]);
    }

    #[test]
    fn move_across_quadrants() {
        let mut board = board_with(&["a", "b"]);
        board.add_task(Quadrant::UrgentNotImportant, "x", "").unwrap();
        assert!(board.move_task(Quadrant::UrgentImportant, 1, Quadrant::UrgentNotImportant, 0));
        assert_eq!(texts(&board, Quadrant::UrgentImportant), vec!["a"]);
        assert_eq!(texts(&board, Quadrant::UrgentNotImportant), vec!["b", "x"]);
    }

    #[test]
    fn move_out_of_range_is_noop() {
        let mut board = board_with(&["a"]);
        let before = board.clone();
        assert!(!board.move_task(Quadrant::UrgentImportant, 1, Quadrant::NotUrgentImportant, 0));
        assert!(!board.move_task(Quadrant::UrgentImportant, 0, Quadrant::NotUrgentImportant, 1));
        assert_eq!(board, before);
    }

    #[test]
    fn clear_completed_and_reset() {
        let mut board = board_with(&["a", "b"]);
        board.add_task(Quadrant::NotUrgentNotImportant, "c", "").unwrap();
        let b = id_of(&board, Quadrant::UrgentImportant, 1);
        let c = id_of(&board, Quadrant::NotUrgentNotImportant, 0);
        board.toggle_complete(Quadrant::UrgentImportant, &b).unwrap();
        board.toggle_complete(Quadrant::NotUrgentNotImportant, &c).unwrap();

        assert_eq!(board.clear_completed(), 2);
        assert_eq!(board.total_tasks(), 1);

        board.reset();
        assert_eq!(board, TaskBoard::new());
    }

    #[test]
    fn find_by_prefix() {
        let board = board_with(&["a", "b"]);
        let id = id_of(&board, Quadrant::UrgentImportant, 1);
        let (quadrant, index, task) = board.find(&id[..8]).unwrap();
        assert_eq!(quadrant, Quadrant::UrgentImportant);
        assert_eq!(index, 1);
        assert_eq!(task.text, "b");

        assert!(matches!(board.find(""), Err(BoardError::AmbiguousId { matches: 2, .. })));
        assert!(matches!(board.find("zzzz"), Err(BoardError::TaskNotFound { .. })));
    }

    #[test]
    fn serializes_by_quadrant_key() {
        let mut board = TaskBoard::new();
        board.add_task(Quadrant::UrgentImportant, "ship", "9:00 AM - 10:00 AM").unwrap();
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["urgentImportant"][0]["text"], "ship");
        assert_eq!(json["urgentImportant"][0]["completed"], false);
        assert!(json["urgentImportant"][0]["createdAt"].is_string());
        assert_eq!(json["notUrgentNotImportant"], serde_json::json!([]));

        let parsed: TaskBoard = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn deserializes_partial_board() {
        let json = r#"{"schedule": [], "urgentImportant": [
            {"id": "t1", "text": "legacy", "createdAt": "2025-01-01T00:00:00Z"}
        ]}"#;
        let board: TaskBoard = serde_json::from_str(json).unwrap();
        assert_eq!(board.total_tasks(), 1);
        assert_eq!(board.tasks(Quadrant::UrgentImportant)[0].times, "");
    }

    #[test]
    fn quadrant_names() {
        for quadrant in Quadrant::ALL {
            assert_eq!(quadrant.as_str().parse::<Quadrant>().unwrap(), quadrant);
        }
        assert_eq!("delegate".parse::<Quadrant>().unwrap(), Quadrant::UrgentNotImportant);
        assert_eq!(
            "urgent".parse::<Quadrant>().unwrap_err().to_string(),
            "unknown quadrant: urgent"
        );
        assert_eq!(Quadrant::NotUrgentImportant.priority(), 2);
    }
}
