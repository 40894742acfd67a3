//! Task record.
//!
//! # Invariants
//! - `completed` defaults to `false` and only changes through an explicit
//!   patch (toggle); drafts never carry it.
//! - Overdue means: not completed and due strictly before the given day.

use crate::model::document::Document;
use crate::model::record::{
    overwrite, parse_calendar_date, require_text, Collection, Record, RecordId,
    RecordValidationError,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Calendar date (`YYYY-MM-DD`).
    pub due_date: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Parsed due date, `None` when the stored text is not a date.
    pub fn due_day(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.due_date)
    }

    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_day().is_some_and(|due| due < today)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub completed: Option<bool>,
}

impl From<TaskDraft> for TaskPatch {
    fn from(draft: TaskDraft) -> Self {
        Self {
            title: Some(draft.title),
            description: Some(draft.description.unwrap_or_default()),
            due_date: Some(draft.due_date),
            completed: None,
        }
    }
}

impl Record for Task {
    const COLLECTION: Collection = Collection::Tasks;
    type Draft = TaskDraft;
    type Patch = TaskPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: RecordId, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: Some(draft.description.unwrap_or_default()),
            due_date: draft.due_date,
            completed: false,
        }
    }

    fn apply_patch(&mut self, patch: TaskPatch) {
        overwrite(&mut self.title, patch.title);
        if patch.description.is_some() {
            self.description = patch.description;
        }
        overwrite(&mut self.due_date, patch.due_date);
        overwrite(&mut self.completed, patch.completed);
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text(Self::COLLECTION, "title", &self.title)
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.description.as_deref().unwrap_or_default(),
            self.due_date
        )
    }

    fn collection(document: &Document) -> &[Self] {
        &document.tasks
    }

    fn collection_mut(document: &mut Document) -> &mut Vec<Self> {
        &mut document.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskDraft, TaskPatch};
    use crate::model::record::Record;
    use chrono::NaiveDate;

    fn task(due_date: &str, completed: bool) -> Task {
        Task {
            id: "t1".to_string(),
            title: "Invoice".to_string(),
            description: None,
            due_date: due_date.to_string(),
            completed,
        }
    }

    #[test]
    fn overdue_uses_date_only_comparison() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert!(task("2024-05-09", false).is_overdue_on(today));
        assert!(!task("2024-05-10", false).is_overdue_on(today));
        assert!(!task("2024-05-09", true).is_overdue_on(today));
        assert!(!task("someday", false).is_overdue_on(today));
    }

    #[test]
    fn draft_patch_keeps_completion() {
        let mut done = task("2024-05-09", true);
        done.apply_patch(TaskPatch::from(TaskDraft {
            title: "Renamed".to_string(),
            description: None,
            due_date: "2024-06-01".to_string(),
        }));
        assert!(done.completed);
        assert_eq!(done.title, "Renamed");
    }

    #[test]
    fn completed_defaults_to_false_on_decode() {
        let decoded: Task =
            serde_json::from_str(r#"{"id":"t1","title":"x","dueDate":"2024-01-01"}"#).unwrap();
        assert!(!decoded.completed);
    }
}
