//! Employee record.

use crate::model::document::Document;
use crate::model::record::{
    overwrite, require_text, Collection, Record, RecordId, RecordValidationError,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: RecordId,
    pub name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
}

/// Employee form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub job_title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<EmployeeDraft> for EmployeePatch {
    fn from(draft: EmployeeDraft) -> Self {
        Self {
            name: Some(draft.name),
            job_title: Some(draft.job_title),
            email: Some(draft.email),
            phone: Some(draft.phone),
        }
    }
}

impl Record for Employee {
    const COLLECTION: Collection = Collection::Employees;
    type Draft = EmployeeDraft;
    type Patch = EmployeePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: RecordId, draft: EmployeeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            job_title: draft.job_title,
            email: draft.email,
            phone: draft.phone,
        }
    }

    fn apply_patch(&mut self, patch: EmployeePatch) {
        overwrite(&mut self.name, patch.name);
        overwrite(&mut self.job_title, patch.job_title);
        overwrite(&mut self.email, patch.email);
        overwrite(&mut self.phone, patch.phone);
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text(Self::COLLECTION, "name", &self.name)
    }

    fn search_text(&self) -> String {
        [
            self.name.as_str(),
            self.job_title.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
        ]
        .join(" ")
    }

    fn collection(document: &Document) -> &[Self] {
        &document.employees
    }

    fn collection_mut(document: &mut Document) -> &mut Vec<Self> {
        &mut document.employees
    }
}
