//! Client record.

use crate::model::document::Document;
use crate::model::record::{
    overwrite, require_text, Collection, Record, RecordId, RecordValidationError,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: RecordId,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Client form input. Blank notes are stored as an empty string, as the form
/// submits them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDraft {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl From<ClientDraft> for ClientPatch {
    fn from(draft: ClientDraft) -> Self {
        Self {
            name: Some(draft.name),
            company: Some(draft.company),
            email: Some(draft.email),
            phone: Some(draft.phone),
            notes: Some(draft.notes.unwrap_or_default()),
        }
    }
}

impl Record for Client {
    const COLLECTION: Collection = Collection::Clients;
    type Draft = ClientDraft;
    type Patch = ClientPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: RecordId, draft: ClientDraft) -> Self {
        Self {
            id,
            name: draft.name,
            company: draft.company,
            email: draft.email,
            phone: draft.phone,
            notes: Some(draft.notes.unwrap_or_default()),
        }
    }

    fn apply_patch(&mut self, patch: ClientPatch) {
        overwrite(&mut self.name, patch.name);
        overwrite(&mut self.company, patch.company);
        overwrite(&mut self.email, patch.email);
        overwrite(&mut self.phone, patch.phone);
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text(Self::COLLECTION, "name", &self.name)
    }

    // Notes are not part of the client table row, so they are not searchable.
    fn search_text(&self) -> String {
        [
            self.name.as_str(),
            self.company.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
        ]
        .join(" ")
    }

    fn collection(document: &Document) -> &[Self] {
        &document.clients
    }

    fn collection_mut(document: &mut Document) -> &mut Vec<Self> {
        &mut document.clients
    }
}

#[cfg(test)]
mod tests {
    use super::Client;

    #[test]
    fn notes_are_optional_on_decode() {
        let client: Client = serde_json::from_str(
            r#"{"id":"c1","name":"Bo","company":"Acme","email":"","phone":""}"#,
        )
        .unwrap();
        assert_eq!(client.notes, None);
    }
}
