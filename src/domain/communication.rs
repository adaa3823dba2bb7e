use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::types::CommunicationId;

/// A notification already delivered by the backend. Read-only on this side.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Communication {
    pub id: CommunicationId,
    pub person_name: String,
    pub application_name: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

impl Communication {
    pub fn sent_at_display(&self) -> String {
        self.sent_at.format("%d/%m/%Y %H:%M").to_string()
    }
}
