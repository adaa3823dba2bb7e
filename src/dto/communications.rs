use serde::Serialize;

use crate::domain::communication::Communication;

/// Communication with its timestamp formatted for the log table.
#[derive(Debug, Serialize)]
pub struct CommunicationRow {
    pub id: i64,
    pub person_name: String,
    pub application_name: String,
    pub message: String,
    pub sent_at: String,
}

impl From<Communication> for CommunicationRow {
    fn from(communication: Communication) -> Self {
        Self {
            id: communication.id.get(),
            sent_at: communication.sent_at_display(),
            person_name: communication.person_name,
            application_name: communication.application_name,
            message: communication.message,
        }
    }
}
