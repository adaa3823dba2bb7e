use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::communication::Communication;
use crate::domain::types::{CommunicationId, TypeConstraintError};
use crate::models::parse_wire_timestamp;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationRecord {
    pub id: Option<i64>,
    pub person_name: Option<String>,
    pub application_name: Option<String>,
    pub message: Option<String>,
    pub sent_at: Option<String>,
}

impl TryFrom<CommunicationRecord> for Communication {
    type Error = TypeConstraintError;

    fn try_from(record: CommunicationRecord) -> Result<Self, Self::Error> {
        let id = CommunicationId::new(record.id.unwrap_or_default())?;
        let sent_at = record
            .sent_at
            .as_deref()
            .and_then(parse_wire_timestamp)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Ok(Communication {
            id,
            person_name: record.person_name.unwrap_or_default(),
            application_name: record.application_name.unwrap_or_default(),
            message: record.message.unwrap_or_default(),
            sent_at,
        })
    }
}

/// Paginated communications envelope.
#[derive(Debug, Default, Deserialize)]
pub struct CommunicationsEnvelope {
    #[serde(alias = "items")]
    pub communications: Option<Vec<CommunicationRecord>>,
    pub count: Option<usize>,
}

impl CommunicationsEnvelope {
    pub fn into_domain(self) -> (usize, Vec<Communication>) {
        let communications = self
            .communications
            .unwrap_or_default()
            .into_iter()
            .filter_map(|record| match Communication::try_from(record) {
                Ok(communication) => Some(communication),
                Err(err) => {
                    log::warn!("Skipping communication record: {err}");
                    None
                }
            })
            .collect::<Vec<_>>();
        let count = self.count.unwrap_or(communications.len());
        (count, communications)
    }
}
