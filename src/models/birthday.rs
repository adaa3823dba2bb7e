use serde::Deserialize;

use crate::domain::birthday::BirthdayPerson;
use crate::models::parse_wire_date;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthdayRecord {
    pub name: Option<String>,
    #[serde(alias = "birthdate")]
    pub birth_date: Option<String>,
}

/// Response of the upcoming birthdays lookup.
#[derive(Debug, Default, Deserialize)]
pub struct NextBirthdaysEnvelope {
    #[serde(alias = "items")]
    pub people: Option<Vec<BirthdayRecord>>,
}

impl NextBirthdaysEnvelope {
    /// Records without a parseable birth date cannot be bucketed and are dropped.
    pub fn into_domain(self) -> Vec<BirthdayPerson> {
        self.people
            .unwrap_or_default()
            .into_iter()
            .filter_map(|record| {
                let name = record.name.unwrap_or_default();
                match record.birth_date.as_deref().and_then(parse_wire_date) {
                    Some(birth_date) => Some(BirthdayPerson { name, birth_date }),
                    None => {
                        log::warn!("Skipping upcoming birthday of {name:?}: no birth date");
                        None
                    }
                }
            })
            .collect()
    }
}
