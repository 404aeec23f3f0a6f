use serde::Deserialize;

/// One roster row: a participant paired with one of their activities.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParticipantRecord {
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub activity_type: String,
    #[serde(rename = "titulo", deserialize_with = "trimmed")]
    pub activity_title: String,
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub records: Vec<ParticipantRecord>,
}

impl Roster {
    pub fn new(records: Vec<ParticipantRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
