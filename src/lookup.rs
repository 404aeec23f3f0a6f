use crate::roster::{ParticipantRecord, Roster};

pub const NOT_FOUND_MESSAGE: &str =
    "El correo no está registrado entre los participantes confirmados.";

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Returns every roster row registered under `email_input`, in roster order.
/// An empty result means the participant is not on the roster.
pub fn find(roster: &Roster, email_input: &str) -> Vec<ParticipantRecord> {
    let key = normalize_email(email_input);
    roster
        .records
        .iter()
        .filter(|record| normalize_email(&record.email) == key)
        .cloned()
        .collect()
}

/// First non-empty name among the matched rows.
pub fn display_name(records: &[ParticipantRecord]) -> Option<&str> {
    records
        .iter()
        .map(|record| record.name.trim())
        .find(|name| !name.is_empty())
}

pub fn activity_line(record: &ParticipantRecord) -> String {
    format!(
        "— {} de: \"{}\"",
        record.activity_type,
        record.activity_title.trim()
    )
}

pub fn activity_lines(records: &[ParticipantRecord]) -> Vec<String> {
    records.iter().map(activity_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(email: &str, name: &str, kind: &str, title: &str) -> ParticipantRecord {
        ParticipantRecord {
            email: email.to_string(),
            name: name.to_string(),
            activity_type: kind.to_string(),
            activity_title: title.to_string(),
        }
    }

    fn roster() -> Roster {
        Roster::new(vec![
            record("a@x.com", "Ana", "Taller", "Intro a TEI"),
            record("b@y.com", "Beto", "Ponencia", "Mapas"),
            record("a@x.com", "Ana", "Ponencia", "Corpus Digitales"),
            record("foo@bar.com", "Foo", "Taller", "Bar"),
        ])
    }

    #[test]
    fn matches_ignoring_case_and_surrounding_whitespace() {
        let found = find(&roster(), " Foo@Bar.com ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Foo");
    }

    #[test]
    fn returns_every_activity_in_roster_order() {
        let found = find(&roster(), "A@X.COM");
        assert_eq!(found.len(), 2);
        assert_eq!(
            activity_lines(&found),
            vec![
                "— Taller de: \"Intro a TEI\"".to_string(),
                "— Ponencia de: \"Corpus Digitales\"".to_string(),
            ]
        );
        assert_eq!(display_name(&found), Some("Ana"));
    }

    #[test]
    fn unknown_email_yields_nothing() {
        assert!(find(&roster(), "nadie@x.com").is_empty());
        assert!(find(&roster(), "").is_empty());
    }

    #[test]
    fn stored_emails_are_normalized_too() {
        let roster = Roster::new(vec![record(" Mixed@Case.org", "Eva", "Taller", "X")]);
        assert_eq!(find(&roster, "mixed@case.org").len(), 1);
    }

    #[test]
    fn display_name_skips_blank_names() {
        let rows = vec![
            record("a@x.com", "  ", "Taller", "A"),
            record("a@x.com", "Ana", "Taller", "B"),
        ];
        assert_eq!(display_name(&rows), Some("Ana"));
        assert_eq!(display_name(&rows[..1]), None);
    }
}
