use serde::Serialize;
use std::fmt;

/// Program tracks an applicant can mark as interesting. Ordered as listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Interest {
    #[serde(rename = "PLC")]
    Plc,
    Robotics,
    Vision,
    Networking,
}

impl Interest {
    pub const ALL: [Interest; 4] = [
        Interest::Plc,
        Interest::Robotics,
        Interest::Vision,
        Interest::Networking,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Interest::Plc => "PLC",
            Interest::Robotics => "Robotics",
            Interest::Vision => "Vision",
            Interest::Networking => "Networking",
        }
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Names of the draft's fields, used to attach validation errors to inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    ExperienceYears,
    Message,
    Consent,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::ExperienceYears => "Years of experience",
            Field::Message => "Message",
            Field::Consent => "Consent",
        }
    }
}

/// The applicant's in-progress form data. Serializes to the exact body the
/// `/api/apply` endpoint expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub experience_years: u32,
    pub interests: Vec<Interest>,
    pub message: String,
    pub consent: bool,
}

/// A replacement value for a single draft field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    FirstName(String),
    LastName(String),
    Email(String),
    Phone(String),
    ExperienceYears(u32),
    Message(String),
    Consent(bool),
}

impl FieldUpdate {
    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::FirstName(_) => Field::FirstName,
            FieldUpdate::LastName(_) => Field::LastName,
            FieldUpdate::Email(_) => Field::Email,
            FieldUpdate::Phone(_) => Field::Phone,
            FieldUpdate::ExperienceYears(_) => Field::ExperienceYears,
            FieldUpdate::Message(_) => Field::Message,
            FieldUpdate::Consent(_) => Field::Consent,
        }
    }
}

impl ApplicationDraft {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::FirstName(value) => self.first_name = value,
            FieldUpdate::LastName(value) => self.last_name = value,
            FieldUpdate::Email(value) => self.email = value,
            FieldUpdate::Phone(value) => self.phone = value,
            FieldUpdate::ExperienceYears(value) => self.experience_years = value,
            FieldUpdate::Message(value) => self.message = value,
            FieldUpdate::Consent(value) => self.consent = value,
        }
    }

    pub fn has_interest(&self, tag: Interest) -> bool {
        self.interests.contains(&tag)
    }

    /// Removes `tag` when present, inserts it otherwise. Interests stay in
    /// `Interest::ALL` order, so toggling twice leaves them unchanged.
    pub fn toggle_interest(&mut self, tag: Interest) {
        match self.interests.binary_search(&tag) {
            Ok(index) => {
                self.interests.remove(index);
            }
            Err(index) => self.interests.insert(index, tag),
        }
    }
}

/// Turns the raw text of the "years of experience" input into a count.
///
/// An empty input means zero and negative numbers clamp to zero. Anything
/// that isn't a number keeps the `current` value.
pub fn parse_experience_years(raw: &str, current: u32) -> u32 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    match raw.parse::<i64>() {
        Ok(years) if years < 0 => 0,
        Ok(years) => u32::try_from(years).unwrap_or(u32::MAX),
        Err(_) => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ada() -> ApplicationDraft {
        ApplicationDraft {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: String::new(),
            experience_years: 5,
            interests: vec![Interest::Plc, Interest::Vision],
            message: String::new(),
            consent: true,
        }
    }

    #[test]
    fn draft_serializes_with_endpoint_keys() {
        let body = serde_json::to_value(ada()).unwrap();
        assert_eq!(
            body,
            json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "phone": "",
                "experience_years": 5,
                "interests": ["PLC", "Vision"],
                "message": "",
                "consent": true,
            })
        );
    }

    #[test]
    fn default_draft_is_empty() {
        let draft = ApplicationDraft::default();
        assert_eq!(draft.experience_years, 0);
        assert!(draft.interests.is_empty());
        assert!(!draft.consent);
    }

    #[test]
    fn toggle_interest_twice_restores_interests() {
        let mut draft = ada();
        let before = draft.interests.clone();

        draft.toggle_interest(Interest::Robotics);
        assert_eq!(draft.interests, vec![Interest::Plc, Interest::Robotics, Interest::Vision]);
        draft.toggle_interest(Interest::Robotics);
        assert_eq!(draft.interests, before);

        draft.toggle_interest(Interest::Plc);
        assert_eq!(draft.interests, vec![Interest::Vision]);
        draft.toggle_interest(Interest::Plc);
        assert_eq!(draft.interests, before);
    }

    #[test]
    fn interests_keep_listing_order_whatever_the_click_order() {
        let mut draft = ApplicationDraft::default();
        draft.toggle_interest(Interest::Networking);
        draft.toggle_interest(Interest::Vision);
        draft.toggle_interest(Interest::Plc);
        assert_eq!(
            draft.interests,
            vec![Interest::Plc, Interest::Vision, Interest::Networking]
        );
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["interests"], json!(["PLC", "Vision", "Networking"]));
    }

    #[test]
    fn apply_replaces_only_the_named_field() {
        let mut draft = ada();
        draft.apply(FieldUpdate::Phone("+358 40 123".to_string()));
        assert_eq!(draft.phone, "+358 40 123");
        assert_eq!(draft.first_name, "Ada");
        assert_eq!(FieldUpdate::Consent(false).field(), Field::Consent);
    }

    #[test]
    fn experience_years_parsing() {
        assert_eq!(parse_experience_years("", 7), 0);
        assert_eq!(parse_experience_years(" 12 ", 0), 12);
        assert_eq!(parse_experience_years("-3", 4), 0);
        assert_eq!(parse_experience_years("ten", 4), 4);
    }
}
