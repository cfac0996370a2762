use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Client-side role. Never trusted for authorization; the backend decides.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub(crate) enum Role {
    Admin,
    // Unrecognized roles read as a plain user.
    #[default]
    #[serde(other)]
    User,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Identity {
    pub username: String,
    #[serde(default)]
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// An authenticated identity together with its bearer token.
///
/// Both the token and the username are non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Session {
    identity: Identity,
    token: String,
}

impl Session {
    pub fn new(identity: Identity, token: String) -> Option<Self> {
        if identity.username.trim().is_empty() || token.trim().is_empty() {
            return None;
        }
        Some(Self { identity, token })
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SessionState {
    Loading,
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(s) => Some(s),
            _ => None,
        }
    }
}

/// Sentiment bucket used only to pick badge colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub(crate) enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Unknown,
}

impl Sentiment {
    pub fn from_label(label: &str) -> Self {
        Sentiment::from_str(label.trim()).unwrap_or(Sentiment::Unknown)
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            Sentiment::Positive => "text-green-600 bg-green-50",
            Sentiment::Negative => "text-red-600 bg-red-50",
            Sentiment::Neutral => "text-gray-600 bg-gray-50",
            Sentiment::Unknown => "text-blue-600 bg-blue-50",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Author {
    pub username: String,
}

/// One stored analysis, as returned by the backend.
///
/// The analyze endpoint may return only `sentiment` and `polarity_score`,
/// so everything else defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct AnalysisRecord {
    #[serde(default, deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub input_text: String,
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub polarity_score: Option<f64>,
    #[serde(default)]
    pub created_at: String,
    #[serde(rename = "user", default)]
    pub author: Option<Author>,
}

impl AnalysisRecord {
    pub fn sentiment_kind(&self) -> Sentiment {
        Sentiment::from_label(&self.sentiment)
    }

    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.username.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown")
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct HistoryResponse {
    #[serde(default)]
    pub results: Vec<AnalysisRecord>,
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(s)) => s,
        Some(RawId::Int(n)) => n.to_string(),
        Some(RawId::Float(f)) => f.to_string(),
        None => String::new(),
    })
}
