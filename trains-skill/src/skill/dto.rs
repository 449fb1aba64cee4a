//! Voice platform request and response envelopes.
//!
//! Only the fields the skill reads are modelled; everything else in the
//! incoming JSON is ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Envelope version the platform expects in responses.
pub const RESPONSE_VERSION: &str = "1.0";

/// Incoming skill request.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillRequest {
    #[serde(default)]
    pub session: Option<Session>,
    pub request: RequestBody,
}

impl SkillRequest {
    /// Id of the user talking to the skill, if the platform sent one.
    pub fn user_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|s| s.user.as_ref())
            .map(|u| u.user_id.as_str())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
}

/// The `request` object: what happened and, for intents, what was said.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestBody {
    /// `LaunchRequest`, `IntentRequest`, `SessionEndedRequest`, ...
    #[serde(rename = "type")]
    pub kind: String,

    /// ISO 8601 instant the request was made
    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(default)]
    pub intent: Option<Intent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl Intent {
    /// Trimmed value of slot `name`, if filled.
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots
            .get(name)
            .and_then(|s| s.value.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub value: Option<String>,
}

/// Speech returned to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

impl OutputSpeech {
    /// The text of the speech, markup included.
    pub fn content(&self) -> &str {
        match self {
            OutputSpeech::PlainText { text } => text,
            OutputSpeech::Ssml { ssml } => ssml,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub output_speech: OutputSpeech,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

/// Outgoing skill response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillResponse {
    pub version: String,
    pub response: ResponseBody,
}

impl SkillResponse {
    fn new(output_speech: OutputSpeech, reprompt: Option<String>, end_session: bool) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            response: ResponseBody {
                output_speech,
                reprompt: reprompt.map(|text| Reprompt {
                    output_speech: OutputSpeech::PlainText { text },
                }),
                should_end_session: end_session,
            },
        }
    }

    /// Plain text speech.
    pub fn plain(text: impl Into<String>, end_session: bool) -> Self {
        Self::new(OutputSpeech::PlainText { text: text.into() }, None, end_session)
    }

    /// Plain text speech with a reprompt if the user stays silent.
    pub fn prompt(text: impl Into<String>, reprompt: impl Into<String>, end_session: bool) -> Self {
        Self::new(
            OutputSpeech::PlainText { text: text.into() },
            Some(reprompt.into()),
            end_session,
        )
    }

    /// SSML speech; `body` is wrapped in `<speak>` and must already be
    /// escaped.
    pub fn ssml(body: &str, end_session: bool) -> Self {
        Self::new(
            OutputSpeech::Ssml {
                ssml: format!("<speak>{body}</speak>"),
            },
            None,
            end_session,
        )
    }

    pub fn speech(&self) -> &str {
        self.response.output_speech.content()
    }

    pub fn ends_session(&self) -> bool {
        self.response.should_end_session
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
