//! AI response types — the shapes a chat provider may hand back.
//!
//! Providers answer either with a bare string or with an object carrying a
//! `message` field. The message is a string, an object whose `content` is a
//! string or a list of fragments, or a list of fragments directly.
//! Classification happens once, when the JSON is decoded; after that
//! `AiResponse::normalize` flattens every variant into one string.

use serde::Deserialize;
use serde_json::{Map, Value};

/// A chat response as returned by the AI capability.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum AiResponse {
    /// Plain string response.
    Text(String),
    /// Object exposing a (possibly absent) `message` field.
    Structured { message: Option<MessageBody> },
    /// Any other JSON shape.
    Unrecognized(Value),
}

/// The `message` field of a structured response.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    Text(String),
    Object { content: Option<MessageContent> },
    Fragments(Vec<Fragment>),
    Unrecognized(Value),
}

/// The `content` field of a message object.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    Fragments(Vec<Fragment>),
    Unrecognized(Value),
}

/// One piece of a multi-part message.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fragment {
    pub content: Option<String>,
}

impl Fragment {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }
}

impl From<Value> for AiResponse {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => AiResponse::Text(text),
            Value::Object(mut map) => AiResponse::Structured {
                message: map.remove("message").and_then(MessageBody::from_value),
            },
            other => AiResponse::Unrecognized(other),
        }
    }
}

impl MessageBody {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(MessageBody::Text(text)),
            Value::Array(items) => Some(MessageBody::Fragments(fragments(items))),
            Value::Object(mut map) => Some(MessageBody::Object {
                content: map.remove("content").and_then(MessageContent::from_value),
            }),
            other => Some(MessageBody::Unrecognized(other)),
        }
    }

    fn normalize(&self) -> String {
        match self {
            MessageBody::Text(text) => text.clone(),
            MessageBody::Object {
                content: Some(MessageContent::Text(text)),
            } => text.clone(),
            MessageBody::Object {
                content: Some(MessageContent::Fragments(parts)),
            }
            | MessageBody::Fragments(parts) => join_fragments(parts),
            MessageBody::Object { .. } | MessageBody::Unrecognized(_) => String::new(),
        }
    }
}

impl MessageContent {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(MessageContent::Text(text)),
            Value::Array(items) => Some(MessageContent::Fragments(fragments(items))),
            other => Some(MessageContent::Unrecognized(other)),
        }
    }
}

impl From<Value> for Fragment {
    /// Provider content blocks use `text` for the same thing as `content`,
    /// so either key is accepted. Non-object items carry no content.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Fragment {
                content: fragment_text(&map),
            },
            _ => Fragment::default(),
        }
    }
}

fn fragment_text(map: &Map<String, Value>) -> Option<String> {
    map.get("content")
        .or_else(|| map.get("text"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn fragments(items: Vec<Value>) -> Vec<Fragment> {
    items.into_iter().map(Fragment::from).collect()
}

fn join_fragments(parts: &[Fragment]) -> String {
    parts
        .iter()
        .map(|f| f.content.as_deref().unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}

impl AiResponse {
    /// Build a `{ message: [fragments...] }` response.
    pub fn from_fragments<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AiResponse::Structured {
            message: Some(MessageBody::Fragments(
                parts.into_iter().map(Fragment::new).collect(),
            )),
        }
    }

    /// Flatten the response into a single string (untrimmed).
    ///
    /// Fragment lists are joined with `\n`; a fragment without content
    /// contributes an empty line. Unknown shapes yield `""`.
    pub fn normalize(&self) -> String {
        match self {
            AiResponse::Text(text) => text.clone(),
            AiResponse::Structured {
                message: Some(message),
            } => message.normalize(),
            AiResponse::Structured { message: None } | AiResponse::Unrecognized(_) => {
                String::new()
            }
        }
    }
}
