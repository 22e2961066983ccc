use serde::{Deserialize, Serialize};
use structfield::Record;

/// User record as exposed by a REST API.
///
/// Nested `friends` are serialized in full unless a rule replaces them
/// (e.g. with a `friends_url` link).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Record)]
pub struct User {
    #[structfield("id")]
    pub id: String,

    #[structfield("name")]
    pub name: String,

    #[structfield("age,omitempty")]
    #[serde(default)]
    pub age: u32,

    #[structfield("email,omitempty")]
    #[serde(default)]
    pub email: Option<String>,

    #[structfield("friends,omitempty")]
    #[serde(default)]
    pub friends: Vec<User>,

    #[structfield("-")]
    #[serde(default, skip_serializing)]
    pub password_hash: String,
}
