use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const ROOM_ID_LEN: usize = 6;
const ROOM_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomIdError {
    #[error("room id must be exactly {ROOM_ID_LEN} characters, got {0}")]
    BadLength(usize),
    #[error("room id must contain only uppercase letters and digits: {0:?}")]
    BadCharacter(char),
}

/// 6-character uppercase alphanumeric room code, e.g. `AB12CD`.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
#[serde(try_from = "String", into = "String")]
pub struct RoomId(String);

impl RoomId {
    /// Generate a fresh random room code. Collision handling is the
    /// caller's concern (the directory retries while an id is taken).
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let code = (0..ROOM_ID_LEN)
            .map(|_| ROOM_ID_CHARSET[rng.gen_range(0..ROOM_ID_CHARSET.len())] as char)
            .collect();
        Self(code)
    }

    pub fn parse(s: &str) -> Result<Self, RoomIdError> {
        if s.len() != ROOM_ID_LEN {
            return Err(RoomIdError::BadLength(s.len()));
        }
        if let Some(c) = s
            .chars()
            .find(|c| !c.is_ascii_uppercase() && !c.is_ascii_digit())
        {
            return Err(RoomIdError::BadCharacter(c));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = RoomIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<RoomId> for String {
    fn from(id: RoomId) -> Self {
        id.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
