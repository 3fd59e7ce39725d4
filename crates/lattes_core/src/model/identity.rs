//! Caller identity and vote direction value types.
//!
//! # Invariants
//! - `Identity` serializes as a plain string: a user UUID, or the literal
//!   `anonymous` for callers without a session.
//! - `VoteDirection` serializes as `1` (up) or `-1` (down).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier of a registered user.
pub type UserId = Uuid;
/// Stable identifier of a coffee shop.
pub type ShopId = Uuid;
/// Stable identifier of a speed-test record.
pub type SpeedTestId = Uuid;

const ANONYMOUS_LABEL: &str = "anonymous";

/// Who performed an operation.
///
/// Session handling lives outside the core, so callers pass the resolved
/// identity explicitly instead of the core guessing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Identity {
    /// No authenticated session.
    Anonymous,
    /// Registered user.
    User(UserId),
}

impl Identity {
    /// Returns the user id for authenticated identities.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(*id),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

impl From<UserId> for Identity {
    fn from(value: UserId) -> Self {
        Self::User(value)
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => f.write_str(ANONYMOUS_LABEL),
            Self::User(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for Identity {
    type Err = IdentityParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed == ANONYMOUS_LABEL {
            return Ok(Self::Anonymous);
        }
        Uuid::parse_str(trimmed)
            .map(Self::User)
            .map_err(|_| IdentityParseError(trimmed.to_string()))
    }
}

impl TryFrom<String> for Identity {
    type Error = IdentityParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identity> for String {
    fn from(value: Identity) -> Self {
        value.to_string()
    }
}

/// Identity text that is neither a UUID nor `anonymous`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityParseError(String);

impl Display for IdentityParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid identity `{}`; expected a user uuid or `{ANONYMOUS_LABEL}`",
            self.0
        )
    }
}

impl Error for IdentityParseError {}

/// Direction of a single shop vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Signed unit value persisted in the vote map.
    pub fn value(self) -> i8 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

impl TryFrom<i8> for VoteDirection {
    type Error = VoteParseError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            other => Err(VoteParseError(other.to_string())),
        }
    }
}

impl From<VoteDirection> for i8 {
    fn from(value: VoteDirection) -> Self {
        value.value()
    }
}

impl FromStr for VoteDirection {
    type Err = VoteParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(VoteParseError(value.to_string())),
        }
    }
}

impl Display for VoteDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
        }
    }
}

/// Vote input that is not `up`/`down` (or `1`/`-1` on the wire).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteParseError(String);

impl Display for VoteParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid vote `{}`; expected up|down", self.0)
    }
}

impl Error for VoteParseError {}

#[cfg(test)]
mod tests {
    use super::{Identity, VoteDirection};
    use uuid::Uuid;

    #[test]
    fn identity_parses_uuid_and_anonymous_sentinel() {
        let id = Uuid::new_v4();
        assert_eq!(
            id.to_string().parse::<Identity>().unwrap(),
            Identity::User(id)
        );
        assert_eq!(" anonymous ".parse::<Identity>().unwrap(), Identity::Anonymous);
        assert!("nobody".parse::<Identity>().is_err());
    }

    #[test]
    fn identity_display_roundtrips_through_from_str() {
        let identity = Identity::User(Uuid::new_v4());
        assert_eq!(identity.to_string().parse::<Identity>().unwrap(), identity);
        assert_eq!(Identity::Anonymous.to_string(), "anonymous");
    }

    #[test]
    fn vote_direction_parses_case_insensitively() {
        assert_eq!("UP".parse::<VoteDirection>().unwrap(), VoteDirection::Up);
        assert_eq!("down".parse::<VoteDirection>().unwrap(), VoteDirection::Down);
        assert!("sideways".parse::<VoteDirection>().is_err());
    }

    #[test]
    fn vote_direction_rejects_non_unit_wire_values() {
        assert_eq!(VoteDirection::try_from(1).unwrap(), VoteDirection::Up);
        assert_eq!(VoteDirection::try_from(-1).unwrap(), VoteDirection::Down);
        assert!(VoteDirection::try_from(0).is_err());
        assert!(VoteDirection::try_from(2).is_err());
    }
}
