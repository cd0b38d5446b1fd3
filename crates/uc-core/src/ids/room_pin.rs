use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Pairing code shared by every device of a room.
///
/// The pin is the only admission control of the relay: any connection that
/// presents the same pin joins the same broadcast group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomPin(String);

impl RoomPin {
    pub fn new(pin: impl Into<String>) -> Self {
        Self(pin.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl Display for RoomPin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RoomPin {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RoomPin {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_pin_validity() {
        assert!(RoomPin::from("1234").is_valid());
        assert!(!RoomPin::from(" ").is_valid());
    }
}
