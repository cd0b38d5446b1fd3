use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Generation number of one relay connection attempt.
///
/// Every `connect()` opens a new session; transport events carry the session
/// they belong to so results of a superseded attempt can be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(u64);

impl SessionId {
    pub const INITIAL: SessionId = SessionId(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_next() {
        let id = SessionId::INITIAL.next().next();
        assert_eq!(id.value(), 2);
        assert_eq!(id.to_string(), "session-2");
    }
}
