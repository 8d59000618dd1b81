//! Ticket identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Subject used for commits that reference no ticket.
pub const NO_TICKET_SUBJECT: &str = "YourMessageHere";

/// Ticket id in the external tracker. `0` means "no ticket".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawTicketId", into = "u32")]
pub struct TicketId(u32);

/// History files written by older versions hold ids as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTicketId {
    Number(u32),
    Text(String),
}

impl TicketId {
    pub const NONE: TicketId = TicketId(0);

    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Five digit, zero padded label (`00000` for no ticket).
    pub fn label(self) -> String {
        format!("{:05}", self.0)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TicketId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(TicketId)
            .map_err(|_| Error::InvalidTicketId(s.to_string()))
    }
}

impl TryFrom<RawTicketId> for TicketId {
    type Error = Error;

    fn try_from(raw: RawTicketId) -> Result<Self, Self::Error> {
        match raw {
            RawTicketId::Number(n) => Ok(TicketId(n)),
            RawTicketId::Text(s) => s.parse(),
        }
    }
}

impl From<TicketId> for u32 {
    fn from(id: TicketId) -> Self {
        id.0
    }
}

impl From<u32> for TicketId {
    fn from(id: u32) -> Self {
        TicketId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_is_zero_padded() {
        assert_eq!(TicketId::NONE.label(), "00000");
        assert_eq!(TicketId::new(5).label(), "00005");
        assert_eq!(TicketId::new(123456).label(), "123456");
    }

    #[test]
    fn test_parse() {
        assert_eq!("42".parse::<TicketId>().unwrap(), TicketId::new(42));
        assert_eq!("0".parse::<TicketId>().unwrap(), TicketId::NONE);
        assert!("abc".parse::<TicketId>().is_err());
        assert!("-3".parse::<TicketId>().is_err());
    }

    #[test]
    fn test_deserialize_numbers_and_strings() {
        let ids: Vec<TicketId> = serde_json::from_str(r#"[12, "34", "0"]"#).unwrap();
        assert_eq!(ids, vec![TicketId::new(12), TicketId::new(34), TicketId::NONE]);
    }

    #[test]
    fn test_serialize_as_numbers() {
        let json = serde_json::to_string(&vec![TicketId::new(7), TicketId::NONE]).unwrap();
        assert_eq!(json, "[7,0]");
    }
}
