use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{DomainError, DomainResult};

/// Scheduled delivery time, held as minute-of-day so comparisons and
/// maximum queries are plain integer comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeliveryTime(u16);

impl DeliveryTime {
    /// Parse a zero-padded 24-hour "HH:MM" string
    pub fn parse(value: &str) -> DomainResult<Self> {
        let time = NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
            DomainError::InvalidInput(format!("Malformed delivery time: {:?}", value))
        })?;
        Ok(Self((time.hour() * 60 + time.minute()) as u16))
    }

    pub fn minute_of_day(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for DeliveryTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl TryFrom<String> for DeliveryTime {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        Self::parse(&value)
    }
}

impl From<DeliveryTime> for String {
    fn from(value: DeliveryTime) -> Self {
        value.to_string()
    }
}
