use serde_derive::Serialize;
use serde_json::Number;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Duration of a study session.
///
/// Stored as `NUMERIC`, so both `30` and `12.5` are valid. The JSON number is
/// kept as-is to avoid turning integers into floats on the way back out.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct Minutes(Number);

impl Minutes {
    /// Accepts JSON numbers only: strings, booleans and nulls are not minutes.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => Some(Self(n.clone())),
            _ => None,
        }
    }
}

impl Display for Minutes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Minutes {
    type Err = serde_json::Error;

    // Postgres renders NUMERIC as plain decimal text, which is valid JSON.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str::<Number>(s).map(Self)
    }
}

impl From<i64> for Minutes {
    fn from(value: i64) -> Self {
        Self(value.into())
    }
}
