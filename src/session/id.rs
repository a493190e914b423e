use serde_derive::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Serialize, sqlx::Type, Clone, Copy, Eq, PartialEq)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct SessionId(i32);

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i32> for SessionId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}
