use std::convert::TryFrom;

use serde::Deserialize;

/// Path identifier of a todo, always greater than zero
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "i64")]
pub struct TodoId(i32);

impl TodoId {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for TodoId {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(format!("todo_id must be greater than 0, got {}", value));
        }

        i32::try_from(value)
            .map(TodoId)
            .map_err(|_| format!("todo_id {} is out of range", value))
    }
}
