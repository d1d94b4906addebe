use std::convert::TryFrom;

use serde::Deserialize;

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Deserialize)]
pub struct ChangePasswordDTO {
    pub password: String,
    pub new_password: NewPassword,
}

/// Replacement password, at least [`MIN_PASSWORD_LENGTH`] characters
#[derive(Debug, Deserialize)]
#[serde(try_from = "String")]
pub struct NewPassword(String);

impl NewPassword {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NewPassword {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(format!(
                "new_password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ));
        }

        Ok(NewPassword(value))
    }
}
