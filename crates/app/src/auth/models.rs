//! Auth data models.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::uuids::TypedUuid;

/// User marker for typed uuids.
#[derive(Debug, Clone, Copy)]
pub struct User;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// The kind of account a user holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Retailer,
    Brand,
    SalesRep,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Retailer => "retailer",
            Self::Brand => "brand",
            Self::SalesRep => "sales_rep",
            Self::Admin => "admin",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown role {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "retailer" => Ok(Self::Retailer),
            "brand" => Ok(Self::Brand),
            "sales_rep" => Ok(Self::SalesRep),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownRole(value.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user: UserUuid,
    pub role: Role,
}

impl Identity {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// New user persistence payload.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Token issued to a user, shown once.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub user: UserUuid,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn roles_parse_from_storage_values() -> TestResult {
        for role in [Role::Retailer, Role::Brand, Role::SalesRep, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>()?, role);
        }

        Ok(())
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("owner".parse::<Role>().is_err());
    }
}
