//! Names and argument vocabulary of the profile tool catalog.
//!
//! Both the tool service and the chat client speak in these terms, so they
//! live next to the wire types.

use std::fmt;
use std::str::FromStr;

/// Count used by `get_multiple_users` when none is given.
pub const DEFAULT_COUNT: i64 = 5;

/// Inclusive bounds for `get_multiple_users`' `count`.
pub const MIN_COUNT: i64 = 1;
pub const MAX_COUNT: i64 = 10;

/// A tool in the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    GetRandomUser,
    GetMultipleUsers,
    GetUserByGender,
}

impl ToolName {
    pub const ALL: [ToolName; 3] = [
        ToolName::GetRandomUser,
        ToolName::GetMultipleUsers,
        ToolName::GetUserByGender,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::GetRandomUser => "get_random_user",
            ToolName::GetMultipleUsers => "get_multiple_users",
            ToolName::GetUserByGender => "get_user_by_gender",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// Gender filter accepted by `get_user_by_gender`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(UnknownName(other.to_string())),
        }
    }
}

/// A string that is not one of the closed set of names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown name: {0}")]
pub struct UnknownName(pub String);
