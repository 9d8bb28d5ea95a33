//! Staff roles.
//!
//! Roles form a closed enumeration. A role determines both which routes a
//! user may call and which patient fields are visible to them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A staff role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full clinical access; creates and updates patient records.
    Doctor,
    /// Clinical access minus sensitive history; updates vitals.
    Nurse,
    /// Front-desk access: demographics, contact info, appointments.
    Receptionist,
    /// Administrative access; deletion and global analytics.
    Admin,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: &'static [Role] = &[Self::Doctor, Self::Nurse, Self::Receptionist, Self::Admin];

    /// Returns the role name as it appears on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Doctor => "doctor",
            Self::Nurse => "nurse",
            Self::Receptionist => "receptionist",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doctor" => Ok(Self::Doctor),
            "nurse" => Ok(Self::Nurse),
            "receptionist" => Ok(Self::Receptionist),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}
