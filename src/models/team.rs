use std::fmt;

use crate::entities::{teams, users};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub name: String,
}

impl NewTeam {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A team together with its expanded member records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamWithMembers {
    pub team: teams::Model,
    pub members: Vec<users::Model>,
}

impl fmt::Display for teams::Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for TeamWithMembers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.team.fmt(f)
    }
}
