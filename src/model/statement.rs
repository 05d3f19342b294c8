use serde::{Deserialize, Serialize};

use crate::consts::consts::{ActivityName, ParticipantEmail};

use super::activity::ActivityCatalog;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Statement {
    /// Returns every activity with its current roster
    List,
    Signup(ActivityName, ParticipantEmail),
    Unregister(ActivityName, ParticipantEmail),
}

impl Statement {
    pub fn is_query(&self) -> bool {
        !self.is_mutation()
    }

    pub fn is_mutation(&self) -> bool {
        match self {
            Statement::Signup(_, _) | Statement::Unregister(_, _) => true,
            Statement::List => false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum StatementResult {
    List(ActivityCatalog),
    /// Confirmation returned to the caller of a successful signup / unregister
    Message(String),
}

#[cfg(test)]
impl StatementResult {
    pub fn list(self) -> ActivityCatalog {
        if let StatementResult::List(l) = self {
            l
        } else {
            panic!("Statement result is not of type List")
        }
    }
}
