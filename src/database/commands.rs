use crate::model::statement::{Statement, StatementResult};

use super::table::table::ApplyErrors;

/// Database commands are how we interact with the database, they are how we ask the database to run a statement, shutdown, etc
///
/// The majority of interactions happen via statements (list, signup, unregister), but there are also commands that are used
/// to control the database (ping, shutdown).
#[derive(Debug)]
pub enum DatabaseCommand {
    /// Sends a statement to the database and returns its result
    Statement(Statement),

    /// Commands that control the database
    Control(Control),
}

impl DatabaseCommand {
    /// Prints complex logs in a more readable format
    pub fn log_format(&self) -> String {
        match self {
            DatabaseCommand::Statement(statement) => format!("{:?}", statement),
            DatabaseCommand::Control(control) => format!("Control({:?})", control),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Checks that the database thread is alive and processing requests
    Ping,
    /// Stops the database thread, the catalog is discarded
    Shutdown,
}

#[derive(Debug, PartialEq)]
pub enum DatabaseCommandStatementResponse {
    /// Statement was applied, returns its result
    Commit(StatementResult),
    /// Statement was rejected, nothing was changed
    Rejected(ApplyErrors),
}

#[derive(Debug, PartialEq)]
pub enum DatabaseCommandResponse {
    Statement(DatabaseCommandStatementResponse),
    Control(String),
}

impl DatabaseCommandResponse {
    pub fn control_success(message: &str) -> Self {
        DatabaseCommandResponse::Control(message.to_string())
    }

    pub fn statement_commit(result: StatementResult) -> Self {
        DatabaseCommandResponse::Statement(DatabaseCommandStatementResponse::Commit(result))
    }

    pub fn statement_rejected(error: ApplyErrors) -> Self {
        DatabaseCommandResponse::Statement(DatabaseCommandStatementResponse::Rejected(error))
    }
}
