use std::time::Duration;

use flume::Sender;
use thiserror::Error;

use crate::{
    consts::consts::{ActivityName, ParticipantEmail},
    model::{
        activity::ActivityCatalog,
        statement::{Statement, StatementResult},
    },
};

use super::{
    commands::{
        Control, DatabaseCommand, DatabaseCommandResponse, DatabaseCommandStatementResponse,
    },
    table::table::ApplyErrors,
};

pub struct DatabaseRequest {
    pub response_sender: oneshot::Sender<DatabaseCommandResponse>,
    pub command: DatabaseCommand,
}

#[derive(Error, Debug)]
pub enum RequestManagerError {
    #[error("Database took too long to respond to request")]
    DatabaseTimeout,

    #[error("Database is no longer running")]
    DatabaseExited,

    #[error("Database responded with an unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error(transparent)]
    Rejected(#[from] ApplyErrors),
}

/// Goal of the request manager is to provide a simple, type safe interface for interacting with the database
///
/// The database runs on its own thread and owns the catalog. Every request is sent over a channel and applied
/// in order, so a signup or unregister can never interleave with another mutation of the same roster.
#[derive(Clone)]
pub struct RequestManager {
    database_sender: Sender<DatabaseRequest>,
    timeout: Duration,
}

impl RequestManager {
    pub fn new(database_sender: Sender<DatabaseRequest>, timeout: Duration) -> Self {
        Self {
            database_sender,
            timeout,
        }
    }

    pub fn send_list(&self) -> Result<ActivityCatalog, RequestManagerError> {
        match self.send_statement(Statement::List)? {
            StatementResult::List(catalog) => Ok(catalog),
            other => Err(RequestManagerError::UnexpectedResponse(format!("{:?}", other))),
        }
    }

    pub fn send_signup(
        &self,
        name: ActivityName,
        email: ParticipantEmail,
    ) -> Result<String, RequestManagerError> {
        self.send_message_statement(Statement::Signup(name, email))
    }

    pub fn send_unregister(
        &self,
        name: ActivityName,
        email: ParticipantEmail,
    ) -> Result<String, RequestManagerError> {
        self.send_message_statement(Statement::Unregister(name, email))
    }

    /// Round trips through the database thread, used for health checks
    pub fn send_ping(&self) -> Result<String, RequestManagerError> {
        self.send_control(Control::Ping)
    }

    /// Sends a shutdown request to the database and returns the database's response
    pub fn send_shutdown_request(&self) -> Result<String, RequestManagerError> {
        self.send_control(Control::Shutdown)
    }

    fn send_message_statement(&self, statement: Statement) -> Result<String, RequestManagerError> {
        match self.send_statement(statement)? {
            StatementResult::Message(message) => Ok(message),
            other => Err(RequestManagerError::UnexpectedResponse(format!("{:?}", other))),
        }
    }

    fn send_control(&self, control: Control) -> Result<String, RequestManagerError> {
        match self.send_command(DatabaseCommand::Control(control))? {
            DatabaseCommandResponse::Control(message) => Ok(message),
            other => Err(RequestManagerError::UnexpectedResponse(format!("{:?}", other))),
        }
    }

    /// Sends a single statement to the database, a rejected statement is returned as an error
    pub fn send_statement(
        &self,
        statement: Statement,
    ) -> Result<StatementResult, RequestManagerError> {
        match self.send_command(DatabaseCommand::Statement(statement))? {
            DatabaseCommandResponse::Statement(DatabaseCommandStatementResponse::Commit(result)) => {
                Ok(result)
            }
            DatabaseCommandResponse::Statement(DatabaseCommandStatementResponse::Rejected(
                error,
            )) => Err(error.into()),
            other => Err(RequestManagerError::UnexpectedResponse(format!("{:?}", other))),
        }
    }

    pub fn send_command(
        &self,
        command: DatabaseCommand,
    ) -> Result<DatabaseCommandResponse, RequestManagerError> {
        let (response_sender, response_receiver) = oneshot::channel::<DatabaseCommandResponse>();

        let request = DatabaseRequest {
            response_sender,
            command,
        };

        // Sends the request to the database worker, database will response
        //  on the response_receiver once it's finished processing it's request
        self.database_sender
            .send(request)
            .map_err(|_| RequestManagerError::DatabaseExited)?;

        match response_receiver.recv_timeout(self.timeout) {
            Ok(response) => Ok(response),
            Err(oneshot::RecvTimeoutError::Timeout) => Err(RequestManagerError::DatabaseTimeout),
            Err(oneshot::RecvTimeoutError::Disconnected) => {
                Err(RequestManagerError::DatabaseExited)
            }
        }
    }
}
