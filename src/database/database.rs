use std::{thread, time::Instant};

use flume::Receiver;
use num_format::{Locale, ToFormattedString};

use crate::model::{
    activity::{ActivityCatalog, CatalogError},
    statement::Statement,
};

use super::{
    commands::{Control, DatabaseCommand, DatabaseCommandResponse},
    options::DatabaseOptions,
    request_manager::{DatabaseRequest, RequestManager},
    table::table::ActivityTable,
};

/// Owns the activity table. Once running, the table is only reachable through a [`RequestManager`]
pub struct Database {
    activity_table: ActivityTable,
    database_options: DatabaseOptions,
}

impl Database {
    /// Loads the catalog named by the options, fails if the seed is unreadable or invalid
    pub fn new(options: DatabaseOptions) -> Result<Self, CatalogError> {
        let now = Instant::now();

        let catalog = options.seed.load()?;

        let database = Self::from_catalog(catalog, options);

        log::info!(
            "✅ Successful Seed [Duration: {}ms]",
            now.elapsed().as_millis(),
        );

        log::info!(
            "📀 Data            [Activities: {}, Participants: {}, EnforceCapacity: {}]",
            database
                .activity_table
                .activity_rows
                .len()
                .to_formatted_string(&Locale::en),
            database
                .activity_table
                .participant_count()
                .to_formatted_string(&Locale::en),
            database.database_options.enforce_capacity
        );

        Ok(database)
    }

    pub fn from_catalog(catalog: ActivityCatalog, options: DatabaseOptions) -> Self {
        Self {
            activity_table: ActivityTable::new(catalog, options.enforce_capacity),
            database_options: options,
        }
    }

    pub fn new_test() -> Self {
        Self::new(DatabaseOptions::default()).expect("built in catalog should load")
    }

    /// Moves the database onto its own thread and returns a handle for sending it requests
    pub fn run(self) -> RequestManager {
        let (database_sender, database_receiver) = flume::unbounded::<DatabaseRequest>();

        let request_manager =
            RequestManager::new(database_sender, self.database_options.request_timeout);

        thread::spawn(move || self.start(database_receiver));

        request_manager
    }

    fn start(mut self, database_receiver: Receiver<DatabaseRequest>) {
        // Exits once every request manager has been dropped, or on a shutdown request
        while let Ok(DatabaseRequest {
            command,
            response_sender,
        }) = database_receiver.recv()
        {
            log::info!("Received request: {}", command.log_format());

            let response = match command {
                DatabaseCommand::Statement(statement) => self.process_statement(statement),
                DatabaseCommand::Control(Control::Ping) => {
                    DatabaseCommandResponse::control_success("pong")
                }
                DatabaseCommand::Control(Control::Shutdown) => {
                    let _ = response_sender.send(DatabaseCommandResponse::control_success(
                        "Successfully shutdown database",
                    ));

                    return;
                }
            };

            // Sends the response data back to the caller of the request (i.e.), the entity on the other end of the channel
            if response_sender.send(response).is_err() {
                log::warn!("Requester dropped before the response was sent");
            }
        }

        log::info!("All request managers dropped, stopping database");
    }

    pub fn process_statement(&mut self, statement: Statement) -> DatabaseCommandResponse {
        let is_mutation = statement.is_mutation();

        match self.activity_table.apply(statement) {
            Ok(result) => {
                if is_mutation {
                    log::info!("✅ Committed: {:?}", result);
                }

                DatabaseCommandResponse::statement_commit(result)
            }
            Err(err) => {
                log::warn!("⚠️  Rejected: {}", err);

                DatabaseCommandResponse::statement_rejected(err)
            }
        }
    }
}
