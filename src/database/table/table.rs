use std::collections::BTreeMap;
use thiserror::Error;

use crate::{
    consts::consts::{ActivityName, ParticipantEmail},
    model::{
        activity::ActivityCatalog,
        statement::{Statement, StatementResult},
    },
};

use super::row::ActivityRow;

#[derive(Error, Debug, PartialEq)]
pub enum ApplyErrors {
    // Lookups are exact and case-sensitive
    #[error("Activity not found")]
    ActivityNotFound(ActivityName),

    // Roster state transitions
    #[error("{1} is already signed up for {0}")]
    AlreadySignedUp(ActivityName, ParticipantEmail),

    #[error("{1} is not signed up for {0}")]
    NotSignedUp(ActivityName, ParticipantEmail),

    // Constraints
    #[error("{0} is full, all {1} places are taken")]
    ActivityFull(ActivityName, u32),
}

pub struct ActivityTable {
    pub activity_rows: BTreeMap<ActivityName, ActivityRow>,
    enforce_capacity: bool,
}

impl ActivityTable {
    pub fn new(catalog: ActivityCatalog, enforce_capacity: bool) -> Self {
        let activity_rows = catalog
            .into_iter()
            .map(|(name, activity)| (name.clone(), ActivityRow::new(name, activity)))
            .collect();

        Self {
            activity_rows,
            enforce_capacity,
        }
    }

    // Each mutation statement is broken up into 2 steps
    //  - Verifying the activity exists and the transition is allowed
    //  - Applying the transition
    pub fn apply(&mut self, statement: Statement) -> Result<StatementResult, ApplyErrors> {
        let statement_result = match statement {
            Statement::List => StatementResult::List(self.list()),
            Statement::Signup(name, email) => {
                let enforce_capacity = self.enforce_capacity;
                let row = self.row_mut(&name)?;

                let message = format!("Signed up {} for {}", email, name);

                row.apply_signup(email, enforce_capacity)?;

                StatementResult::Message(message)
            }
            Statement::Unregister(name, email) => {
                let row = self.row_mut(&name)?;

                row.apply_unregister(&email)?;

                StatementResult::Message(format!("Unregistered {} from {}", email, name))
            }
        };

        Ok(statement_result)
    }

    pub fn list(&self) -> ActivityCatalog {
        self.activity_rows
            .iter()
            .map(|(name, row)| (name.clone(), row.activity().clone()))
            .collect()
    }

    pub fn participant_count(&self) -> usize {
        self.activity_rows
            .values()
            .map(|row| row.activity().participants.len())
            .sum()
    }

    fn row_mut(&mut self, name: &ActivityName) -> Result<&mut ActivityRow, ApplyErrors> {
        self.activity_rows
            .get_mut(name)
            .ok_or_else(|| ApplyErrors::ActivityNotFound(name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{database::table::row::Enrollment, model::activity::Activity};

    fn email(value: &str) -> ParticipantEmail {
        ParticipantEmail::try_from(value).expect("test emails should be valid")
    }

    fn chess_club() -> ActivityName {
        ActivityName::from("Chess Club")
    }

    fn soccer_team() -> ActivityName {
        ActivityName::from("Soccer Team")
    }

    fn test_table(enforce_capacity: bool) -> ActivityTable {
        let catalog = ActivityCatalog::from([
            (
                chess_club(),
                Activity::new_test(3, &["michael@mergington.edu", "daniel@mergington.edu"]),
            ),
            (soccer_team(), Activity::new_test(22, &[])),
        ]);

        ActivityTable::new(catalog, enforce_capacity)
    }

    fn participants(table: &ActivityTable, name: &ActivityName) -> Vec<ParticipantEmail> {
        table.list()[name].participants.clone()
    }

    mod list {
        use super::*;

        #[test]
        fn list_returns_every_activity() {
            let mut table = test_table(false);

            let catalog = table.apply(Statement::List).unwrap().list();

            assert_eq!(catalog.len(), 2);
            assert!(catalog.contains_key(&chess_club()));
            assert!(catalog.contains_key(&soccer_team()));
        }

        #[test]
        fn list_is_a_pure_read() {
            let mut table = test_table(false);

            let first = table.apply(Statement::List).unwrap();
            let second = table.apply(Statement::List).unwrap();

            assert_eq!(first, second);
        }
    }

    mod signup {
        use super::*;

        #[test]
        fn signup_appends_to_the_roster() {
            // Given a table with a seeded roster
            let mut table = test_table(false);

            // When a new student signs up
            let result = table
                .apply(Statement::Signup(chess_club(), email("test@mergington.edu")))
                .expect("signup should succeed");

            // Then they are appended, after the existing participants
            assert_eq!(
                result,
                StatementResult::Message(
                    "Signed up test@mergington.edu for Chess Club".to_string()
                )
            );

            assert_eq!(
                participants(&table, &chess_club()),
                vec![
                    email("michael@mergington.edu"),
                    email("daniel@mergington.edu"),
                    email("test@mergington.edu"),
                ]
            );
        }

        #[test]
        fn signup_twice_is_rejected() {
            let mut table = test_table(false);

            let statement = Statement::Signup(soccer_team(), email("test@mergington.edu"));

            assert!(table.apply(statement.clone()).is_ok());

            let err = table.apply(statement).expect_err("second signup should fail");

            assert_eq!(
                err,
                ApplyErrors::AlreadySignedUp(soccer_team(), email("test@mergington.edu"))
            );
            assert!(err.to_string().contains("already signed up"));

            // The roster is not modified by the rejected signup
            assert_eq!(
                participants(&table, &soccer_team()),
                vec![email("test@mergington.edu")]
            );
        }

        #[test]
        fn signup_for_seeded_participant_is_rejected() {
            let mut table = test_table(false);

            let err = table
                .apply(Statement::Signup(
                    chess_club(),
                    email("michael@mergington.edu"),
                ))
                .expect_err("seeded participant is already signed up");

            assert!(err.to_string().contains("already signed up"));
        }

        #[test]
        fn signup_for_unknown_activity_is_not_found() {
            let mut table = test_table(false);

            let err = table
                .apply(Statement::Signup(
                    ActivityName::from("Nonexistent Activity"),
                    email("test@mergington.edu"),
                ))
                .expect_err("activity does not exist");

            assert_eq!(err.to_string(), "Activity not found");
        }

        #[test]
        fn activity_names_are_case_sensitive() {
            let mut table = test_table(false);

            let err = table
                .apply(Statement::Signup(
                    ActivityName::from("chess club"),
                    email("test@mergington.edu"),
                ))
                .expect_err("lookups are exact");

            assert_eq!(err, ApplyErrors::ActivityNotFound("chess club".into()));
        }

        #[test]
        fn same_email_in_multiple_activities() {
            let mut table = test_table(false);

            let new_student = email("new_student@mergington.edu");

            table
                .apply(Statement::Signup(chess_club(), new_student.clone()))
                .expect("first activity");
            table
                .apply(Statement::Signup(soccer_team(), new_student.clone()))
                .expect("second activity");

            assert!(participants(&table, &chess_club()).contains(&new_student));
            assert!(participants(&table, &soccer_team()).contains(&new_student));
        }
    }

    mod capacity {
        use super::*;

        #[test]
        fn capacity_is_not_enforced_by_default() {
            // Given chess club with 2 of 3 places taken
            let mut table = test_table(false);

            // When two more students sign up
            for student in ["one@mergington.edu", "two@mergington.edu"] {
                table
                    .apply(Statement::Signup(chess_club(), email(student)))
                    .expect("capacity is not enforced");
            }

            // Then the roster exceeds max_participants
            assert_eq!(participants(&table, &chess_club()).len(), 4);
        }

        #[test]
        fn full_activity_rejects_signup_when_enforced() {
            let mut table = test_table(true);

            table
                .apply(Statement::Signup(chess_club(), email("one@mergington.edu")))
                .expect("last place is available");

            let err = table
                .apply(Statement::Signup(chess_club(), email("two@mergington.edu")))
                .expect_err("activity is full");

            assert_eq!(err, ApplyErrors::ActivityFull(chess_club(), 3));
            assert_eq!(participants(&table, &chess_club()).len(), 3);
        }

        #[test]
        fn duplicate_is_reported_before_full() {
            let mut table = test_table(true);

            table
                .apply(Statement::Signup(chess_club(), email("one@mergington.edu")))
                .unwrap();

            let err = table
                .apply(Statement::Signup(chess_club(), email("one@mergington.edu")))
                .expect_err("already signed up");

            assert!(matches!(err, ApplyErrors::AlreadySignedUp(_, _)));
        }
    }

    mod unregister {
        use super::*;

        #[test]
        fn unregister_after_signup_removes_participant() {
            // Given a student who has signed up
            let mut table = test_table(false);
            let student = email("unregister_test@mergington.edu");

            table
                .apply(Statement::Signup(chess_club(), student.clone()))
                .unwrap();

            // When they unregister
            let result = table
                .apply(Statement::Unregister(chess_club(), student.clone()))
                .expect("unregister should succeed");

            // Then they are no longer on the roster
            assert_eq!(
                result,
                StatementResult::Message(
                    "Unregistered unregister_test@mergington.edu from Chess Club".to_string()
                )
            );
            assert!(!participants(&table, &chess_club()).contains(&student));

            // And unregistering again is rejected
            let err = table
                .apply(Statement::Unregister(chess_club(), student.clone()))
                .expect_err("no longer signed up");

            assert_eq!(err, ApplyErrors::NotSignedUp(chess_club(), student));
        }

        #[test]
        fn unregister_keeps_remaining_order() {
            let mut table = test_table(false);

            table
                .apply(Statement::Signup(chess_club(), email("c@mergington.edu")))
                .unwrap();
            table
                .apply(Statement::Unregister(
                    chess_club(),
                    email("michael@mergington.edu"),
                ))
                .unwrap();

            assert_eq!(
                participants(&table, &chess_club()),
                vec![email("daniel@mergington.edu"), email("c@mergington.edu")]
            );
        }

        #[test]
        fn unregister_never_enrolled_is_rejected() {
            let mut table = test_table(false);

            let err = table
                .apply(Statement::Unregister(
                    chess_club(),
                    email("not_signed_up@mergington.edu"),
                ))
                .expect_err("never signed up");

            assert!(err.to_string().contains("not signed up"));
            assert_eq!(participants(&table, &chess_club()).len(), 2);
        }

        #[test]
        fn unregister_from_unknown_activity_is_not_found() {
            let mut table = test_table(false);

            let err = table
                .apply(Statement::Unregister(
                    ActivityName::from("Nonexistent Activity"),
                    email("test@mergington.edu"),
                ))
                .expect_err("activity does not exist");

            assert!(matches!(err, ApplyErrors::ActivityNotFound(_)));
        }
    }

    mod enrollment {
        use super::*;

        #[test]
        fn signup_and_unregister_are_reversible() {
            let mut table = test_table(false);
            let student = email("cycle@mergington.edu");

            let enrollment = |table: &ActivityTable| {
                table.activity_rows[&chess_club()].enrollment(&student)
            };

            for _ in 0..3 {
                assert_eq!(enrollment(&table), Enrollment::NotEnrolled);

                table
                    .apply(Statement::Signup(chess_club(), student.clone()))
                    .unwrap();

                assert_eq!(enrollment(&table), Enrollment::Enrolled);

                table
                    .apply(Statement::Unregister(chess_club(), student.clone()))
                    .unwrap();
            }

            assert_eq!(enrollment(&table), Enrollment::NotEnrolled);
        }
    }
}
