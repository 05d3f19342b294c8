use crate::{
    consts::consts::{ActivityName, ParticipantEmail},
    model::activity::Activity,
};

use super::table::ApplyErrors;

/// Enrollment of a single email within a single activity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Enrollment {
    NotEnrolled,
    Enrolled,
}

#[derive(Clone, Debug)]
pub struct ActivityRow {
    name: ActivityName,
    activity: Activity,
}

impl ActivityRow {
    pub fn new(name: ActivityName, activity: Activity) -> Self {
        ActivityRow { name, activity }
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn enrollment(&self, email: &ParticipantEmail) -> Enrollment {
        match self.activity.has_participant(email) {
            true => Enrollment::Enrolled,
            false => Enrollment::NotEnrolled,
        }
    }

    // Every check happens before the roster is touched, a rejected signup leaves the row as it was
    pub fn apply_signup(
        &mut self,
        email: ParticipantEmail,
        enforce_capacity: bool,
    ) -> Result<(), ApplyErrors> {
        // Verify
        if self.enrollment(&email) == Enrollment::Enrolled {
            return Err(ApplyErrors::AlreadySignedUp(self.name.clone(), email));
        }

        if enforce_capacity && self.activity.is_full() {
            return Err(ApplyErrors::ActivityFull(
                self.name.clone(),
                self.activity.max_participants,
            ));
        }

        // Apply
        self.activity.participants.push(email);

        Ok(())
    }

    pub fn apply_unregister(&mut self, email: &ParticipantEmail) -> Result<(), ApplyErrors> {
        // Verify
        let position = self
            .activity
            .participants
            .iter()
            .position(|p| p == email)
            .ok_or_else(|| ApplyErrors::NotSignedUp(self.name.clone(), email.clone()))?;

        // Apply, `remove` keeps the remaining roster in signup order
        self.activity.participants.remove(position);

        Ok(())
    }
}
