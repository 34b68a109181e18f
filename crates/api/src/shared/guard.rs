use crate::error::ReminderError;
use reminder_domain::ID;

pub struct Guard {}

impl Guard {
    pub fn against_malformed_id(val: &str) -> Result<ID, ReminderError> {
        val.trim()
            .parse()
            .map_err(|e| ReminderError::BadClientData(format!("{}", e)))
    }

    pub fn against_blank(field: &str, val: &str) -> Result<(), ReminderError> {
        if val.trim().is_empty() {
            return Err(ReminderError::BadClientData(format!(
                "The `{}` field must not be empty",
                field
            )));
        }
        Ok(())
    }
}
