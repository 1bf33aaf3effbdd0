use crate::store::NewMessage;

pub const MIN_MESSAGE_LEN: usize = 5;
pub const MAX_MESSAGE_LEN: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    BotDetected,
    MissingFields,
    TooShort,
    TooLong,
}

impl Rejection {
    pub fn message(self) -> &'static str {
        match self {
            Rejection::BotDetected => "Bot detected",
            Rejection::MissingFields => "All fields are required",
            Rejection::TooShort => "Message must be at least 5 characters",
            Rejection::TooLong => "Message must be at most 1000 characters",
        }
    }
}

/// Checks run in order and stop at the first failure: honeypot, then
/// required fields, then message length.
pub fn screen(submission: &NewMessage) -> Result<(), Rejection> {
    if let Some(trap) = &submission.honeypot {
        if !trap.trim().is_empty() {
            return Err(Rejection::BotDetected);
        }
    }

    if submission.name.is_empty() || submission.email.is_empty() || submission.message.is_empty() {
        return Err(Rejection::MissingFields);
    }

    let length = submission.message.chars().count();
    if length < MIN_MESSAGE_LEN {
        return Err(Rejection::TooShort);
    }
    if length > MAX_MESSAGE_LEN {
        return Err(Rejection::TooLong);
    }

    Ok(())
}
