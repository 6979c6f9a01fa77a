use inquire::InquireError;

mod spinner;
mod style;

pub use spinner::Spinner;
pub use style::Style;

/// Treats Escape and Ctrl+C at a prompt as "no answer" instead of an error.
pub trait PromptResultExt<T> {
    /// `Ok(None)` when the user dismissed the prompt.
    fn or_dismissed(self) -> Result<Option<T>, InquireError>;
}

impl<T> PromptResultExt<T> for Result<T, InquireError> {
    fn or_dismissed(self) -> Result<Option<T>, InquireError> {
        match self {
            Ok(answer) => Ok(Some(answer)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
