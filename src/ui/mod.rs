use inquire::InquireError;

mod progress;
mod spinner;
mod theme;

pub use progress::RunProgress;
pub use spinner::Spinner;
pub use theme::Style;

/// Check if the inquire error is a user cancellation/interruption (Esc, Ctrl+C).
pub const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}
