use crate::types::TicketId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("Degenerate frame: {width}x{height} has no positive area")]
    DegenerateFrame { width: f64, height: f64 },

    #[error("No pending comment with ticket {ticket}")]
    TicketNotFound { ticket: TicketId },

    #[error("Validation failed: {0}")]
    Validation(String),
}
