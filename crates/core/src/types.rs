/// Annotation ids are assigned monotonically and never reused.
pub type AnnotationId = u64;

/// Handle for a finalized selection that is still waiting for its comment.
pub type TicketId = u64;
