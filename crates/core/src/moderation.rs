//! Moderation workflow constants and validation.
//!
//! Manga and person entries enter the catalog as `pending` and become
//! publicly visible only once an admin approves them. A rejected entry stays
//! visible to its creator so it can be fixed and re-submitted.

/// Entry is awaiting an admin decision.
pub const STATUS_PENDING: &str = "pending";

/// Entry is approved and publicly visible.
pub const STATUS_APPROVED: &str = "approved";

/// Entry was rejected by an admin.
pub const STATUS_REJECTED: &str = "rejected";

/// All valid moderation states.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

/// Decisions an admin may record. `pending` is the initial state only.
pub const VALID_DECISIONS: &[&str] = &[STATUS_APPROVED, STATUS_REJECTED];

/// Validate that a moderation decision is one of the accepted values.
pub fn validate_decision(decision: &str) -> Result<(), String> {
    if VALID_DECISIONS.contains(&decision) {
        Ok(())
    } else {
        Err(format!(
            "Invalid decision '{decision}'. Must be one of: {}",
            VALID_DECISIONS.join(", ")
        ))
    }
}
