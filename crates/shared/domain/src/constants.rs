//! Domain-level constants.
//!
//! Wire values for statuses and kinds, plus the field limits enforced at the
//! boundary.

// =============================================================================
// Tender
// =============================================================================

pub const TENDER_STATUS_CREATED: &str = "Created";
pub const TENDER_STATUS_PUBLISHED: &str = "Published";
pub const TENDER_STATUS_CLOSED: &str = "Closed";

pub const SERVICE_TYPE_CONSTRUCTION: &str = "Construction";
pub const SERVICE_TYPE_DELIVERY: &str = "Delivery";
pub const SERVICE_TYPE_MANUFACTURE: &str = "Manufacture";

/// Version assigned to freshly created tenders and bids
pub const INITIAL_VERSION: i32 = 1;

// =============================================================================
// Bid
// =============================================================================

/// Status every bid starts with
pub const BID_STATUS_CREATED: &str = "Created";

pub const AUTHOR_TYPE_ORGANIZATION: &str = "Organization";
pub const AUTHOR_TYPE_USER: &str = "User";

pub const DECISION_APPROVED: &str = "Approved";
pub const DECISION_REJECTED: &str = "Rejected";

// =============================================================================
// Validation
// =============================================================================

/// Maximum tender or bid name length
pub const MAX_NAME_LENGTH: u64 = 100;

/// Maximum tender or bid description length
pub const MAX_DESCRIPTION_LENGTH: u64 = 500;
