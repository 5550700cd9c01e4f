/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Staff role - can triage, assign, and annotate any report
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// REPORT VOCABULARY DEFAULTS
// =============================================================================

pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Roads",
    "Lighting",
    "Sanitation",
    "Water",
    "Parks",
    "Traffic",
    "Noise",
    "Other",
];

pub const DEFAULT_DEPARTMENTS: &[&str] = &[
    "Public Works",
    "Transportation",
    "Parks & Recreation",
    "Sanitation",
    "Utilities",
    "Code Enforcement",
];

/// Author used when the identity has neither a name nor an email
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Author assigned to stored notes that carry no "author: " prefix
pub const UNATTRIBUTED_AUTHOR: &str = "Citizen";

pub const LOCATION_NOT_SPECIFIED: &str = "Location not specified";

// =============================================================================
// MEDIA LIMITS
// =============================================================================

/// Maximum size of a single media file in bytes (10MB)
pub const MAX_MEDIA_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Maximum number of files in one upload batch
pub const MAX_MEDIA_BATCH: usize = 10;
