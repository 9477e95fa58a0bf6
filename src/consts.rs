/// Maximum number of comparison slots in one collection.
pub const SLOT_CAPACITY: usize = 8;

/// Search terms at least this many characters long switch the filter
/// into quick-search mode.
pub const QUICK_SEARCH_MIN_LEN: usize = 3;

/// Default histogram bucket width (10M power).
pub const DEFAULT_BIN_SIZE: u64 = 10_000_000;

/// Default number of "stars" shown per comparison slot.
pub const DEFAULT_TOP_N: usize = 3;

/// Divisor for the "G" (billions) power figure.
pub const GIGA: f64 = 1e9;

/// Largest integer an `f64` holds exactly (2^53 - 1). Input numbers above
/// it may already have been rounded during parsing.
pub const MAX_EXACT_INT: u64 = (1 << 53) - 1;
