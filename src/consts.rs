/// Number of histogram bins spanning a property's [min, max] range.
pub const RESOLUTION: usize = 1000;

/// Labels containing this character are skipped while loading.
pub const EXCLUSION_MARKER: char = '!';

/// Seed for label colors when none is configured.
pub const DEFAULT_COLOR_SEED: u64 = 1601353213;

// Friends mode
pub const FRIENDS_LABEL: &str = "Friends";
pub const CASUAL_REL_LABEL: &str = "Casual rel";
pub const CLOSE_REL_LABEL: &str = "Close rel";
