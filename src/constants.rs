//! Application constants for the MRZ reader
//!
//! This module contains the ICAO 9303 character set and checksum constants,
//! default values, and CLI/file conventions used throughout the crate.

// =============================================================================
// ICAO 9303 Character Set
// =============================================================================

/// Filler character used for padding and as a separator within fields
pub const FILLER: char = '<';

/// Matches any single character outside the MRZ set `A-Z 0-9 <`
pub const DISALLOWED_CHAR_PATTERN: &str = "[^A-Z0-9<]";

/// Double filler separating the primary identifier (surname) from the secondary identifier
pub const NAME_SEPARATOR: &str = "<<";

/// Document code prefix that identifies machine readable visas
pub const VISA_DOCUMENT_CODE: char = 'V';

// =============================================================================
// Check Digit Constants
// =============================================================================

/// Repeating weight cycle applied left-to-right over checksummed characters
pub const CHECK_DIGIT_WEIGHTS: [u32; 3] = [7, 3, 1];

/// Modulus of the weighted check digit sum
pub const CHECK_DIGIT_MODULUS: u32 = 10;

/// Numeric value of letter `A`; `B` is 11 and so on up to `Z` = 35
pub const LETTER_VALUE_OFFSET: u32 = 10;

// =============================================================================
// Field Values
// =============================================================================

/// Sex codes accepted in the sex field (`<` means unspecified)
pub const SEX_CODES: &[char] = &['M', 'F', FILLER];

/// Length of a `YYMMDD` date field
pub const DATE_FIELD_LENGTH: usize = 6;

/// Default look-ahead window (years) used when resolving the century of expiry dates
pub const DEFAULT_EXPIRY_WINDOW_YEARS: i32 = 50;

/// Largest accepted expiry look-ahead window (years)
pub const MAX_EXPIRY_WINDOW_YEARS: i32 = 200;

// =============================================================================
// Reader Frame Defaults
// =============================================================================

/// Guard characters serial MRZ readers emit before the MRZ block
pub const DEFAULT_FRAME_LEADER_LEN: usize = 2;

/// Guard characters serial MRZ readers emit after the MRZ block
pub const DEFAULT_FRAME_TRAILER_LEN: usize = 2;

// =============================================================================
// Batch Processing Defaults
// =============================================================================

/// Default file extension picked up by batch discovery
pub const DEFAULT_INPUT_EXTENSION: &str = "mrz";

/// Upper bound on concurrent batch workers
pub const MAX_WORKERS: usize = 256;

/// Environment variable overriding the configured worker count
pub const WORKERS_ENV_VAR: &str = "MRZ_READER_WORKERS";

/// Directory name under the user config dir holding the config file
pub const CONFIG_DIR_NAME: &str = "mrz-reader";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.json";
