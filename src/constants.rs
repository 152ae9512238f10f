//! Application constants for the placement-table processor
//!
//! Default working-directory names, catalog file conventions and the fixed
//! field positions used by the record transformation.

// =============================================================================
// Working Directories
// =============================================================================

/// Directory holding settings such as the packages list
pub const SETTINGS_DIR_NAME: &str = "Settings";

/// Directory scanned for placement tables awaiting conversion
pub const INPUT_DIR_NAME: &str = "For Conversion";

/// Directory receiving converted tables
pub const OUTPUT_DIR_NAME: &str = "Converted";

/// Directory holding the component catalog backing files
pub const CATALOG_DIR_NAME: &str = "Components";

/// Directory reserved for reference documentation
pub const DOCUMENTS_DIR_NAME: &str = "Documents";

/// Packages list, one catalog file seeded per line
pub const PACKAGES_FILE: &str = "Settings/Packages.csv";

// =============================================================================
// Catalog Files
// =============================================================================

/// Extension of catalog backing files (without the dot)
pub const CATALOG_EXTENSION: &str = "csv";

/// Title row written when a catalog file is freshly created
pub const CATALOG_HEADER: &str =
    "Component_Name_Non_Standart;Component_Name_Standart;Delete_0_or_1";

/// Literal delete-flag values stored in the third catalog column
pub const DELETE_FLAG_SET: &str = "1";
pub const DELETE_FLAG_CLEAR: &str = "0";

/// Catalog file name used when a packages line sanitizes to nothing
pub const UNKNOWN_PACKAGE_NAME: &str = "UNKNOWN";

// =============================================================================
// Delimited Text
// =============================================================================

/// Field delimiter for input, output and catalog files
pub const FIELD_DELIMITER: char = ';';

/// UTF-8 byte-order mark tolerated at the very start of an input file
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// =============================================================================
// Record Layout
// =============================================================================

/// Every field whose 1-based position is a multiple of this is normalized first
pub const NORMALIZED_FIELD_STRIDE: usize = 5;

/// Zero-based index of the rotation-angle field
pub const ROTATION_FIELD_INDEX: usize = 3;

/// Zero-based index of the designator field
pub const DESIGNATOR_FIELD_INDEX: usize = 4;

/// First-letter prefixes (case-insensitive) of components whose rotation is corrected
pub const ROTATED_COMPONENT_PREFIXES: &[char] = &['C', 'R'];

/// Rotation rewrites applied to matching components: (found, replacement)
pub const ROTATION_REWRITES: &[(&str, &str)] = &[("180", "0"), ("270", "90")];

// =============================================================================
// Configuration
// =============================================================================

/// Directory name under the user config dir holding `config.toml`
pub const CONFIG_DIR_NAME: &str = "pnp-processor";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default log filter target
pub const LOG_TARGET: &str = "pnp_processor";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_header_has_three_columns() {
        assert_eq!(CATALOG_HEADER.split(FIELD_DELIMITER).count(), 3);
    }

    #[test]
    fn test_record_layout_positions() {
        // The designator sits on the first normalized position
        assert_eq!(DESIGNATOR_FIELD_INDEX + 1, NORMALIZED_FIELD_STRIDE);
        assert!(ROTATION_FIELD_INDEX < DESIGNATOR_FIELD_INDEX);
    }
}
