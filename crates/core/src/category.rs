//! Category directory: seed data and validation for the named, colored
//! tags used to classify tickets.
//!
//! Categories are admin-managed reference data. "Deleting" one only
//! flips `isActive` off; listings return active entries only.

use crate::error::CoreError;

/// Color applied when a create request omits one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#3B82F6";

/// Maximum length of a category name.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// Maximum length of a category description.
pub const MAX_CATEGORY_DESCRIPTION_LENGTH: usize = 500;

/// Seed data for one default category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySeed {
    pub name: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}

/// The five categories installed by the bootstrap step on an empty
/// directory. Installation is idempotent; later runs change nothing.
pub const DEFAULT_CATEGORIES: &[CategorySeed] = &[
    CategorySeed {
        name: "Technical Support",
        description: "Technical issues and troubleshooting",
        color: "#3B82F6",
    },
    CategorySeed {
        name: "Billing",
        description: "Billing and payment related queries",
        color: "#10B981",
    },
    CategorySeed {
        name: "General Inquiry",
        description: "General questions and information requests",
        color: "#8B5CF6",
    },
    CategorySeed {
        name: "Bug Report",
        description: "Report bugs and software issues",
        color: "#F59E0B",
    },
    CategorySeed {
        name: "Feature Request",
        description: "Request new features or enhancements",
        color: "#EF4444",
    },
];

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate a category name: non-empty after trimming, within the
/// length limit. Uniqueness is enforced by the store.
pub fn validate_category_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Category name is required".to_string(),
        ));
    }
    if name.len() > MAX_CATEGORY_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Category name exceeds maximum length of {MAX_CATEGORY_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an optional category description.
pub fn validate_category_description(description: &str) -> Result<(), CoreError> {
    if description.len() > MAX_CATEGORY_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Category description exceeds maximum length of {MAX_CATEGORY_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate that a color string matches `#RRGGBB` hex format.
pub fn validate_category_color(color: &str) -> Result<(), CoreError> {
    if color.len() != 7 {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must be in #RRGGBB hex format"
        )));
    }
    if !color.starts_with('#') {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must start with '#'"
        )));
    }
    let hex_part = &color[1..];
    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must contain only hex digits after '#'"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- seed data ------------------------------------------------------------

    #[test]
    fn exactly_five_default_categories() {
        assert_eq!(DEFAULT_CATEGORIES.len(), 5);
    }

    #[test]
    fn default_category_names_are_unique() {
        let mut names: Vec<&str> = DEFAULT_CATEGORIES.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), DEFAULT_CATEGORIES.len());
    }

    #[test]
    fn seed_data_passes_its_own_validation() {
        for seed in DEFAULT_CATEGORIES {
            assert!(validate_category_name(seed.name).is_ok());
            assert!(validate_category_description(seed.description).is_ok());
            assert!(validate_category_color(seed.color).is_ok());
        }
    }

    #[test]
    fn default_color_is_the_technical_support_blue() {
        assert_eq!(DEFAULT_CATEGORIES[0].color, DEFAULT_CATEGORY_COLOR);
    }

    // -- validate_category_name -----------------------------------------------

    #[test]
    fn valid_name_accepted() {
        assert!(validate_category_name("Hardware").is_ok());
    }

    #[test]
    fn empty_or_blank_name_rejected() {
        assert!(validate_category_name("").is_err());
        assert!(validate_category_name("   ").is_err());
    }

    #[test]
    fn name_over_max_length_rejected() {
        let name = "x".repeat(MAX_CATEGORY_NAME_LENGTH + 1);
        assert!(validate_category_name(&name).is_err());
    }

    // -- validate_category_color ----------------------------------------------

    #[test]
    fn six_digit_hex_accepted() {
        assert!(validate_category_color("#3B82F6").is_ok());
        assert!(validate_category_color("#000000").is_ok());
        assert!(validate_category_color("#ffffff").is_ok());
    }

    #[test]
    fn wrong_length_rejected() {
        assert!(validate_category_color("#FFF").is_err());
        assert!(validate_category_color("#3B82F6AA").is_err());
        assert!(validate_category_color("").is_err());
    }

    #[test]
    fn missing_hash_rejected() {
        assert!(validate_category_color("3B82F6F").is_err());
    }

    #[test]
    fn non_hex_digits_rejected() {
        assert!(validate_category_color("#GGGGGG").is_err());
    }
}
