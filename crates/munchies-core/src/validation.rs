//! # Validation Module
//!
//! Input validation for the admin menu forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form input (strings typed by the operator)                   │
//! │  └── THIS MODULE: required fields, lengths, price parsing              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Typed drafts (ItemDraft / CategoryDraft)                     │
//! │  └── THIS MODULE: validate_item_draft / validate_category_draft        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Permission checks, referential integrity (authoritative)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use munchies_core::validation::{parse_item_form, ItemForm};
//!
//! let form = ItemForm {
//!     name: "Cheeseburger",
//!     category_id: Some(1),
//!     description: "Double patty",
//!     price: "9.50",
//!     available: true,
//! };
//! let draft = parse_item_form(&form).unwrap();
//! assert_eq!(draft.price_cents, 950);
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CategoryDraft, CategoryId, ItemDraft};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of item and category names.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of descriptions.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a display name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_NAME_LEN`] characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required(field));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates an optional description and returns it trimmed.
pub fn validate_description(description: &str) -> ValidationResult<String> {
    let description = description.trim();

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(description.to_string())
}

/// Validates a price already expressed in cents.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Requires a category to be selected.
pub fn validate_category_selected(category_id: Option<CategoryId>) -> ValidationResult<CategoryId> {
    category_id.ok_or_else(|| ValidationError::required("category"))
}

// =============================================================================
// Draft Validators
// =============================================================================

/// Validates an item draft, returning a normalized copy.
pub fn validate_item_draft(draft: &ItemDraft) -> ValidationResult<ItemDraft> {
    validate_price_cents(draft.price_cents)?;
    Ok(ItemDraft {
        name: validate_name("name", &draft.name)?,
        category_id: draft.category_id,
        description: validate_description(&draft.description)?,
        price_cents: draft.price_cents,
        available: draft.available,
    })
}

/// Validates a category draft, returning a normalized copy.
pub fn validate_category_draft(draft: &CategoryDraft) -> ValidationResult<CategoryDraft> {
    Ok(CategoryDraft {
        name: validate_name("name", &draft.name)?,
        description: validate_description(&draft.description)?,
    })
}

// =============================================================================
// Raw Form Input
// =============================================================================

/// Raw values of the item dialog, before parsing.
#[derive(Debug, Clone, Copy)]
pub struct ItemForm<'a> {
    pub name: &'a str,
    pub category_id: Option<CategoryId>,
    pub description: &'a str,
    /// Price as typed, in major units ("12.50").
    pub price: &'a str,
    pub available: bool,
}

/// Parses and validates the item dialog.
///
/// Checks run in the order the dialog reports them: category first, then
/// price, then the text fields.
pub fn parse_item_form(form: &ItemForm<'_>) -> ValidationResult<ItemDraft> {
    let category_id = validate_category_selected(form.category_id)?;
    let price = Money::parse_major(form.price)?;

    validate_item_draft(&ItemDraft {
        name: form.name.to_string(),
        category_id,
        description: form.description.to_string(),
        price_cents: price.cents(),
        available: form.available,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
