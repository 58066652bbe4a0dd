//! Custom `validator` rules shared by request bodies.

use std::borrow::Cow;
use validator::ValidationError;

/// Rejects empty and whitespace-only strings.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct NewComment {
///     #[validate(custom(function = "not_blank"))]
///     text: String,
/// }
/// ```
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}
