use once_cell::sync::Lazy;
use regex::Regex;

use super::ProductError;

/// Six groups of five uppercase alphanumerics joined by five dashes.
pub const PRODUCT_ID_LEN: usize = 35;

const PRODUCT_ID_PATTERN: &str =
    r"^[A-Z0-9]{5}-[A-Z0-9]{5}-[A-Z0-9]{5}-[A-Z0-9]{5}-[A-Z0-9]{5}-[A-Z0-9]{5}$";

static PRODUCT_ID_REGEX: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(PRODUCT_ID_PATTERN));

/// Checks the length and then the shape of a product id.
///
/// # Errors
/// - `InvalidLength` if the id is not exactly [`PRODUCT_ID_LEN`] bytes long
/// - `InvalidFormat` if it does not match `XXXXX-XXXXX-XXXXX-XXXXX-XXXXX-XXXXX`
/// - `PatternError` if the pattern itself failed to compile
pub fn validate_product_id(id: &str) -> Result<(), ProductError> {
    let actual = id.len();
    if actual != PRODUCT_ID_LEN {
        return Err(ProductError::InvalidLength {
            expected: PRODUCT_ID_LEN,
            actual,
        });
    }

    let regex = PRODUCT_ID_REGEX
        .as_ref()
        .map_err(|e| ProductError::PatternError(e.to_string()))?;

    if !regex.is_match(id) {
        return Err(ProductError::InvalidFormat(id.to_string()));
    }

    Ok(())
}
