//! Birth-input validation: presence and range checks before any network call.

use crate::errors::ValidationError;
use crate::types::BirthInput;

/// Check the submitted fields in order; the first failing rule wins.
///
/// Hour zero counts as present (it is the Zi hour, not a missing value).
/// The day check is deliberately loose: 1-31 with no per-month or leap-year
/// validation.
pub fn validate(input: &BirthInput) -> Result<(), ValidationError> {
    if input.hour.is_none() {
        return Err(ValidationError::MissingField);
    }
    if !(1900..=2100).contains(&input.year) {
        return Err(ValidationError::YearOutOfRange { year: input.year });
    }
    if !(1..=12).contains(&input.month) {
        return Err(ValidationError::MonthOutOfRange { month: input.month });
    }
    if !(1..=31).contains(&input.day) {
        return Err(ValidationError::DayOutOfRange { day: input.day });
    }
    Ok(())
}
