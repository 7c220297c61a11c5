use shipdesk_common::error::FormErrors;

pub(crate) const REQUIRED: &str = "This field is required.";

/// Records `REQUIRED` and returns `false` when `value` is blank.
pub(crate) fn require(errors: &mut FormErrors, field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.add(field, REQUIRED);
        false
    } else {
        true
    }
}

/// Character-count bounds, inclusive. `value` is counted as given.
pub(crate) fn length(errors: &mut FormErrors, field: &str, value: &str, min: usize, max: usize) {
    let len = value.chars().count();
    if len < min || len > max {
        let message = if min == 0 {
            format!("Field cannot be longer than {} characters.", max)
        } else if max == usize::MAX {
            format!("Field must be at least {} characters long.", min)
        } else {
            format!("Field must be between {} and {} characters long.", min, max)
        };
        errors.add(field, message);
    }
}

pub(crate) fn email(errors: &mut FormErrors, field: &str, value: &str) {
    if !is_valid_email(value.trim()) {
        errors.add(field, "Invalid email address.");
    }
}

pub(crate) fn non_negative(errors: &mut FormErrors, field: &str, value: Option<f64>) {
    if let Some(v) = value
        && (!v.is_finite() || v < 0.0)
    {
        errors.add(field, "Must be a non-negative number.");
    }
}

fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// Trim a submitted optional text field, treating blank as absent.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
