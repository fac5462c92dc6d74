//! Best-effort email/name harvesting from page form fields.
//!
//! Values found here are hints for the backend profile, not identity.

use crate::platform::FormField;

/// First non-empty `type="email"` input, else any input whose name or id
/// mentions `email` and whose value looks like an address.
pub fn harvest_email(fields: &[FormField]) -> Option<String> {
    if let Some(first) = fields
        .iter()
        .find(|f| f.input_type.eq_ignore_ascii_case("email"))
    {
        if !first.value.is_empty() {
            return Some(first.value.clone());
        }
    }

    fields
        .iter()
        .find(|f| (f.name.contains("email") || f.id.contains("email")) && f.value.contains('@'))
        .map(|f| f.value.clone())
}

/// First non-empty input named `name` or `full_name`, else any input whose
/// name or id mentions `name`.
pub fn harvest_name(fields: &[FormField]) -> Option<String> {
    if let Some(first) = fields
        .iter()
        .find(|f| f.name == "name" || f.name == "full_name")
    {
        if !first.value.is_empty() {
            return Some(first.value.clone());
        }
    }

    fields
        .iter()
        .find(|f| (f.name.contains("name") || f.id.contains("name")) && !f.value.is_empty())
        .map(|f| f.value.clone())
}
