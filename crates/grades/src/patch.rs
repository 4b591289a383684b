use std::fmt;

use crate::{Field, FieldValue, SanitizedFields};

/// One `column = $param` pair of an UPDATE, with the value to bind.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub field: Field,
    pub value: FieldValue,
}

impl Assignment {
    pub fn column(&self) -> &'static str {
        self.field.column()
    }

    pub fn param(&self) -> &'static str {
        self.field.param()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.column(), self.param())
    }
}

/// Assignments for every sanitized field except `excluding`, in sanitized order.
///
/// The excluded field is the row identifier; it still gets bound, but in the
/// WHERE clause. An empty result is possible and left to the caller.
pub fn build_update_assignments(sanitized: &SanitizedFields, excluding: Field) -> Vec<Assignment> {
    sanitized
        .iter()
        .filter(|(field, _)| *field != excluding)
        .map(|(field, value)| Assignment {
            field,
            value: value.clone(),
        })
        .collect()
}
