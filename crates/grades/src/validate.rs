use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{Field, FieldValue, Mode};

pub const UNKNOWN_FIELD: &str = "unknown field";
pub const INVALID_VALUE: &str = "invalid value";
pub const NOT_ACCEPTED: &str = "not accepted in this mode";
pub const BODY_KEY: &str = "body";

/// Field (or field group) key -> reason.
pub type ErrorMap = BTreeMap<String, String>;

/// How a rule treats its fields in one mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Check {
    /// Every field present and valid.
    Required,
    /// At least one field present, every present one valid.
    AnyPresent,
    /// Any field of the group being present is an error.
    Rejected,
}

#[derive(Clone, Copy, Debug)]
pub struct Rule {
    pub key: &'static str,
    pub fields: &'static [Field],
    pub on_create: Check,
    pub on_update: Check,
}

impl Rule {
    pub fn check(&self, mode: Mode) -> Check {
        match mode {
            Mode::Create => self.on_create,
            Mode::Update => self.on_update,
        }
    }

    pub fn owns(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }
}

pub const RULES: &[Rule] = &[
    // store-assigned; seeded from the path on update
    Rule {
        key: "studentId",
        fields: &[Field::StudentId],
        on_create: Check::Rejected,
        on_update: Check::Required,
    },
    Rule {
        key: "name",
        fields: &[Field::Name],
        on_create: Check::Required,
        on_update: Check::Rejected,
    },
    Rule {
        key: "englishGrade,mathGrade,peGrade",
        fields: &[Field::EnglishGrade, Field::MathGrade, Field::PeGrade],
        on_create: Check::Required,
        on_update: Check::AnyPresent,
    },
];

/// Accepted fields in rule-table order, ready for binding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SanitizedFields {
    entries: Vec<(Field, FieldValue)>,
}

impl SanitizedFields {
    fn push(&mut self, field: Field, value: FieldValue) {
        self.entries.push((field, value));
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.entries.iter().find(|(f, _)| *f == field).map(|(_, v)| v)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        self.entries.iter().map(|(f, v)| (*f, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Serializes by field name so a create can echo what was accepted.
impl Serialize for SanitizedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("validation failed for {} field(s)", .0.len())]
pub struct ValidationErrors(pub ErrorMap);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationOutcome {
    pub errors: ErrorMap,
    pub sanitized: SanitizedFields,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<SanitizedFields, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(self.sanitized)
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

/// Checks `input` against every rule for `mode`.
///
/// Never stops at the first problem: every unknown key and every failing rule
/// ends up in `errors`. A rule that fails contributes nothing to `sanitized`.
pub fn validate(input: &Value, mode: Mode) -> ValidationOutcome {
    let mut out = ValidationOutcome::default();

    let Some(fields) = input.as_object() else {
        out.errors
            .insert(BODY_KEY.to_string(), "expected a JSON object".to_string());
        return out;
    };

    for key in fields.keys() {
        let owned = Field::from_name(key)
            .map(|f| RULES.iter().any(|r| r.owns(f)))
            .unwrap_or(false);
        if !owned {
            out.errors.insert(key.clone(), UNKNOWN_FIELD.to_string());
        }
    }

    for rule in RULES {
        apply_rule(rule, mode, fields, &mut out);
    }

    out
}

fn apply_rule(rule: &Rule, mode: Mode, fields: &Map<String, Value>, out: &mut ValidationOutcome) {
    let check = rule.check(mode);

    if check == Check::Rejected {
        for field in rule.fields {
            if fields.contains_key(field.name()) {
                out.errors
                    .insert(field.name().to_string(), NOT_ACCEPTED.to_string());
            }
        }
        return;
    }

    let mut accepted: Vec<(Field, FieldValue)> = vec![];
    let mut bad: Vec<&'static str> = vec![];

    for field in rule.fields {
        match fields.get(field.name()) {
            Some(raw) => match field.kind().accept(raw) {
                Some(v) => accepted.push((*field, v)),
                None => bad.push(field.name()),
            },
            None if check == Check::Required => bad.push(field.name()),
            None => {}
        }
    }

    if check == Check::AnyPresent && accepted.is_empty() && bad.is_empty() {
        let names: Vec<&str> = rule.fields.iter().map(|f| f.name()).collect();
        out.errors.insert(
            rule.key.to_string(),
            format!("{INVALID_VALUE}: at least one of {} is required", names.join(", ")),
        );
        return;
    }

    if !bad.is_empty() {
        out.errors
            .insert(rule.key.to_string(), format!("{INVALID_VALUE}: {}", bad.join(", ")));
        return;
    }

    for (field, value) in accepted {
        out.sanitized.push(field, value);
    }
}
