use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const GRADE_MIN: f64 = 0.0;
pub const GRADE_MAX: f64 = 100.0;

pub type StudentId = i64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRecord {
    pub student_id: StudentId,
    pub name: String,
    pub english_grade: f64,
    pub math_grade: f64,
    pub pe_grade: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

/// Every field a request may carry. Column names only ever come from here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    StudentId,
    Name,
    EnglishGrade,
    MathGrade,
    PeGrade,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::StudentId,
        Field::Name,
        Field::EnglishGrade,
        Field::MathGrade,
        Field::PeGrade,
    ];

    /// JSON key. Columns share the same names.
    pub fn name(self) -> &'static str {
        match self {
            Field::StudentId => "studentId",
            Field::Name => "name",
            Field::EnglishGrade => "englishGrade",
            Field::MathGrade => "mathGrade",
            Field::PeGrade => "peGrade",
        }
    }

    pub fn column(self) -> &'static str {
        self.name()
    }

    pub fn param(self) -> &'static str {
        match self {
            Field::StudentId => "$studentId",
            Field::Name => "$name",
            Field::EnglishGrade => "$englishGrade",
            Field::MathGrade => "$mathGrade",
            Field::PeGrade => "$peGrade",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::StudentId => FieldKind::Identifier,
            Field::Name => FieldKind::Text,
            Field::EnglishGrade | Field::MathGrade | Field::PeGrade => FieldKind::Grade,
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Identifier,
    Text,
    Grade,
}

impl FieldKind {
    /// Typed value if `value` is acceptable for this kind, `None` otherwise.
    pub fn accept(self, value: &Value) -> Option<FieldValue> {
        match self {
            FieldKind::Identifier => value
                .as_i64()
                .filter(|id| *id >= 1)
                .map(FieldValue::Integer),
            FieldKind::Text => value
                .as_str()
                .filter(|s| !s.trim().is_empty())
                .map(|s| FieldValue::Text(s.to_string())),
            // numeric strings are not numbers
            FieldKind::Grade => value
                .as_f64()
                .filter(|g| g.is_finite() && (GRADE_MIN..=GRADE_MAX).contains(g))
                .map(FieldValue::Number),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    Number(f64),
}
