use grades::{validate, Field, FieldValue, Mode, NOT_ACCEPTED, UNKNOWN_FIELD};
use serde_json::{json, Value};

const GRADES_KEY: &str = "englishGrade,mathGrade,peGrade";

fn full_create() -> Value {
    json!({"name": "Ann", "englishGrade": 90, "mathGrade": 80, "peGrade": 70})
}

#[test]
fn test_valid_create_sanitizes_all_four() {
    let out = validate(&full_create(), Mode::Create);

    assert!(out.is_valid(), "{:?}", out.errors);
    assert_eq!(out.sanitized.len(), 4);
    assert_eq!(out.sanitized.get(Field::Name), Some(&FieldValue::Text("Ann".into())));
    assert_eq!(out.sanitized.get(Field::MathGrade), Some(&FieldValue::Number(80.0)));

    let params: Vec<&str> = out.sanitized.iter().map(|(f, _)| f.param()).collect();
    assert_eq!(params, vec!["$name", "$englishGrade", "$mathGrade", "$peGrade"]);
}

#[test]
fn test_create_boundaries_are_valid() {
    let body = json!({"name": "Bo", "englishGrade": 0, "mathGrade": 100, "peGrade": 99.5});
    let out = validate(&body, Mode::Create);
    assert!(out.is_valid(), "{:?}", out.errors);
    assert_eq!(out.sanitized.len(), 4);
}

#[test]
fn test_create_missing_any_required_field() {
    for missing in ["name", "englishGrade", "mathGrade", "peGrade"] {
        let mut body = full_create();
        body.as_object_mut().unwrap().remove(missing);

        let out = validate(&body, Mode::Create);
        assert!(!out.is_valid(), "missing {missing} accepted");

        if missing == "name" {
            assert!(out.errors.contains_key("name"));
            assert!(!out.sanitized.contains(Field::Name));
        } else {
            assert!(out.errors[GRADES_KEY].contains(missing));
            for f in [Field::EnglishGrade, Field::MathGrade, Field::PeGrade] {
                assert!(!out.sanitized.contains(f));
            }
        }
    }
}

#[test]
fn test_create_rejects_blank_name_and_bad_grades() {
    let body = json!({"name": "  ", "englishGrade": "90", "mathGrade": null, "peGrade": -1});
    let out = validate(&body, Mode::Create);

    assert_eq!(out.errors.len(), 2);
    assert!(out.errors.contains_key("name"));
    let reason = &out.errors[GRADES_KEY];
    assert!(reason.starts_with("invalid value"));
    assert!(reason.contains("englishGrade"));
    assert!(reason.contains("mathGrade"));
    assert!(reason.contains("peGrade"));
    assert!(out.sanitized.is_empty());
}

#[test]
fn test_create_rejects_student_id() {
    let mut body = full_create();
    body["studentId"] = json!(7);

    let out = validate(&body, Mode::Create);
    assert_eq!(out.errors.get("studentId").map(String::as_str), Some(NOT_ACCEPTED));
    assert!(!out.sanitized.contains(Field::StudentId));
}

#[test]
fn test_update_single_grade() {
    for field in [Field::EnglishGrade, Field::MathGrade, Field::PeGrade] {
        let mut body = json!({"studentId": 1});
        body[field.name()] = json!(42);

        let out = validate(&body, Mode::Update);
        assert!(out.is_valid(), "{:?}", out.errors);

        let grades: Vec<Field> = out
            .sanitized
            .iter()
            .map(|(f, _)| f)
            .filter(|f| *f != Field::StudentId)
            .collect();
        assert_eq!(grades, vec![field]);
    }
}

#[test]
fn test_update_out_of_range_grade() {
    for bad in [json!(101), json!(-1), json!(100.01)] {
        let out = validate(&json!({"studentId": 1, "englishGrade": bad}), Mode::Update);

        assert!(out.errors[GRADES_KEY].contains("englishGrade"));
        assert!(!out.sanitized.contains(Field::EnglishGrade));
        assert!(!out.sanitized.contains(Field::MathGrade));
        assert!(!out.sanitized.contains(Field::PeGrade));
    }
}

#[test]
fn test_update_one_bad_grade_spoils_the_group() {
    let body = json!({"studentId": 1, "englishGrade": 90, "mathGrade": 101});
    let out = validate(&body, Mode::Update);

    assert!(out.errors[GRADES_KEY].contains("mathGrade"));
    assert!(!out.sanitized.contains(Field::EnglishGrade));
}

#[test]
fn test_update_without_grades() {
    let out = validate(&json!({"studentId": 1}), Mode::Update);
    assert!(out.errors[GRADES_KEY].contains("at least one"));
}

#[test]
fn test_update_rejects_name() {
    let out = validate(&json!({"studentId": 1, "name": "Cy", "peGrade": 60}), Mode::Update);

    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors["name"], NOT_ACCEPTED);
    assert!(!out.sanitized.contains(Field::Name));
}

#[test]
fn test_update_requires_identifier() {
    let out = validate(&json!({"peGrade": 60}), Mode::Update);
    assert!(out.errors.contains_key("studentId"));

    let out = validate(&json!({"studentId": 0, "peGrade": 60}), Mode::Update);
    assert!(out.errors.contains_key("studentId"));
}

#[test]
fn test_unknown_field_always_reported() {
    let mut valid = full_create();
    valid["foo"] = json!(1);
    let out = validate(&valid, Mode::Create);
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors["foo"], UNKNOWN_FIELD);
    // the rest is still sanitized
    assert_eq!(out.sanitized.len(), 4);

    let out = validate(&json!({"foo": 1, "englishGrade": 500}), Mode::Update);
    assert_eq!(out.errors["foo"], UNKNOWN_FIELD);
    assert!(out.errors.contains_key(GRADES_KEY));
    assert!(out.errors.contains_key("studentId"));
}

#[test]
fn test_non_object_body() {
    let out = validate(&json!([1, 2, 3]), Mode::Create);
    assert!(out.errors.contains_key("body"));
    assert!(out.sanitized.is_empty());
}

#[test]
fn test_into_result() {
    assert!(validate(&full_create(), Mode::Create).into_result().is_ok());

    let err = validate(&json!({}), Mode::Create).into_result().unwrap_err();
    assert_eq!(err.0.len(), 2);
    assert_eq!(err.to_string(), "validation failed for 2 field(s)");
}
