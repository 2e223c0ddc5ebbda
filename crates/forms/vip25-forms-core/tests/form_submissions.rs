use serde_json::json;
use vip25_forms_core::{validate, FormKind, FormValues, Payload, SkillSet};

fn values(name: &str) -> FormValues {
    vip25_test_fixtures::forms::load(name).expect("form fixture should load")
}

#[test]
fn valid_client_form_builds_trimmed_payload() {
    let v = values("client-valid");
    let report = validate(FormKind::Client, &v);
    assert!(report.is_valid());

    let payload = report.payload(&v).unwrap();
    assert_eq!(payload.kind(), FormKind::Client);
    let body: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({
            "name": "Asha Verma",
            "email": "asha@example.in",
            "phone": "+91 98765 43210",
            "service": "web-development",
            "message": "We need a storefront rebuilt before the festive season."
        })
    );
}

#[test]
fn invalid_client_form_flags_every_field() {
    let report = validate(FormKind::Client, &values("client-invalid"));
    let errors: Vec<_> = report.failures().map(|r| r.error).collect();
    assert_eq!(
        errors,
        ["err-name", "err-email", "err-phone", "err-service", "err-message"]
    );
}

#[test]
fn valid_career_form_payload_fields() {
    let v = values("career-valid");
    let report = validate(FormKind::Career, &v);
    assert!(report.is_valid());
    match report.payload(&v).unwrap() {
        Payload::Career(p) => {
            assert_eq!(p.fullname, "Ravi Kumar");
            assert_eq!(p.skills, "rust,react,figma");
            assert_eq!(p.availability, "immediate");
        }
        other => panic!("expected career payload, got {other:?}"),
    }
}

#[test]
fn invalid_career_form_failures() {
    let report = validate(FormKind::Career, &values("career-invalid"));
    let failed: Vec<_> = report.failures().map(|r| r.field).collect();
    assert_eq!(
        failed,
        [
            "ca-email",
            "ca-experience",
            "ca-skills",
            "ca-portfolio",
            "ca-project2",
            "ca-message"
        ]
    );
    let skills = report
        .checks
        .iter()
        .find(|c| c.rule.field == "ca-skills")
        .unwrap();
    assert!(!skills.rule.highlight);
}

#[test]
fn skill_tags_feed_the_career_form() {
    let mut v = values("career-invalid");
    let mut skills = SkillSet::new();
    skills.toggle("python");
    skills.toggle("sql");
    v.insert("ca-skills", skills.as_input_value());
    let report = validate(FormKind::Career, &v);
    assert!(report
        .checks
        .iter()
        .any(|c| c.rule.field == "ca-skills" && c.valid));
}
