//! Registry load error-message, skip-policy, and tier resolution integration tests.

use assert_fs::prelude::*;
use manifold_core::{
    registry,
    types::{AgentSlug, AgentSpec, RegistryEntry},
    RegistryError, Tier,
};
use predicates::prelude::predicate;
use rstest::rstest;

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_missing_registry_returns_not_found() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let path = home.path().join("registry.yaml");
    let err = registry::load_at(&path).unwrap_err();
    assert!(matches!(err, RegistryError::RegistryNotFound { .. }), "got: {err}");
    assert!(err.to_string().contains("registry not found"));
    assert!(err.to_string().contains("registry.yaml"));
}

#[test]
fn load_corrupt_yaml_returns_parse_error_with_path() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let file = home.child("registry.yaml");
    file.write_str(": : corrupt : yaml : !!!\n  - broken: [unclosed").expect("write");

    let err = registry::load_at(file.path()).unwrap_err();
    assert!(matches!(err, RegistryError::Parse { .. }), "got: {err}");
    let msg = err.to_string();
    assert!(msg.contains("registry.yaml"), "must contain file path, got: {msg}");
}

#[test]
fn agents_as_list_is_missing_agents_error() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let file = home.child("registry.yaml");
    file.write_str("agents:\n  - code-reviewer\n  - debugger\n").expect("write");

    let err = registry::load_at(file.path()).unwrap_err();
    assert!(matches!(err, RegistryError::MissingAgents { .. }), "got: {err}");
}

// ---------------------------------------------------------------------------
// 2. Skip policy
// ---------------------------------------------------------------------------

#[test]
fn rejected_entries_keep_the_rest_loaded() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let file = home.child("registry.yaml");
    file.write_str(
        "agents:\n\
         \x20 data_engineer:\n\
         \x20   description: Pipelines\n\
         \x20   team: Engineering\n\
         \x20 UPPER:\n\
         \x20   description: bad slug\n\
         \x20 tech-writer: just a string\n",
    )
    .expect("write");
    file.assert(predicate::str::contains("data_engineer"));

    let reg = registry::load_at(file.path()).expect("load");
    assert_eq!(reg.agents.len(), 1);
    assert_eq!(reg.agents[0].slug.hyphenated(), "data-engineer");
    assert_eq!(reg.rejected.len(), 2);
}

#[test]
fn unknown_fields_are_ignored() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let file = home.child("registry.yaml");
    file.write_str("agents:\n  verifier:\n    description: checks\n    tools: [bash, git]\n")
        .expect("write");
    let reg = registry::load_at(file.path()).expect("load");
    assert!(reg.rejected.is_empty());
    assert_eq!(reg.agents[0].max_iterations, 15);
}

// ---------------------------------------------------------------------------
// 3. Tier policy
// ---------------------------------------------------------------------------

fn spec(slug: &str, team: Option<&str>, hint: Option<Tier>) -> AgentSpec {
    AgentSpec::from_entry(
        AgentSlug::from(slug),
        RegistryEntry {
            description: String::new(),
            team: team.map(str::to_string),
            max_iterations: 15,
            tier: hint,
        },
    )
}

#[rstest]
#[case("ceo-cto")]
#[case("code-reviewer")]
#[case("hr-partner")]
#[case("chief_of_staff")]
fn executive_team_always_resolves_executive(#[case] slug: &str) {
    assert_eq!(spec(slug, Some("Executive"), Some(Tier::Standard)).tier, Tier::Executive);
}

#[rstest]
#[case("code-reviewer")]
#[case("debugger")]
#[case("solutions-architect")]
#[case("tech-lead")]
fn override_set_resolves_complex_without_team(#[case] slug: &str) {
    assert_eq!(spec(slug, None, None).tier, Tier::Complex);
    assert_eq!(spec(slug, Some(""), None).tier, Tier::Complex);
}

#[rstest]
#[case(None, Tier::Standard)]
#[case(Some(Tier::Complex), Tier::Complex)]
#[case(Some(Tier::Executive), Tier::Executive)]
fn hint_used_when_no_rule_matches(#[case] hint: Option<Tier>, #[case] expected: Tier) {
    assert_eq!(spec("qa-engineer", Some("Engineering"), hint).tier, expected);
}
