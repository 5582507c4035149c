//! Integration tests for playbook loading and job template rendering.

use std::fs;

use aap_jobgen::{load_playbook, playbook_to_job_template, AapError, JobTemplateDraft, SurveyFieldType};
use tempfile::TempDir;

const SITE: &str = r#"---
# Site-wide maintenance
- name: Maintain web tier
  hosts:
    - web
    - lb
  become: true
  vars:
    # Which release to deploy
    release: "2.4.1"

    # Worker processes
    workers: 4
    ratio: 0.75        # Traffic share for canary
    debug_mode: false
    regions: [eu-west-1, us-east-1]
    ports: [80, 443, 8080, 8081, 8082, 8083, 8084, 8085, 8086, 8087]
    motd:
  tasks:
    - name: Show release
      ansible.builtin.debug:
        var: release

- name: Second play is ignored
  hosts: db
  vars:
    ignored: true
"#;

#[test]
fn test_load_playbook_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("site.yml");
    fs::write(&path, SITE).unwrap();

    let loaded = load_playbook(&path).unwrap();

    assert_eq!(loaded.play.name, "Maintain web tier");
    assert_eq!(loaded.play.hosts, "web,lb");
    assert!(loaded.play.become_enabled);
    assert_eq!(loaded.raw, SITE);

    let names: Vec<_> = loaded.play.vars.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["release", "workers", "ratio", "debug_mode", "regions", "ports", "motd"]);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = load_playbook(&temp_dir.path().join("nope.yml")).unwrap_err();

    assert!(matches!(err, AapError::Io { .. }));
    assert!(err.to_string().contains("nope.yml"));
}

#[test]
fn test_variables_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("site.yml");
    fs::write(&path, SITE).unwrap();

    let loaded = load_playbook(&path).unwrap();
    let draft = JobTemplateDraft::from_playbook(&loaded, "site.yml");

    let summary: Vec<_> = draft
        .variables
        .iter()
        .map(|v| (v.name.as_str(), v.field_type, v.description.as_str()))
        .collect();

    assert_eq!(
        summary,
        [
            ("release", SurveyFieldType::Text, "Which release to deploy"),
            ("workers", SurveyFieldType::Integer, "Worker processes"),
            ("ratio", SurveyFieldType::Float, "Traffic share for canary"),
            ("debug_mode", SurveyFieldType::MultipleChoice, "Variable: debug_mode"),
            ("regions", SurveyFieldType::MultiSelect, "Variable: regions"),
            ("ports", SurveyFieldType::Textarea, "Variable: ports"),
            ("motd", SurveyFieldType::Text, "Variable: motd"),
        ]
    );
}

#[test]
fn test_rendered_survey_defaults() {
    let spec = playbook_to_job_template(SITE, "site.yml", "web", "Production").unwrap();
    let survey = spec.survey.unwrap();

    let defaults: Vec<_> = survey.spec.iter().map(|q| q.default.as_str()).collect();
    assert_eq!(
        defaults,
        [
            "2.4.1",
            "4",
            "0.75",
            "false",
            "eu-west-1",
            "80\n443\n8080\n8081\n8082\n8083\n8084\n8085\n8086\n8087",
            "",
        ]
    );

    assert_eq!(survey.spec[3].choices.as_deref(), Some(&["true".to_string(), "false".to_string()][..]));
    assert!(survey.spec[5].choices.is_none());
    assert!(survey.spec.iter().all(|q| !q.required));
}

#[test]
fn test_rendered_spec_round_trips_through_yaml() {
    let spec = playbook_to_job_template(SITE, "site.yml", "web", "Production").unwrap();

    let yaml = serde_yaml::to_string(&spec).unwrap();
    let parsed: aap_jobgen::JobTemplateSpec = serde_yaml::from_str(&yaml).unwrap();

    assert_eq!(parsed, spec);
}

#[cfg(feature = "controller")]
mod controller_env {
    use aap_jobgen::integrations::{ENV_HOSTNAME, ENV_PASSWORD, ENV_TOKEN, ENV_USERNAME};
    use aap_jobgen::{ControllerConfig, Credentials};
    use serial_test::serial;

    fn clear() {
        for key in [ENV_HOSTNAME, ENV_TOKEN, ENV_USERNAME, ENV_PASSWORD] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_token() {
        clear();
        std::env::set_var(ENV_HOSTNAME, "https://aap.example.com/");
        std::env::set_var(ENV_TOKEN, "abc");

        let config = ControllerConfig::from_env(None).unwrap();
        clear();

        assert_eq!(config.hostname(), "https://aap.example.com");
        assert!(matches!(config.credentials(), Credentials::Token(_)));
    }

    #[test]
    #[serial]
    fn test_from_env_uses_config_hostname() {
        clear();
        std::env::set_var(ENV_USERNAME, "admin");
        std::env::set_var(ENV_PASSWORD, "secret");

        let config = ControllerConfig::from_env(Some("https://from-config")).unwrap();
        clear();

        assert_eq!(config.hostname(), "https://from-config");
        assert!(matches!(config.credentials(), Credentials::Basic { .. }));
    }

    #[test]
    #[serial]
    fn test_from_env_missing_everything() {
        clear();
        let err = ControllerConfig::from_env(None).unwrap_err();
        assert!(err.to_string().contains(ENV_HOSTNAME));
    }
}
