use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "PCBUILD_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.scraper_request_timeout_secs, 15);
    assert_eq!(cfg.scraper_max_redirects, 5);
    assert_eq!(cfg.scraper_user_agent, DEFAULT_SCRAPER_USER_AGENT);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("PCBUILD_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PCBUILD_BIND_ADDR"),
        "expected InvalidEnvVar(PCBUILD_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn scraper_request_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("PCBUILD_SCRAPER_REQUEST_TIMEOUT_SECS", "30");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_request_timeout_secs, 30);
}

#[test]
fn scraper_request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("PCBUILD_SCRAPER_REQUEST_TIMEOUT_SECS", "fifteen");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PCBUILD_SCRAPER_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(PCBUILD_SCRAPER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn scraper_request_timeout_secs_zero_rejected() {
    let mut map = HashMap::new();
    map.insert("PCBUILD_SCRAPER_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PCBUILD_SCRAPER_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(PCBUILD_SCRAPER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn scraper_max_redirects_override() {
    let mut map = HashMap::new();
    map.insert("PCBUILD_SCRAPER_MAX_REDIRECTS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_max_redirects, 0);
}

#[test]
fn scraper_max_redirects_invalid() {
    let mut map = HashMap::new();
    map.insert("PCBUILD_SCRAPER_MAX_REDIRECTS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PCBUILD_SCRAPER_MAX_REDIRECTS"),
        "expected InvalidEnvVar(PCBUILD_SCRAPER_MAX_REDIRECTS), got: {result:?}"
    );
}

#[test]
fn scraper_user_agent_override() {
    let mut map = HashMap::new();
    map.insert("PCBUILD_SCRAPER_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_user_agent, "custom-agent/2.0");
}

#[test]
fn unknown_variables_are_ignored() {
    let mut map = HashMap::new();
    map.insert("PCBUILD_RATE_LIMIT_PER_MINUTE", "0");
    let cfg = build_app_config(lookup_from_map(&map)).expect("unrelated vars do not fail config");
    assert_eq!(cfg.scraper_request_timeout_secs, 15);
}

#[test]
fn production_environment_is_parsed() {
    let mut map = HashMap::new();
    map.insert("PCBUILD_ENV", "production");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.env.to_string(), "production");
}
