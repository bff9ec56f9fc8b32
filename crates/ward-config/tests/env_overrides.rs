//! Integration tests for environment-variable configuration overrides.

use figment::{
    Figment, Jail,
    providers::{Env, Serialized},
};
use ward_config::WardConfig;

#[test]
fn env_var_overrides_default() {
    Jail::expect_with(|jail| {
        jail.set_env("WARDLINE_MATCHING__FUZZY_THRESHOLD", "0.75");

        // No TOML file -- just defaults + env
        let config: WardConfig = Figment::from(Serialized::defaults(WardConfig::default()))
            .merge(Env::prefixed("WARDLINE_").split("__"))
            .extract()?;

        assert_eq!(config.matching.fuzzy_threshold, 0.75);
        Ok(())
    });
}

#[test]
fn nested_env_vars_map_through_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("WARDLINE_RISK__SERVICE_MULTIPLIER", "0.5");
        jail.set_env("WARDLINE_PATHS__PROCESSED_DIR", "/var/ward/out");
        jail.set_env("WARDLINE_MATCHING__FUZZY_ENABLED", "false");

        let config: WardConfig = Figment::from(Serialized::defaults(WardConfig::default()))
            .merge(Env::prefixed("WARDLINE_").split("__"))
            .extract()?;

        assert_eq!(config.risk.service_multiplier, 0.5);
        assert_eq!(config.paths.processed_dir, "/var/ward/out");
        assert!(!config.matching.fuzzy_enabled);
        Ok(())
    });
}

/// Documents the figment gotcha: typo'd env var keys are silently ignored.
#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("WARDLINE_RISK__HALF_LIFE_DAYZ", "1.0");

        let config: WardConfig = Figment::from(Serialized::defaults(WardConfig::default()))
            .merge(Env::prefixed("WARDLINE_").split("__"))
            .extract()?;

        // "half_life_dayz" is not a known field -- silently ignored.
        assert_eq!(config.risk.half_life_days, 180.0);
        Ok(())
    });
}
