//! Integration tests for filtergraph-config.
//!
//! File round trips, validation failures and building filters from
//! configuration.

use filtergraph_config::{ConfigError, FilterConfig, FilterSpec, Overrides};
use tempfile::TempDir;

fn every_preset() -> Vec<FilterSpec> {
    FilterSpec::names()
        .iter()
        .map(|name| FilterSpec::preset(name, Overrides::default()).unwrap())
        .collect()
}

#[test]
fn every_preset_round_trips_through_toml() {
    for spec in every_preset() {
        let config = FilterConfig::new(spec).with_name(spec.name());
        let toml = config.to_toml().unwrap();
        let parsed = FilterConfig::from_toml(&toml).unwrap();
        assert_eq!(parsed, config, "round trip of {}:\n{toml}", spec.name());
    }
}

#[test]
fn save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("hall.toml");

    let config = FilterConfig::new(FilterSpec::AllPass {
        delay: 353,
        gain: 0.3,
    })
    .with_name("hall")
    .with_description("diffuser");
    config.save(&path).unwrap();
    assert!(path.exists());

    let loaded = FilterConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn load_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = FilterConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadConfig { .. }));
    assert!(err.to_string().contains("absent.toml"), "got: {err}");
}

#[test]
fn load_rejects_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[filter\ntype = ").unwrap();
    assert!(matches!(
        FilterConfig::load(&path),
        Err(ConfigError::TomlParse(_))
    ));
}

#[test]
fn out_of_range_parameters_fail_validation() {
    let cases = [
        FilterSpec::Echo {
            delay: 0,
            decay: 0.5,
        },
        FilterSpec::Echo {
            delay: 10,
            decay: 0.0,
        },
        FilterSpec::Comb {
            delay: 10,
            decay: 1.0,
        },
        FilterSpec::AllPass {
            delay: 10,
            gain: -0.3,
        },
        FilterSpec::LowPass {
            delay: 10,
            gain: 2.0,
        },
        FilterSpec::Delay { delay: 0 },
        FilterSpec::Gain { factor: f64::NAN },
    ];
    for spec in cases {
        let config = FilterConfig::new(spec);
        assert!(
            matches!(config.validate(), Err(ConfigError::InvalidParameter { .. })),
            "{spec:?} should be rejected"
        );
        assert!(config.build().is_err(), "{spec:?} should not build");
    }
}

#[test]
fn loaded_config_builds_working_filter() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("echo.toml");
    std::fs::write(
        &path,
        "name = \"short\"\n[filter]\ntype = \"echo\"\ndelay = 2\ndecay = 0.5\n",
    )
    .unwrap();

    let mut filter = FilterConfig::load(&path).unwrap().build().unwrap();
    filter.check().unwrap();
    let out: Vec<f64> = [1.0, 0.0, 0.0, 0.0, 0.0]
        .iter()
        .map(|&x| filter.compute_one_step(&[x]).unwrap()[0])
        .collect();
    assert_eq!(out, vec![1.0, 0.0, 0.5, 0.0, 0.25]);
}

#[test]
fn every_default_preset_builds_and_checks() {
    for spec in every_preset() {
        let mut filter = spec.build().unwrap();
        filter.check().unwrap();
        assert_eq!(filter.nb_inputs(), 1, "{}", spec.name());
        assert_eq!(filter.nb_outputs(), 1, "{}", spec.name());
    }
}

#[test]
fn unknown_preset_name_is_reported() {
    let err = FilterSpec::preset("chorus", Overrides::default()).unwrap_err();
    assert_eq!(err.to_string(), "unknown preset: chorus");
}
