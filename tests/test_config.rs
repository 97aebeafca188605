use invaders::config::GameConfig;
use invaders::error::ConfigError;

#[test]
fn defaults_are_valid() {
    let c = GameConfig::default();
    assert!(c.validate().is_ok());
    assert_eq!((c.window_width, c.window_height), (800, 600));
    assert_eq!((c.alien_rows, c.alien_cols), (5, 12));
    assert_eq!(c.bomb_probability, 0.005);
    assert_eq!(c.starting_lives, 3);
    assert_eq!(c.max_high_scores, 5);
}

#[test]
fn partial_toml_overrides_only_given_keys() {
    let c: GameConfig = toml::from_str("alien_rows = 3\nbomb_probability = 0.01\n").unwrap();
    assert_eq!(c.alien_rows, 3);
    assert_eq!(c.bomb_probability, 0.01);
    assert_eq!(c.alien_cols, 12);
    assert_eq!(c.starting_lives, 3);
}

#[test]
fn load_reads_and_validates_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.toml");
    std::fs::write(&path, "starting_lives = 5\nbarrier_count = 4\n").unwrap();

    let c = GameConfig::load(&path).unwrap();
    assert_eq!(c.starting_lives, 5);
    assert_eq!(c.barrier_count, 4);
}

#[test]
fn load_rejects_out_of_range_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.toml");
    std::fs::write(&path, "bomb_probability = 1.5\n").unwrap();

    match GameConfig::load(&path) {
        Err(ConfigError::OutOfRange { name, .. }) => assert_eq!(name, "bomb_probability"),
        other => panic!("expected OutOfRange, got {other:?}"),
    }
}

#[test]
fn load_reports_bad_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.toml");
    std::fs::write(&path, "alien_rows = \"many\"\n").unwrap();

    assert!(matches!(GameConfig::load(&path), Err(ConfigError::Parse { .. })));
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn validate_catches_zero_lives() {
    let c = GameConfig {
        starting_lives: 0,
        ..GameConfig::default()
    };
    assert!(matches!(
        c.validate(),
        Err(ConfigError::OutOfRange {
            name: "starting_lives",
            ..
        })
    ));
}

#[test]
fn validate_caps_starting_lives() {
    let nine = GameConfig {
        starting_lives: 9,
        ..GameConfig::default()
    };
    assert!(nine.validate().is_ok());

    let many = GameConfig {
        starting_lives: 10_000,
        ..GameConfig::default()
    };
    assert!(matches!(
        many.validate(),
        Err(ConfigError::OutOfRange {
            name: "starting_lives",
            ..
        })
    ));
}
