#[cfg(test)]
mod tests {
    use chrono::Duration;
    use cxshift::api::CrossChexConfig;
    use cxshift::commands::shifts::resolve_window;
    use cxshift::libs::config::{Config, ShiftConfig, CONFIG_FILE_NAME};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
        config_path: PathBuf,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let config_path = temp_dir.path().join("cxshift").join(CONFIG_FILE_NAME);
            ConfigTestContext {
                _temp_dir: temp_dir,
                config_path,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_default_config(_ctx: &mut ConfigTestContext) {
        let config = Config::default();
        assert!(config.crosschex.is_none());
        assert!(config.shifts.is_none());
        assert_eq!(config.shift_window().unwrap(), Duration::hours(12));
        assert!(config.crosschex().is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.config_path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            crosschex: Some(CrossChexConfig {
                email: "hr@example.com".to_string(),
                account_name: "plant-a".to_string(),
                utc_offset: "+01:00".to_string(),
                ..CrossChexConfig::default()
            }),
            shifts: Some(ShiftConfig { window_hours: 14 }),
        };

        config.save_to(&ctx.config_path).unwrap();
        let read_config = Config::read_from(&ctx.config_path).unwrap();

        assert_eq!(read_config, config);
        assert_eq!(read_config.crosschex().unwrap().account_name, "plant-a");
        assert_eq!(read_config.shift_window().unwrap(), Duration::hours(14));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_sections_are_not_written(ctx: &mut ConfigTestContext) {
        let config = Config {
            crosschex: None,
            shifts: Some(ShiftConfig::default()),
        };
        config.save_to(&ctx.config_path).unwrap();

        let content = fs::read_to_string(&ctx.config_path).unwrap();
        assert!(!content.contains("crosschex"));
        assert!(content.contains("window_hours"));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_sections_use_defaults(ctx: &mut ConfigTestContext) {
        fs::create_dir_all(ctx.config_path.parent().unwrap()).unwrap();
        fs::write(&ctx.config_path, r#"{"crosschex": {"email": "hr@example.com"}, "shifts": {}}"#).unwrap();

        let config = Config::read_from(&ctx.config_path).unwrap();
        let crosschex = config.crosschex().unwrap();
        assert_eq!(crosschex.per_page, 20);
        assert_eq!(crosschex.utc_offset, "+02:00");
        assert_eq!(config.shifts, Some(ShiftConfig { window_hours: 12 }));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_hand_edited_window_is_validated(ctx: &mut ConfigTestContext) {
        fs::create_dir_all(ctx.config_path.parent().unwrap()).unwrap();

        for hours in ["-5", "0", "9223372036854775807"] {
            fs::write(&ctx.config_path, format!(r#"{{"shifts": {{"window_hours": {}}}}}"#, hours)).unwrap();
            let config = Config::read_from(&ctx.config_path).unwrap();

            assert!(config.shift_window().is_err(), "window_hours {} was accepted", hours);
            assert!(resolve_window(None, &config).is_err());
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_window_flag_overrides_config(_ctx: &mut ConfigTestContext) {
        let config = Config {
            crosschex: None,
            shifts: Some(ShiftConfig { window_hours: -5 }),
        };

        assert_eq!(resolve_window(Some(8), &config).unwrap(), Duration::hours(8));
        assert!(resolve_window(Some(0), &config).is_err());
        assert!(resolve_window(Some(-1), &Config::default()).is_err());
        assert!(resolve_window(Some(3_000_000_000_000), &Config::default()).is_err());
        assert_eq!(resolve_window(None, &Config::default()).unwrap(), Duration::hours(12));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_invalid_json_is_an_error(ctx: &mut ConfigTestContext) {
        fs::create_dir_all(ctx.config_path.parent().unwrap()).unwrap();
        fs::write(&ctx.config_path, "{ not json").unwrap();

        assert!(Config::read_from(&ctx.config_path).is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_delete_config(ctx: &mut ConfigTestContext) {
        Config::default().save_to(&ctx.config_path).unwrap();

        assert!(Config::delete_at(&ctx.config_path).unwrap());
        assert!(!ctx.config_path.exists());
        assert!(!Config::delete_at(&ctx.config_path).unwrap());
    }
}
