#[cfg(test)]
mod tests {
    use cxshift::libs::secret::Secret;
    use std::fs;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct SecretTestContext {
        _temp_dir: TempDir,
        secret: Secret,
        test_password: String,
    }

    impl TestContext for SecretTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let secret = Secret::at(temp_dir.path().join(".test_secret"), "Enter test password");

            SecretTestContext {
                _temp_dir: temp_dir,
                secret,
                test_password: "test_password_123".to_string(),
            }
        }
    }

    #[test_context(SecretTestContext)]
    #[test]
    fn test_store_and_load_roundtrip(ctx: &mut SecretTestContext) {
        ctx.secret.store(&ctx.test_password).unwrap();

        assert_eq!(ctx.secret.load().unwrap(), ctx.test_password);
    }

    #[test_context(SecretTestContext)]
    #[test]
    fn test_stored_file_is_not_plaintext(ctx: &mut SecretTestContext) {
        ctx.secret.store(&ctx.test_password).unwrap();

        let content = fs::read_to_string(ctx.secret.path()).unwrap();
        assert!(!content.is_empty());
        assert!(!content.contains(&ctx.test_password));
    }

    #[test_context(SecretTestContext)]
    #[test]
    fn test_load_missing_secret_fails(ctx: &mut SecretTestContext) {
        assert!(ctx.secret.load().is_err());
    }

    #[test_context(SecretTestContext)]
    #[test]
    fn test_load_corrupted_secret_fails(ctx: &mut SecretTestContext) {
        fs::write(ctx.secret.path(), "definitely not base64!").unwrap();
        assert!(ctx.secret.load().is_err());
    }

    #[test_context(SecretTestContext)]
    #[test]
    fn test_forget_removes_file(ctx: &mut SecretTestContext) {
        ctx.secret.store(&ctx.test_password).unwrap();

        ctx.secret.forget().unwrap();
        assert!(!ctx.secret.path().exists());

        // A second forget is fine
        ctx.secret.forget().unwrap();
    }

    #[test_context(SecretTestContext)]
    #[test]
    fn test_environment_takes_precedence(ctx: &mut SecretTestContext) {
        ctx.secret.store("stored_password").unwrap();
        std::env::set_var("CXSHIFT_TEST_SECRET_ENV", "env_password");

        let secret = ctx.secret.clone().with_env("CXSHIFT_TEST_SECRET_ENV");
        assert_eq!(secret.get_or_prompt().unwrap(), "env_password");
    }

    #[test_context(SecretTestContext)]
    #[test]
    fn test_stored_secret_used_without_environment(ctx: &mut SecretTestContext) {
        ctx.secret.store("stored_password").unwrap();

        let secret = ctx.secret.clone().with_env("CXSHIFT_TEST_SECRET_UNSET");
        assert_eq!(secret.get_or_prompt().unwrap(), "stored_password");
    }
}
