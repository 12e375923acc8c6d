use figment::Jail;
use vet_config::VetConfig;

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("VETREC_OCR__LANGUAGE", "spa");
        jail.set_env("VETREC_OCR__DPI", "300");
        jail.set_env("VETREC_TOOLS__PDFTOPPM", "/usr/local/bin/pdftoppm");
        jail.set_env("VETREC_GENERAL__KEEP_GOING", "true");

        let config = VetConfig::load().expect("config loads");
        assert_eq!(config.ocr.language, "spa");
        assert_eq!(config.ocr.dpi, 300);
        assert_eq!(config.tools.pdftoppm, "/usr/local/bin/pdftoppm");
        assert!(config.general.keep_going);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".vetrec")?;
        jail.create_file(
            ".vetrec/config.toml",
            r#"
[ocr]
language = "fra"
jobs = 8
"#,
        )?;
        jail.set_env("VETREC_OCR__LANGUAGE", "deu");

        let config = VetConfig::load().expect("config loads");
        assert_eq!(config.ocr.language, "deu");
        assert_eq!(config.ocr.jobs, 8);
        Ok(())
    });
}

#[test]
fn unrelated_prefixed_vars_are_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("VETREC_LOG", "debug");

        let config = VetConfig::load().expect("config loads");
        assert_eq!(config.ocr.language, "eng");
        Ok(())
    });
}

#[test]
fn invalid_env_language_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("VETREC_OCR__LANGUAGE", "eng;rm");

        assert!(VetConfig::load().is_err());
        Ok(())
    });
}
