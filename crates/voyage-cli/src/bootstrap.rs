use anyhow::Context;
use voyage_config::VoyageConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration (`.env` first) and apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<VoyageConfig> {
    let mut config =
        VoyageConfig::load_with_dotenv().context("failed to load voyage configuration")?;
    apply_overrides(&mut config, flags);
    Ok(config)
}

fn apply_overrides(config: &mut VoyageConfig, flags: &GlobalFlags) {
    if let Some(db) = flags.db.as_deref().map(str::trim).filter(|db| !db.is_empty()) {
        config.database.path = db.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::apply_overrides;
    use crate::cli::{ColorMode, GlobalFlags, OutputFormat};
    use voyage_config::VoyageConfig;

    fn flags(db: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            color: ColorMode::Never,
            user: None,
            db: db.map(String::from),
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn db_flag_overrides_configured_path() {
        let mut config = VoyageConfig::default();
        apply_overrides(&mut config, &flags(Some("/tmp/team.db")));
        assert_eq!(config.database.path, "/tmp/team.db");
    }

    #[test]
    fn blank_db_flag_is_ignored() {
        let mut config = VoyageConfig::default();
        apply_overrides(&mut config, &flags(Some("  ")));
        assert_eq!(config.database.path, "voyage.db");
    }
}
