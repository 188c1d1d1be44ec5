use voyage_config::VoyageConfig;
use voyage_core::errors::CoreError;
use voyage_core::identity::AuthenticatedCaller;
use voyage_db::service::TechStackService;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: TechStackService,
    caller: Option<AuthenticatedCaller>,
}

impl AppContext {
    /// Open the configured database and resolve the acting user.
    pub async fn init(config: &VoyageConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let service = TechStackService::from_config(config).await?;
        let caller = resolve_caller(flags.user.as_deref(), config.general.default_user());

        tracing::debug!(
            db = %config.database.path,
            user_id = caller.as_ref().map(AuthenticatedCaller::user_id),
            "application context ready"
        );

        Ok(Self { service, caller })
    }

    /// The acting user, required by every mutating command.
    pub fn caller(&self) -> Result<&AuthenticatedCaller, CoreError> {
        self.caller.as_ref().ok_or_else(|| {
            CoreError::Validation(
                "no acting user: pass --user or set VOYAGE_GENERAL__DEFAULT_USER".into(),
            )
        })
    }
}

/// `--user` wins over the configured default; blank values count as absent.
fn resolve_caller(flag: Option<&str>, default_user: Option<&str>) -> Option<AuthenticatedCaller> {
    flag.map(str::trim)
        .filter(|user| !user.is_empty())
        .or(default_user)
        .map(AuthenticatedCaller::new)
}

#[cfg(test)]
mod tests {
    use super::resolve_caller;

    #[test]
    fn flag_wins_over_default() {
        let caller = resolve_caller(Some("usr-0000000a"), Some("usr-0000000b")).unwrap();
        assert_eq!(caller.user_id(), "usr-0000000a");
    }

    #[test]
    fn falls_back_to_default() {
        let caller = resolve_caller(Some("  "), Some("usr-0000000b")).unwrap();
        assert_eq!(caller.user_id(), "usr-0000000b");
    }

    #[test]
    fn absent_without_flag_or_default() {
        assert!(resolve_caller(None, None).is_none());
    }
}
