/// Config sections that accept environment overrides.
const SECTIONS: [&str; 3] = ["DATABASE", "RETRY", "GENERAL"];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured() {
    for warning in collect_unconfigured_warnings(std::env::vars().map(|(key, _)| key)) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(env_keys: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let env_keys = env_keys.into_iter().collect::<Vec<_>>();

    SECTIONS
        .iter()
        .filter(|section| {
            let single = format!("VOYAGE_{section}_");
            let double = format!("VOYAGE_{section}__");
            env_keys
                .iter()
                .any(|key| key.starts_with(&single) && !key.starts_with(&double))
        })
        .map(|section| {
            format!(
                "VOYAGE_{section}_* env vars are ignored. Use double underscores (example: VOYAGE_{section}__{})",
                example_field(section)
            )
        })
        .collect()
}

fn example_field(section: &str) -> &'static str {
    match section {
        "DATABASE" => "PATH",
        "RETRY" => "MAX_ATTEMPTS",
        _ => "DEFAULT_USER",
    }
}
