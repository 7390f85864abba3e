//! Process setup for the command-line binary.

use tracing_subscriber::EnvFilter;

/// Initialize logging with tracing_subscriber.
///
/// Library code logs through the `log` macros; `tracing-log` bridges them.
/// Output goes to stderr so a JSON report on stdout stays parseable.
pub fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_writer(std::io::stderr)
        .compact()
        .with_target(false)
        .with_ansi(true)
        .init();
}

/// Defaults first, then `RUST_LOG`; a later directive for the same target
/// replaces the earlier one. Invalid directives are dropped.
fn log_filter(verbose: bool, env: Option<String>) -> EnvFilter {
    let crate_level = if verbose { "seo_checker=debug" } else { "seo_checker=info" };
    let mut directives = format!("warn,{}", crate_level);
    if let Some(env) = env.filter(|e| !e.trim().is_empty()) {
        directives.push(',');
        directives.push_str(&env);
    }
    EnvFilter::builder().parse_lossy(directives)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_env() {
        let quiet = log_filter(false, None).to_string().to_lowercase();
        assert!(quiet.contains("seo_checker=info"), "{}", quiet);
        assert!(quiet.contains("warn"), "{}", quiet);

        let verbose = log_filter(true, Some("  ".into())).to_string().to_lowercase();
        assert!(verbose.contains("seo_checker=debug"), "{}", verbose);
    }

    #[test]
    fn env_directives_override_defaults() {
        let env = Some("seo_checker=error,rquest=trace".to_string());
        let filter = log_filter(true, env).to_string().to_lowercase();
        assert!(filter.contains("seo_checker=error"), "{}", filter);
        assert!(filter.contains("rquest=trace"), "{}", filter);
        assert!(!filter.contains("seo_checker=debug"), "{}", filter);
    }

    #[test]
    fn invalid_env_directives_are_ignored() {
        let env = Some("seo_checker=loud".to_string());
        let filter = log_filter(false, env).to_string().to_lowercase();
        assert!(filter.contains("seo_checker=info"), "{}", filter);
        assert!(!filter.contains("loud"), "{}", filter);
    }
}
