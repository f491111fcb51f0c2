static INIT_ONCE: std::sync::Once = std::sync::Once::new();

/// Install the global tracing subscriber once. `RUST_LOG` wins over `default_level`.
pub fn init_tracing_once() {
    init_tracing_with_default("info");
}

pub fn init_tracing_with_default(default_level: &str) {
    INIT_ONCE.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Read a boolean-ish environment variable (1/true/yes/on, 0/false/no/off).
/// Returns None when unset or unrecognized.
pub fn env_flag(name: &str) -> Option<bool> {
    let raw = std::env::var(name).ok()?;
    parse_flag(&raw)
}

pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
