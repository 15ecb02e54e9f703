//! Logging setup for the Stockroom binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events are shown at the default level alongside the binary's own.
const TRACED_CRATES: &[&str] = &["stockroom_server", "tower_http"];

/// Build the fallback filter directive used when `RUST_LOG` is unset.
///
/// Cargo binary names may contain `-`, tracing targets never do.
pub fn default_directive(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    let mut targets: Vec<&str> = TRACED_CRATES.to_vec();
    if !targets.contains(&binary_target.as_str()) {
        targets.push(&binary_target);
    }

    targets
        .iter()
        .map(|target| format!("{}={}", target, default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Examples
///
/// ```no_run
/// use stockroom_shared::logger::setup_logger;
///
/// setup_logger("stockroom-server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_normalizes_binary_name() {
        // テスト項目: バイナリ名のハイフンがアンダースコアに変換される
        // given (前提条件):
        let binary_name = "stockroom-server";

        // when (操作):
        let directive = default_directive(binary_name, "debug");

        // then (期待する結果): ライブラリと同じターゲット名なので重複しない
        assert_eq!(directive, "stockroom_server=debug,tower_http=debug");
    }

    #[test]
    fn test_default_directive_appends_unknown_binary() {
        // テスト項目: 未知のバイナリ名はターゲットとして追加される
        // given (前提条件):
        let binary_name = "relay-probe";

        // when (操作):
        let directive = default_directive(binary_name, "info");

        // then (期待する結果):
        assert_eq!(
            directive,
            "stockroom_server=info,tower_http=info,relay_probe=info"
        );
    }
}
