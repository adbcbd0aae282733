//! Инициализация структурированного логирования.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Инициализирует tracing-подписчик с фильтром из `RUST_LOG`
/// (или `default_level`, если переменная не задана).
///
/// Повторный вызов в одном процессе вернёт ошибку установки глобального
/// подписчика; в тестах используйте `try_init_logging`.
pub fn init_logging(default_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = default_level,
        "logging initialized"
    );
    Ok(())
}

/// Как [`init_logging`], но молча игнорирует уже установленный подписчик.
pub fn try_init_logging(default_level: &str) {
    let _ = init_logging(default_level);
}
