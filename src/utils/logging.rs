//! Система логирования с настройкой уровней через переменные окружения
//! Использует env_logger для гибкого управления логами

use std::env;

use env_logger::Env;

/// Инициализация системы логирования
///
/// Уровни логирования настраиваются через переменную окружения RUST_LOG:
/// - RUST_LOG=error - только ошибки
/// - RUST_LOG=warn - предупреждения (неверный секрет, запрещённый символ)
/// - RUST_LOG=info - отфильтрованные и отправленные сигналы (по умолчанию)
/// - RUST_LOG=debug - отладочная информация
///
/// Можно указать для конкретного модуля:
/// - RUST_LOG=pumpfarm_webhook::gates=debug,pumpfarm_webhook::execution=info
pub fn init_logging() {
    // try_init: в тестах логгер может быть уже установлен
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .format_module_path(true)
        .format_target(false)
        .try_init();

    log::info!("✅ Система логирования инициализирована");
    log::info!("📝 Уровень логирования: {}", get_log_level());
}

/// Получить текущий уровень логирования
pub fn get_log_level() -> String {
    env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}
