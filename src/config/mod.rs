//! Загрузка конфигурации брокера.

pub mod settings;

pub use settings::Settings;
