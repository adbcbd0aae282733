use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::broker::ServiceTier;

/// Настройки брокера.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Количество FREE-каналов, создаваемых при старте брокера
    /// (`channel0..channel{N-1}`).
    pub free_channels: usize,
    /// Квота привилегированных каналов для класса STANDARD.
    pub standard_channel_quota: usize,
    /// Квота привилегированных каналов для класса PREMIUM.
    pub premium_channel_quota: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            free_channels: 3,
            standard_channel_quota: 2,
            premium_channel_quota: 5,
        }
    }
}

impl Settings {
    /// Загружает настройки: значения по умолчанию, поверх — переменные
    /// окружения с префиксом `VESTNIK_` (например,
    /// `VESTNIK_FREE_CHANNELS=5`).
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let cfg = Config::builder()
            .set_default("free_channels", defaults.free_channels as i64)?
            .set_default(
                "standard_channel_quota",
                defaults.standard_channel_quota as i64,
            )?
            .set_default(
                "premium_channel_quota",
                defaults.premium_channel_quota as i64,
            )?
            .add_source(Environment::with_prefix("VESTNIK"))
            .build()?;

        cfg.try_deserialize()
    }

    /// Квота привилегированных каналов для класса обслуживания.
    pub fn privileged_quota(&self, tier: ServiceTier) -> usize {
        match tier {
            ServiceTier::Free => 0,
            ServiceTier::Standard => self.standard_channel_quota,
            ServiceTier::Premium => self.premium_channel_quota,
        }
    }
}
