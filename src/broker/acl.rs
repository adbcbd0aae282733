use globset::{Glob, GlobMatcher};

use super::ClientId;
use crate::{BrokerError, BrokerResult};

/// Правило доступа привилегированного канала.
///
/// Состоит из разрешающего правила и списка запрещающих шаблонов:
///
/// - разрешающее правило — либо «все зарегистрированные клиенты»
///   (шаблон не задан), либо один glob-шаблон, сопоставляемый с полным
///   идентификатором клиента;
/// - `remove_authorized_users` не пытается «вычитать» один шаблон из
///   другого (для шаблонов это не определено), а добавляет запрещающий
///   шаблон в список.
///
/// Клиент авторизован, когда разрешающее правило совпало и ни один
/// запрещающий шаблон не совпал.
#[derive(Debug, Clone)]
pub struct ChannelAcl {
    allow: Option<GlobMatcher>,
    deny: Vec<GlobMatcher>,
}

impl ChannelAcl {
    /// Правило «авторизованы все зарегистрированные клиенты».
    pub fn allow_all() -> Self {
        Self {
            allow: None,
            deny: Vec::new(),
        }
    }

    /// Правило с разрешающим glob-шаблоном.
    pub fn with_pattern(pattern: &str) -> BrokerResult<Self> {
        Ok(Self {
            allow: Some(compile(pattern)?),
            deny: Vec::new(),
        })
    }

    /// Заменяет разрешающий шаблон. Накопленные запрещающие шаблоны
    /// сбрасываются: владелец устанавливает правило заново.
    pub fn set_allow_pattern(&mut self, pattern: &str) -> BrokerResult<()> {
        self.allow = Some(compile(pattern)?);
        self.deny.clear();
        Ok(())
    }

    /// Добавляет запрещающий шаблон.
    pub fn add_deny_pattern(&mut self, pattern: &str) -> BrokerResult<()> {
        self.deny.push(compile(pattern)?);
        Ok(())
    }

    /// Авторизован ли клиент этим правилом.
    pub fn authorizes(&self, client: &ClientId) -> bool {
        let allowed = match &self.allow {
            None => true,
            Some(matcher) => matcher.is_match(client.as_str()),
        };
        allowed && !self.deny.iter().any(|m| m.is_match(client.as_str()))
    }

    /// Задан ли разрешающий шаблон (иначе авторизованы все).
    pub fn has_allow_pattern(&self) -> bool {
        self.allow.is_some()
    }
}

fn compile(pattern: &str) -> BrokerResult<GlobMatcher> {
    if pattern.is_empty() {
        return Err(BrokerError::InvalidPattern(
            "pattern cannot be empty".to_string(),
        ));
    }
    Ok(Glob::new(pattern)?.compile_matcher())
}
