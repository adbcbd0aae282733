use thiserror::Error;

/// Ошибка работы со свойствами сообщения.
///
/// Свойства добавляются один раз: повторное добавление имени — ошибка,
/// удаление отсутствующего имени — тоже ошибка.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("property already exists: {0}")]
    DuplicateProperty(String),

    #[error("unknown property: {0}")]
    UnknownProperty(String),

    #[error("property name cannot be empty")]
    InvalidPropertyName,
}
