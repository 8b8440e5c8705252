use serde::{Deserialize, Serialize};

/// Тело ошибки, которое возвращают функции `get-report`, `get-ai-summary`, `get-explanation`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

impl ApiErrorBody {
    /// Попробовать извлечь сообщение об ошибке из сырого тела ответа
    pub fn parse_message(body: &str) -> Option<String> {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .map(|b| b.error)
            .filter(|m| !m.trim().is_empty())
    }
}
