// src/models/logs.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Registro de log do sistema. Só leitura, fora o liga/desliga.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    pub id: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updateAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "is_activate")]
    pub is_active: bool,
}

// Corpo do PUT /logs/{id}/ativar-desativar/
#[derive(Debug, Clone, Serialize)]
pub struct LogActivationPayload {
    #[serde(rename = "is_activate")]
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_backend_field_names() {
        let log: Log = serde_json::from_str(
            r#"{"id": 1, "createdAt": "2024-05-01T12:00:00Z",
                "updateAt": "2024-05-02T08:30:00.123456Z", "is_activate": false}"#,
        )
        .unwrap();
        assert!(!log.is_active);
        assert!(log.updated_at > log.created_at);
    }
}
