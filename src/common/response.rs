// src/common/response.rs

use serde::Serialize;

// ---
// O envelope padrão da API: { success, data, message }
// ---
// Genérico sobre o payload em vez de um objeto de forma dinâmica;
// respostas só de mensagem usam `ApiResponse<()>` (data = null).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }
}

impl ApiResponse<()> {
    /// Resposta sem payload: `data` sai como null no JSON.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self::ok((), message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_wraps_payload_in_camel_case() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Payload {
            team_name: String,
        }

        let body = ApiResponse::ok(
            Payload {
                team_name: "Alpha".into(),
            },
            "Team created successfully",
        );
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["teamName"], "Alpha");
        assert_eq!(json["message"], "Team created successfully");
    }

    #[test]
    fn message_only_serializes_null_data() {
        let json = serde_json::to_value(ApiResponse::message_only("done")).unwrap();
        assert_eq!(json["success"], true);
        assert!(json["data"].is_null());
        assert_eq!(json["message"], "done");
    }
}
