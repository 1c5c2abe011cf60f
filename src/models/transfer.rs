// src/models/transfer.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// ---
// 1. Status da solicitação
// ---
// `cancelled` existe no modelo de dados, mas nenhuma operação transita
// para ele (histórico pode carregar o valor).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "transfer_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

// ---
// 2. Ação do aprovador
// ---
// Transições válidas: pending -> approved | pending -> rejected.
// Ambas são terminais.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransferAction {
    Approve,
    Reject,
}

impl TransferAction {
    pub fn resulting_status(self) -> TransferStatus {
        match self {
            TransferAction::Approve => TransferStatus::Approved,
            TransferAction::Reject => TransferStatus::Rejected,
        }
    }
}

// ---
// 3. TeamTransferRequest (a linha da tabela)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamTransferRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub from_team_id: Uuid,
    pub to_team_id: Uuid,
    pub requested_by: Uuid,
    pub reason: Option<String>,
    pub status: TransferStatus,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 4. Visão com dados de exibição (o que a API devolve)
// ---
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartyRef {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequestView {
    pub id: Uuid,
    pub user: PartyRef,
    pub from_team: TeamRef,
    pub to_team: TeamRef,
    pub requested_by: PartyRef,
    pub approved_by: Option<PartyRef>,
    pub reason: Option<String>,
    pub status: TransferStatus,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha "achatada" do JOIN; o repositório converte para a visão aninhada.
#[derive(Debug, Clone, FromRow)]
pub struct TransferRequestRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub from_team_id: Uuid,
    pub from_team_name: String,
    pub to_team_id: Uuid,
    pub to_team_name: String,
    pub requested_by: Uuid,
    pub requester_name: String,
    pub requester_email: String,
    pub approved_by: Option<Uuid>,
    pub approver_name: Option<String>,
    pub approver_email: Option<String>,
    pub reason: Option<String>,
    pub status: TransferStatus,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransferRequestRow {
    pub fn into_view(self) -> TransferRequestView {
        // O aprovador só vira referência se as três colunas vieram do JOIN.
        let approved_by = match (self.approved_by, self.approver_name, self.approver_email) {
            (Some(id), Some(name), Some(email)) => Some(PartyRef { id, name, email }),
            _ => None,
        };

        TransferRequestView {
            id: self.id,
            user: PartyRef {
                id: self.user_id,
                name: self.user_name,
                email: self.user_email,
            },
            from_team: TeamRef {
                id: self.from_team_id,
                name: self.from_team_name,
            },
            to_team: TeamRef {
                id: self.to_team_id,
                name: self.to_team_name,
            },
            requested_by: PartyRef {
                id: self.requested_by,
                name: self.requester_name,
                email: self.requester_email,
            },
            approved_by,
            reason: self.reason,
            status: self.status,
            approved_at: self.approved_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// Página de solicitações de uma equipe.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequestPage {
    pub transfer_requests: Vec<TransferRequestView>,
    pub total: i64,
    pub count: i64,
    pub offset: i64,
}

// ---
// 5. Query string da listagem por equipe
// ---
fn default_transfer_limit() -> i64 {
    20
}

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListTransfersQuery {
    pub status: Option<TransferStatus>,
    #[serde(default = "default_transfer_limit")]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "offset must not be negative"))]
    pub offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_lowercase_wire_values() {
        assert_eq!(
            serde_json::to_string(&TransferStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::from_str::<TransferStatus>("\"cancelled\"").unwrap(),
            TransferStatus::Cancelled
        );
        assert!(serde_json::from_str::<TransferStatus>("\"PENDING\"").is_err());
    }

    #[test]
    fn action_maps_to_terminal_status() {
        assert_eq!(
            TransferAction::Approve.resulting_status(),
            TransferStatus::Approved
        );
        assert_eq!(
            TransferAction::Reject.resulting_status(),
            TransferStatus::Rejected
        );
        assert!(serde_json::from_str::<TransferAction>("\"cancel\"").is_err());
    }

    #[test]
    fn transfer_list_query_defaults() {
        use validator::Validate;

        let query: ListTransfersQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 20);
        assert_eq!(query.offset, 0);
        assert!(query.status.is_none());
        assert!(query.validate().is_ok());

        let negative: ListTransfersQuery = serde_json::from_str(r#"{"offset": -1}"#).unwrap();
        assert!(negative.validate().is_err());
    }

    #[test]
    fn view_omits_approver_while_pending() {
        let row = TransferRequestRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            user_name: "Ana".into(),
            user_email: "ana@example.com".into(),
            from_team_id: Uuid::new_v4(),
            from_team_name: "Alpha".into(),
            to_team_id: Uuid::new_v4(),
            to_team_name: "Beta".into(),
            requested_by: Uuid::new_v4(),
            requester_name: "Bruno".into(),
            requester_email: "bruno@example.com".into(),
            approved_by: None,
            approver_name: None,
            approver_email: None,
            reason: Some("crescimento da equipe".into()),
            status: TransferStatus::Pending,
            approved_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let view = row.into_view();
        assert!(view.approved_by.is_none());
        assert_eq!(view.from_team.name, "Alpha");
        assert_eq!(view.to_team.name, "Beta");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["fromTeam"]["name"], "Alpha");
        assert!(json["approvedBy"].is_null());
    }
}
