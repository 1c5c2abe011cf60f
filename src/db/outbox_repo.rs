// src/db/outbox_repo.rs

use serde_json::Value;
use sqlx::{Executor, Postgres};

use crate::{common::error::AppError, models::outbox::OutboxEvent};

// Só escreve: o consumidor do outbox vive fora deste serviço.
#[derive(Clone)]
pub struct OutboxRepository;

impl OutboxRepository {
    pub fn new() -> Self {
        Self
    }

    /// Grava o evento na mesma transação da escrita que o originou,
    /// garantindo a entrega at-least-once para o consumidor.
    pub async fn append<'e, E>(
        &self,
        executor: E,
        event_type: &str,
        payload: &Value,
    ) -> Result<OutboxEvent, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let event = sqlx::query_as::<_, OutboxEvent>(
            r#"
            INSERT INTO outbox_events (event_type, payload)
            VALUES ($1, $2)
            RETURNING id, event_type, payload, created_at, processed_at
            "#,
        )
        .bind(event_type)
        .bind(payload)
        .fetch_one(executor)
        .await?;

        Ok(event)
    }
}
