//! Gift repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::GiftExportRowEntity;
use crate::metrics::QueryTimer;

/// Repository for gift-related database operations.
#[derive(Clone)]
pub struct GiftRepository {
    pool: PgPool,
}

impl GiftRepository {
    /// Creates a new GiftRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch gift rows joined with guest name/phone for export, in creation
    /// order.
    pub async fn export_rows(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<GiftExportRowEntity>, sqlx::Error> {
        let timer = QueryTimer::new("export_gift_rows");
        let result = sqlx::query_as::<_, GiftExportRowEntity>(
            r#"
            SELECT
                gi.id, gi.event_id, g.name AS guest_name, g.phone AS guest_phone,
                gi.payment_type, gi.currency_type, gi.amount_usd, gi.amount_khr,
                gi.note, gi.created_at, gi.updated_at
            FROM gifts gi
            JOIN guests g ON g.id = gi.guest_id
            WHERE gi.event_id = $1
            ORDER BY gi.created_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
