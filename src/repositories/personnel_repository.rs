use crate::models::Personnel;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PersonnelRepository {
    pool: PgPool,
}

impl PersonnelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Personnel>, AppError> {
        let personnel = sqlx::query_as::<_, Personnel>("SELECT * FROM personnel WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(personnel)
    }
}
