use async_trait::async_trait;
use sea_orm::{sea_query::OnConflict, DatabaseConnection, EntityTrait, Set};

use crate::errors::ServiceError;
use crate::users::domain::User;
use crate::users::repository::UserStore;

/// `users` table in Postgres via sea-orm.
#[derive(Clone)]
pub struct SeaOrmUserStore {
    pub db: DatabaseConnection,
}

impl SeaOrmUserStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl UserStore for SeaOrmUserStore {
    async fn put(&self, user: User) -> Result<(), ServiceError> {
        use models::user::{ActiveModel, Column, Entity};

        let am = ActiveModel { id: Set(user.id), name: Set(user.name), email: Set(user.email) };
        Entity::insert(am)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([Column::Name, Column::Email])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<User>, ServiceError> {
        let found = models::user::Entity::find_by_id(id.to_string()).one(&self.db).await?;
        Ok(found.map(|m| User { id: m.id, name: m.name, email: m.email }))
    }
}
