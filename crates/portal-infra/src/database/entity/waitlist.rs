//! Waitlist entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "waitlist")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub source: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for portal_core::domain::WaitlistEntry {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            full_name: model.full_name,
            source: model.source,
            created_at: model.created_at.into(),
        }
    }
}

impl From<portal_core::domain::WaitlistEntry> for ActiveModel {
    fn from(entry: portal_core::domain::WaitlistEntry) -> Self {
        Self {
            id: Set(entry.id),
            email: Set(entry.email),
            full_name: Set(entry.full_name),
            source: Set(entry.source),
            created_at: Set(entry.created_at.into()),
        }
    }
}
