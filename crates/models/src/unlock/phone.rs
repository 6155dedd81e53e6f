use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::client;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "celular")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_celular: Uuid,
    pub marca: String,
    pub modelo: String,
    #[sea_orm(unique)]
    pub imei: String,
    pub cliente_id: Uuid,
    pub data_registro: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Client }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Client => Entity::belongs_to(client::Entity)
                .from(Column::ClienteId)
                .to(client::Column::IdCliente)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
