use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shop staff member. The password hash never leaves the service.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "usuario")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_usuario: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing, default)]
    pub senha_hash: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub nome_completo: Option<String>,
    pub data_criacao: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}
