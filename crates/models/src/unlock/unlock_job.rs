use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{phone, user};

/// Kind of lock being removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum UnlockKind {
    #[sea_orm(string_value = "FRP")]
    #[serde(rename = "FRP")]
    Frp,
    #[sea_orm(string_value = "iCloud")]
    #[serde(rename = "iCloud")]
    ICloud,
    #[sea_orm(string_value = "Senha")]
    #[serde(rename = "Senha")]
    Password,
    #[sea_orm(string_value = "Network")]
    #[serde(rename = "Network")]
    Network,
    #[sea_orm(string_value = "Outro")]
    #[serde(rename = "Outro")]
    Other,
}

/// Advisory job status. Any status may follow any other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum UnlockStatus {
    #[default]
    #[sea_orm(string_value = "Pendente")]
    #[serde(rename = "Pendente")]
    Pending,
    #[sea_orm(string_value = "Em Processo")]
    #[serde(rename = "Em Processo")]
    InProcess,
    #[sea_orm(string_value = "Concluído")]
    #[serde(rename = "Concluído")]
    Completed,
    #[sea_orm(string_value = "Cancelado")]
    #[serde(rename = "Cancelado")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "desbloqueio")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_desbloqueio: Uuid,
    pub tipo_desbloqueio: UnlockKind,
    pub status: UnlockStatus,
    pub data_entrada: Date,
    pub data_saida: Option<Date>,
    pub descricao_problema: Option<String>,
    pub observacoes: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub valor_cobrado: Option<f64>,
    pub celular_id: Uuid,
    pub usuario_responsavel_id: Option<Uuid>,
    pub data_criacao: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Phone, User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Phone => Entity::belongs_to(phone::Entity)
                .from(Column::CelularId)
                .to(phone::Column::IdCelular)
                .into(),
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UsuarioResponsavelId)
                .to(user::Column::IdUsuario)
                .into(),
        }
    }
}

impl Related<phone::Entity> for Entity {
    fn to() -> RelationDef { Relation::Phone.def() }
}

impl ActiveModelBehavior for ActiveModel {}
