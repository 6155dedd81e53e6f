use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{pregnant_person, professional};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum DeliveryKind {
    #[sea_orm(string_value = "Normal")]
    #[serde(rename = "Normal")]
    Vaginal,
    #[sea_orm(string_value = "Cesárea")]
    #[serde(rename = "Cesárea")]
    Cesarean,
    #[sea_orm(string_value = "Fórceps")]
    #[serde(rename = "Fórceps")]
    Forceps,
}

/// At most one birth per pregnant person (`id_gestante` is unique).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parto")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_parto: Uuid,
    #[sea_orm(unique)]
    pub id_gestante: Uuid,
    pub id_profissional: Uuid,
    pub data_parto: Date,
    pub tipo_parto: DeliveryKind,
    pub semana_gestacional: Option<i32>,
    pub peso_bebe_g: Option<i32>,
    pub sexo_bebe: Option<String>,
    pub observacoes: Option<String>,
    pub data_criacao: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { PregnantPerson, Professional }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::PregnantPerson => Entity::belongs_to(pregnant_person::Entity)
                .from(Column::IdGestante)
                .to(pregnant_person::Column::IdGestante)
                .into(),
            Relation::Professional => Entity::belongs_to(professional::Entity)
                .from(Column::IdProfissional)
                .to(professional::Column::IdProfissional)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
