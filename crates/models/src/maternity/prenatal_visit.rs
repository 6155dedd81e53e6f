use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{pregnant_person, professional};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "consulta_prenatal")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_consulta: Uuid,
    pub id_gestante: Uuid,
    pub id_profissional: Uuid,
    pub data_consulta: Date,
    pub semana_gestacional: Option<i32>,
    #[sea_orm(column_type = "Double", nullable)]
    pub peso_kg: Option<f64>,
    pub pressao_arterial: Option<String>,
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

impl Related<professional::Entity> for Entity {
    fn to() -> RelationDef { Relation::Professional.def() }
}

impl ActiveModelBehavior for ActiveModel {}
