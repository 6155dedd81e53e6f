use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::pregnant_person;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "exame")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_exame: Uuid,
    pub id_gestante: Uuid,
    pub tipo_exame: String,
    pub data_exame: Date,
    pub resultado: Option<String>,
    pub observacoes: Option<String>,
    pub data_criacao: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { PregnantPerson }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::PregnantPerson => Entity::belongs_to(pregnant_person::Entity)
                .from(Column::IdGestante)
                .to(pregnant_person::Column::IdGestante)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
