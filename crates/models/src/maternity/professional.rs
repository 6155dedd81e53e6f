use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum Specialty {
    #[sea_orm(string_value = "Obstetra")]
    #[serde(rename = "Obstetra")]
    Obstetrician,
    #[sea_orm(string_value = "Enfermeira Obstetra")]
    #[serde(rename = "Enfermeira Obstetra")]
    NurseMidwife,
    #[sea_orm(string_value = "Pediatra")]
    #[serde(rename = "Pediatra")]
    Pediatrician,
    #[sea_orm(string_value = "Anestesista")]
    #[serde(rename = "Anestesista")]
    Anesthetist,
    #[sea_orm(string_value = "Outro")]
    #[serde(rename = "Outro")]
    Other,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profissional")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_profissional: Uuid,
    pub nome: String,
    pub especialidade: Specialty,
    pub registro_profissional: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    pub telefone: Option<String>,
    pub data_registro: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}
