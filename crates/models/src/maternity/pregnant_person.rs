use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gestante")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_gestante: Uuid,
    pub nome: String,
    /// National ID (CPF), unique per record.
    #[sea_orm(unique)]
    pub cpf: String,
    pub data_nascimento: Date,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub endereco: Option<String>,
    pub tipo_sanguineo: Option<String>,
    pub data_ultima_menstruacao: Option<Date>,
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
