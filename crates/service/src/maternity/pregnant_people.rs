use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::maternity::pregnant_person;
use models::validate;
use crate::errors::ServiceError;
use crate::integrity::{self, EntityKind, FieldSet};
use crate::pagination::Pagination;
use crate::patch::double_option;

#[derive(Debug, Clone, Deserialize)]
pub struct NewPregnantPerson {
    pub nome: String,
    pub cpf: String,
    pub data_nascimento: NaiveDate,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub endereco: Option<String>,
    #[serde(default)]
    pub tipo_sanguineo: Option<String>,
    #[serde(default)]
    pub data_ultima_menstruacao: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PregnantPersonPatch {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub data_nascimento: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub telefone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub endereco: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub tipo_sanguineo: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub data_ultima_menstruacao: Option<Option<NaiveDate>>,
}

#[instrument(skip(db, input))]
pub async fn create_pregnant_person(db: &DatabaseConnection, input: NewPregnantPerson) -> Result<pregnant_person::Model, ServiceError> {
    validate::require_text("nome", &input.nome)?;
    validate::validate_cpf(&input.cpf)?;
    if let Some(email) = &input.email {
        validate::validate_email(email)?;
    }

    let txn = db.begin().await?;
    let fields = FieldSet::new().with("cpf", input.cpf.clone());
    integrity::check_create(&txn, EntityKind::PregnantPerson, &fields).await?;

    let created = pregnant_person::ActiveModel {
        id_gestante: Set(Uuid::now_v7()),
        nome: Set(input.nome),
        cpf: Set(input.cpf),
        data_nascimento: Set(input.data_nascimento),
        telefone: Set(input.telefone),
        email: Set(input.email),
        endereco: Set(input.endereco),
        tipo_sanguineo: Set(input.tipo_sanguineo),
        data_ultima_menstruacao: Set(input.data_ultima_menstruacao),
        data_registro: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;
    info!(id = %created.id_gestante, "pregnant person registered");
    Ok(created)
}

pub async fn get_pregnant_person(db: &DatabaseConnection, id: Uuid) -> Result<Option<pregnant_person::Model>, ServiceError> {
    Ok(pregnant_person::Entity::find_by_id(id).one(db).await?)
}

pub async fn find_pregnant_person_by_cpf(db: &DatabaseConnection, cpf: &str) -> Result<Option<pregnant_person::Model>, ServiceError> {
    Ok(pregnant_person::Entity::find().filter(pregnant_person::Column::Cpf.eq(cpf)).one(db).await?)
}

pub async fn list_pregnant_people(db: &DatabaseConnection, page: Pagination) -> Result<Vec<pregnant_person::Model>, ServiceError> {
    let (offset, limit) = page.normalize()?;
    Ok(pregnant_person::Entity::find()
        .order_by_asc(pregnant_person::Column::IdGestante)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?)
}

/// Fetch or NotFound; used by the nested listings.
pub(crate) async fn require_pregnant_person<C: sea_orm::ConnectionTrait>(db: &C, id: Uuid) -> Result<pregnant_person::Model, ServiceError> {
    pregnant_person::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found(EntityKind::PregnantPerson))
}

#[instrument(skip(db, patch))]
pub async fn update_pregnant_person(
    db: &DatabaseConnection,
    id: Uuid,
    patch: PregnantPersonPatch,
) -> Result<pregnant_person::Model, ServiceError> {
    if let Some(v) = &patch.nome { validate::require_text("nome", v)?; }
    if let Some(v) = &patch.cpf { validate::validate_cpf(v)?; }
    if let Some(Some(v)) = &patch.email { validate::validate_email(v)?; }

    let txn = db.begin().await?;
    let existing = require_pregnant_person(&txn, id).await?;
    let current = FieldSet::new().with("cpf", existing.cpf.clone());
    let changes = FieldSet::new().maybe("cpf", patch.cpf.clone());
    integrity::check_update(&txn, EntityKind::PregnantPerson, id, &current, &changes).await?;

    let mut am: pregnant_person::ActiveModel = existing.clone().into();
    if let Some(v) = patch.nome { am.nome = Set(v); }
    if let Some(v) = patch.cpf { am.cpf = Set(v); }
    if let Some(v) = patch.data_nascimento { am.data_nascimento = Set(v); }
    if let Some(v) = patch.telefone { am.telefone = Set(v); }
    if let Some(v) = patch.email { am.email = Set(v); }
    if let Some(v) = patch.endereco { am.endereco = Set(v); }
    if let Some(v) = patch.tipo_sanguineo { am.tipo_sanguineo = Set(v); }
    if let Some(v) = patch.data_ultima_menstruacao { am.data_ultima_menstruacao = Set(v); }
    if !am.is_changed() {
        return Ok(existing);
    }
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    info!(id = %id, "pregnant person updated");
    Ok(updated)
}

/// Refused while prenatal visits exist. Exams and births are held back by
/// the schema's foreign keys, which surface as a conflict as well.
#[instrument(skip(db))]
pub async fn delete_pregnant_person(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    require_pregnant_person(&txn, id).await?;
    integrity::guard_delete(&txn, EntityKind::PregnantPerson, id).await?;
    pregnant_person::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(id = %id, "pregnant person deleted");
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::test_support::maternity_db;

    pub(crate) fn new_person(cpf: &str) -> NewPregnantPerson {
        NewPregnantPerson {
            nome: "Maria Souza".into(),
            cpf: cpf.into(),
            data_nascimento: NaiveDate::from_ymd_opt(1994, 5, 17).unwrap(),
            telefone: Some("11 98888-0000".into()),
            email: None,
            endereco: None,
            tipo_sanguineo: Some("O+".into()),
            data_ultima_menstruacao: NaiveDate::from_ymd_opt(2025, 1, 10),
        }
    }

    #[tokio::test]
    async fn cpf_is_unique() -> Result<(), anyhow::Error> {
        let db = maternity_db().await?;
        let p = create_pregnant_person(&db, new_person("123.456.789-09")).await?;
        let again = create_pregnant_person(&db, new_person("123.456.789-09")).await;
        assert!(matches!(again, Err(ServiceError::Conflict(_))));
        assert_eq!(find_pregnant_person_by_cpf(&db, "123.456.789-09").await?.map(|g| g.id_gestante), Some(p.id_gestante));
        assert_eq!(list_pregnant_people(&db, Pagination::default()).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_cpf_is_invalid() -> Result<(), anyhow::Error> {
        let db = maternity_db().await?;
        assert!(matches!(create_pregnant_person(&db, new_person("12345")).await, Err(ServiceError::Model(_))));
        Ok(())
    }

    #[tokio::test]
    async fn patch_touches_only_supplied_fields() -> Result<(), anyhow::Error> {
        let db = maternity_db().await?;
        let p = create_pregnant_person(&db, new_person("11111111111")).await?;
        assert_eq!(update_pregnant_person(&db, p.id_gestante, PregnantPersonPatch::default()).await?, p);

        let patch = PregnantPersonPatch {
            tipo_sanguineo: Some(None),
            endereco: Some(Some("Rua das Flores, 5".into())),
            ..Default::default()
        };
        let updated = update_pregnant_person(&db, p.id_gestante, patch).await?;
        assert_eq!(updated.tipo_sanguineo, None);
        assert_eq!(updated.endereco.as_deref(), Some("Rua das Flores, 5"));
        assert_eq!(updated.telefone, p.telefone);
        assert_eq!(updated.data_registro, p.data_registro);
        Ok(())
    }

    #[tokio::test]
    async fn unreferenced_person_can_be_deleted() -> Result<(), anyhow::Error> {
        let db = maternity_db().await?;
        let p = create_pregnant_person(&db, new_person("11111111111")).await?;
        delete_pregnant_person(&db, p.id_gestante).await?;
        assert!(get_pregnant_person(&db, p.id_gestante).await?.is_none());
        assert!(matches!(delete_pregnant_person(&db, p.id_gestante).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
