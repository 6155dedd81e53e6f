use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::maternity::professional::{self, Specialty};
use models::validate;
use crate::errors::ServiceError;
use crate::integrity::{self, EntityKind, FieldSet};
use crate::pagination::Pagination;
use crate::patch::double_option;

#[derive(Debug, Clone, Deserialize)]
pub struct NewProfessional {
    pub nome: String,
    pub especialidade: Specialty,
    #[serde(default)]
    pub registro_profissional: Option<String>,
    pub email: String,
    #[serde(default)]
    pub telefone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfessionalPatch {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub especialidade: Option<Specialty>,
    #[serde(default, deserialize_with = "double_option")]
    pub registro_profissional: Option<Option<String>>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub telefone: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfessionalFilter {
    pub especialidade: Option<Specialty>,
}

#[instrument(skip(db, input), fields(email = %input.email))]
pub async fn create_professional(db: &DatabaseConnection, input: NewProfessional) -> Result<professional::Model, ServiceError> {
    validate::require_text("nome", &input.nome)?;
    validate::validate_email(&input.email)?;

    let txn = db.begin().await?;
    let fields = FieldSet::new().with("email", input.email.clone());
    integrity::check_create(&txn, EntityKind::Professional, &fields).await?;

    let created = professional::ActiveModel {
        id_profissional: Set(Uuid::now_v7()),
        nome: Set(input.nome),
        especialidade: Set(input.especialidade),
        registro_profissional: Set(input.registro_profissional),
        email: Set(input.email),
        telefone: Set(input.telefone),
        data_registro: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;
    info!(id = %created.id_profissional, "professional registered");
    Ok(created)
}

pub async fn get_professional(db: &DatabaseConnection, id: Uuid) -> Result<Option<professional::Model>, ServiceError> {
    Ok(professional::Entity::find_by_id(id).one(db).await?)
}

pub async fn find_professional_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<professional::Model>, ServiceError> {
    Ok(professional::Entity::find().filter(professional::Column::Email.eq(email)).one(db).await?)
}

pub async fn list_professionals(
    db: &DatabaseConnection,
    filter: ProfessionalFilter,
    page: Pagination,
) -> Result<Vec<professional::Model>, ServiceError> {
    let (offset, limit) = page.normalize()?;
    let mut query = professional::Entity::find();
    if let Some(s) = filter.especialidade {
        query = query.filter(professional::Column::Especialidade.eq(s));
    }
    Ok(query
        .order_by_asc(professional::Column::IdProfissional)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?)
}

pub(crate) async fn require_professional<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<professional::Model, ServiceError> {
    professional::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found(EntityKind::Professional))
}

#[instrument(skip(db, patch))]
pub async fn update_professional(db: &DatabaseConnection, id: Uuid, patch: ProfessionalPatch) -> Result<professional::Model, ServiceError> {
    if let Some(v) = &patch.nome { validate::require_text("nome", v)?; }
    if let Some(v) = &patch.email { validate::validate_email(v)?; }

    let txn = db.begin().await?;
    let existing = require_professional(&txn, id).await?;
    let current = FieldSet::new().with("email", existing.email.clone());
    let changes = FieldSet::new().maybe("email", patch.email.clone());
    integrity::check_update(&txn, EntityKind::Professional, id, &current, &changes).await?;

    let mut am: professional::ActiveModel = existing.clone().into();
    if let Some(v) = patch.nome { am.nome = Set(v); }
    if let Some(v) = patch.especialidade { am.especialidade = Set(v); }
    if let Some(v) = patch.registro_profissional { am.registro_profissional = Set(v); }
    if let Some(v) = patch.email { am.email = Set(v); }
    if let Some(v) = patch.telefone { am.telefone = Set(v); }
    if !am.is_changed() {
        return Ok(existing);
    }
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    info!(id = %id, "professional updated");
    Ok(updated)
}

/// Refused while the professional appears on any prenatal visit or birth.
#[instrument(skip(db))]
pub async fn delete_professional(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    require_professional(&txn, id).await?;
    integrity::guard_delete(&txn, EntityKind::Professional, id).await?;
    professional::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(id = %id, "professional deleted");
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::test_support::maternity_db;

    pub(crate) fn new_professional(email: &str) -> NewProfessional {
        NewProfessional {
            nome: "Dra. Helena".into(),
            especialidade: Specialty::Obstetrician,
            registro_profissional: Some("CRM 1234".into()),
            email: email.into(),
            telefone: None,
        }
    }

    #[tokio::test]
    async fn email_is_unique() -> Result<(), anyhow::Error> {
        let db = maternity_db().await?;
        create_professional(&db, new_professional("h@x.com")).await?;
        let again = create_professional(&db, new_professional("h@x.com")).await;
        assert!(matches!(again, Err(ServiceError::Conflict(_))));
        assert!(find_professional_by_email(&db, "h@x.com").await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn filters_by_specialty() -> Result<(), anyhow::Error> {
        let db = maternity_db().await?;
        create_professional(&db, new_professional("a@x.com")).await?;
        let nurse = NewProfessional { especialidade: Specialty::NurseMidwife, ..new_professional("b@x.com") };
        let n = create_professional(&db, nurse).await?;
        let filter = ProfessionalFilter { especialidade: Some(Specialty::NurseMidwife) };
        let found = list_professionals(&db, filter, Pagination::default()).await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id_profissional, n.id_profissional);
        assert_eq!(serde_json::to_value(&found[0])?["especialidade"], "Enfermeira Obstetra");
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete() -> Result<(), anyhow::Error> {
        let db = maternity_db().await?;
        let a = create_professional(&db, new_professional("a@x.com")).await?;
        create_professional(&db, new_professional("b@x.com")).await?;
        let taken = ProfessionalPatch { email: Some("b@x.com".into()), ..Default::default() };
        assert!(matches!(update_professional(&db, a.id_profissional, taken).await, Err(ServiceError::Conflict(_))));

        let patch = ProfessionalPatch { registro_profissional: Some(None), ..Default::default() };
        let updated = update_professional(&db, a.id_profissional, patch).await?;
        assert_eq!(updated.registro_profissional, None);
        assert_eq!(updated.email, "a@x.com");

        delete_professional(&db, a.id_profissional).await?;
        assert!(get_professional(&db, a.id_profissional).await?.is_none());
        Ok(())
    }
}
