use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::unlock::client;
use models::validate;
use crate::errors::ServiceError;
use crate::integrity::{self, EntityKind, FieldSet};
use crate::pagination::Pagination;
use crate::patch::double_option;

#[derive(Debug, Clone, Deserialize)]
pub struct NewClient {
    pub nome: String,
    pub telefone: String,
    pub email: String,
    #[serde(default)]
    pub endereco: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientPatch {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub endereco: Option<Option<String>>,
}

#[instrument(skip(db, input), fields(email = %input.email))]
pub async fn create_client(db: &DatabaseConnection, input: NewClient) -> Result<client::Model, ServiceError> {
    validate::require_text("nome", &input.nome)?;
    validate::require_text("telefone", &input.telefone)?;
    validate::validate_email(&input.email)?;

    let txn = db.begin().await?;
    let fields = FieldSet::new().with("email", input.email.clone());
    integrity::check_create(&txn, EntityKind::Client, &fields).await?;

    let created = client::ActiveModel {
        id_cliente: Set(Uuid::now_v7()),
        nome: Set(input.nome),
        telefone: Set(input.telefone),
        email: Set(input.email),
        endereco: Set(input.endereco),
        data_registro: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;
    info!(id = %created.id_cliente, "client created");
    Ok(created)
}

pub async fn get_client(db: &DatabaseConnection, id: Uuid) -> Result<Option<client::Model>, ServiceError> {
    Ok(client::Entity::find_by_id(id).one(db).await?)
}

pub async fn find_client_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<client::Model>, ServiceError> {
    Ok(client::Entity::find().filter(client::Column::Email.eq(email)).one(db).await?)
}

pub async fn list_clients(db: &DatabaseConnection, page: Pagination) -> Result<Vec<client::Model>, ServiceError> {
    let (offset, limit) = page.normalize()?;
    Ok(client::Entity::find()
        .order_by_asc(client::Column::IdCliente)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?)
}

#[instrument(skip(db, patch))]
pub async fn update_client(db: &DatabaseConnection, id: Uuid, patch: ClientPatch) -> Result<client::Model, ServiceError> {
    if let Some(v) = &patch.nome { validate::require_text("nome", v)?; }
    if let Some(v) = &patch.telefone { validate::require_text("telefone", v)?; }
    if let Some(v) = &patch.email { validate::validate_email(v)?; }

    let txn = db.begin().await?;
    let existing = client::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found(EntityKind::Client))?;
    let current = FieldSet::new().with("email", existing.email.clone());
    let changes = FieldSet::new().maybe("email", patch.email.clone());
    integrity::check_update(&txn, EntityKind::Client, id, &current, &changes).await?;

    let mut am: client::ActiveModel = existing.clone().into();
    if let Some(v) = patch.nome { am.nome = Set(v); }
    if let Some(v) = patch.telefone { am.telefone = Set(v); }
    if let Some(v) = patch.email { am.email = Set(v); }
    if let Some(v) = patch.endereco { am.endereco = Set(v); }
    if !am.is_changed() {
        return Ok(existing);
    }
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    info!(id = %id, "client updated");
    Ok(updated)
}

/// Hard delete; refused while the client still owns phones.
#[instrument(skip(db))]
pub async fn delete_client(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if client::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found(EntityKind::Client));
    }
    integrity::guard_delete(&txn, EntityKind::Client, id).await?;
    client::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(id = %id, "client deleted");
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::test_support::unlock_db;

    pub(crate) fn new_client(email: &str) -> NewClient {
        NewClient {
            nome: "Ana".into(),
            telefone: "11 99999-0000".into(),
            email: email.into(),
            endereco: Some("Rua A, 10".into()),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_once() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        create_client(&db, new_client("a@x.com")).await?;
        let again = create_client(&db, new_client("a@x.com")).await;
        assert!(matches!(again, Err(ServiceError::Conflict(_))));
        assert_eq!(list_clients(&db, Pagination::default()).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_invalid() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        let mut input = new_client("a@x.com");
        input.nome = "   ".into();
        assert!(matches!(create_client(&db, input).await, Err(ServiceError::Model(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_email_to_taken_value_conflicts() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        let a = create_client(&db, new_client("a@x.com")).await?;
        create_client(&db, new_client("b@x.com")).await?;

        let own = ClientPatch { email: Some("a@x.com".into()), ..Default::default() };
        update_client(&db, a.id_cliente, own).await?;

        let taken = ClientPatch { email: Some("b@x.com".into()), nome: Some("Outra".into()), ..Default::default() };
        assert!(matches!(update_client(&db, a.id_cliente, taken).await, Err(ServiceError::Conflict(_))));
        // nothing from the rejected patch was applied
        let stored = get_client(&db, a.id_cliente).await?.unwrap();
        assert_eq!(stored.nome, "Ana");
        assert_eq!(stored.email, "a@x.com");
        Ok(())
    }

    #[tokio::test]
    async fn patch_clears_address_only() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        let a = create_client(&db, new_client("a@x.com")).await?;
        let patch = ClientPatch { endereco: Some(None), ..Default::default() };
        let updated = update_client(&db, a.id_cliente, patch).await?;
        assert_eq!(updated.endereco, None);
        assert_eq!(updated.telefone, a.telefone);
        assert_eq!(find_client_by_email(&db, "a@x.com").await?.map(|c| c.id_cliente), Some(a.id_cliente));
        Ok(())
    }

    #[tokio::test]
    async fn missing_client_update_is_not_found() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        let res = update_client(&db, Uuid::now_v7(), ClientPatch::default()).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
