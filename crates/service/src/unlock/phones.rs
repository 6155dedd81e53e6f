use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::unlock::{client, phone};
use models::validate;
use crate::errors::ServiceError;
use crate::integrity::{self, EntityKind, FieldSet};
use crate::pagination::Pagination;
use crate::patch::double_option;

#[derive(Debug, Clone, Deserialize)]
pub struct NewPhone {
    pub marca: String,
    pub modelo: String,
    pub imei: String,
    #[serde(default)]
    pub cliente_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhonePatch {
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub modelo: Option<String>,
    #[serde(default)]
    pub imei: Option<String>,
    /// Null is rejected: a phone always has an owner.
    #[serde(default, deserialize_with = "double_option")]
    pub cliente_id: Option<Option<Uuid>>,
}

/// Equality filters for listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhoneFilter {
    pub cliente_id: Option<Uuid>,
    pub marca: Option<String>,
}

fn required(field: &str) -> ServiceError {
    ServiceError::Validation(format!("{field} is required"))
}

/// Register a phone. IMEI uniqueness is checked before the owner.
#[instrument(skip(db, input), fields(imei = %input.imei))]
pub async fn create_phone(db: &DatabaseConnection, input: NewPhone) -> Result<phone::Model, ServiceError> {
    validate::require_text("marca", &input.marca)?;
    validate::require_text("modelo", &input.modelo)?;
    validate::require_text("imei", &input.imei)?;

    let txn = db.begin().await?;
    let fields = FieldSet::new()
        .with("imei", input.imei.clone())
        .with_opt("cliente_id", input.cliente_id);
    integrity::check_create(&txn, EntityKind::Phone, &fields).await?;
    let cliente_id = input.cliente_id.ok_or_else(|| required("cliente_id"))?;

    let created = phone::ActiveModel {
        id_celular: Set(Uuid::now_v7()),
        marca: Set(input.marca),
        modelo: Set(input.modelo),
        imei: Set(input.imei),
        cliente_id: Set(cliente_id),
        data_registro: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;
    info!(id = %created.id_celular, cliente_id = %cliente_id, "phone created");
    Ok(created)
}

pub async fn get_phone(db: &DatabaseConnection, id: Uuid) -> Result<Option<phone::Model>, ServiceError> {
    Ok(phone::Entity::find_by_id(id).one(db).await?)
}

pub async fn find_phone_by_imei(db: &DatabaseConnection, imei: &str) -> Result<Option<phone::Model>, ServiceError> {
    Ok(phone::Entity::find().filter(phone::Column::Imei.eq(imei)).one(db).await?)
}

pub async fn list_phones(db: &DatabaseConnection, filter: PhoneFilter, page: Pagination) -> Result<Vec<phone::Model>, ServiceError> {
    let (offset, limit) = page.normalize()?;
    let mut query = phone::Entity::find();
    if let Some(owner) = filter.cliente_id {
        query = query.filter(phone::Column::ClienteId.eq(owner));
    }
    if let Some(marca) = filter.marca {
        query = query.filter(phone::Column::Marca.eq(marca));
    }
    Ok(query
        .order_by_asc(phone::Column::IdCelular)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?)
}

/// Phones owned by a client; NotFound when the client does not exist.
pub async fn list_client_phones(db: &DatabaseConnection, client_id: Uuid, page: Pagination) -> Result<Vec<phone::Model>, ServiceError> {
    if client::Entity::find_by_id(client_id).one(db).await?.is_none() {
        return Err(ServiceError::not_found(EntityKind::Client));
    }
    let filter = PhoneFilter { cliente_id: Some(client_id), ..Default::default() };
    list_phones(db, filter, page).await
}

#[instrument(skip(db, patch))]
pub async fn update_phone(db: &DatabaseConnection, id: Uuid, patch: PhonePatch) -> Result<phone::Model, ServiceError> {
    if let Some(v) = &patch.marca { validate::require_text("marca", v)?; }
    if let Some(v) = &patch.modelo { validate::require_text("modelo", v)?; }
    if let Some(v) = &patch.imei { validate::require_text("imei", v)?; }

    let txn = db.begin().await?;
    let existing = phone::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found(EntityKind::Phone))?;
    let current = FieldSet::new()
        .with("imei", existing.imei.clone())
        .with("cliente_id", existing.cliente_id);
    let changes = FieldSet::new()
        .maybe("imei", patch.imei.clone())
        .maybe_opt("cliente_id", patch.cliente_id);
    integrity::check_update(&txn, EntityKind::Phone, id, &current, &changes).await?;

    let mut am: phone::ActiveModel = existing.clone().into();
    if let Some(v) = patch.marca { am.marca = Set(v); }
    if let Some(v) = patch.modelo { am.modelo = Set(v); }
    if let Some(v) = patch.imei { am.imei = Set(v); }
    if let Some(v) = patch.cliente_id {
        am.cliente_id = Set(v.ok_or_else(|| required("cliente_id"))?);
    }
    if !am.is_changed() {
        return Ok(existing);
    }
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    info!(id = %id, "phone updated");
    Ok(updated)
}

/// Hard delete; refused while unlock jobs reference the phone.
#[instrument(skip(db))]
pub async fn delete_phone(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if phone::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found(EntityKind::Phone));
    }
    integrity::guard_delete(&txn, EntityKind::Phone, id).await?;
    phone::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(id = %id, "phone deleted");
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::test_support::unlock_db;
    use crate::unlock::clients::{create_client, delete_client, get_client, tests::new_client};

    pub(crate) fn new_phone(imei: &str, owner: Uuid) -> NewPhone {
        NewPhone { marca: "Samsung".into(), modelo: "A10".into(), imei: imei.into(), cliente_id: Some(owner) }
    }

    #[tokio::test]
    async fn dangling_owner_persists_nothing() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        let res = create_phone(&db, new_phone("123", Uuid::now_v7())).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert!(find_phone_by_imei(&db, "123").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn missing_owner_is_invalid_input() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        let input = NewPhone { cliente_id: None, ..new_phone("123", Uuid::nil()) };
        assert!(matches!(create_phone(&db, input).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn imei_conflict_reported_before_missing_owner() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        let owner = create_client(&db, new_client("a@x.com")).await?;
        create_phone(&db, new_phone("123", owner.id_cliente)).await?;
        let res = create_phone(&db, new_phone("123", Uuid::now_v7())).await;
        assert!(matches!(res, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn owner_with_phone_cannot_be_deleted() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        let owner = create_client(&db, new_client("a@x.com")).await?;
        let p = create_phone(&db, new_phone("123", owner.id_cliente)).await?;

        assert!(matches!(delete_client(&db, owner.id_cliente).await, Err(ServiceError::Conflict(_))));
        assert!(get_client(&db, owner.id_cliente).await?.is_some());

        delete_phone(&db, p.id_celular).await?;
        delete_client(&db, owner.id_cliente).await?;
        assert!(get_client(&db, owner.id_cliente).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn reassigning_owner_resolves_new_client() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        let a = create_client(&db, new_client("a@x.com")).await?;
        let b = create_client(&db, new_client("b@x.com")).await?;
        let p = create_phone(&db, new_phone("123", a.id_cliente)).await?;

        let dangling = PhonePatch { cliente_id: Some(Some(Uuid::now_v7())), ..Default::default() };
        assert!(matches!(update_phone(&db, p.id_celular, dangling).await, Err(ServiceError::NotFound(_))));

        let null = PhonePatch { cliente_id: Some(None), ..Default::default() };
        assert!(matches!(update_phone(&db, p.id_celular, null).await, Err(ServiceError::Validation(_))));

        let moved = update_phone(&db, p.id_celular, PhonePatch { cliente_id: Some(Some(b.id_cliente)), ..Default::default() }).await?;
        assert_eq!(moved.cliente_id, b.id_cliente);
        assert_eq!(moved.imei, "123");

        assert!(matches!(list_client_phones(&db, Uuid::now_v7(), Pagination::default()).await, Err(ServiceError::NotFound(_))));
        assert_eq!(list_client_phones(&db, b.id_cliente, Pagination::default()).await?.len(), 1);
        assert!(list_client_phones(&db, a.id_cliente, Pagination::default()).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_brand() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        let owner = create_client(&db, new_client("a@x.com")).await?;
        create_phone(&db, new_phone("1", owner.id_cliente)).await?;
        create_phone(&db, NewPhone { marca: "Motorola".into(), ..new_phone("2", owner.id_cliente) }).await?;
        let filter = PhoneFilter { marca: Some("Motorola".into()), ..Default::default() };
        let found = list_phones(&db, filter, Pagination::default()).await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].imei, "2");
        let page = list_phones(&db, PhoneFilter::default(), Pagination { skip: 1, limit: 1 }).await?;
        assert_eq!(page.len(), 1);
        Ok(())
    }
}
