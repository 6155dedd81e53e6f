use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::unlock::phone;
use models::unlock::unlock_job::{self, UnlockKind, UnlockStatus};
use models::validate;
use crate::errors::ServiceError;
use crate::integrity::{self, EntityKind, FieldSet};
use crate::pagination::Pagination;
use crate::patch::double_option;

#[derive(Debug, Clone, Deserialize)]
pub struct NewUnlockJob {
    pub tipo_desbloqueio: UnlockKind,
    #[serde(default)]
    pub status: UnlockStatus,
    pub data_entrada: NaiveDate,
    #[serde(default)]
    pub data_saida: Option<NaiveDate>,
    #[serde(default)]
    pub descricao_problema: Option<String>,
    #[serde(default)]
    pub observacoes: Option<String>,
    #[serde(default)]
    pub valor_cobrado: Option<f64>,
    #[serde(default)]
    pub celular_id: Option<Uuid>,
    #[serde(default)]
    pub usuario_responsavel_id: Option<Uuid>,
}

/// The phone and entry date are fixed once the job is opened.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnlockJobPatch {
    #[serde(default)]
    pub tipo_desbloqueio: Option<UnlockKind>,
    #[serde(default)]
    pub status: Option<UnlockStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub data_saida: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub descricao_problema: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub observacoes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub valor_cobrado: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub usuario_responsavel_id: Option<Option<Uuid>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnlockJobFilter {
    pub status: Option<UnlockStatus>,
    pub tipo_desbloqueio: Option<UnlockKind>,
    pub celular_id: Option<Uuid>,
}

/// Open a job. The phone is resolved before the responsible user.
#[instrument(skip(db, input))]
pub async fn create_unlock_job(db: &DatabaseConnection, input: NewUnlockJob) -> Result<unlock_job::Model, ServiceError> {
    if let Some(v) = input.valor_cobrado {
        validate::non_negative("valor_cobrado", v)?;
    }

    let txn = db.begin().await?;
    let fields = FieldSet::new()
        .with_opt("celular_id", input.celular_id)
        .with_opt("usuario_responsavel_id", input.usuario_responsavel_id);
    integrity::check_create(&txn, EntityKind::UnlockJob, &fields).await?;
    let celular_id = input
        .celular_id
        .ok_or_else(|| ServiceError::Validation("celular_id is required".into()))?;

    let created = unlock_job::ActiveModel {
        id_desbloqueio: Set(Uuid::now_v7()),
        tipo_desbloqueio: Set(input.tipo_desbloqueio),
        status: Set(input.status),
        data_entrada: Set(input.data_entrada),
        data_saida: Set(input.data_saida),
        descricao_problema: Set(input.descricao_problema),
        observacoes: Set(input.observacoes),
        valor_cobrado: Set(input.valor_cobrado),
        celular_id: Set(celular_id),
        usuario_responsavel_id: Set(input.usuario_responsavel_id),
        data_criacao: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;
    info!(id = %created.id_desbloqueio, celular_id = %celular_id, "unlock job created");
    Ok(created)
}

pub async fn get_unlock_job(db: &DatabaseConnection, id: Uuid) -> Result<Option<unlock_job::Model>, ServiceError> {
    Ok(unlock_job::Entity::find_by_id(id).one(db).await?)
}

pub async fn list_unlock_jobs(
    db: &DatabaseConnection,
    filter: UnlockJobFilter,
    page: Pagination,
) -> Result<Vec<unlock_job::Model>, ServiceError> {
    let (offset, limit) = page.normalize()?;
    let mut query = unlock_job::Entity::find();
    if let Some(status) = filter.status {
        query = query.filter(unlock_job::Column::Status.eq(status));
    }
    if let Some(kind) = filter.tipo_desbloqueio {
        query = query.filter(unlock_job::Column::TipoDesbloqueio.eq(kind));
    }
    if let Some(phone_id) = filter.celular_id {
        query = query.filter(unlock_job::Column::CelularId.eq(phone_id));
    }
    Ok(query
        .order_by_asc(unlock_job::Column::IdDesbloqueio)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?)
}

/// Jobs opened for a phone; NotFound when the phone does not exist.
pub async fn list_phone_unlock_jobs(
    db: &DatabaseConnection,
    phone_id: Uuid,
    page: Pagination,
) -> Result<Vec<unlock_job::Model>, ServiceError> {
    if phone::Entity::find_by_id(phone_id).one(db).await?.is_none() {
        return Err(ServiceError::not_found(EntityKind::Phone));
    }
    let filter = UnlockJobFilter { celular_id: Some(phone_id), ..Default::default() };
    list_unlock_jobs(db, filter, page).await
}

/// Sparse update. Status changes are not restricted to any transition order.
#[instrument(skip(db, patch))]
pub async fn update_unlock_job(db: &DatabaseConnection, id: Uuid, patch: UnlockJobPatch) -> Result<unlock_job::Model, ServiceError> {
    if let Some(Some(v)) = patch.valor_cobrado {
        validate::non_negative("valor_cobrado", v)?;
    }

    let txn = db.begin().await?;
    let existing = unlock_job::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found(EntityKind::UnlockJob))?;
    let current = FieldSet::new()
        .with("celular_id", existing.celular_id)
        .with_opt("usuario_responsavel_id", existing.usuario_responsavel_id);
    let changes = FieldSet::new().maybe_opt("usuario_responsavel_id", patch.usuario_responsavel_id);
    integrity::check_update(&txn, EntityKind::UnlockJob, id, &current, &changes).await?;

    let mut am: unlock_job::ActiveModel = existing.clone().into();
    if let Some(v) = patch.tipo_desbloqueio { am.tipo_desbloqueio = Set(v); }
    if let Some(v) = patch.status { am.status = Set(v); }
    if let Some(v) = patch.data_saida { am.data_saida = Set(v); }
    if let Some(v) = patch.descricao_problema { am.descricao_problema = Set(v); }
    if let Some(v) = patch.observacoes { am.observacoes = Set(v); }
    if let Some(v) = patch.valor_cobrado { am.valor_cobrado = Set(v); }
    if let Some(v) = patch.usuario_responsavel_id { am.usuario_responsavel_id = Set(v); }
    if !am.is_changed() {
        return Ok(existing);
    }
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    info!(id = %id, status = ?updated.status, "unlock job updated");
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_unlock_job(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if unlock_job::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found(EntityKind::UnlockJob));
    }
    integrity::guard_delete(&txn, EntityKind::UnlockJob, id).await?;
    unlock_job::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(id = %id, "unlock job deleted");
    Ok(())
}
