use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::maternity::birth::{self, DeliveryKind};
use models::validate;
use crate::errors::ServiceError;
use crate::integrity::{self, EntityKind, FieldSet};
use crate::pagination::Pagination;
use crate::patch::double_option;
use super::pregnant_people::require_pregnant_person;

#[derive(Debug, Clone, Deserialize)]
pub struct NewBirth {
    #[serde(default)]
    pub id_gestante: Option<Uuid>,
    #[serde(default)]
    pub id_profissional: Option<Uuid>,
    pub data_parto: NaiveDate,
    pub tipo_parto: DeliveryKind,
    #[serde(default)]
    pub semana_gestacional: Option<i32>,
    #[serde(default)]
    pub peso_bebe_g: Option<i32>,
    #[serde(default)]
    pub sexo_bebe: Option<String>,
    #[serde(default)]
    pub observacoes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BirthPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub id_gestante: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    pub id_profissional: Option<Option<Uuid>>,
    #[serde(default)]
    pub data_parto: Option<NaiveDate>,
    #[serde(default)]
    pub tipo_parto: Option<DeliveryKind>,
    #[serde(default, deserialize_with = "double_option")]
    pub semana_gestacional: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub peso_bebe_g: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub sexo_bebe: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub observacoes: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BirthFilter {
    pub tipo_parto: Option<DeliveryKind>,
}

fn check_measures(week: Option<i32>, weight_g: Option<i32>) -> Result<(), ServiceError> {
    if let Some(w) = week {
        validate::gestational_week(w)?;
    }
    if let Some(g) = weight_g {
        validate::non_negative("peso_bebe_g", f64::from(g))?;
    }
    Ok(())
}

fn required(field: &str) -> ServiceError {
    ServiceError::Validation(format!("{field} is required"))
}

/// Record a birth. A pregnant person has at most one.
#[instrument(skip(db, input))]
pub async fn create_birth(db: &DatabaseConnection, input: NewBirth) -> Result<birth::Model, ServiceError> {
    check_measures(input.semana_gestacional, input.peso_bebe_g)?;

    let txn = db.begin().await?;
    let fields = FieldSet::new()
        .with_opt("id_gestante", input.id_gestante)
        .with_opt("id_profissional", input.id_profissional);
    integrity::check_create(&txn, EntityKind::Birth, &fields).await?;
    let id_gestante = input.id_gestante.ok_or_else(|| required("id_gestante"))?;
    let id_profissional = input.id_profissional.ok_or_else(|| required("id_profissional"))?;

    let created = birth::ActiveModel {
        id_parto: Set(Uuid::now_v7()),
        id_gestante: Set(id_gestante),
        id_profissional: Set(id_profissional),
        data_parto: Set(input.data_parto),
        tipo_parto: Set(input.tipo_parto),
        semana_gestacional: Set(input.semana_gestacional),
        peso_bebe_g: Set(input.peso_bebe_g),
        sexo_bebe: Set(input.sexo_bebe),
        observacoes: Set(input.observacoes),
        data_criacao: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;
    info!(id = %created.id_parto, id_gestante = %id_gestante, "birth recorded");
    Ok(created)
}

pub async fn get_birth(db: &DatabaseConnection, id: Uuid) -> Result<Option<birth::Model>, ServiceError> {
    Ok(birth::Entity::find_by_id(id).one(db).await?)
}

pub async fn list_births(db: &DatabaseConnection, filter: BirthFilter, page: Pagination) -> Result<Vec<birth::Model>, ServiceError> {
    let (offset, limit) = page.normalize()?;
    let mut query = birth::Entity::find();
    if let Some(kind) = filter.tipo_parto {
        query = query.filter(birth::Column::TipoParto.eq(kind));
    }
    Ok(query
        .order_by_asc(birth::Column::DataParto)
        .order_by_asc(birth::Column::IdParto)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?)
}

/// The birth of a pregnant person; NotFound if either is missing.
pub async fn get_pregnant_person_birth(db: &DatabaseConnection, pregnant_person_id: Uuid) -> Result<birth::Model, ServiceError> {
    require_pregnant_person(db, pregnant_person_id).await?;
    birth::Entity::find()
        .filter(birth::Column::IdGestante.eq(pregnant_person_id))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found(EntityKind::Birth))
}

#[instrument(skip(db, patch))]
pub async fn update_birth(db: &DatabaseConnection, id: Uuid, patch: BirthPatch) -> Result<birth::Model, ServiceError> {
    check_measures(patch.semana_gestacional.flatten(), patch.peso_bebe_g.flatten())?;

    let txn = db.begin().await?;
    let existing = birth::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found(EntityKind::Birth))?;
    let current = FieldSet::new()
        .with("id_gestante", existing.id_gestante)
        .with("id_profissional", existing.id_profissional);
    let changes = FieldSet::new()
        .maybe_opt("id_gestante", patch.id_gestante)
        .maybe_opt("id_profissional", patch.id_profissional);
    integrity::check_update(&txn, EntityKind::Birth, id, &current, &changes).await?;

    let mut am: birth::ActiveModel = existing.clone().into();
    if let Some(v) = patch.id_gestante { am.id_gestante = Set(v.ok_or_else(|| required("id_gestante"))?); }
    if let Some(v) = patch.id_profissional { am.id_profissional = Set(v.ok_or_else(|| required("id_profissional"))?); }
    if let Some(v) = patch.data_parto { am.data_parto = Set(v); }
    if let Some(v) = patch.tipo_parto { am.tipo_parto = Set(v); }
    if let Some(v) = patch.semana_gestacional { am.semana_gestacional = Set(v); }
    if let Some(v) = patch.peso_bebe_g { am.peso_bebe_g = Set(v); }
    if let Some(v) = patch.sexo_bebe { am.sexo_bebe = Set(v); }
    if let Some(v) = patch.observacoes { am.observacoes = Set(v); }
    if !am.is_changed() {
        return Ok(existing);
    }
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    info!(id = %id, "birth updated");
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_birth(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if birth::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found(EntityKind::Birth));
    }
    integrity::guard_delete(&txn, EntityKind::Birth, id).await?;
    birth::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(id = %id, "birth deleted");
    Ok(())
}
