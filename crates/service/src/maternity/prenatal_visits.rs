use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::maternity::prenatal_visit;
use models::validate;
use crate::errors::ServiceError;
use crate::integrity::{self, EntityKind, FieldSet};
use crate::pagination::Pagination;
use crate::patch::double_option;
use super::pregnant_people::require_pregnant_person;
use super::professionals::require_professional;

#[derive(Debug, Clone, Deserialize)]
pub struct NewPrenatalVisit {
    #[serde(default)]
    pub id_gestante: Option<Uuid>,
    #[serde(default)]
    pub id_profissional: Option<Uuid>,
    pub data_consulta: NaiveDate,
    #[serde(default)]
    pub semana_gestacional: Option<i32>,
    #[serde(default)]
    pub peso_kg: Option<f64>,
    #[serde(default)]
    pub pressao_arterial: Option<String>,
    #[serde(default)]
    pub observacoes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrenatalVisitPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub id_gestante: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    pub id_profissional: Option<Option<Uuid>>,
    #[serde(default)]
    pub data_consulta: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub semana_gestacional: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub peso_kg: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub pressao_arterial: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub observacoes: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrenatalVisitFilter {
    pub id_gestante: Option<Uuid>,
    pub id_profissional: Option<Uuid>,
}

fn check_measures(week: Option<i32>, weight: Option<f64>) -> Result<(), ServiceError> {
    if let Some(w) = week {
        validate::gestational_week(w)?;
    }
    if let Some(kg) = weight {
        validate::non_negative("peso_kg", kg)?;
    }
    Ok(())
}

fn required(field: &str) -> ServiceError {
    ServiceError::Validation(format!("{field} is required"))
}

#[instrument(skip(db, input))]
pub async fn create_prenatal_visit(db: &DatabaseConnection, input: NewPrenatalVisit) -> Result<prenatal_visit::Model, ServiceError> {
    check_measures(input.semana_gestacional, input.peso_kg)?;

    let txn = db.begin().await?;
    let fields = FieldSet::new()
        .with_opt("id_gestante", input.id_gestante)
        .with_opt("id_profissional", input.id_profissional);
    integrity::check_create(&txn, EntityKind::PrenatalVisit, &fields).await?;
    let id_gestante = input.id_gestante.ok_or_else(|| required("id_gestante"))?;
    let id_profissional = input.id_profissional.ok_or_else(|| required("id_profissional"))?;

    let created = prenatal_visit::ActiveModel {
        id_consulta: Set(Uuid::now_v7()),
        id_gestante: Set(id_gestante),
        id_profissional: Set(id_profissional),
        data_consulta: Set(input.data_consulta),
        semana_gestacional: Set(input.semana_gestacional),
        peso_kg: Set(input.peso_kg),
        pressao_arterial: Set(input.pressao_arterial),
        observacoes: Set(input.observacoes),
        data_criacao: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;
    info!(id = %created.id_consulta, id_gestante = %id_gestante, "prenatal visit created");
    Ok(created)
}

pub async fn get_prenatal_visit(db: &DatabaseConnection, id: Uuid) -> Result<Option<prenatal_visit::Model>, ServiceError> {
    Ok(prenatal_visit::Entity::find_by_id(id).one(db).await?)
}

pub async fn list_prenatal_visits(
    db: &DatabaseConnection,
    filter: PrenatalVisitFilter,
    page: Pagination,
) -> Result<Vec<prenatal_visit::Model>, ServiceError> {
    let (offset, limit) = page.normalize()?;
    let mut query = prenatal_visit::Entity::find();
    if let Some(id) = filter.id_gestante {
        query = query.filter(prenatal_visit::Column::IdGestante.eq(id));
    }
    if let Some(id) = filter.id_profissional {
        query = query.filter(prenatal_visit::Column::IdProfissional.eq(id));
    }
    Ok(query
        .order_by_asc(prenatal_visit::Column::DataConsulta)
        .order_by_asc(prenatal_visit::Column::IdConsulta)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?)
}

pub async fn list_pregnant_person_visits(
    db: &DatabaseConnection,
    pregnant_person_id: Uuid,
    page: Pagination,
) -> Result<Vec<prenatal_visit::Model>, ServiceError> {
    require_pregnant_person(db, pregnant_person_id).await?;
    let filter = PrenatalVisitFilter { id_gestante: Some(pregnant_person_id), ..Default::default() };
    list_prenatal_visits(db, filter, page).await
}

pub async fn list_professional_visits(
    db: &DatabaseConnection,
    professional_id: Uuid,
    page: Pagination,
) -> Result<Vec<prenatal_visit::Model>, ServiceError> {
    require_professional(db, professional_id).await?;
    let filter = PrenatalVisitFilter { id_profissional: Some(professional_id), ..Default::default() };
    list_prenatal_visits(db, filter, page).await
}

#[instrument(skip(db, patch))]
pub async fn update_prenatal_visit(
    db: &DatabaseConnection,
    id: Uuid,
    patch: PrenatalVisitPatch,
) -> Result<prenatal_visit::Model, ServiceError> {
    check_measures(patch.semana_gestacional.flatten(), patch.peso_kg.flatten())?;

    let txn = db.begin().await?;
    let existing = prenatal_visit::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found(EntityKind::PrenatalVisit))?;
    let current = FieldSet::new()
        .with("id_gestante", existing.id_gestante)
        .with("id_profissional", existing.id_profissional);
    let changes = FieldSet::new()
        .maybe_opt("id_gestante", patch.id_gestante)
        .maybe_opt("id_profissional", patch.id_profissional);
    integrity::check_update(&txn, EntityKind::PrenatalVisit, id, &current, &changes).await?;

    let mut am: prenatal_visit::ActiveModel = existing.clone().into();
    if let Some(v) = patch.id_gestante { am.id_gestante = Set(v.ok_or_else(|| required("id_gestante"))?); }
    if let Some(v) = patch.id_profissional { am.id_profissional = Set(v.ok_or_else(|| required("id_profissional"))?); }
    if let Some(v) = patch.data_consulta { am.data_consulta = Set(v); }
    if let Some(v) = patch.semana_gestacional { am.semana_gestacional = Set(v); }
    if let Some(v) = patch.peso_kg { am.peso_kg = Set(v); }
    if let Some(v) = patch.pressao_arterial { am.pressao_arterial = Set(v); }
    if let Some(v) = patch.observacoes { am.observacoes = Set(v); }
    if !am.is_changed() {
        return Ok(existing);
    }
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    info!(id = %id, "prenatal visit updated");
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_prenatal_visit(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if prenatal_visit::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found(EntityKind::PrenatalVisit));
    }
    integrity::guard_delete(&txn, EntityKind::PrenatalVisit, id).await?;
    prenatal_visit::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(id = %id, "prenatal visit deleted");
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::maternity::pregnant_people::{create_pregnant_person, delete_pregnant_person, get_pregnant_person, tests::new_person};
    use crate::maternity::professionals::{create_professional, delete_professional, tests::new_professional};
    use crate::test_support::maternity_db;

    pub(crate) fn new_visit(person: Uuid, professional: Uuid) -> NewPrenatalVisit {
        NewPrenatalVisit {
            id_gestante: Some(person),
            id_profissional: Some(professional),
            data_consulta: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            semana_gestacional: Some(12),
            peso_kg: Some(64.5),
            pressao_arterial: Some("120/80".into()),
            observacoes: None,
        }
    }

    #[tokio::test]
    async fn both_parents_must_exist() -> Result<(), anyhow::Error> {
        let db = maternity_db().await?;
        let p = create_pregnant_person(&db, new_person("11111111111")).await?;
        let res = create_prenatal_visit(&db, new_visit(p.id_gestante, Uuid::now_v7())).await;
        match res {
            Err(ServiceError::NotFound(msg)) => assert!(msg.starts_with("professional")),
            other => panic!("expected professional not found, got {other:?}"),
        }
        let res = create_prenatal_visit(&db, new_visit(Uuid::now_v7(), Uuid::now_v7())).await;
        match res {
            Err(ServiceError::NotFound(msg)) => assert!(msg.starts_with("pregnant person")),
            other => panic!("expected pregnant person not found, got {other:?}"),
        }
        assert!(list_prenatal_visits(&db, PrenatalVisitFilter::default(), Pagination::default()).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn visit_blocks_both_parents_from_deletion() -> Result<(), anyhow::Error> {
        let db = maternity_db().await?;
        let p = create_pregnant_person(&db, new_person("11111111111")).await?;
        let doc = create_professional(&db, new_professional("h@x.com")).await?;
        let v = create_prenatal_visit(&db, new_visit(p.id_gestante, doc.id_profissional)).await?;

        assert!(matches!(delete_pregnant_person(&db, p.id_gestante).await, Err(ServiceError::Conflict(_))));
        assert!(matches!(delete_professional(&db, doc.id_profissional).await, Err(ServiceError::Conflict(_))));
        assert!(get_pregnant_person(&db, p.id_gestante).await?.is_some());

        assert_eq!(list_pregnant_person_visits(&db, p.id_gestante, Pagination::default()).await?.len(), 1);
        assert_eq!(list_professional_visits(&db, doc.id_profissional, Pagination::default()).await?.len(), 1);

        delete_prenatal_visit(&db, v.id_consulta).await?;
        assert!(get_prenatal_visit(&db, v.id_consulta).await?.is_none());
        delete_pregnant_person(&db, p.id_gestante).await?;
        delete_professional(&db, doc.id_profissional).await?;
        Ok(())
    }

    #[tokio::test]
    async fn patch_validates_reassigned_professional() -> Result<(), anyhow::Error> {
        let db = maternity_db().await?;
        let p = create_pregnant_person(&db, new_person("11111111111")).await?;
        let doc = create_professional(&db, new_professional("h@x.com")).await?;
        let v = create_prenatal_visit(&db, new_visit(p.id_gestante, doc.id_profissional)).await?;

        let dangling = PrenatalVisitPatch { id_profissional: Some(Some(Uuid::now_v7())), ..Default::default() };
        assert!(matches!(update_prenatal_visit(&db, v.id_consulta, dangling).await, Err(ServiceError::NotFound(_))));
        let null = PrenatalVisitPatch { id_gestante: Some(None), ..Default::default() };
        assert!(matches!(update_prenatal_visit(&db, v.id_consulta, null).await, Err(ServiceError::Validation(_))));

        let patch = PrenatalVisitPatch { semana_gestacional: Some(Some(20)), peso_kg: Some(None), ..Default::default() };
        let updated = update_prenatal_visit(&db, v.id_consulta, patch).await?;
        assert_eq!(updated.semana_gestacional, Some(20));
        assert_eq!(updated.peso_kg, None);
        assert_eq!(updated.pressao_arterial.as_deref(), Some("120/80"));

        let bad_week = PrenatalVisitPatch { semana_gestacional: Some(Some(60)), ..Default::default() };
        assert!(matches!(update_prenatal_visit(&db, v.id_consulta, bad_week).await, Err(ServiceError::Model(_))));
        Ok(())
    }
}
