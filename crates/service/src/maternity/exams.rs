use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::maternity::exam;
use models::validate;
use crate::errors::ServiceError;
use crate::integrity::{self, EntityKind, FieldSet};
use crate::pagination::Pagination;
use crate::patch::double_option;
use super::pregnant_people::require_pregnant_person;

#[derive(Debug, Clone, Deserialize)]
pub struct NewExam {
    #[serde(default)]
    pub id_gestante: Option<Uuid>,
    pub tipo_exame: String,
    pub data_exame: NaiveDate,
    #[serde(default)]
    pub resultado: Option<String>,
    #[serde(default)]
    pub observacoes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExamPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub id_gestante: Option<Option<Uuid>>,
    #[serde(default)]
    pub tipo_exame: Option<String>,
    #[serde(default)]
    pub data_exame: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub resultado: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub observacoes: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExamFilter {
    pub id_gestante: Option<Uuid>,
    pub tipo_exame: Option<String>,
}

#[instrument(skip(db, input), fields(tipo = %input.tipo_exame))]
pub async fn create_exam(db: &DatabaseConnection, input: NewExam) -> Result<exam::Model, ServiceError> {
    validate::require_text("tipo_exame", &input.tipo_exame)?;

    let txn = db.begin().await?;
    let fields = FieldSet::new().with_opt("id_gestante", input.id_gestante);
    integrity::check_create(&txn, EntityKind::Exam, &fields).await?;
    let id_gestante = input
        .id_gestante
        .ok_or_else(|| ServiceError::Validation("id_gestante is required".into()))?;

    let created = exam::ActiveModel {
        id_exame: Set(Uuid::now_v7()),
        id_gestante: Set(id_gestante),
        tipo_exame: Set(input.tipo_exame),
        data_exame: Set(input.data_exame),
        resultado: Set(input.resultado),
        observacoes: Set(input.observacoes),
        data_criacao: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;
    info!(id = %created.id_exame, id_gestante = %id_gestante, "exam recorded");
    Ok(created)
}

pub async fn get_exam(db: &DatabaseConnection, id: Uuid) -> Result<Option<exam::Model>, ServiceError> {
    Ok(exam::Entity::find_by_id(id).one(db).await?)
}

pub async fn list_exams(db: &DatabaseConnection, filter: ExamFilter, page: Pagination) -> Result<Vec<exam::Model>, ServiceError> {
    let (offset, limit) = page.normalize()?;
    let mut query = exam::Entity::find();
    if let Some(id) = filter.id_gestante {
        query = query.filter(exam::Column::IdGestante.eq(id));
    }
    if let Some(kind) = filter.tipo_exame {
        query = query.filter(exam::Column::TipoExame.eq(kind));
    }
    Ok(query
        .order_by_asc(exam::Column::DataExame)
        .order_by_asc(exam::Column::IdExame)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?)
}

pub async fn list_pregnant_person_exams(
    db: &DatabaseConnection,
    pregnant_person_id: Uuid,
    page: Pagination,
) -> Result<Vec<exam::Model>, ServiceError> {
    require_pregnant_person(db, pregnant_person_id).await?;
    let filter = ExamFilter { id_gestante: Some(pregnant_person_id), ..Default::default() };
    list_exams(db, filter, page).await
}

#[instrument(skip(db, patch))]
pub async fn update_exam(db: &DatabaseConnection, id: Uuid, patch: ExamPatch) -> Result<exam::Model, ServiceError> {
    if let Some(v) = &patch.tipo_exame { validate::require_text("tipo_exame", v)?; }

    let txn = db.begin().await?;
    let existing = exam::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found(EntityKind::Exam))?;
    let current = FieldSet::new().with("id_gestante", existing.id_gestante);
    let changes = FieldSet::new().maybe_opt("id_gestante", patch.id_gestante);
    integrity::check_update(&txn, EntityKind::Exam, id, &current, &changes).await?;

    let mut am: exam::ActiveModel = existing.clone().into();
    if let Some(v) = patch.id_gestante {
        am.id_gestante = Set(v.ok_or_else(|| ServiceError::Validation("id_gestante is required".into()))?);
    }
    if let Some(v) = patch.tipo_exame { am.tipo_exame = Set(v); }
    if let Some(v) = patch.data_exame { am.data_exame = Set(v); }
    if let Some(v) = patch.resultado { am.resultado = Set(v); }
    if let Some(v) = patch.observacoes { am.observacoes = Set(v); }
    if !am.is_changed() {
        return Ok(existing);
    }
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    info!(id = %id, "exam updated");
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_exam(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if exam::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found(EntityKind::Exam));
    }
    integrity::guard_delete(&txn, EntityKind::Exam, id).await?;
    exam::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(id = %id, "exam deleted");
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::maternity::pregnant_people::{create_pregnant_person, delete_pregnant_person, get_pregnant_person, tests::new_person};
    use crate::test_support::maternity_db;

    pub(crate) fn new_exam(person: Uuid, tipo: &str) -> NewExam {
        NewExam {
            id_gestante: Some(person),
            tipo_exame: tipo.into(),
            data_exame: NaiveDate::from_ymd_opt(2025, 2, 20).unwrap(),
            resultado: Some("normal".into()),
            observacoes: None,
        }
    }

    #[tokio::test]
    async fn dangling_person_persists_nothing() -> Result<(), anyhow::Error> {
        let db = maternity_db().await?;
        let res = create_exam(&db, new_exam(Uuid::now_v7(), "Ultrassom")).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert!(list_exams(&db, ExamFilter::default(), Pagination::default()).await?.is_empty());
        Ok(())
    }

    // Exams are outside the delete guard; the foreign key still refuses.
    #[tokio::test]
    async fn exam_holds_person_through_store_constraint() -> Result<(), anyhow::Error> {
        let db = maternity_db().await?;
        let p = create_pregnant_person(&db, new_person("11111111111")).await?;
        let e = create_exam(&db, new_exam(p.id_gestante, "Hemograma")).await?;

        assert!(matches!(delete_pregnant_person(&db, p.id_gestante).await, Err(ServiceError::Conflict(_))));
        assert!(get_pregnant_person(&db, p.id_gestante).await?.is_some());
        assert!(get_exam(&db, e.id_exame).await?.is_some());

        delete_exam(&db, e.id_exame).await?;
        delete_pregnant_person(&db, p.id_gestante).await?;
        Ok(())
    }

    #[tokio::test]
    async fn filter_and_patch() -> Result<(), anyhow::Error> {
        let db = maternity_db().await?;
        let p = create_pregnant_person(&db, new_person("11111111111")).await?;
        let e = create_exam(&db, new_exam(p.id_gestante, "Hemograma")).await?;
        create_exam(&db, new_exam(p.id_gestante, "Ultrassom")).await?;

        let filter = ExamFilter { tipo_exame: Some("Ultrassom".into()), ..Default::default() };
        assert_eq!(list_exams(&db, filter, Pagination::default()).await?.len(), 1);
        assert_eq!(list_pregnant_person_exams(&db, p.id_gestante, Pagination::default()).await?.len(), 2);
        assert!(matches!(
            list_pregnant_person_exams(&db, Uuid::now_v7(), Pagination::default()).await,
            Err(ServiceError::NotFound(_))
        ));

        let patch = ExamPatch { resultado: Some(None), ..Default::default() };
        let updated = update_exam(&db, e.id_exame, patch).await?;
        assert_eq!(updated.resultado, None);
        assert_eq!(updated.tipo_exame, "Hemograma");
        Ok(())
    }
}
