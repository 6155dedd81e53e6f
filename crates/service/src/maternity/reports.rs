//! Read-only aggregates over the maternity tables.

use std::collections::BTreeMap;

use sea_orm::{ActiveEnum, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use uuid::Uuid;

use models::maternity::{birth, exam, pregnant_person, prenatal_visit, professional};
use crate::errors::ServiceError;
use crate::reporting::{mean2, Period};
use super::pregnant_people::require_pregnant_person;

fn count_by_kind(births: &[birth::Model]) -> BTreeMap<String, u64> {
    let mut out = BTreeMap::new();
    for b in births {
        *out.entry(b.tipo_parto.to_value()).or_insert(0) += 1;
    }
    out
}

#[derive(Debug, Serialize)]
pub struct BirthPeriodReport {
    pub periodo: Period,
    pub total_partos: usize,
    pub por_tipo: BTreeMap<String, u64>,
    pub partos: Vec<birth::Model>,
}

/// Births dated inside `period`, both ends included.
pub async fn births_in_period(db: &DatabaseConnection, period: Period) -> Result<BirthPeriodReport, ServiceError> {
    period.validate()?;
    let partos = birth::Entity::find()
        .filter(birth::Column::DataParto.between(period.data_inicio, period.data_fim))
        .order_by_asc(birth::Column::DataParto)
        .all(db)
        .await?;
    Ok(BirthPeriodReport { periodo: period, total_partos: partos.len(), por_tipo: count_by_kind(&partos), partos })
}

#[derive(Debug, Serialize)]
pub struct BirthKindBreakdown {
    pub total_partos: usize,
    pub por_tipo: BTreeMap<String, u64>,
}

pub async fn births_by_kind(db: &DatabaseConnection) -> Result<BirthKindBreakdown, ServiceError> {
    let births = birth::Entity::find().all(db).await?;
    Ok(BirthKindBreakdown { total_partos: births.len(), por_tipo: count_by_kind(&births) })
}

#[derive(Debug, Serialize)]
pub struct PregnancyHistory {
    pub gestante: pregnant_person::Model,
    pub total_consultas: usize,
    pub consultas: Vec<prenatal_visit::Model>,
    pub total_exames: usize,
    pub exames: Vec<exam::Model>,
    pub parto: Option<birth::Model>,
}

pub async fn pregnant_person_history(db: &DatabaseConnection, id: Uuid) -> Result<PregnancyHistory, ServiceError> {
    let gestante = require_pregnant_person(db, id).await?;
    let consultas = prenatal_visit::Entity::find()
        .filter(prenatal_visit::Column::IdGestante.eq(id))
        .order_by_asc(prenatal_visit::Column::DataConsulta)
        .all(db)
        .await?;
    let exames = exam::Entity::find()
        .filter(exam::Column::IdGestante.eq(id))
        .order_by_asc(exam::Column::DataExame)
        .all(db)
        .await?;
    let parto = birth::Entity::find().filter(birth::Column::IdGestante.eq(id)).one(db).await?;
    Ok(PregnancyHistory {
        gestante,
        total_consultas: consultas.len(),
        consultas,
        total_exames: exames.len(),
        exames,
        parto,
    })
}

#[derive(Debug, Serialize)]
pub struct GeneralStats {
    pub total_gestantes: u64,
    pub total_profissionais: u64,
    pub total_consultas: u64,
    pub total_exames: u64,
    pub total_partos: u64,
    pub partos_por_tipo: BTreeMap<String, u64>,
    pub media_semana_gestacional_parto: f64,
    pub media_peso_bebe_g: f64,
}

pub async fn general_stats(db: &DatabaseConnection) -> Result<GeneralStats, ServiceError> {
    let births = birth::Entity::find().all(db).await?;
    Ok(GeneralStats {
        total_gestantes: pregnant_person::Entity::find().count(db).await?,
        total_profissionais: professional::Entity::find().count(db).await?,
        total_consultas: prenatal_visit::Entity::find().count(db).await?,
        total_exames: exam::Entity::find().count(db).await?,
        total_partos: births.len() as u64,
        partos_por_tipo: count_by_kind(&births),
        media_semana_gestacional_parto: mean2(births.iter().filter_map(|b| b.semana_gestacional).map(f64::from)),
        media_peso_bebe_g: mean2(births.iter().filter_map(|b| b.peso_bebe_g).map(f64::from)),
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::maternity::births::{create_birth, tests::new_birth};
    use crate::maternity::exams::{create_exam, tests::new_exam};
    use crate::maternity::pregnant_people::{create_pregnant_person, tests::new_person};
    use crate::maternity::prenatal_visits::{create_prenatal_visit, tests::new_visit};
    use crate::maternity::professionals::{create_professional, tests::new_professional};
    use crate::test_support::maternity_db;
    use models::maternity::birth::DeliveryKind;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[tokio::test]
    async fn reports_over_two_births() -> Result<(), anyhow::Error> {
        let db = maternity_db().await?;
        let doc = create_professional(&db, new_professional("h@x.com")).await?;
        let a = create_pregnant_person(&db, new_person("11111111111")).await?;
        let b = create_pregnant_person(&db, new_person("22222222222")).await?;
        create_pregnant_person(&db, new_person("33333333333")).await?;

        let mut first = new_birth(a.id_gestante, doc.id_profissional);
        first.data_parto = day(3, 1);
        first.semana_gestacional = Some(38);
        first.peso_bebe_g = Some(3000);
        create_birth(&db, first).await?;
        let mut second = new_birth(b.id_gestante, doc.id_profissional);
        second.data_parto = day(3, 31);
        second.tipo_parto = DeliveryKind::Cesarean;
        second.semana_gestacional = Some(41);
        second.peso_bebe_g = None;
        create_birth(&db, second).await?;

        let march = births_in_period(&db, Period { data_inicio: day(3, 1), data_fim: day(3, 31) }).await?;
        assert_eq!(march.total_partos, 2);
        assert_eq!(march.por_tipo.get("Cesárea"), Some(&1));
        let early = births_in_period(&db, Period { data_inicio: day(3, 2), data_fim: day(3, 30) }).await?;
        assert_eq!(early.total_partos, 0);
        let inverted = Period { data_inicio: day(4, 1), data_fim: day(3, 1) };
        assert!(matches!(births_in_period(&db, inverted).await, Err(ServiceError::Validation(_))));

        let kinds = births_by_kind(&db).await?;
        assert_eq!(kinds.por_tipo.get("Normal"), Some(&1));

        let stats = general_stats(&db).await?;
        assert_eq!(stats.total_gestantes, 3);
        assert_eq!(stats.total_profissionais, 1);
        assert_eq!(stats.total_partos, 2);
        assert_eq!(stats.media_semana_gestacional_parto, 39.5);
        assert_eq!(stats.media_peso_bebe_g, 3000.0);
        Ok(())
    }

    #[tokio::test]
    async fn history_collects_visits_exams_and_birth() -> Result<(), anyhow::Error> {
        let db = maternity_db().await?;
        let doc = create_professional(&db, new_professional("h@x.com")).await?;
        let p = create_pregnant_person(&db, new_person("11111111111")).await?;
        create_prenatal_visit(&db, new_visit(p.id_gestante, doc.id_profissional)).await?;
        create_prenatal_visit(&db, new_visit(p.id_gestante, doc.id_profissional)).await?;
        create_exam(&db, new_exam(p.id_gestante, "Ultrassom")).await?;

        let before = pregnant_person_history(&db, p.id_gestante).await?;
        assert_eq!(before.total_consultas, 2);
        assert_eq!(before.total_exames, 1);
        assert!(before.parto.is_none());

        create_birth(&db, new_birth(p.id_gestante, doc.id_profissional)).await?;
        let after = pregnant_person_history(&db, p.id_gestante).await?;
        assert!(after.parto.is_some());
        assert!(matches!(pregnant_person_history(&db, Uuid::now_v7()).await, Err(ServiceError::NotFound(_))));

        let stats = general_stats(&db).await?;
        assert_eq!(stats.total_consultas, 2);
        assert_eq!(stats.total_exames, 1);
        Ok(())
    }
}
