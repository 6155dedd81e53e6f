//! Read-only aggregates over the unlock shop tables.

use std::collections::BTreeMap;

use sea_orm::{ActiveEnum, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use uuid::Uuid;

use models::unlock::unlock_job::{self, UnlockStatus};
use models::unlock::{client, phone};
use crate::errors::ServiceError;
use crate::integrity::EntityKind;
use crate::reporting::{mean2, round2, Period};

fn total_charged(jobs: &[unlock_job::Model]) -> f64 {
    round2(jobs.iter().filter_map(|j| j.valor_cobrado).fold(0.0, |acc, v| acc + v))
}

#[derive(Debug, Serialize)]
pub struct PendingJobs {
    pub total_desbloqueios_pendentes: usize,
    pub desbloqueios: Vec<unlock_job::Model>,
}

pub async fn pending_jobs(db: &DatabaseConnection) -> Result<PendingJobs, ServiceError> {
    let desbloqueios = unlock_job::Entity::find()
        .filter(unlock_job::Column::Status.eq(UnlockStatus::Pending))
        .order_by_asc(unlock_job::Column::DataEntrada)
        .all(db)
        .await?;
    Ok(PendingJobs { total_desbloqueios_pendentes: desbloqueios.len(), desbloqueios })
}

#[derive(Debug, Serialize)]
pub struct PeriodReport {
    pub periodo: Period,
    pub total_desbloqueios: usize,
    pub total_concluidos: usize,
    pub total_pendentes: usize,
    pub valor_total_cobrado: f64,
    pub desbloqueios: Vec<unlock_job::Model>,
}

/// Jobs whose entry date falls inside `period`, both ends included.
pub async fn jobs_in_period(db: &DatabaseConnection, period: Period) -> Result<PeriodReport, ServiceError> {
    period.validate()?;
    let desbloqueios = unlock_job::Entity::find()
        .filter(unlock_job::Column::DataEntrada.between(period.data_inicio, period.data_fim))
        .order_by_asc(unlock_job::Column::DataEntrada)
        .all(db)
        .await?;
    let count = |s: UnlockStatus| desbloqueios.iter().filter(|j| j.status == s).count();
    Ok(PeriodReport {
        periodo: period,
        total_desbloqueios: desbloqueios.len(),
        total_concluidos: count(UnlockStatus::Completed),
        total_pendentes: count(UnlockStatus::Pending),
        valor_total_cobrado: total_charged(&desbloqueios),
        desbloqueios,
    })
}

#[derive(Debug, Serialize)]
pub struct KindBreakdown {
    pub total_desbloqueios: usize,
    pub por_tipo: BTreeMap<String, u64>,
}

pub async fn jobs_by_kind(db: &DatabaseConnection) -> Result<KindBreakdown, ServiceError> {
    let jobs = unlock_job::Entity::find().all(db).await?;
    let mut por_tipo = BTreeMap::new();
    for job in &jobs {
        *por_tipo.entry(job.tipo_desbloqueio.to_value()).or_insert(0) += 1;
    }
    Ok(KindBreakdown { total_desbloqueios: jobs.len(), por_tipo })
}

#[derive(Debug, Serialize)]
pub struct PhoneSummary {
    pub marca: String,
    pub modelo: String,
    pub imei: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub celular: PhoneSummary,
    pub desbloqueio: unlock_job::Model,
}

#[derive(Debug, Serialize)]
pub struct ClientHistory {
    pub cliente: client::Model,
    pub total_celulares: usize,
    pub total_desbloqueios: usize,
    pub historico: Vec<HistoryEntry>,
}

/// Every job on every phone a client owns.
pub async fn client_history(db: &DatabaseConnection, client_id: Uuid) -> Result<ClientHistory, ServiceError> {
    let cliente = client::Entity::find_by_id(client_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found(EntityKind::Client))?;
    let phones = phone::Entity::find()
        .filter(phone::Column::ClienteId.eq(client_id))
        .order_by_asc(phone::Column::IdCelular)
        .all(db)
        .await?;
    let jobs = unlock_job::Entity::find()
        .filter(unlock_job::Column::CelularId.is_in(phones.iter().map(|p| p.id_celular)))
        .order_by_asc(unlock_job::Column::DataEntrada)
        .all(db)
        .await?;

    let mut historico = Vec::with_capacity(jobs.len());
    for p in &phones {
        for job in jobs.iter().filter(|j| j.celular_id == p.id_celular) {
            historico.push(HistoryEntry {
                celular: PhoneSummary { marca: p.marca.clone(), modelo: p.modelo.clone(), imei: p.imei.clone() },
                desbloqueio: job.clone(),
            });
        }
    }
    let total_celulares = phones.len();
    Ok(ClientHistory { cliente, total_celulares, total_desbloqueios: historico.len(), historico })
}

#[derive(Debug, Serialize)]
pub struct GeneralStats {
    pub total_clientes: u64,
    pub total_celulares: u64,
    pub total_desbloqueios: u64,
    pub desbloqueios_por_status: BTreeMap<String, u64>,
    pub valor_total_cobrado: f64,
    pub media_tempo_conclusao_dias: f64,
}

/// Mean days from entry to exit over completed jobs that took at least one day.
fn mean_completion_days(jobs: &[unlock_job::Model]) -> f64 {
    mean2(
        jobs.iter()
            .filter(|j| j.status == UnlockStatus::Completed)
            .filter_map(|j| j.data_saida.map(|out| (out - j.data_entrada).num_days()))
            .filter(|d| *d > 0)
            .map(|d| d as f64),
    )
}

pub async fn general_stats(db: &DatabaseConnection) -> Result<GeneralStats, ServiceError> {
    let total_clientes = client::Entity::find().count(db).await?;
    let total_celulares = phone::Entity::find().count(db).await?;
    let jobs = unlock_job::Entity::find().all(db).await?;

    let mut desbloqueios_por_status = BTreeMap::new();
    for job in &jobs {
        *desbloqueios_por_status.entry(job.status.to_value()).or_insert(0) += 1;
    }
    Ok(GeneralStats {
        total_clientes,
        total_celulares,
        total_desbloqueios: jobs.len() as u64,
        desbloqueios_por_status,
        valor_total_cobrado: total_charged(&jobs),
        media_tempo_conclusao_dias: mean_completion_days(&jobs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Pagination;
    use crate::test_support::unlock_db;
    use crate::unlock::clients::{create_client, tests::new_client};
    use crate::unlock::phones::{create_phone, tests::new_phone};
    use crate::unlock::unlock_jobs::{create_unlock_job, list_unlock_jobs, tests::{day, new_job}, UnlockJobFilter};
    use models::unlock::unlock_job::UnlockKind;

    #[tokio::test]
    async fn period_report_is_inclusive_and_sums_charges() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        let owner = create_client(&db, new_client("a@x.com")).await?;
        let p = create_phone(&db, new_phone("123", owner.id_cliente)).await?;

        let mut first = new_job(p.id_celular, day(2025, 1, 1));
        first.valor_cobrado = Some(50.256);
        first.status = UnlockStatus::Completed;
        first.data_saida = Some(day(2025, 1, 4));
        create_unlock_job(&db, first).await?;
        let mut last = new_job(p.id_celular, day(2025, 1, 31));
        last.valor_cobrado = None;
        create_unlock_job(&db, last).await?;
        create_unlock_job(&db, new_job(p.id_celular, day(2025, 2, 1))).await?;

        let report = jobs_in_period(&db, Period { data_inicio: day(2025, 1, 1), data_fim: day(2025, 1, 31) }).await?;
        assert_eq!(report.total_desbloqueios, 2);
        assert_eq!(report.total_concluidos, 1);
        assert_eq!(report.total_pendentes, 1);
        assert_eq!(report.valor_total_cobrado, 50.26);

        let inverted = Period { data_inicio: day(2025, 2, 1), data_fim: day(2025, 1, 1) };
        assert!(matches!(jobs_in_period(&db, inverted).await, Err(ServiceError::Validation(_))));

        let pending = pending_jobs(&db).await?;
        assert_eq!(pending.total_desbloqueios_pendentes, 2);

        let stats = general_stats(&db).await?;
        assert_eq!(stats.total_clientes, 1);
        assert_eq!(stats.total_desbloqueios, 3);
        assert_eq!(stats.desbloqueios_por_status.get("Pendente"), Some(&2));
        assert_eq!(stats.desbloqueios_por_status.get("Concluído"), Some(&1));
        assert_eq!(stats.valor_total_cobrado, 130.26);
        assert_eq!(stats.media_tempo_conclusao_dias, 3.0);
        Ok(())
    }

    #[tokio::test]
    async fn history_groups_jobs_by_phone() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        let owner = create_client(&db, new_client("a@x.com")).await?;
        let a = create_phone(&db, new_phone("111", owner.id_cliente)).await?;
        create_phone(&db, new_phone("222", owner.id_cliente)).await?;
        create_unlock_job(&db, new_job(a.id_celular, day(2025, 1, 1))).await?;
        let mut icloud = new_job(a.id_celular, day(2025, 1, 2));
        icloud.tipo_desbloqueio = UnlockKind::ICloud;
        create_unlock_job(&db, icloud).await?;

        let history = client_history(&db, owner.id_cliente).await?;
        assert_eq!(history.total_celulares, 2);
        assert_eq!(history.total_desbloqueios, 2);
        assert!(history.historico.iter().all(|h| h.celular.imei == "111"));
        assert!(matches!(client_history(&db, Uuid::now_v7()).await, Err(ServiceError::NotFound(_))));

        let kinds = jobs_by_kind(&db).await?;
        assert_eq!(kinds.total_desbloqueios, 2);
        assert_eq!(kinds.por_tipo.get("FRP"), Some(&1));
        assert_eq!(kinds.por_tipo.get("iCloud"), Some(&1));
        assert_eq!(list_unlock_jobs(&db, UnlockJobFilter::default(), Pagination::default()).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn uncharged_jobs_total_plain_zero() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        let empty = serde_json::to_value(general_stats(&db).await?)?;
        assert_eq!(empty["valor_total_cobrado"].as_f64().map(f64::is_sign_positive), Some(true));

        let owner = create_client(&db, new_client("a@x.com")).await?;
        let p = create_phone(&db, new_phone("123", owner.id_cliente)).await?;
        let mut job = new_job(p.id_celular, day(2025, 1, 10));
        job.valor_cobrado = None;
        create_unlock_job(&db, job).await?;

        let stats = serde_json::to_string(&general_stats(&db).await?)?;
        assert!(stats.contains(r#""valor_total_cobrado":0.0"#), "{stats}");
        let period = jobs_in_period(&db, Period { data_inicio: day(2025, 1, 1), data_fim: day(2025, 1, 31) }).await?;
        assert_eq!(period.total_desbloqueios, 1);
        assert!(period.valor_total_cobrado.is_sign_positive());
        Ok(())
    }
}
