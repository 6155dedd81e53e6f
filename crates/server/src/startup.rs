use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, Defaults};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;
use service::runtime;

/// Which of the two record services this process hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    Unlock,
    Maternity,
}

impl Deployment {
    pub fn service_name(self) -> &'static str {
        match self {
            Deployment::Unlock => "celulares-api",
            Deployment::Maternity => "maternidade-api",
        }
    }

    pub fn defaults(self) -> Defaults {
        match self {
            Deployment::Unlock => Defaults {
                config_path: "config/unlock.toml",
                database_url: "sqlite://data/celulares.db?mode=rwc",
                port: 8000,
            },
            Deployment::Maternity => Defaults {
                config_path: "config/maternity.toml",
                database_url: "sqlite://data/maternidade.db?mode=rwc",
                port: 8001,
            },
        }
    }

    pub fn load_config(self) -> anyhow::Result<AppConfig> {
        AppConfig::load_and_validate(self.defaults())
    }

    async fn migrate(self, db: &DatabaseConnection) -> anyhow::Result<()> {
        match self {
            Deployment::Unlock => migration::unlock::Migrator::up(db, None).await?,
            Deployment::Maternity => migration::maternity::Migrator::up(db, None).await?,
        }
        Ok(())
    }
}

/// Router for `deployment` over an already migrated connection.
pub fn build_app(deployment: Deployment, db: DatabaseConnection) -> Router {
    let state = AppState::new(db, deployment.service_name());
    match deployment {
        Deployment::Unlock => routes::build_unlock_router(state),
        Deployment::Maternity => routes::build_maternity_router(state),
    }
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

/// Public entry: prepare storage, migrate, and serve HTTP until the listener fails.
pub async fn run(deployment: Deployment) -> anyhow::Result<()> {
    let cfg = deployment.load_config()?;

    runtime::ensure_env(&cfg.database.url)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    deployment.migrate(&db).await?;
    info!(service = deployment.service_name(), "schema up to date");

    let app = build_app(deployment, db);

    let addr = bind_addr(&cfg)?;
    info!(%addr, service = deployment.service_name(), "starting http server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployments_use_distinct_ports_and_files() {
        let u = Deployment::Unlock.defaults();
        let m = Deployment::Maternity.defaults();
        assert_eq!(u.port, 8000);
        assert_eq!(m.port, 8001);
        assert_ne!(u.database_url, m.database_url);
        assert_eq!(Deployment::Maternity.service_name(), "maternidade-api");
    }
}
