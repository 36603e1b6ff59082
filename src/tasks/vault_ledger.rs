use std::sync::Arc;

use log::debug;

use crate::analyzer::analyzer::refresh_statements;
use crate::analyzer::chains::types::{DepositorLedger, Statement};
use crate::fetcher::fetcher::{BoxStorage, TransactionIndex};
use crate::respository::RefreshStore;
use crate::tasks::depositor_ledger::refresh_depositors;
use crate::types::AppError;

pub type StatementKey = (u64, String);

/// Both read-only pipelines of one deployment, with the latest result of each.
///
/// Refreshes may overlap. Whatever a call returns is the freshest published
/// result for its key; a failed refresh publishes nothing.
pub struct VaultLedger<I, S> {
    index: Arc<I>,
    storage: Arc<S>,
    box_fetch_concurrency: usize,
    statements: RefreshStore<StatementKey, Vec<Statement>>,
    depositors: RefreshStore<u64, DepositorLedger>,
}

impl<I, S> VaultLedger<I, S>
where
    I: TransactionIndex,
    S: BoxStorage,
{
    pub fn new(index: Arc<I>, storage: Arc<S>, box_fetch_concurrency: usize) -> Self {
        Self {
            index,
            storage,
            box_fetch_concurrency: box_fetch_concurrency.max(1),
            statements: RefreshStore::new(),
            depositors: RefreshStore::new(),
        }
    }

    pub async fn refresh_statements(
        &self,
        app_id: u64,
        viewer: &str,
    ) -> Result<Arc<Vec<Statement>>, AppError> {
        let key: StatementKey = (app_id, viewer.to_string());
        let ticket = self.statements.begin(key.clone());

        let statements = refresh_statements(self.index.as_ref(), app_id, viewer).await?;
        if !self.statements.complete(ticket, statements).await {
            debug!("[VaultLedger] newer statements already published for app {}", app_id);
        }

        self.statements
            .latest(&key)
            .await
            .ok_or_else(|| AppError::QueryFailure(format!("no statements published for app {}", app_id)))
    }

    pub async fn refresh_depositors(&self, app_id: u64) -> Result<Arc<DepositorLedger>, AppError> {
        let ticket = self.depositors.begin(app_id);

        let ledger = refresh_depositors(self.storage.as_ref(), app_id, self.box_fetch_concurrency).await?;
        if !self.depositors.complete(ticket, ledger).await {
            debug!("[VaultLedger] newer depositor ledger already published for app {}", app_id);
        }

        self.depositors
            .latest(&app_id)
            .await
            .ok_or_else(|| AppError::QueryFailure(format!("no depositor ledger published for app {}", app_id)))
    }

    pub async fn latest_statements(&self, app_id: u64, viewer: &str) -> Option<Arc<Vec<Statement>>> {
        self.statements.latest(&(app_id, viewer.to_string())).await
    }

    pub async fn latest_depositors(&self, app_id: u64) -> Option<Arc<DepositorLedger>> {
        self.depositors.latest(&app_id).await
    }
}
