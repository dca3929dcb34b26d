//! Startup loading of the translation table.
//!
//! A remote document is attempted first and raced against a timeout. Any
//! failure leaves the embedded table in place; the outcome records which
//! path was taken.

use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use futures::future::{select, Either};

use super::table::TranslationTable;
use crate::core::timing;
use crate::error::I18nError;

/// Somewhere a translation document can be fetched from.
pub trait TranslationSource {
    fn fetch(&self) -> impl Future<Output = Result<TranslationTable, I18nError>>;
}

/// Source used when no remote document is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRemote;

impl TranslationSource for NoRemote {
    fn fetch(&self) -> impl Future<Output = Result<TranslationTable, I18nError>> {
        std::future::ready(Err(I18nError::RemoteDisabled))
    }
}

#[derive(Debug)]
pub enum LoadOutcome {
    /// Remote document layered over the embedded table.
    Loaded(TranslationTable),
    /// Embedded table only, with the reason the remote one was not used.
    FallbackUsed {
        table: TranslationTable,
        reason: I18nError,
    },
}

impl LoadOutcome {
    pub fn table(&self) -> &TranslationTable {
        match self {
            Self::Loaded(table) | Self::FallbackUsed { table, .. } => table,
        }
    }

    pub fn into_table(self) -> TranslationTable {
        match self {
            Self::Loaded(table) | Self::FallbackUsed { table, .. } => table,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::FallbackUsed { .. })
    }
}

/// Load the translation table. Never fails; see [`LoadOutcome`].
pub async fn load<S: TranslationSource>(source: &S, timeout: Duration) -> LoadOutcome {
    let embedded = TranslationTable::embedded().unwrap_or_else(|err| {
        tracing::warn!(%err, "Embedded translations unreadable; starting empty");
        TranslationTable::default()
    });

    let fetch = pin!(source.fetch());
    let deadline = pin!(timing::sleep(timeout));
    let fetched = match select(fetch, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(I18nError::Timeout(
            u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        )),
    };

    match fetched {
        Ok(remote) => {
            let mut table = embedded;
            table.layer(remote);
            tracing::debug!(languages = ?table.languages().collect::<Vec<_>>(), "Remote translations loaded");
            LoadOutcome::Loaded(table)
        }
        Err(I18nError::RemoteDisabled) => {
            tracing::debug!("No remote translations configured; using embedded table");
            LoadOutcome::FallbackUsed {
                table: embedded,
                reason: I18nError::RemoteDisabled,
            }
        }
        Err(reason) => {
            tracing::warn!(%reason, "Using embedded translations");
            LoadOutcome::FallbackUsed {
                table: embedded,
                reason,
            }
        }
    }
}
