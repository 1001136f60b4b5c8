//! Herd session
//!
//! Owns the authoritative in-memory collection for one operator session.
//! Every accepted transition is persisted through the store first and then
//! replaces the record by id, so all views re-derive from the same data.
//! The collection is never held locked across a collaborator call. Store
//! writes go through a single async gate, so the store always receives
//! writes in the order the collection accepts them.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::collab::{normalize_score, HerdStore, Scorer};
use crate::domain::{
    apply_action, can_reevaluate, new_prediction, validate_biometrics, Action, ActionKind,
    Rejection, TransitionResult,
};
use crate::errors::{HerdError, Result};
use crate::export::{ExportArtifact, Exporter};
use crate::query::{project_report, run_view, summarize, HerdSummary, Report, ReportKind, ViewQuery};
use crate::schemas::{AnimalId, AnimalRecord, Biometrics};

/// Recency marker for a request on one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub id: AnimalId,
    pub seq: u64,
}

/// Last-write-wins bookkeeping.
///
/// A response for ticket `n` on record `x` is applied only if no ticket
/// `m > n` for `x` has been applied already.
#[derive(Debug, Default)]
pub struct RequestLedger {
    next_seq: u64,
    applied: HashMap<AnimalId, u64>,
}

impl RequestLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket newer than every ticket issued before
    pub fn issue(&mut self, id: AnimalId) -> Ticket {
        self.next_seq += 1;
        Ticket {
            id,
            seq: self.next_seq,
        }
    }

    /// Whether a newer request for the same record was already applied
    pub fn is_superseded(&self, ticket: Ticket) -> bool {
        self.applied
            .get(&ticket.id)
            .is_some_and(|&applied| applied > ticket.seq)
    }

    /// Record the ticket as applied; `false` means the response is stale
    pub fn accept(&mut self, ticket: Ticket) -> bool {
        if self.is_superseded(ticket) {
            return false;
        }
        self.applied.insert(ticket.id, ticket.seq);
        true
    }

    /// Drop bookkeeping for a removed record
    pub fn forget(&mut self, id: AnimalId) {
        self.applied.remove(&id);
    }

    /// Number of records with an applied ticket
    pub fn tracked(&self) -> usize {
        self.applied.len()
    }
}

#[derive(Debug, Default)]
struct SessionState {
    records: Vec<AnimalRecord>,
    ledger: RequestLedger,
}

/// One operator's view of the herd, with its collaborators
pub struct HerdSession {
    store: Box<dyn HerdStore>,
    scorer: Box<dyn Scorer>,
    user: Option<String>,
    clock: fn() -> DateTime<Utc>,
    state: Mutex<SessionState>,
    write_gate: tokio::sync::Mutex<()>,
}

impl HerdSession {
    /// Create an empty session; call `load()` to fetch the herd
    pub fn new(store: Box<dyn HerdStore>, scorer: Box<dyn Scorer>) -> Self {
        HerdSession {
            store,
            scorer,
            user: None,
            clock: Utc::now,
            state: Mutex::new(SessionState::default()),
            write_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Set the acting user recorded in logs
    pub fn with_user(mut self, user: Option<String>) -> Self {
        self.user = user;
        self
    }

    /// Replace the time source used for transition timestamps
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn actor(&self) -> &str {
        self.user.as_deref().unwrap_or("anonymous")
    }

    /// Replace the collection with the store's herd
    pub async fn load(&self) -> Result<usize> {
        let records = self.store.fetch_herd().await?;
        let count = records.len();
        self.lock().records = records;
        debug!(count, "Herd loaded");
        Ok(count)
    }

    /// Snapshot of the collection in store order
    pub fn records(&self) -> Vec<AnimalRecord> {
        self.lock().records.clone()
    }

    pub fn get(&self, id: AnimalId) -> Result<AnimalRecord> {
        self.lock()
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| HerdError::NotFound(format!("animal {}", id)))
    }

    /// Run a view query over the current collection
    pub fn view(&self, query: &ViewQuery) -> Vec<AnimalRecord> {
        let state = self.lock();
        run_view(&state.records, query).into_iter().cloned().collect()
    }

    pub fn summary(&self) -> HerdSummary {
        summarize(&self.lock().records)
    }

    /// Score new biometrics and add the animal to the herd.
    ///
    /// Inputs are validated before the scorer is called; a rejected
    /// submission creates nothing.
    pub async fn submit_prediction(&self, biometrics: Biometrics) -> Result<AnimalRecord> {
        let validation = validate_biometrics(&biometrics);
        if !validation.valid {
            let reason = validation.reason.unwrap_or_default();
            warn!(user = self.actor(), animal = %biometrics.name, %reason, "Prediction rejected");
            return Err(HerdError::Validation(reason));
        }

        let score = self.score(&biometrics).await?;
        let animal = new_prediction(biometrics, score, (self.clock)()).map_err(HerdError::from)?;
        let record = self.store.insert(animal).await?;

        self.lock().records.push(record.clone());
        info!(
            user = self.actor(),
            id = %record.id,
            animal = record.name(),
            score = record.score,
            "Prediction recorded"
        );
        Ok(record)
    }

    /// Replace an open animal's inputs and score
    pub async fn reevaluate(&self, id: AnimalId, biometrics: Biometrics) -> Result<AnimalRecord> {
        let ticket = {
            let mut state = self.lock();
            let current = find(&state.records, id)?;
            let check = can_reevaluate(current, &biometrics);
            if !check.valid {
                return Err(self.reject(
                    id,
                    ActionKind::Reevaluate,
                    Rejection::from_validation(check),
                ));
            }
            state.ledger.issue(id)
        };

        let score = self.score(&biometrics).await?;
        self.transition(ticket, Action::Reevaluate { biometrics, score })
            .await?
            .ok_or_else(|| HerdError::NotFound(format!("animal {}", id)))
    }

    pub async fn mark_inseminated(&self, id: AnimalId) -> Result<AnimalRecord> {
        self.record_transition(id, Action::MarkInseminated).await
    }

    pub async fn declare_pregnant(&self, id: AnimalId) -> Result<AnimalRecord> {
        self.record_transition(id, Action::DeclarePregnant).await
    }

    pub async fn revert_to_inseminated(&self, id: AnimalId) -> Result<AnimalRecord> {
        self.record_transition(id, Action::RevertToInseminated).await
    }

    /// Remove an animal; deleting an absent id succeeds with `false`
    pub async fn delete(&self, id: AnimalId) -> Result<bool> {
        let ticket = {
            let mut state = self.lock();
            if find(&state.records, id).is_err() {
                drop(state);
                let _gate = self.write_gate.lock().await;
                let removed = self.store.delete(id).await?;
                debug!(id = %id, removed, "Delete of animal not in session");
                return Ok(removed);
            }
            state.ledger.issue(id)
        };

        Ok(self.transition(ticket, Action::Delete).await?.is_none())
    }

    /// Project a report from the current collection
    pub async fn report(&self, kind: ReportKind) -> Result<Report> {
        let users = match kind {
            ReportKind::Usuarios => self.store.list_users().await?,
            _ => Vec::new(),
        };
        Ok(project_report(kind, &self.lock().records, &users))
    }

    /// Project a report and hand it to the serializer
    pub async fn export(&self, kind: ReportKind, exporter: &dyn Exporter) -> Result<ExportArtifact> {
        let report = self.report(kind).await?;
        exporter.export(&report, (self.clock)().date_naive())
    }

    async fn score(&self, biometrics: &Biometrics) -> Result<f64> {
        let raw = self.scorer.score(biometrics).await.map_err(|e| {
            warn!(animal = %biometrics.name, error = %e, "Scorer failed");
            e
        })?;
        normalize_score(raw)
    }

    async fn record_transition(&self, id: AnimalId, action: Action) -> Result<AnimalRecord> {
        let ticket = {
            let mut state = self.lock();
            find(&state.records, id)?;
            state.ledger.issue(id)
        };
        self.transition(ticket, action)
            .await?
            .ok_or_else(|| HerdError::NotFound(format!("animal {}", id)))
    }

    /// Guard, persist and apply one action.
    ///
    /// Returns the record now held by the collection, or `None` when the
    /// record was removed. A response superseded by a newer applied request
    /// is discarded and the newer record is returned.
    ///
    /// The guard, the store write and the collection update all happen while
    /// holding the write gate. A stale response is therefore dropped before
    /// it reaches the store, and every accepted action is computed from the
    /// record the store already holds.
    async fn transition(&self, ticket: Ticket, action: Action) -> Result<Option<AnimalRecord>> {
        let kind = action.kind();
        let _gate = self.write_gate.lock().await;
        let result = {
            let state = self.lock();
            if state.ledger.is_superseded(ticket) {
                return Ok(self.discard(&state, ticket));
            }
            let current = find(&state.records, ticket.id)?;
            apply_action(current, &action, (self.clock)())
        };

        match result {
            TransitionResult::Error { rejection } => Err(self.reject(ticket.id, kind, rejection)),
            TransitionResult::Success { next_record } => {
                let saved = self.store.update(next_record).await?;
                let mut state = self.lock();
                state.ledger.accept(ticket);
                if let Some(slot) = state.records.iter_mut().find(|r| r.id == saved.id) {
                    *slot = saved.clone();
                }
                info!(user = self.actor(), id = %saved.id, action = %kind, "Transition accepted");
                Ok(Some(saved))
            }
            TransitionResult::Removed { id } => {
                self.store.delete(id).await?;
                let mut state = self.lock();
                state.ledger.forget(id);
                state.records.retain(|r| r.id != id);
                info!(user = self.actor(), id = %id, action = %kind, "Transition accepted");
                Ok(None)
            }
        }
    }

    fn discard(&self, state: &SessionState, ticket: Ticket) -> Option<AnimalRecord> {
        debug!(id = %ticket.id, seq = ticket.seq, "Discarded superseded response");
        state.records.iter().find(|r| r.id == ticket.id).cloned()
    }

    fn reject(&self, id: AnimalId, kind: ActionKind, rejection: Rejection) -> HerdError {
        warn!(
            user = self.actor(),
            id = %id,
            action = %kind,
            reason = %rejection.reason,
            "Transition rejected"
        );
        rejection.into()
    }
}

fn find(records: &[AnimalRecord], id: AnimalId) -> Result<&AnimalRecord> {
    records
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| HerdError::NotFound(format!("animal {}", id)))
}
