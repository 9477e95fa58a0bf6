use crate::cache::{DerivedViewCache, GroupStats};
use crate::config::ViewParams;
use crate::error::{RfResult, RosterError};
use crate::filter::{self, FilterCriteria, QueryView};
use crate::roster::{GroupKey, GroupKind, Roster};
use crate::slots::{Slot, SlotId, SlotManager};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::info;

/// A slot together with the stats of whatever it is bound to.
#[derive(Debug, Clone)]
pub struct SlotView {
    pub slot: Slot,
    /// `None` for unbound slots and for keys the current roster lacks.
    pub stats: Option<Arc<GroupStats>>,
}

/// Long-lived state of one user: the roster, its derived-view cache and
/// the alliance/server comparison slots. Views borrow from it, so slots
/// survive a view being closed and reopened.
pub struct TrackerSession {
    roster: Arc<Roster>,
    cache: DerivedViewCache,
    alliance_slots: SlotManager,
    server_slots: SlotManager,
}

impl TrackerSession {
    pub fn new(roster: Arc<Roster>, params: ViewParams) -> Self {
        Self {
            cache: DerivedViewCache::new(Arc::clone(&roster), params),
            roster,
            alliance_slots: SlotManager::new(),
            server_slots: SlotManager::new(),
        }
    }

    pub fn roster(&self) -> &Arc<Roster> {
        &self.roster
    }

    pub fn params(&self) -> &ViewParams {
        self.cache.params()
    }

    pub fn cache(&self) -> &DerivedViewCache {
        &self.cache
    }

    fn slots_mut(&mut self, kind: GroupKind) -> &mut SlotManager {
        match kind {
            GroupKind::Alliance => &mut self.alliance_slots,
            GroupKind::Server => &mut self.server_slots,
        }
    }

    pub fn slots(&self, kind: GroupKind) -> &[Slot] {
        match kind {
            GroupKind::Alliance => self.alliance_slots.snapshot(),
            GroupKind::Server => self.server_slots.snapshot(),
        }
    }

    pub fn restore_slots(&mut self, kind: GroupKind, saved: Vec<Slot>) {
        *self.slots_mut(kind) = SlotManager::restore(saved);
    }

    pub fn add_slot(&mut self, kind: GroupKind) -> Option<SlotId> {
        self.slots_mut(kind).add()
    }

    pub fn remove_slot(&mut self, kind: GroupKind, id: SlotId) -> bool {
        self.slots_mut(kind).remove(id)
    }

    /// Binds resolved text to a slot. Text that does not name a group of
    /// `kind` in the live roster is ignored and `false` is returned.
    pub fn bind_slot(&mut self, kind: GroupKind, id: SlotId, text: &str) -> bool {
        let Some(key) = GroupKey::parse(kind, text) else {
            return false;
        };
        let roster = Arc::clone(&self.roster);
        self.slots_mut(kind).rebind(id, key, |k| roster.is_valid(k))
    }

    pub fn move_slot(&mut self, kind: GroupKind, from: usize, to: usize) -> bool {
        self.slots_mut(kind).reorder(from, to)
    }

    pub fn stats_for(&mut self, key: &GroupKey) -> Option<Arc<GroupStats>> {
        self.cache.stats_for(key)
    }

    /// Slots of `kind` in display order, each with its stats.
    pub fn comparison(&mut self, kind: GroupKind) -> Vec<SlotView> {
        let slots = self.slots(kind).to_vec();
        slots
            .into_iter()
            .map(|slot| {
                let stats = slot
                    .bound_key
                    .as_ref()
                    .and_then(|key| self.cache.stats_for(key));
                SlotView { slot, stats }
            })
            .collect()
    }

    pub fn query(&self, criteria: &FilterCriteria) -> QueryView<'_> {
        filter::query(&self.roster, criteria, self.cache.params())
    }

    /// Replaces the roster. Slots keep their bindings; bindings the new
    /// roster lacks simply report no stats.
    pub fn reload(&mut self, roster: Arc<Roster>) -> bool {
        let changed = self.cache.set_roster(Arc::clone(&roster));
        self.roster = roster;
        changed
    }
}

/// Independent sessions keyed by id. Nothing is shared between them
/// except the read-only roster.
///
/// Each session sits behind its own mutex and the map lock is released
/// before a session runs, so a panic inside one session poisons only that
/// session.
#[derive(Default)]
pub struct TrackerState {
    sessions: RwLock<HashMap<String, Arc<Mutex<TrackerSession>>>>,
}

fn poisoned<E: std::fmt::Display>(e: E) -> RosterError {
    RosterError::Poisoned(e.to_string())
}

impl TrackerState {
    /// Creates the session, or reloads the roster of an existing one while
    /// keeping its slots. Returns `true` if a new session was created.
    pub fn open_session(
        &self,
        session_id: &str,
        roster: Arc<Roster>,
        params: ViewParams,
    ) -> RfResult<bool> {
        params.validate()?;

        let existing = {
            let mut sessions = self.sessions.write().map_err(poisoned)?;
            match sessions.get(session_id) {
                Some(handle) => Arc::clone(handle),
                None => {
                    sessions.insert(
                        session_id.to_string(),
                        Arc::new(Mutex::new(TrackerSession::new(roster, params))),
                    );
                    info!("Session '{}' opened", session_id);
                    return Ok(true);
                }
            }
        };

        let mut session = existing.lock().map_err(poisoned)?;
        session.reload(roster);
        session.cache.set_params(params);
        info!("Session '{}' reloaded", session_id);
        Ok(false)
    }

    fn session(&self, session_id: &str) -> RfResult<Option<Arc<Mutex<TrackerSession>>>> {
        let sessions = self.sessions.read().map_err(poisoned)?;
        Ok(sessions.get(session_id).cloned())
    }

    /// Runs `f` against one session. Fails with `Poisoned` only if an
    /// earlier call panicked inside this same session.
    pub fn with_session<T, F>(&self, session_id: &str, f: F) -> RfResult<T>
    where
        F: FnOnce(&mut TrackerSession) -> T,
    {
        let handle = self
            .session(session_id)?
            .ok_or_else(|| RosterError::SessionNotFound(session_id.to_string()))?;
        let mut session = handle.lock().map_err(poisoned)?;
        Ok(f(&mut session))
    }

    pub fn close_session(&self, session_id: &str) -> RfResult<bool> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        Ok(sessions.remove(session_id).is_some())
    }

    pub fn session_ids(&self) -> RfResult<Vec<String>> {
        let sessions = self.sessions.read().map_err(poisoned)?;
        let mut ids: Vec<String> = sessions.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
