use std::fs;

use chrono::Utc;
use lmdb::{Database, DatabaseFlags, Environment, Transaction, WriteFlags};
use log::{debug, info, warn};

use crate::complaint_model::{seed_complaints, Complaint, ComplaintForm, ComplaintStatus};
use crate::complaint_query::{self, duplicate_id, find_complaint};
use crate::complaint_submit::new_complaint;
use crate::store_config::{StoreConfig, DATABASE_NAME};
use crate::store_error::{StoreError, StoreResult};

/// Owned complaint store mirrored to a single LMDB slot.
///
/// The in-memory sequence is replaced wholesale on every mutation and the
/// whole sequence is rewritten to storage right after.
pub struct ComplaintStore {
    env: Option<Environment>,
    db: Database,
    config: StoreConfig,
    complaints: Vec<Complaint>,
}

impl ComplaintStore {
    /// Opens (or creates) the environment and loads the complaint list,
    /// seeding it on first start.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        let env_dir = config.env_dir();
        fs::create_dir_all(&env_dir)?;

        let env = Environment::new()
            .set_max_dbs(1)
            .set_map_size(config.map_size)
            .open(&env_dir)?;
        let db = env.create_db(Some(DATABASE_NAME), DatabaseFlags::empty())?;

        info!("Opened complaint store at {}", env_dir.display());

        let mut store = Self {
            env: Some(env),
            db,
            config,
            complaints: Vec::new(),
        };
        store.complaints = store.load()?;
        Ok(store)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current in-memory view, in insertion order.
    pub fn complaints(&self) -> StoreResult<&[Complaint]> {
        self.env()?;
        Ok(&self.complaints)
    }

    pub fn find_by_id(&self, id: &str) -> StoreResult<Option<&Complaint>> {
        self.env()?;
        Ok(find_complaint(&self.complaints, id))
    }

    /// Reads the persisted sequence.
    ///
    /// An absent or unparsable slot yields the seed records, which are
    /// written back immediately.
    pub fn load(&self) -> StoreResult<Vec<Complaint>> {
        let env = self.env()?;
        let txn = env.begin_ro_txn()?;
        let raw = match txn.get(self.db, &self.config.storage_key) {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(lmdb::Error::NotFound) => None,
            Err(e) => return Err(e.into()),
        };
        txn.abort();

        let Some(raw) = raw else {
            info!("No persisted complaints found; writing seed records");
            return self.write_seed();
        };

        match serde_json::from_slice::<Vec<Complaint>>(&raw) {
            Ok(complaints) => {
                debug!("Loaded {} complaints", complaints.len());
                Ok(complaints)
            }
            Err(e) => {
                warn!("Persisted complaints are unreadable ({e}); falling back to seed records");
                self.write_seed()
            }
        }
    }

    fn write_seed(&self) -> StoreResult<Vec<Complaint>> {
        let seed = seed_complaints();
        self.save(&seed)?;
        Ok(seed)
    }

    /// Overwrites the storage slot with `complaints`.
    pub fn save(&self, complaints: &[Complaint]) -> StoreResult<()> {
        let env = self.env()?;
        let json = serde_json::to_string(complaints)?;

        let mut txn = env.begin_rw_txn()?;
        txn.put(self.db, &self.config.storage_key, &json, WriteFlags::empty())?;
        txn.commit()?;

        debug!("Persisted {} complaints ({} bytes)", complaints.len(), json.len());
        Ok(())
    }

    /// Replaces the whole sequence and persists it.
    pub fn persist(&mut self, complaints: Vec<Complaint>) -> StoreResult<()> {
        if let Some(id) = duplicate_id(&complaints) {
            return Err(StoreError::DuplicateId(id.to_string()));
        }
        self.save(&complaints)?;
        self.complaints = complaints;
        Ok(())
    }

    /// Appends a new `Pending` complaint built from `form` and persists.
    pub fn submit(&mut self, form: ComplaintForm) -> StoreResult<Complaint> {
        let complaint = new_complaint(&self.complaints, form, Utc::now());

        let mut next = self.complaints.clone();
        next.push(complaint.clone());
        self.save(&next)?;
        self.complaints = next;

        info!("Submitted complaint {}", complaint.id);
        Ok(complaint)
    }

    /// Sets the status of `id` and persists. Returns whether a record matched;
    /// an unknown id leaves the sequence as it was.
    pub fn change_status(&mut self, id: &str, status: ComplaintStatus) -> StoreResult<bool> {
        let found = find_complaint(&self.complaints, id).is_some();
        let next = complaint_query::change_status(&self.complaints, id, status);
        self.save(&next)?;
        self.complaints = next;

        if found {
            info!("Complaint {} set to {}", id, status);
        } else {
            debug!("Status change ignored; no complaint with id {}", id);
        }
        Ok(found)
    }

    /// Flushes and releases the environment. Later reads and writes fail
    /// with [`StoreError::Closed`].
    pub fn close(&mut self) -> StoreResult<()> {
        if let Some(env) = self.env.take() {
            env.sync(true)?;
            info!("Closed complaint store at {}", self.config.env_dir().display());
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.env.is_none()
    }

    fn env(&self) -> StoreResult<&Environment> {
        self.env.as_ref().ok_or(StoreError::Closed)
    }
}
