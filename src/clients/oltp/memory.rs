//! An in-memory stand-in for the database, used to drive the workers in
//! tests. It records every statement and can be told to fail.

use super::*;
use std::sync::{Mutex, MutexGuard};

pub struct UserRow {
    pub user_id: u64,
    pub user: User,
}

pub struct TeamRow {
    pub user_id: u64,
    pub team: Team,
}

#[derive(Default)]
pub struct MemoryDb {
    pub users: Vec<UserRow>,
    pub teams: Vec<TeamRow>,
    /// Ids passed to point selects, in order.
    pub selected: Vec<u64>,
    /// Connection attempts.
    pub connects: usize,
    /// Statements issued, successful or not.
    pub operations: usize,
}

/// Faults to inject.
#[derive(Clone, Copy, Default)]
pub struct Faults {
    pub connect: bool,
    pub insert_team: bool,
    /// Fail every select after this many have succeeded.
    pub select_after: Option<usize>,
}

#[derive(Default)]
pub struct MemoryConnector {
    db: Arc<Mutex<MemoryDb>>,
    faults: Faults,
}

impl MemoryConnector {
    pub fn with_faults(faults: Faults) -> Self {
        Self {
            db: Default::default(),
            faults,
        }
    }

    pub fn db(&self) -> MutexGuard<'_, MemoryDb> {
        self.db.lock().unwrap()
    }

    pub fn add_team(&self, team: Team, user_id: u64) {
        self.db().teams.push(TeamRow { user_id, team });
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    type Store = MemoryStore;

    async fn connect(&self) -> Result<MemoryStore, ConnectionError> {
        self.db().connects += 1;
        if self.faults.connect {
            return Err(ConnectionError::Dial(sqlx::Error::PoolTimedOut));
        }
        Ok(MemoryStore {
            db: self.db.clone(),
            faults: self.faults,
        })
    }
}

pub struct MemoryStore {
    db: Arc<Mutex<MemoryDb>>,
    faults: Faults,
}

fn fault(query: &'static str) -> QueryError {
    QueryError::new(query, sqlx::Error::Protocol("injected fault".to_string()))
}

#[async_trait]
impl Store for MemoryStore {
    async fn random_team(&self) -> Result<Option<Team>, QueryError> {
        let mut db = self.db.lock().unwrap();
        db.operations += 1;
        // the oldest team stands in for a random one
        Ok(db.teams.first().map(|row| row.team.clone()))
    }

    async fn insert_user(&self, user: &User) -> Result<u64, QueryError> {
        let mut db = self.db.lock().unwrap();
        db.operations += 1;
        let user_id = db.users.len() as u64 + 1;
        db.users.push(UserRow {
            user_id,
            user: user.clone(),
        });
        Ok(user_id)
    }

    async fn insert_team(&self, team: &Team, user_id: u64) -> Result<(), QueryError> {
        let mut db = self.db.lock().unwrap();
        db.operations += 1;
        if self.faults.insert_team {
            return Err(fault("insert team"));
        }
        db.teams.push(TeamRow {
            user_id,
            team: team.clone(),
        });
        Ok(())
    }

    async fn select_email(&self, user_id: u64) -> Result<Option<String>, QueryError> {
        let mut db = self.db.lock().unwrap();
        db.operations += 1;
        db.selected.push(user_id);
        if let Some(limit) = self.faults.select_after {
            if db.selected.len() > limit {
                return Err(fault("select email"));
            }
        }
        Ok(db
            .users
            .iter()
            .find(|row| row.user_id == user_id)
            .map(|row| row.user.email.clone()))
    }
}
