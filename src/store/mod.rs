//-
// Copyright (c) 2025, 2026, the Sealmail developers.
//
// This file is part of Sealmail.
//
// Sealmail is free software: you can redistribute it and/or modify it under
// the terms of  the GNU General Public  License as published by  the Free
// Software Foundation, either version 3 of the License, or (at your option)
// any later version.
//
// Sealmail is distributed in the hope that  it will be useful,  but WITHOUT
// ANY WARRANTY; without  even the  implied warranty  of MERCHANTABILITY  or
// FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for
// more details.
//
// You should have received a copy of the GNU General Public License along
// with Sealmail. If not, see <http://www.gnu.org/licenses/>.

//! The contract the pipeline consumes from the document store.
//!
//! The actual driver lives outside this crate; deployments adapt whatever
//! client their store ships to [`Store`]. Implementations are expected to
//! be internally pooled: methods take `&self` and one instance serves every
//! envelope the front-end processes concurrently.

#[cfg(test)]
pub mod mem;
pub mod model;

use chrono::{DateTime, Utc};

use self::model::*;
use crate::support::error::Error;

/// Fields rewritten on an existing thread when a new delivery lands in it.
#[derive(Clone, Debug)]
pub struct ThreadUpdate {
    pub date_modified: DateTime<Utc>,
    pub is_read: bool,
    pub labels: Vec<String>,
    pub emails: Vec<String>,
}

/// Blocking access to the mail tables.
///
/// Reads are indexed lookups; writes are plain inserts keyed by the caller's
/// generated id. Implementations surface their failures as
/// [`Error::Store`].
pub trait Store {
    /// Load accounts by name: one record per element of `names` that
    /// matches an account, in `names` order. A name listed twice yields
    /// its account twice.
    fn accounts_by_names(&self, names: &[String]) -> Result<Vec<Account>, Error>;

    /// Load a key by id.
    fn key(&self, id: &str) -> Result<Option<Key>, Error>;

    /// Load every key owned by an account.
    fn keys_by_owner(&self, owner: &str) -> Result<Vec<Key>, Error>;

    /// Look up a label by `(owner, name, builtin)`. Returns the first match
    /// when the store holds several.
    fn label(&self, owner: &str, name: &str, builtin: bool) -> Result<Option<Label>, Error>;

    /// Load the threads matching `(owner, subject_hash)`, in store order.
    fn threads_by_subject_hash(
        &self,
        owner: &str,
        subject_hash: &str,
    ) -> Result<Vec<Thread>, Error>;

    fn insert_file(&self, file: &File) -> Result<(), Error>;

    fn insert_thread(&self, thread: &Thread) -> Result<(), Error>;

    /// Apply `update` to the thread with the given id.
    fn update_thread(&self, id: &str, update: &ThreadUpdate) -> Result<(), Error>;

    fn insert_email(&self, email: &Email) -> Result<(), Error>;
}
