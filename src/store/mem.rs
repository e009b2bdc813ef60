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

//! A trivial in-memory document store backing the test suite.
//!
//! Tables are plain `Vec`s behind mutexes so tests can seed them directly
//! and assert on their final contents.

use std::sync::Mutex;

use super::model::*;
use super::{Store, ThreadUpdate};
use crate::support::error::Error;

#[derive(Default)]
pub struct MemStore {
    pub accounts: Mutex<Vec<Account>>,
    pub keys: Mutex<Vec<Key>>,
    pub labels: Mutex<Vec<Label>>,
    pub files: Mutex<Vec<File>>,
    pub threads: Mutex<Vec<Thread>>,
    pub emails: Mutex<Vec<Email>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemStore {
    fn accounts_by_names(&self, names: &[String]) -> Result<Vec<Account>, Error> {
        let accounts = self.accounts.lock().unwrap();
        Ok(names
            .iter()
            .filter_map(|name| accounts.iter().find(|a| &a.name == name))
            .cloned()
            .collect())
    }

    fn key(&self, id: &str) -> Result<Option<Key>, Error> {
        Ok(self
            .keys
            .lock()
            .unwrap()
            .iter()
            .find(|k| k.id == id)
            .cloned())
    }

    fn keys_by_owner(&self, owner: &str) -> Result<Vec<Key>, Error> {
        Ok(self
            .keys
            .lock()
            .unwrap()
            .iter()
            .filter(|k| k.owner == owner)
            .cloned()
            .collect())
    }

    fn label(&self, owner: &str, name: &str, builtin: bool) -> Result<Option<Label>, Error> {
        Ok(self
            .labels
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.owner == owner && l.name == name && l.builtin == builtin)
            .cloned())
    }

    fn threads_by_subject_hash(
        &self,
        owner: &str,
        subject_hash: &str,
    ) -> Result<Vec<Thread>, Error> {
        Ok(self
            .threads
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.owner == owner && t.subject_hash == subject_hash)
            .cloned()
            .collect())
    }

    fn insert_file(&self, file: &File) -> Result<(), Error> {
        self.files.lock().unwrap().push(file.clone());
        Ok(())
    }

    fn insert_thread(&self, thread: &Thread) -> Result<(), Error> {
        self.threads.lock().unwrap().push(thread.clone());
        Ok(())
    }

    fn update_thread(&self, id: &str, update: &ThreadUpdate) -> Result<(), Error> {
        let mut threads = self.threads.lock().unwrap();
        let thread = threads
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::Store(format!("no thread {}", id)))?;
        thread.date_modified = update.date_modified;
        thread.is_read = update.is_read;
        thread.labels = update.labels.clone();
        thread.emails = update.emails.clone();
        Ok(())
    }

    fn insert_email(&self, email: &Email) -> Result<(), Error> {
        self.emails.lock().unwrap().push(email.clone());
        Ok(())
    }
}
