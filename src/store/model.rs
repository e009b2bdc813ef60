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

//! Records read from and written to the document store.
//!
//! Field names follow the store's wire representation (snake case), so all
//! of these serialize with plain serde derives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The MIME encoding every stored ciphertext carries.
pub const PGP_ENCODING: &str = "application/pgp-encrypted";

/// A user account. The pipeline only ever reads these; account lifecycle is
/// managed elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Account {
    pub id: String,
    /// The local part of the account's addresses, unique within the served
    /// domain set.
    pub name: String,
    /// Id of the key to encrypt to. Unset means "use the newest key owned
    /// by this account".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

/// Stored armored key material, parsed to an OpenPGP entity at use time.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Key {
    pub id: String,
    pub date_created: DateTime<Utc>,
    pub owner: String,
    pub key: String,
}

/// A mailbox label. Only the built-in `Inbox` label is consulted here.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Label {
    pub id: String,
    pub owner: String,
    pub name: String,
    pub builtin: bool,
}

/// One stored attachment ciphertext. N recipients produce N rows per
/// attachment, all sharing the same `data`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct File {
    pub id: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    pub name: String,
    pub owner: String,
    pub encoding: String,
    /// Armored ciphertext.
    pub data: String,
}

/// The cryptographic shape of a stored email.
///
/// Plaintext input never reaches the store: the raw transformer promotes it
/// to `manifest`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailKind {
    Manifest,
    Pgpmime,
}

/// A stored email, one row per recipient.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Email {
    pub id: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    /// The decoded subject.
    pub name: String,
    pub owner: String,
    pub kind: EmailKind,
    pub from: String,
    pub to: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<Vec<String>>,
    /// Armored encrypted body.
    pub body: String,
    /// Armored encrypted manifest; absent for PGP/MIME messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,
    /// Ids of the `File` rows owned by the same account.
    pub files: Vec<String>,
    pub thread: String,
    pub status: String,
}

/// A per-account grouping of related emails, keyed by subject hash.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Thread {
    pub id: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    pub name: String,
    pub owner: String,
    pub emails: Vec<String>,
    pub labels: Vec<String>,
    /// Every sender/recipient address seen in the thread's emails.
    /// Best-effort union; duplicates are tolerated.
    pub members: Vec<String>,
    pub is_read: bool,
    pub subject_hash: String,
}
