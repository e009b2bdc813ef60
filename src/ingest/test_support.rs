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

//! Shared fixtures for the ingestion tests: a seeded store and builders
//! for the MIME shapes the pipeline classifies.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;

use super::Envelope;
use crate::crypt::test_keys;
use crate::store::mem::MemStore;
use crate::store::model::{Account, Key, Label};

/// A store holding the accounts `alice` and `bob`, each with one key and
/// a built-in Inbox label. Ids follow the pattern `<name>-id`,
/// `<name>-key`, `<name>-inbox`.
pub fn seeded_store() -> MemStore {
    let store = MemStore::new();
    add_account(&store, "alice", test_keys::ALICE_PUBLIC);
    add_account(&store, "bob", test_keys::BOB_PUBLIC);
    store
}

pub fn add_account(store: &MemStore, name: &str, armored_key: &str) {
    let id = format!("{}-id", name);
    store.accounts.lock().unwrap().push(Account {
        id: id.clone(),
        name: name.to_owned(),
        public_key: None,
    });
    store.keys.lock().unwrap().push(Key {
        id: format!("{}-key", name),
        date_created: Utc::now(),
        owner: id.clone(),
        key: armored_key.to_owned(),
    });
    store.labels.lock().unwrap().push(Label {
        id: format!("{}-inbox", name),
        owner: id,
        name: "Inbox".to_owned(),
        builtin: true,
    });
}

pub fn envelope(recipients: &[&str], data: Vec<u8>) -> Envelope {
    Envelope {
        recipients: recipients.iter().map(|r| (*r).to_owned()).collect(),
        data,
    }
}

/// A single-part `text/plain` message.
pub fn plain_message(subject: &str, body: &str) -> String {
    format!(
        "From: Carol <carol@example.com>\r\n\
         To: alice@lavaboom.com\r\n\
         Subject: {}\r\n\
         Content-Type: text/plain\r\n\r\n\
         {}",
        subject, body
    )
}

/// A `multipart/mixed` message with one inline `text/plain` body and the
/// given `(content type, filename, bytes)` attachments, base64-encoded.
pub fn mixed_message(subject: &str, body: &str, attachments: &[(&str, &str, &[u8])]) -> String {
    let mut message = format!(
        "From: Carol <carol@example.com>\r\n\
         To: alice@lavaboom.com, bob@lavaboom.com\r\n\
         Subject: {}\r\n\
         Content-Type: multipart/mixed; boundary=\"mixed-bnd\"\r\n\r\n\
         --mixed-bnd\r\n\
         Content-Type: text/plain\r\n\r\n\
         {}\r\n",
        subject, body
    );
    for (content_type, filename, data) in attachments {
        message.push_str(&format!(
            "--mixed-bnd\r\n\
             Content-Type: {}\r\n\
             Content-Disposition: attachment; filename=\"{}\"\r\n\
             Content-Transfer-Encoding: base64\r\n\r\n\
             {}\r\n",
            content_type,
            filename,
            BASE64.encode(data)
        ));
    }
    message.push_str("--mixed-bnd--\r\n");
    message
}

/// A manifest-shaped message: the manifest part, the
/// `multipart/alternative` wrapper holding the encrypted body, and the
/// given `(filename, armored data)` attachments.
pub fn manifest_message(manifest: &str, body: &str, attachments: &[(&str, &str)]) -> String {
    let mut message = format!(
        "From: Carol <carol@example.com>\r\n\
         To: alice@lavaboom.com\r\n\
         Subject: ...\r\n\
         Content-Type: multipart/mixed; boundary=\"outer-bnd\"\r\n\r\n\
         --outer-bnd\r\n\
         Content-Type: application/x-pgp-manifest+json\r\n\r\n\
         {}\r\n\
         --outer-bnd\r\n\
         Content-Type: multipart/alternative; boundary=\"alt-bnd\"\r\n\r\n\
         --alt-bnd\r\n\
         Content-Type: application/pgp-encrypted\r\n\r\n\
         {}\r\n\
         --alt-bnd--\r\n",
        manifest, body
    );
    for (filename, data) in attachments {
        message.push_str(&format!(
            "--outer-bnd\r\n\
             Content-Type: application/pdf\r\n\
             Content-Disposition: attachment; filename=\"{}\"\r\n\r\n\
             {}\r\n",
            filename, data
        ));
    }
    message.push_str("--outer-bnd--\r\n");
    message
}

/// A PGP/MIME message whose encrypted part carries its own subject.
pub fn pgpmime_message(subject: &str, body: &str) -> String {
    format!(
        "From: Carol <carol@example.com>\r\n\
         To: alice@lavaboom.com\r\n\
         Subject: ...\r\n\
         Content-Type: multipart/encrypted; boundary=\"enc-bnd\"\r\n\r\n\
         --enc-bnd\r\n\
         Content-Type: application/pgp-encrypted\r\n\
         Subject: {}\r\n\r\n\
         {}\r\n\
         --enc-bnd--\r\n",
        subject, body
    )
}
