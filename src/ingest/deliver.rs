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

//! Per-recipient persistence and fan-out.
//!
//! For each resolved account, in input order: the attachment `File` rows
//! are inserted, the thread for `(owner, subject hash)` is created or
//! refreshed, the `Email` row is inserted, and the receipt is published.
//! The loop is strictly sequential and performs no rollback; a failure
//! mid-way leaves earlier recipients fully committed.

use chrono::Utc;
use log::info;
use mailparse::{MailAddr, MailHeader, ParsedMail};
use sha2::{Digest, Sha256};

use super::{decode_header_value, raw_header_value, NormalizedEmail};
use crate::events::{EmailReceipt, EventPublisher, EMAIL_RECEIPT_TOPIC};
use crate::store::model::*;
use crate::store::{Store, ThreadUpdate};
use crate::support::config::IngestConfig;
use crate::support::error::Error;
use crate::support::id_gen;

pub fn fan_out(
    config: &IngestConfig,
    store: &impl Store,
    publisher: &impl EventPublisher,
    accounts: &[Account],
    message: &ParsedMail<'_>,
    normalized: &NormalizedEmail,
) -> Result<(), Error> {
    let subject = decode_header_value(&normalized.subject)?;
    let subject_hash = subject_hash(config, &message.headers)?;

    // Visible address lists come from the raw headers, not the manifest.
    let from = raw_header_value(&message.headers, "From").unwrap_or_default();
    let to = split_address_list(raw_header_value(&message.headers, "To"));
    let cc = match raw_header_value(&message.headers, "Cc") {
        None => None,
        Some(raw) if raw.is_empty() => None,
        Some(raw) => Some(split_address_list(Some(raw))),
    };

    for account in accounts {
        let inbox = store
            .label(&account.id, "Inbox", true)?
            .ok_or(Error::NoInbox)?;
        let eid = id_gen::generate();

        let mut file_ids = Vec::with_capacity(normalized.attachments.len());
        for attachment in &normalized.attachments {
            let now = Utc::now();
            let file = File {
                id: id_gen::generate(),
                date_created: now,
                date_modified: now,
                name: attachment.name.clone(),
                owner: account.id.clone(),
                encoding: PGP_ENCODING.to_owned(),
                data: attachment.data.clone(),
            };
            store.insert_file(&file)?;
            file_ids.push(file.id);
        }

        let (to, cc) = strip_own_addresses(config, account, &to, cc.as_deref());
        let thread_id = reconcile_thread(
            store,
            account,
            &inbox,
            &subject_hash,
            &eid,
            &to,
            cc.as_deref(),
            &from,
        )?;

        let now = Utc::now();
        store.insert_email(&Email {
            id: eid.clone(),
            date_created: now,
            date_modified: now,
            name: subject.clone(),
            owner: account.id.clone(),
            kind: normalized.kind,
            from: from.clone(),
            to,
            cc,
            body: normalized.body.clone(),
            manifest: normalized.manifest.clone(),
            files: file_ids,
            thread: thread_id,
            status: "received".to_owned(),
        })?;

        let receipt = serde_json::to_vec(&EmailReceipt {
            id: &eid,
            owner: &account.id,
        })?;
        publisher.publish(EMAIL_RECEIPT_TOPIC, &receipt)?;

        info!("finished processing email {} for {}", eid, account.name);
    }

    Ok(())
}

/// The thread key for this delivery: a sender-supplied `Subject-Hash`
/// header when the deployment trusts it, otherwise the hex SHA-256 of the
/// decoded subject.
fn subject_hash(config: &IngestConfig, headers: &[MailHeader<'_>]) -> Result<String, Error> {
    if config.trust_subject_hash_header {
        if let Some(hash) = raw_header_value(headers, "Subject-Hash") {
            if !hash.is_empty() {
                return Ok(hash);
            }
        }
    }
    let subject =
        decode_header_value(&raw_header_value(headers, "Subject").unwrap_or_default())?;
    Ok(hex::encode(Sha256::digest(subject.as_bytes())))
}

fn split_address_list(raw: Option<String>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some(raw) => raw.split(',').map(|v| v.trim().to_owned()).collect(),
    }
}

/// Drop the recipient's own addresses (their name at every local domain)
/// from the visible `to`/`cc` lists. Entries that do not parse as an
/// address are dropped with them.
fn strip_own_addresses(
    config: &IngestConfig,
    account: &Account,
    to: &[String],
    cc: Option<&[String]>,
) -> (Vec<String>, Option<Vec<String>>) {
    let own: Vec<String> = config
        .local_domains
        .iter()
        .map(|domain| format!("{}@{}", account.name, domain))
        .collect();

    let strip = |list: &[String]| -> Vec<String> {
        list.iter()
            .filter_map(|value| {
                let parsed = mailparse::addrparse(value).ok()?;
                let addr = match parsed.first()? {
                    MailAddr::Single(info) => info.addr.clone(),
                    MailAddr::Group(group) => group.addrs.first()?.addr.clone(),
                };
                if own.contains(&addr) {
                    None
                } else {
                    Some(value.clone())
                }
            })
            .collect()
    };

    (strip(to), cc.map(strip))
}

/// Find or create the thread for `(owner, subject_hash)` and land the new
/// email in it. Returns the thread id.
#[allow(clippy::too_many_arguments)]
fn reconcile_thread(
    store: &impl Store,
    account: &Account,
    inbox: &Label,
    subject_hash: &str,
    eid: &str,
    to: &[String],
    cc: Option<&[String]>,
    from: &str,
) -> Result<String, Error> {
    // A failed thread query is treated like an empty one; the delivery
    // then starts a fresh thread rather than bouncing the envelope.
    let threads = store
        .threads_by_subject_hash(&account.id, subject_hash)
        .unwrap_or_default();

    match threads.into_iter().next() {
        None => {
            let mut members: Vec<String> = to.to_vec();
            members.extend(cc.unwrap_or_default().iter().cloned());
            members.push(from.to_owned());

            let now = Utc::now();
            let thread = Thread {
                id: id_gen::generate(),
                date_created: now,
                date_modified: now,
                name: "Encrypted thread".to_owned(),
                owner: account.id.clone(),
                emails: vec![eid.to_owned()],
                labels: vec![inbox.id.clone()],
                members,
                is_read: false,
                subject_hash: subject_hash.to_owned(),
            };
            store.insert_thread(&thread)?;
            Ok(thread.id)
        },
        Some(thread) => {
            let mut labels = thread.labels.clone();
            if !labels.contains(&inbox.id) {
                labels.push(inbox.id.clone());
            }
            let mut emails = thread.emails.clone();
            emails.push(eid.to_owned());

            store.update_thread(
                &thread.id,
                &ThreadUpdate {
                    date_modified: Utc::now(),
                    is_read: false,
                    labels,
                    emails,
                },
            )?;
            Ok(thread.id)
        },
    }
}
