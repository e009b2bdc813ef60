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

//! Envelope recipient filtering and account/key resolution.

use pgp::composed::SignedPublicKey;

use crate::crypt;
use crate::store::model::Account;
use crate::store::Store;
use crate::support::config::IngestConfig;
use crate::support::error::Error;

/// The resolved recipients of an envelope: their account records, in
/// envelope order, and the union keyring every payload is encrypted to.
#[derive(Debug)]
pub struct ResolvedRecipients {
    pub accounts: Vec<Account>,
    pub keyring: Vec<SignedPublicKey>,
}

/// Split an addr-spec around its single `@`.
fn split_address(address: &str) -> Result<(&str, &str), Error> {
    let mut parts = address.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => Ok((local, domain)),
        _ => Err(Error::InvalidRecipient),
    }
}

/// Reduce envelope recipients to the local parts of locally served
/// addresses.
///
/// Recipients in foreign domains are dropped silently; a whole envelope
/// without a single local recipient is rejected.
pub fn filter_local(
    config: &IngestConfig,
    recipients: &[String],
) -> Result<Vec<String>, Error> {
    let mut locals = Vec::new();
    for recipient in recipients {
        let (local, domain) = split_address(recipient)?;
        if config.local_domains.iter().any(|d| d == domain) {
            locals.push(local.to_owned());
        }
    }
    if locals.is_empty() {
        return Err(Error::NoLocalDomain);
    }
    Ok(locals)
}

/// Load the account and public key of every local recipient.
///
/// Partial matches are not acceptable: if any local recipient has no
/// account, the whole envelope is rejected.
pub fn resolve(store: &impl Store, locals: &[String]) -> Result<ResolvedRecipients, Error> {
    let accounts = store.accounts_by_names(locals)?;
    if accounts.len() != locals.len() {
        return Err(Error::UnknownRecipient);
    }

    let mut keyring = Vec::with_capacity(accounts.len());
    for account in &accounts {
        keyring.push(resolve_key(store, account)?);
    }
    Ok(ResolvedRecipients { accounts, keyring })
}

fn resolve_key(store: &impl Store, account: &Account) -> Result<SignedPublicKey, Error> {
    let key = match &account.public_key {
        Some(id) => store.key(id)?.ok_or(Error::NoKey)?,
        None => {
            let mut keys = store.keys_by_owner(&account.id)?;
            // Newest first; the sort is stable, so exact ties keep store
            // order.
            keys.sort_by(|a, b| b.date_created.cmp(&a.date_created));
            keys.into_iter().next().ok_or(Error::NoKey)?
        },
    };
    crypt::parse_public_key(&key.key)
}
