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

//! The PGP manifest: a versioned description of the decrypted contents of
//! a stored email, kept encrypted alongside the body.
//!
//! Clients that can decrypt the manifest learn the real subject, the
//! address lists and, for every part, the plaintext hash and size needed to
//! verify what they later download. The wire form is canonical JSON; the
//! in-memory model here round-trips through it without loss.

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::support::error::Error;

/// The manifest version this pipeline emits.
pub fn current_version() -> Version {
    Version::new(1, 0, 0)
}

/// One address in the manifest's header section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub address: String,
}

/// One entry in the manifest's part list.
///
/// The id `"body"` designates the synthesized main body; every other id
/// names an attachment, whose ciphertext is stored as `<id>.pgp`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Part {
    pub id: String,
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Plaintext size in bytes.
    pub size: usize,
    /// Hex SHA-256 of the plaintext bytes.
    pub hash: String,
}

/// The manifest proper.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Manifest {
    pub version: Version,
    pub from: Address,
    pub to: Vec<Address>,
    #[serde(default)]
    pub cc: Vec<Address>,
    pub subject: String,
    pub parts: Vec<Part>,
}

impl Manifest {
    /// Serialize to the canonical textual form that gets encrypted.
    pub fn write(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parse a manifest back from its textual form.
    pub fn read(data: &[u8]) -> Result<Manifest, Error> {
        Ok(serde_json::from_slice(data)?)
    }
}
