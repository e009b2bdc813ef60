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

use thiserror::Error;

/// Every failure the ingestion pipeline can surface.
///
/// All of these are fatal to the envelope being processed: nothing is
/// recovered internally, and partial writes from earlier steps of the same
/// envelope are not rolled back. The SMTP front-end maps the error to a
/// reply code, typically a transient failure so the sender retries.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Envelope recipient is not a valid email address")]
    InvalidRecipient,
    #[error("No recipient in a locally served domain")]
    NoLocalDomain,
    #[error("Recipient is not a known account")]
    UnknownRecipient,
    #[error("Recipient has no usable public key")]
    NoKey,
    #[error("Malformed armored key material")]
    KeyParse(#[source] pgp::errors::Error),
    #[error("Malformed MIME message")]
    Parse(#[from] mailparse::MailParseError),
    #[error("Malformed media structure")]
    MediaType,
    #[error("Manifest message is missing its manifest or body part")]
    BadManifestShape,
    #[error("Manifest message has no encrypted body")]
    BadManifestBody,
    #[error("Malformed encoded-word subject")]
    SubjectDecode,
    #[error("Message has no parseable From address")]
    MissingFrom,
    #[error("OpenPGP encryption failed")]
    Crypto(#[source] pgp::errors::Error),
    #[error("Recipient has no built-in Inbox label")]
    NoInbox,
    #[error("Document store operation failed: {0}")]
    Store(String),
    #[error("Event publish failed: {0}")]
    Publish(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] toml::de::Error),
}
