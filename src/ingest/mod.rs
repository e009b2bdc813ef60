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

//! The inbound ingestion pipeline.
//!
//! One envelope is processed to completion on the calling task:
//!
//! ```text
//! envelope -> domain filter -> recipient resolution -> MIME parse
//!          -> classification -> { raw transform | manifest | pgp/mime }
//!          -> per-recipient persistence and notification
//! ```
//!
//! The `raw` shape is re-encoded into a manifest-wrapped email on the way
//! through, so only two kinds ever reach the store. Every stage is
//! fallible and any error aborts the whole envelope; the per-recipient
//! loop performs no rollback of recipients already committed.

mod classify;
mod deliver;
mod extract;
mod flatten;
mod recipients;
#[cfg(test)]
mod test_support;

pub use classify::Classification;
pub use recipients::ResolvedRecipients;

use log::debug;
use mailparse::{parse_mail, MailHeader, MailHeaderMap};

use crate::events::EventPublisher;
use crate::store::model::EmailKind;
use crate::store::Store;
use crate::support::config::IngestConfig;
use crate::support::error::Error;

/// The SMTP-level envelope handed over by the front-end.
#[derive(Clone, Debug)]
pub struct Envelope {
    /// Envelope recipients, as addr-specs.
    pub recipients: Vec<String>,
    /// The raw RFC 5322 message.
    pub data: Vec<u8>,
}

/// Descriptor of the peer that submitted the envelope. Logging only.
#[derive(Clone, Debug, Default)]
pub struct Peer {
    pub addr: String,
}

/// One attachment of a normalized email: a single stored payload,
/// duplicated into one `File` row per recipient at delivery time.
#[derive(Clone, Debug)]
pub struct NormalizedAttachment {
    /// Stored file name: `<part-id>.pgp` for transformed attachments, the
    /// sender-supplied filename for manifest-wrapped ones.
    pub name: String,
    /// Armored ciphertext.
    pub data: String,
}

/// The uniform representation every classification funnels into.
#[derive(Clone, Debug)]
pub struct NormalizedEmail {
    pub kind: EmailKind,
    /// Subject as extracted; may still be an encoded word until the
    /// delivery stage normalizes it.
    pub subject: String,
    /// Armored encrypted body.
    pub body: String,
    /// Armored encrypted manifest; absent for PGP/MIME messages.
    pub manifest: Option<String>,
    pub attachments: Vec<NormalizedAttachment>,
}

/// The inbound mail handler.
///
/// Holds the shared, envelope-independent state: configuration, the store
/// session and the pub/sub producer. The front-end may call
/// [`Ingestor::handle`] concurrently for different envelopes; all mutable
/// state is envelope-local.
pub struct Ingestor<S, P> {
    config: IngestConfig,
    store: S,
    publisher: P,
}

impl<S: Store, P: EventPublisher> Ingestor<S, P> {
    pub fn new(config: IngestConfig, store: S, publisher: P) -> Self {
        Ingestor {
            config,
            store,
            publisher,
        }
    }

    /// Process one envelope to completion.
    pub fn handle(&self, peer: &Peer, envelope: &Envelope) -> Result<(), Error> {
        debug!("{} started parsing", peer.addr);

        let locals = recipients::filter_local(&self.config, &envelope.recipients)?;
        debug!("{} parsed recipients", peer.addr);

        let resolved = recipients::resolve(&self.store, &locals)?;
        debug!("{} fetched keys", peer.addr);

        let message = parse_mail(&envelope.data)?;
        let classification = classify::classify(&message);
        debug!("{} email is {}", peer.addr, classification);

        let normalized = match classification {
            Classification::Raw => flatten::transform(&message, &resolved.keyring)?,
            Classification::Manifest => extract::from_manifest(&message)?,
            Classification::Pgpmime => extract::from_pgpmime(&message)?,
        };
        debug!("{} finished parsing the email", peer.addr);

        deliver::fan_out(
            &self.config,
            &self.store,
            &self.publisher,
            &resolved.accounts,
            &message,
            &normalized,
        )
    }
}

/// The raw (unfolded, undecoded) value of the first header named `name`.
pub(crate) fn raw_header_value(headers: &[MailHeader<'_>], name: &str) -> Option<String> {
    headers.get_first_header(name).map(|header| {
        String::from_utf8_lossy(header.get_value_raw())
            .replace("\r\n", "")
            .replace('\n', "")
            .trim()
            .to_owned()
    })
}

/// Decode a header value: as an RFC 2047 encoded word when it begins with
/// `=?`, literally otherwise.
pub(crate) fn decode_header_value(raw: &str) -> Result<String, Error> {
    if !raw.starts_with("=?") {
        return Ok(raw.to_owned());
    }
    let line = format!("Subject: {}", raw);
    let (header, _) =
        mailparse::parse_header(line.as_bytes()).map_err(|_| Error::SubjectDecode)?;
    Ok(header.get_value())
}
