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

//! Sealmail is the inbound ingestion pipeline of an encrypted mail service.
//!
//! An SMTP front-end hands over an [`ingest::Envelope`]; the pipeline
//! resolves the local recipients, classifies the message into one of three
//! cryptographic shapes (plaintext, manifest-wrapped, PGP/MIME), normalizes
//! it into an encrypted body plus an encrypted manifest plus zero or more
//! encrypted attachment files, and commits the result per recipient into a
//! document store while announcing each delivery on a pub/sub topic.
//!
//! The SMTP listener, the document store driver and the pub/sub client are
//! deliberately outside this crate. The listener constructs envelopes and
//! calls [`ingest::Ingestor::handle`]; the store and the publisher are
//! supplied through the [`store::Store`] and [`events::EventPublisher`]
//! traits.

#[cfg(test)]
macro_rules! assert_matches {
    ($expected:pat, $actual:expr) => {
        match $actual {
            $expected => (),
            unexpected => panic!(
                "Expected {} matches {}, got {:?}",
                stringify!($expected),
                stringify!($actual),
                unexpected
            ),
        }
    };
}

pub mod crypt;
pub mod events;
pub mod ingest;
pub mod manifest;
pub mod store;
pub mod support;
