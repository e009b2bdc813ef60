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

use std::fmt;

use mailparse::ParsedMail;

/// The cryptographic shape of an inbound message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Plaintext; must be transformed and encrypted server-side.
    Raw,
    /// Already carries a PGP manifest; stored as-is.
    Manifest,
    /// PGP/MIME (`multipart/encrypted`); stored as-is, without a manifest.
    Pgpmime,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Classification::Raw => "raw",
            Classification::Manifest => "manifest",
            Classification::Pgpmime => "pgpmime",
        })
    }
}

/// Decide the shape of a parsed message from its root content type.
///
/// `multipart/encrypted` is dedicated to PGP/MIME (and S/MIME). A
/// `multipart/mixed` message with at least two children, one of which is an
/// `application/x-pgp-manifest` part, carries a manifest. Everything else
/// is unencrypted.
pub fn classify(message: &ParsedMail<'_>) -> Classification {
    let content_type = message.ctype.mimetype.as_str();
    if content_type.starts_with("multipart/encrypted") {
        return Classification::Pgpmime;
    }
    if content_type.starts_with("multipart/mixed")
        && message.subparts.len() >= 2
        && message
            .subparts
            .iter()
            .any(|child| child.ctype.mimetype.starts_with("application/x-pgp-manifest"))
    {
        return Classification::Manifest;
    }
    Classification::Raw
}
