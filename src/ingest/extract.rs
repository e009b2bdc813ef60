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

//! Extraction of messages that arrive already encrypted, either
//! manifest-wrapped or as PGP/MIME. The sender did the cryptography; we
//! only locate the pieces.

use mailparse::ParsedMail;

use super::{raw_header_value, NormalizedAttachment, NormalizedEmail};
use crate::store::model::EmailKind;
use crate::support::error::Error;

/// Pull body, manifest and attachments out of a manifest-shaped message.
///
/// The root's children are scanned for the manifest part and the
/// `multipart/alternative` body wrapper; the encrypted body is the first
/// `application/pgp-encrypted` grandchild inside the wrapper. Every other
/// child is an attachment whose ciphertext is stored verbatim under the
/// sender-supplied filename.
pub fn from_manifest(message: &ParsedMail<'_>) -> Result<NormalizedEmail, Error> {
    let mut manifest_index = None;
    let mut body_index = None;
    for (index, child) in message.subparts.iter().enumerate() {
        let media_type = child.ctype.mimetype.as_str();
        if manifest_index.is_none() && media_type.starts_with("application/x-pgp-manifest")
        {
            manifest_index = Some(index);
        } else if body_index.is_none() && media_type.starts_with("multipart/alternative") {
            body_index = Some(index);
        }
        if manifest_index.is_some() && body_index.is_some() {
            break;
        }
    }
    let (Some(manifest_index), Some(body_index)) = (manifest_index, body_index) else {
        return Err(Error::BadManifestShape);
    };

    let body_part = message.subparts[body_index]
        .subparts
        .iter()
        .find(|child| {
            child
                .ctype
                .mimetype
                .starts_with("application/pgp-encrypted")
        })
        .ok_or(Error::BadManifestBody)?;
    let body = String::from_utf8_lossy(&body_part.get_body_raw()?).into_owned();
    let manifest =
        String::from_utf8_lossy(&message.subparts[manifest_index].get_body_raw()?)
            .into_owned();

    let mut attachments = Vec::new();
    for (index, child) in message.subparts.iter().enumerate() {
        if index == manifest_index || index == body_index {
            continue;
        }
        let disposition = child.get_content_disposition();
        attachments.push(NormalizedAttachment {
            name: disposition
                .params
                .get("filename")
                .cloned()
                .unwrap_or_default(),
            data: String::from_utf8_lossy(&child.get_body_raw()?).into_owned(),
        });
    }

    Ok(NormalizedEmail {
        kind: EmailKind::Manifest,
        subject: "Encrypted email".to_owned(),
        body,
        manifest: Some(manifest),
        attachments,
    })
}

/// Pull the single encrypted body out of a PGP/MIME message.
///
/// The subject, if any, comes from the encrypted part's own headers, not
/// the outer message.
pub fn from_pgpmime(message: &ParsedMail<'_>) -> Result<NormalizedEmail, Error> {
    let mut body = String::new();
    let mut subject = String::new();
    for child in &message.subparts {
        if child.ctype.mimetype.contains("application/pgp-encrypted") {
            body = String::from_utf8_lossy(&child.get_body_raw()?).into_owned();
            subject = raw_header_value(&child.headers, "Subject").unwrap_or_default();
            break;
        }
    }

    Ok(NormalizedEmail {
        kind: EmailKind::Pgpmime,
        subject,
        body,
        manifest: None,
        attachments: Vec::new(),
    })
}
