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

//! The raw transformer: flattens a plaintext MIME tree into a single
//! synthesized body plus extracted attachments, then builds the manifest
//! and encrypts every piece to the recipient keyring.
//!
//! Traversal is depth-first. A `multipart/alternative` contributes exactly
//! one child (the first recognized one, by position) and is not descended
//! further; any other multipart is walked child by child. Leaves are
//! either attachments, hoisted out whole, or inline content merged into
//! the body. Inline merging keeps the body in the richest media type seen
//! so far: a `text/plain` body is promoted to `text/html` the moment any
//! non-plain content arrives, with the accumulated text wrapped in
//! `<pre>`. Nothing is ever discarded by the merge.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use mailparse::{DispositionType, ParsedMail};
use pgp::composed::SignedPublicKey;
use sha2::{Digest, Sha256};

use super::{decode_header_value, raw_header_value, NormalizedAttachment, NormalizedEmail};
use crate::crypt;
use crate::manifest::{self, Address, Manifest, Part};
use crate::store::model::EmailKind;
use crate::support::error::Error;
use crate::support::id_gen;

/// The accumulating state of one traversal.
#[derive(Default)]
struct Flattened {
    body_type: String,
    body_text: String,
    parts: Vec<Part>,
    attachments: Vec<NormalizedAttachment>,
}

/// Re-encode a plaintext message into the manifest shape.
pub fn transform(
    message: &ParsedMail<'_>,
    keyring: &[SignedPublicKey],
) -> Result<NormalizedEmail, Error> {
    let mut flat = Flattened::default();
    flatten_into(message, keyring, &mut flat)?;

    let body_text = flat.body_text.trim().to_owned();
    let mut parts = flat.parts;
    parts.push(Part {
        id: "body".to_owned(),
        content_type: flat.body_type,
        filename: None,
        size: body_text.len(),
        hash: hex::encode(Sha256::digest(body_text.as_bytes())),
    });

    let (from, to, cc) = address_headers(message)?;
    let subject = decode_header_value(
        &raw_header_value(&message.headers, "Subject").unwrap_or_default(),
    )?;

    let manifest = Manifest {
        version: manifest::current_version(),
        from,
        to,
        cc,
        subject: subject.clone(),
        parts,
    };

    let body = crypt::encrypt_and_armor(body_text.as_bytes(), keyring)?;
    let manifest_armored = crypt::encrypt_and_armor(&manifest.write()?, keyring)?;

    Ok(NormalizedEmail {
        kind: EmailKind::Manifest,
        subject,
        body,
        manifest: Some(manifest_armored),
        attachments: flat.attachments,
    })
}

fn flatten_into(
    part: &ParsedMail<'_>,
    keyring: &[SignedPublicKey],
    out: &mut Flattened,
) -> Result<(), Error> {
    let media_type = part.ctype.mimetype.clone();

    if media_type.starts_with("multipart/alternative") {
        // The first recognized child wins, by position, not by kind; with
        // no recognized child at all, the first child is taken anyway.
        let chosen = part
            .subparts
            .iter()
            .find(|child| {
                let m = child.ctype.mimetype.as_str();
                m.starts_with("application/pgp-encrypted")
                    || m.starts_with("text/html")
                    || m.starts_with("text/plain")
            })
            .or_else(|| part.subparts.first())
            .ok_or(Error::MediaType)?;
        out.body_type = chosen.ctype.mimetype.clone();
        out.body_text = String::from_utf8_lossy(&chosen.get_body_raw()?).into_owned();
    } else if media_type.starts_with("multipart/") {
        // Everything else multipart is treated like multipart/mixed;
        // multipart/encrypted never reaches this transformer.
        for child in &part.subparts {
            flatten_into(child, keyring, out)?;
        }
    } else {
        let disposition = part.get_content_disposition();
        if disposition.disposition == DispositionType::Attachment {
            let data = part.get_body_raw()?;
            let filename = disposition.params.get("filename").cloned();
            attach(&media_type, filename, &data, keyring, out)?;
        } else {
            merge_inline(&media_type, &part.get_body_raw()?, out);
        }
    }

    Ok(())
}

/// Hoist one attachment leaf: hash and encrypt the plaintext, record the
/// manifest part, and stage the ciphertext for per-recipient storage under
/// the name `<part-id>.pgp`.
fn attach(
    media_type: &str,
    filename: Option<String>,
    data: &[u8],
    keyring: &[SignedPublicKey],
    out: &mut Flattened,
) -> Result<(), Error> {
    let id = id_gen::generate();
    let armored = crypt::encrypt_and_armor(data, keyring)?;

    out.parts.push(Part {
        id: id.clone(),
        content_type: media_type.to_owned(),
        filename,
        size: data.len(),
        hash: hex::encode(Sha256::digest(data)),
    });
    out.attachments.push(NormalizedAttachment {
        name: format!("{}.pgp", id),
        data: armored,
    });
    Ok(())
}

/// Merge one inline leaf into the synthesized body.
fn merge_inline(media_type: &str, data: &[u8], out: &mut Flattened) {
    let text = String::from_utf8_lossy(data);

    if out.body_type.is_empty() {
        if media_type == "text/plain" || media_type == "text/html" {
            out.body_type = media_type.to_owned();
            out.body_text = text.into_owned();
        } else {
            out.body_type = "text/html".to_owned();
            out.body_text = if media_type.starts_with("image/") {
                img_tag(media_type, data)
            } else {
                format!("<pre>{}</pre>", text)
            };
        }
        return;
    }

    // A plain body becomes HTML the moment non-plain content arrives.
    if out.body_type == "text/plain" && media_type != "text/plain" {
        out.body_type = "text/html".to_owned();
        out.body_text = format!("<pre>{}</pre>", out.body_text);
    }

    let fragment = if media_type == "text/plain" && out.body_type == "text/plain" {
        text.into_owned()
    } else if media_type == "text/html" {
        text.into_owned()
    } else if media_type == "text/plain" {
        format!("<pre>{}</pre>", text)
    } else if media_type.starts_with("image/") {
        img_tag(media_type, data)
    } else {
        format!("<pre>{}</pre>", text)
    };

    out.body_text.push_str("\n\n");
    out.body_text.push_str(&fragment);
}

fn img_tag(media_type: &str, data: &[u8]) -> String {
    format!(
        "<img src=\"data:{};base64,{}\"><br>",
        media_type,
        BASE64.encode(data)
    )
}

/// Parse the `From`, `To` and `Cc` headers into manifest addresses. `From`
/// must yield at least one address; the lists may be empty.
fn address_headers(
    message: &ParsedMail<'_>,
) -> Result<(Address, Vec<Address>, Vec<Address>), Error> {
    let mut from = parse_address_header(message, "From")?;
    if from.is_empty() {
        return Err(Error::MissingFrom);
    }
    let to = parse_address_header(message, "To")?;
    let cc = parse_address_header(message, "Cc")?;
    Ok((from.remove(0), to, cc))
}

fn parse_address_header(
    message: &ParsedMail<'_>,
    name: &str,
) -> Result<Vec<Address>, Error> {
    let Some(raw) = raw_header_value(&message.headers, name) else {
        return Ok(Vec::new());
    };
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let mut addresses = Vec::new();
    for addr in mailparse::addrparse(&raw)?.iter() {
        match addr {
            mailparse::MailAddr::Single(info) => addresses.push(Address {
                name: info.display_name.clone(),
                address: info.addr.clone(),
            }),
            mailparse::MailAddr::Group(group) => {
                for info in &group.addrs {
                    addresses.push(Address {
                        name: info.display_name.clone(),
                        address: info.addr.clone(),
                    });
                }
            },
        }
    }
    Ok(addresses)
}
