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

//! OpenPGP operations, as thin a wrapper over rPGP as we can get away
//! with.
//!
//! The pipeline only ever encrypts: stored bodies, manifests and
//! attachments are armored ciphertexts addressed to every recipient of the
//! envelope at once. Decryption happens on clients.

#[cfg(test)]
pub mod test_keys;

use pgp::composed::{Deserializable, Message, SignedPublicKey};
use pgp::crypto::sym::SymmetricKeyAlgorithm;

use crate::support::error::Error;

/// Parse one armored public key into its OpenPGP entity.
pub fn parse_public_key(armored: &str) -> Result<SignedPublicKey, Error> {
    let (key, _headers) = SignedPublicKey::from_string(armored).map_err(Error::KeyParse)?;
    Ok(key)
}

/// Encrypt `plaintext` to every entity in `keyring` and ASCII-armor the
/// result.
///
/// No signing. A single ciphertext comes back, decryptable by any one of
/// the recipients.
pub fn encrypt_and_armor(
    plaintext: &[u8],
    keyring: &[SignedPublicKey],
) -> Result<String, Error> {
    let mut rng = rand::thread_rng();
    let recipients: Vec<&SignedPublicKey> = keyring.iter().collect();
    Message::new_literal_bytes("", plaintext)
        .encrypt_to_keys(&mut rng, SymmetricKeyAlgorithm::AES128, &recipients)
        .and_then(|message| message.to_armored_string(None))
        .map_err(Error::Crypto)
}

/// Decrypt an armored message with an armored secret key. Test support
/// only; the service itself never holds private keys.
#[cfg(test)]
pub fn decrypt_armored(armored: &str, armored_secret: &str) -> Vec<u8> {
    use pgp::composed::SignedSecretKey;

    let (secret, _) = SignedSecretKey::from_string(armored_secret).unwrap();
    let (message, _) = Message::from_string(armored).unwrap();
    let (mut decrypted, _key_ids) = message.decrypt(|| String::new(), &[&secret]).unwrap();
    decrypted
        .next()
        .unwrap()
        .unwrap()
        .get_content()
        .unwrap()
        .unwrap()
}
