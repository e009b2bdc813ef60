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

//! The contract the pipeline consumes from the pub/sub fabric.

use serde::Serialize;

use crate::support::error::Error;

/// Topic every successful per-recipient delivery is announced on.
pub const EMAIL_RECEIPT_TOPIC: &str = "email_receipt";

/// Payload published for each stored email, serialized as UTF-8 JSON.
#[derive(Clone, Debug, Serialize)]
pub struct EmailReceipt<'a> {
    pub id: &'a str,
    pub owner: &'a str,
}

/// A producer handle to the pub/sub cluster.
///
/// The client is expected to be internally thread-safe per its own
/// contract; one instance serves every envelope. Implementations surface
/// failures as [`Error::Publish`].
pub trait EventPublisher {
    fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), Error>;
}

/// Publisher double recording everything it is handed.
#[cfg(test)]
#[derive(Default)]
pub struct MemPublisher {
    pub published: std::sync::Mutex<Vec<(String, Vec<u8>)>>,
}

#[cfg(test)]
impl EventPublisher for MemPublisher {
    fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), Error> {
        self.published
            .lock()
            .unwrap()
            .push((topic.to_owned(), payload.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn receipt_wire_format() {
        let receipt = EmailReceipt {
            id: "e1",
            owner: "a1",
        };
        assert_eq!(
            "{\"id\":\"e1\",\"owner\":\"a1\"}",
            serde_json::to_string(&receipt).unwrap()
        );
    }
}
