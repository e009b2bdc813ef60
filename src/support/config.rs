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

use serde::{Deserialize, Serialize};

use crate::support::error::Error;

/// Run-time configuration for the ingestion pipeline.
///
/// Deployments usually keep this in a TOML file next to the front-end
/// configuration and load it with [`IngestConfig::from_toml`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct IngestConfig {
    /// The DNS domains this deployment serves.
    ///
    /// Envelope recipients outside these domains are silently dropped; an
    /// envelope with no recipient inside them is rejected outright.
    #[serde(default = "default_local_domains")]
    pub local_domains: Vec<String>,

    /// Whether a sender-supplied `Subject-Hash` header is taken verbatim
    /// when reconciling threads.
    ///
    /// The header is attacker-controlled and allows splicing mail into an
    /// arbitrary thread of the recipient, so it is ignored unless the
    /// deployment verifies it upstream and opts in here. When off (the
    /// default), the hash is always computed from the decoded subject.
    #[serde(default)]
    pub trust_subject_hash_header: bool,
}

fn default_local_domains() -> Vec<String> {
    vec![
        "lavaboom.com".to_owned(),
        "lavaboom.io".to_owned(),
        "lavaboom.co".to_owned(),
    ]
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            local_domains: default_local_domains(),
            trust_subject_hash_header: false,
        }
    }
}

impl IngestConfig {
    /// Parse a configuration from its TOML representation.
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }
}
