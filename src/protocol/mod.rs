// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport for the Dwelo cloud API.
//!
//! [`DweloClient`] owns the HTTP session and the bearer token. Every other
//! component borrows a client handle and goes through
//! [`DweloClient::request`], which collapses HTTP-level failures into
//! `Ok(None)` and refuses to send anything before a successful login.
//!
//! # Endpoints
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | `POST` | `login/` | Exchange credentials for a bearer token |
//! | `GET` | `device/` | List devices |
//! | `GET` | `sensor/gateway/{id}` | Sensor readings for every device behind a gateway |
//! | `POST` | `device/{uid}/command/` | Send a command to a device |

mod http;

pub use http::{ClientConfig, Credentials, DweloClient};

use std::fmt;

/// HTTP methods used by the Dwelo API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
        }
    }
}
