//! Online/offline status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Current connectivity as last reported by the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    #[default]
    Online,
    Offline,
}

impl Connectivity {
    /// Returns true when online.
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }

    /// User-facing status line.
    pub fn status_line(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline. Please check your network connection and try again.",
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Online => "online",
            Self::Offline => "offline",
        })
    }
}

/// An online/offline event from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivitySignal {
    Online,
    Offline,
}

impl From<ConnectivitySignal> for Connectivity {
    fn from(signal: ConnectivitySignal) -> Self {
        match signal {
            ConnectivitySignal::Online => Self::Online,
            ConnectivitySignal::Offline => Self::Offline,
        }
    }
}
