use std::fmt;
use std::str::FromStr;

use crate::error::ScanError;

/// Which logical payload a scan is reconstructing.
///
/// The kind picks the fragment grammar: transaction fragments follow a
/// strict two-token rule, account-map fragments may carry spaces in their
/// body. Single-part account maps are validated eagerly; single-part
/// transactions are handed to the caller unvalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// An account-map descriptor (xpub registration).
    AccountMap,
    /// A partially-signed transaction.
    SignableTransaction,
}

impl PayloadKind {
    /// Wire name used by callers and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::AccountMap => "accountmap",
            PayloadKind::SignableTransaction => "psbt",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayloadKind {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accountmap" => Ok(PayloadKind::AccountMap),
            "psbt" => Ok(PayloadKind::SignableTransaction),
            other => Err(ScanError::InvalidKind(other.to_string())),
        }
    }
}
