use crate::error::TypesError;
use std::fmt;
use std::str::FromStr;

/// 20-byte voter identity.
///
/// Printed as Bech32m under the `bbx` prefix. Parsing also takes the
/// all-uppercase Bech32m form (as produced for QR codes) and `0x` hex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    pub const LEN: usize = 20;

    /// Bech32m human-readable prefix
    pub const BECH32_HRP: &'static str = "bbx";

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Create from a byte slice of exactly `LEN` bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self, TypesError> {
        let bytes: [u8; 20] = slice
            .try_into()
            .map_err(|_| TypesError::InvalidAddressLength(slice.len()))?;
        Ok(Self(bytes))
    }

    /// Deterministic identity for a seed: the first 20 bytes of its blake3
    /// digest. Used for `@name` identities in tooling and tests.
    pub fn derive(seed: &[u8]) -> Self {
        let digest = blake3::hash(seed);
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest.as_bytes()[..Self::LEN]);
        Self(bytes)
    }

    fn parse_bech32(s: &str) -> Result<Self, TypesError> {
        let (hrp, data) =
            bech32::decode(s).map_err(|e| TypesError::Bech32Error(e.to_string()))?;
        if !hrp.as_str().eq_ignore_ascii_case(Self::BECH32_HRP) {
            return Err(TypesError::InvalidAddressFormat(format!(
                "expected prefix '{}', got '{}'",
                Self::BECH32_HRP,
                hrp
            )));
        }
        Self::from_slice(&data)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hrp = bech32::Hrp::parse_unchecked(Self::BECH32_HRP);
        let encoded = bech32::encode::<bech32::Bech32m>(hrp, &self.0).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return Self::from_slice(&hex::decode(digits)?);
        }

        let prefix_len = Self::BECH32_HRP.len() + 1;
        match s.get(..prefix_len) {
            Some(prefix) if prefix.eq_ignore_ascii_case("bbx1") => Self::parse_bech32(s),
            _ => Err(TypesError::InvalidAddressFormat(s.to_string())),
        }
    }
}
