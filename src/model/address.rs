use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Length of an address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// An external caller identity: a 20-byte account address, written as
/// `0x` followed by 40 hex digits.
///
/// The ledger never interprets the bytes; it only compares them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Does this string syntactically resemble an address?
    /// Used to reject addresses accidentally pasted into name fields.
    pub fn is_address_shaped(text: &str) -> bool {
        text.parse::<Address>().is_ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed address: expected `0x` followed by 40 hex digits")]
pub struct ParseAddressError;

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(ParseAddressError)?;
        if hex.len() != 2 * ADDRESS_LENGTH {
            return Err(ParseAddressError);
        }
        let bytes = HEXLOWER_PERMISSIVE
            .decode(hex.as_bytes())
            .map_err(|_| ParseAddressError)?;
        let mut address = [0; ADDRESS_LENGTH];
        address.copy_from_slice(&bytes);
        Ok(Self(address))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", HEXLOWER.encode(&self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl Address {
        pub fn example_authority() -> Self {
            "0x00000000000000000000000000000000000000aa".parse().unwrap()
        }

        pub fn example_voter1() -> Self {
            "0x0000000000000000000000000000000000000001".parse().unwrap()
        }

        pub fn example_voter2() -> Self {
            "0x0000000000000000000000000000000000000002".parse().unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        let text = "0x52908400098527886e0f7030069857d2e4169ee7";
        let address: Address = text.parse().unwrap();
        assert_eq!(address.to_string(), text);
    }

    #[test]
    fn parse_accepts_mixed_case() {
        let address: Address = "0x52908400098527886E0F7030069857D2E4169EE7".parse().unwrap();
        // Canonical form is lowercase.
        assert_eq!(
            address.to_string(),
            "0x52908400098527886e0f7030069857d2e4169ee7"
        );
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!("".parse::<Address>().is_err());
        assert!("52908400098527886e0f7030069857d2e4169ee7"
            .parse::<Address>()
            .is_err()); // Missing prefix.
        assert!("0x1234".parse::<Address>().is_err()); // Too short.
        assert!("0x52908400098527886e0f7030069857d2e4169ee712"
            .parse::<Address>()
            .is_err()); // Too long.
        assert!("0xzz908400098527886e0f7030069857d2e4169ee7"
            .parse::<Address>()
            .is_err()); // Not hex.
    }

    #[test]
    fn address_shape_detection() {
        assert!(Address::is_address_shaped(
            "0x52908400098527886e0f7030069857d2e4169ee7"
        ));
        assert!(!Address::is_address_shaped("BJP"));
        assert!(!Address::is_address_shaped("0xnot-an-address"));
    }

    #[test]
    fn serde_as_string() {
        let address = Address::example_voter1();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, "\"0x0000000000000000000000000000000000000001\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
