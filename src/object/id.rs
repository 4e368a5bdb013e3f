use std::fmt::{self, Write};
use std::str::FromStr;

use sha1::{Digest, Sha1};
use thiserror::Error;

use super::Kind;

/// An error which can be returned when parsing an object ID.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseIdError {
    /// Value being parsed is empty.
    #[error("cannot parse object ID from empty string")]
    Empty,

    /// Contains an invalid digit.
    ///
    /// Among other causes, this variant will be constructed when parsing a string that
    /// contains an uppercase letter.
    #[error("value contains invalid digit `{0}`")]
    InvalidDigit(char),

    /// ID string is too large to store in target integer type.
    #[error("value is more than 40 digits long")]
    Overflow,

    /// ID string is too small to store in target integer type.
    #[error("value is less than 40 digits long")]
    Underflow,
}

/// An object ID is the address of an object within a repository.
/// It is the 20-byte SHA-1 digest of the object's tagged content,
/// and is usually represented as 40 lowercase hex digits.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Id {
    id: [u8; 20],
}

impl Id {
    /// Create a new ID from a 20-byte slice.
    ///
    /// It is an error if the slice contains anything other than 20 bytes.
    pub fn new(id: &[u8]) -> Result<Id, ParseIdError> {
        match id.len() {
            20 => {
                let mut bytes = [0u8; 20];
                bytes.copy_from_slice(id);
                Ok(Id { id: bytes })
            }
            0 => Err(ParseIdError::Empty),
            n if n < 20 => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    /// Compute the ID for `payload` stored as an object of kind `kind`.
    ///
    /// The digest covers the kind tag, a single NUL byte, and the payload.
    pub fn for_content(kind: Kind, payload: &[u8]) -> Id {
        let mut hasher = Sha1::new();

        hasher.update(kind.as_str());
        hasher.update(b"\0");
        hasher.update(payload);

        let mut id = [0u8; 20];
        id.copy_from_slice(hasher.finalize().as_slice());
        Id { id }
    }

    /// Convert a 40-character hex ID to an object ID.
    ///
    /// It is an error if the ID contains anything other than 40 lowercase hex digits.
    pub fn from_hex<T: AsRef<[u8]>>(id: T) -> Result<Id, ParseIdError> {
        let hex = id.as_ref();

        match hex.len() {
            40 => {
                let mut id = [0u8; 20];
                for (byte, pair) in id.iter_mut().zip(hex.chunks(2)) {
                    *byte = digit_value(pair[0])? << 4 | digit_value(pair[1])?;
                }
                Ok(Id { id })
            }
            0 => Err(ParseIdError::Empty),
            n if n < 40 => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    /// Returns true if `s` looks like a full object ID (40 hex digits).
    pub fn is_hex_id(s: &str) -> bool {
        s.len() == 40 && s.bytes().all(|c| c.is_ascii_hexdigit())
    }

    /// Return the raw 20-byte digest.
    pub fn as_bytes(&self) -> &[u8] {
        &self.id
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::from_hex(s.as_bytes())
    }
}

static CHARS: &[u8] = b"0123456789abcdef";

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.id.iter() {
            f.write_char(CHARS[(byte >> 4) as usize].into())?;
            f.write_char(CHARS[(byte & 0xf) as usize].into())?;
        }

        Ok(())
    }
}

fn digit_value(c: u8) -> Result<u8, ParseIdError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        _ => Err(ParseIdError::InvalidDigit(c as char)),
    }
}
