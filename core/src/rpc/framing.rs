// core/src/rpc/framing.rs
use crate::error::CommunicationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

/// Upper bound on a length-prefixed reply (10 MiB).
pub const MAX_REPLY_LEN: u32 = 10 * 1024 * 1024;

/// How message boundaries are marked on the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framing {
    /// `u32` little-endian length, then the payload. Used in both directions.
    #[default]
    LengthPrefixed,
    /// Unframed request; the reply runs until the player closes the stream.
    Eof,
}

impl fmt::Display for Framing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Framing::LengthPrefixed => f.write_str("length-prefixed"),
            Framing::Eof => f.write_str("eof"),
        }
    }
}

impl FromStr for Framing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "length-prefixed" => Ok(Framing::LengthPrefixed),
            "eof" => Ok(Framing::Eof),
            other => Err(format!(
                "unknown framing '{}', expected 'length-prefixed' or 'eof'",
                other
            )),
        }
    }
}

/// Writes one message and flushes.
pub fn write_message<W: Write>(
    writer: &mut W,
    framing: Framing,
    payload: &[u8],
) -> Result<(), CommunicationError> {
    if framing == Framing::LengthPrefixed {
        let len = u32::try_from(payload.len())
            .map_err(|_| CommunicationError::RequestTooLarge(payload.len()))?;
        writer.write_all(&len.to_le_bytes())?;
    }
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(())
}

/// Reads one message.
pub fn read_message<R: Read>(
    reader: &mut R,
    framing: Framing,
) -> Result<Vec<u8>, CommunicationError> {
    match framing {
        Framing::LengthPrefixed => {
            let mut len_bytes = [0u8; 4];
            reader.read_exact(&mut len_bytes)?;
            let len = u32::from_le_bytes(len_bytes);
            if len > MAX_REPLY_LEN {
                return Err(CommunicationError::FrameTooLarge(len));
            }

            let mut buf = vec![0u8; len as usize];
            reader.read_exact(&mut buf)?;
            Ok(buf)
        }
        Framing::Eof => {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}
