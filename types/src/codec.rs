//! Length-prefixed encoding helpers shared by the model types.

use bytes::{Buf, BufMut};
use commonware_codec::{Error, ReadExt, Write};

/// Writes a byte payload as a u32 length prefix followed by the raw bytes.
pub(crate) fn write_bytes(bytes: &[u8], writer: &mut impl BufMut) {
    (bytes.len() as u32).write(writer);
    writer.put_slice(bytes);
}

/// Reads a length-prefixed byte payload, bounded by `max_len`.
pub(crate) fn read_bytes(reader: &mut impl Buf, max_len: usize) -> Result<Vec<u8>, Error> {
    let len = u32::read(reader)? as usize;
    if len > max_len {
        return Err(Error::Invalid("Bytes", "too long"));
    }
    if reader.remaining() < len {
        return Err(Error::EndOfBuffer);
    }
    let mut bytes = vec![0u8; len];
    reader.copy_to_slice(&mut bytes);
    Ok(bytes)
}

pub(crate) fn bytes_encode_size(bytes: &[u8]) -> usize {
    4 + bytes.len()
}

/// Writes a string as length-prefixed UTF-8 bytes.
pub(crate) fn write_string(s: &str, writer: &mut impl BufMut) {
    write_bytes(s.as_bytes(), writer);
}

/// Reads a string from length-prefixed UTF-8 bytes, bounded by `max_len`.
pub(crate) fn read_string(reader: &mut impl Buf, max_len: usize) -> Result<String, Error> {
    let bytes = read_bytes(reader, max_len)?;
    String::from_utf8(bytes).map_err(|_| Error::Invalid("String", "invalid UTF-8"))
}

pub(crate) fn string_encode_size(s: &str) -> usize {
    bytes_encode_size(s.as_bytes())
}
