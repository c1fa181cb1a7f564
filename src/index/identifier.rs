use crate::error::EagridError;
use crate::index::constants::IDENTIFIER_VERSION;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

const PAYLOAD_LEN: usize = 17;
const IDENTIFIER_LEN: usize = PAYLOAD_LEN + 1;

/// Generates a compact cell identifier from grid indices.
///
/// The identifier is a URL-safe Base64 string encoding an 18-byte binary structure.
///
/// # Binary Format
///
/// | Offset | Size | Field     | Description                                  |
/// |--------|------|-----------|----------------------------------------------|
/// | 0      | 1    | Version   | Identifier format version (currently 1)      |
/// | 1      | 8    | Lat index | Row index as big-endian `i64`                |
/// | 9      | 8    | Lon index | Column index as big-endian `i64`             |
/// | 17     | 1    | Checksum  | Wrapping sum of bytes 0-16 for validation    |
///
/// # Example
/// ```
/// use eagrid_rs::generate_cell_identifier;
///
/// let id = generate_cell_identifier(193_112, 25_197);
/// assert_eq!(id.len(), 24);
/// ```
pub fn generate_cell_identifier(lat_index: i64, lon_index: i64) -> String {
    let mut binary_data = Vec::with_capacity(IDENTIFIER_LEN);
    binary_data.push(IDENTIFIER_VERSION);
    binary_data.extend_from_slice(&lat_index.to_be_bytes());
    binary_data.extend_from_slice(&lon_index.to_be_bytes());

    let checksum: u8 = binary_data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    binary_data.push(checksum);

    URL_SAFE_NO_PAD.encode(&binary_data)
}

/// Decodes a cell identifier back to `(version, lat_index, lon_index)`.
///
/// # Example
/// ```
/// use eagrid_rs::{decode_cell_identifier, generate_cell_identifier};
///
/// let id = generate_cell_identifier(-12, 7);
/// let (version, lat_index, lon_index) = decode_cell_identifier(&id).unwrap();
/// assert_eq!((version, lat_index, lon_index), (1, -12, 7));
/// ```
///
/// # Errors
///
/// - [`EagridError::Base64DecodeError`] - Invalid Base64 encoding
/// - [`EagridError::InvalidIdentifierLength`] - Decoded data is not 18 bytes
/// - [`EagridError::InvalidChecksum`] - Checksum validation failed
/// - [`EagridError::UnsupportedVersion`] - Version byte doesn't match current version
pub fn decode_cell_identifier(identifier: &str) -> Result<(u8, i64, i64), EagridError> {
    let binary_data = URL_SAFE_NO_PAD
        .decode(identifier)
        .map_err(|_| EagridError::Base64DecodeError)?;

    if binary_data.len() != IDENTIFIER_LEN {
        return Err(EagridError::InvalidIdentifierLength);
    }

    let (data, checksum_bytes) = binary_data.split_at(PAYLOAD_LEN);
    let checksum = checksum_bytes[0];

    let calculated_checksum: u8 = data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    if calculated_checksum != checksum {
        return Err(EagridError::InvalidChecksum);
    }

    let version = data[0];
    if version != IDENTIFIER_VERSION {
        return Err(EagridError::UnsupportedVersion(version));
    }

    let lat_bytes: [u8; 8] = data[1..9]
        .try_into()
        .map_err(|_| EagridError::InvalidIdentifierLength)?;
    let lon_bytes: [u8; 8] = data[9..17]
        .try_into()
        .map_err(|_| EagridError::InvalidIdentifierLength)?;

    Ok((
        version,
        i64::from_be_bytes(lat_bytes),
        i64::from_be_bytes(lon_bytes),
    ))
}
