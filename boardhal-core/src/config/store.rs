//! Binary persistence of [`BoardConfig`] using postcard

use super::types::{BoardConfig, CONFIG_VERSION};

/// Upper bound on an encoded configuration
pub const MAX_ENCODED_SIZE: usize = 1024;

/// Persistence error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Buffer too small for the encoded data
    Encode,
    /// Data is not a valid configuration
    Decode,
    /// Stored layout version differs from this build
    VersionMismatch(u8),
}

/// Serialize a configuration into `buf`, returning the used prefix
pub fn encode<'a>(config: &BoardConfig, buf: &'a mut [u8]) -> Result<&'a mut [u8], StoreError> {
    let bytes = postcard::to_slice(config, buf).map_err(|_| StoreError::Encode)?;
    crate::debug!("Encoded config: {} bytes", bytes.len());
    Ok(bytes)
}

/// Deserialize a configuration, rejecting other layout versions
pub fn decode(bytes: &[u8]) -> Result<BoardConfig, StoreError> {
    let config: BoardConfig = postcard::from_bytes(bytes).map_err(|_| StoreError::Decode)?;

    if config.version != CONFIG_VERSION {
        crate::warn!(
            "Config version {} != expected {}",
            config.version,
            CONFIG_VERSION
        );
        return Err(StoreError::VersionMismatch(config.version));
    }

    Ok(config)
}
