use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use dungeon_crawler_core::GameSnapshot;
use dungeon_crawler_system_clock::ClockConfig;
use dungeon_crawler_system_generation::GenerationConfig;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const SAVE_DOMAIN: &str = "dungeon";
const SAVE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded save payload.
pub(crate) const SAVE_HEADER: &str = "dungeon:v1";
/// Delimiter used to separate the prefix, payload and signature.
const FIELD_DELIMITER: char = ':';

/// Everything needed to rebuild a session: the generation inputs plus the
/// player summary captured when the game was saved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct SaveFile {
    /// Seed the dungeon was generated from.
    pub(crate) seed: u64,
    /// Generation parameters in effect when the game was saved.
    pub(crate) generation: GenerationConfig,
    /// Clock parameters in effect when the game was saved.
    pub(crate) clock: ClockConfig,
    /// Player summary.
    pub(crate) snapshot: GameSnapshot,
}

impl SaveFile {
    /// Encodes the save into a single signed line.
    pub(crate) fn encode(&self, key: &[u8]) -> Result<String, SaveFileError> {
        let json = serde_json::to_vec(self).map_err(SaveFileError::InvalidPayload)?;
        let body = format!("{SAVE_HEADER}:{}", STANDARD_NO_PAD.encode(json));
        let signature = sign(key, body.as_bytes())?.finalize().into_bytes();
        Ok(format!("{body}:{}", STANDARD_NO_PAD.encode(signature)))
    }

    /// Verifies the signature and decodes the save.
    pub(crate) fn decode(value: &str, key: &[u8]) -> Result<Self, SaveFileError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SaveFileError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(SaveFileError::MissingPrefix)?;
        let version = parts.next().ok_or(SaveFileError::MissingVersion)?;
        let payload = parts.next().ok_or(SaveFileError::MissingPayload)?;
        let signature = parts.next().ok_or(SaveFileError::MissingSignature)?;

        if domain != SAVE_DOMAIN {
            return Err(SaveFileError::InvalidPrefix(domain.to_owned()));
        }
        if version != SAVE_VERSION {
            return Err(SaveFileError::UnsupportedVersion(version.to_owned()));
        }

        let signature = STANDARD_NO_PAD
            .decode(signature.as_bytes())
            .map_err(SaveFileError::InvalidEncoding)?;
        let body = format!("{SAVE_HEADER}:{payload}");
        sign(key, body.as_bytes())?
            .verify_slice(&signature)
            .map_err(|_| SaveFileError::SignatureMismatch)?;

        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(SaveFileError::InvalidEncoding)?;
        serde_json::from_slice(&bytes).map_err(SaveFileError::InvalidPayload)
    }
}

fn sign(key: &[u8], body: &[u8]) -> Result<HmacSha256, SaveFileError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| SaveFileError::InvalidKey)?;
    mac.update(body);
    Ok(mac)
}

/// Errors that can occur while reading or writing save files.
#[derive(Debug, Error)]
pub(crate) enum SaveFileError {
    /// The save file was empty or contained only whitespace.
    #[error("save file was empty")]
    EmptyPayload,
    /// The prefix segment was missing.
    #[error("save file is missing the prefix")]
    MissingPrefix,
    /// The version segment was missing.
    #[error("save file is missing the version")]
    MissingVersion,
    /// The payload segment was missing.
    #[error("save file is missing the payload")]
    MissingPayload,
    /// The signature segment was missing.
    #[error("save file is missing the signature")]
    MissingSignature,
    /// The save used an unexpected prefix.
    #[error("save prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The save used an unsupported version identifier.
    #[error("save version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// A base64 segment could not be decoded.
    #[error("could not decode save segment: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The payload could not be serialised or deserialised.
    #[error("could not parse save payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
    /// The signing key was rejected by the MAC.
    #[error("signing key is not usable")]
    InvalidKey,
    /// The signature does not match the payload under the provided key.
    #[error("save file signature does not match its contents")]
    SignatureMismatch,
}
