/**
 * filename: address
 * author: HAMA
 * date: 2025. 11. 12.
 * description: ALGORAND address codec and box record decoding
 **/

use data_encoding::BASE32_NOPAD;
use sha2::{Digest, Sha512_256};

use crate::types::AppError;

pub const PUBLIC_KEY_LENGTH: usize = 32;
pub const CHECKSUM_LENGTH: usize = 4;
pub const ADDRESS_LENGTH: usize = 58;
pub const BALANCE_LENGTH: usize = 8;

const APP_ID_PREFIX: &[u8] = b"appID";

fn checksum(public_key: &[u8; PUBLIC_KEY_LENGTH]) -> [u8; CHECKSUM_LENGTH] {
  let digest = Sha512_256::digest(public_key);
  let mut out = [0u8; CHECKSUM_LENGTH];
  out.copy_from_slice(&digest[digest.len() - CHECKSUM_LENGTH..]);
  out
}

/// Canonical textual form of a 32-byte key: base32 of `key || checksum`, 58 characters.
pub fn encode_address(public_key: &[u8; PUBLIC_KEY_LENGTH]) -> String {
  let mut raw = Vec::with_capacity(PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH);
  raw.extend_from_slice(public_key);
  raw.extend_from_slice(&checksum(public_key));
  BASE32_NOPAD.encode(&raw)
}

pub fn decode_address(address: &str) -> Result<[u8; PUBLIC_KEY_LENGTH], AppError> {
  if address.len() != ADDRESS_LENGTH {
    return Err(AppError::InvalidAddress(format!(
      "expected {} characters, got {}",
      ADDRESS_LENGTH,
      address.len()
    )));
  }

  let raw = BASE32_NOPAD
    .decode(address.as_bytes())
    .map_err(|e| AppError::InvalidAddress(format!("{}: {}", address, e)))?;
  if raw.len() != PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH {
    return Err(AppError::InvalidAddress(format!("{}: decoded to {} bytes", address, raw.len())));
  }

  let mut public_key = [0u8; PUBLIC_KEY_LENGTH];
  public_key.copy_from_slice(&raw[..PUBLIC_KEY_LENGTH]);
  if raw[PUBLIC_KEY_LENGTH..] != checksum(&public_key) {
    return Err(AppError::InvalidAddress(format!("{}: checksum mismatch", address)));
  }

  Ok(public_key)
}

pub fn is_valid_address(address: &str) -> bool {
  decode_address(address).is_ok()
}

/// Escrow address of an application. Pure function of the id, no network call.
pub fn application_address(app_id: u64) -> String {
  let mut hasher = Sha512_256::new();
  hasher.update(APP_ID_PREFIX);
  hasher.update(app_id.to_be_bytes());
  let digest = hasher.finalize();

  let mut public_key = [0u8; PUBLIC_KEY_LENGTH];
  public_key.copy_from_slice(&digest);
  encode_address(&public_key)
}

/// Box key → account address. Any length other than 32 is a different record type.
pub fn decode_account_key(bytes: &[u8]) -> Result<String, AppError> {
  let public_key: &[u8; PUBLIC_KEY_LENGTH] = bytes
    .try_into()
    .map_err(|_| AppError::InvalidKeyLength(bytes.len()))?;
  Ok(encode_address(public_key))
}

/// Reads exactly the first 8 bytes as a big-endian u64; trailing bytes are ignored.
pub fn decode_balance(bytes: &[u8]) -> Result<u64, AppError> {
  let head: [u8; BALANCE_LENGTH] = bytes
    .get(..BALANCE_LENGTH)
    .and_then(|head| head.try_into().ok())
    .ok_or(AppError::InvalidValueLength(bytes.len()))?;
  Ok(u64::from_be_bytes(head))
}

pub fn encode_balance(micro_units: u64) -> [u8; BALANCE_LENGTH] {
  micro_units.to_be_bytes()
}
