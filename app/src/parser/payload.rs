use nom::bytes::complete::{take, take_till};

use crate::constants::{TO_SIGN_SIZE, TX_TAG_LEN};
use crate::AppSW;

/// Arbitrary-sign payload as laid out in the transaction buffer:
/// `TX | to_sign | domain | 0x00 | json`
#[cfg_attr(test, derive(Debug))]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ArbitraryPayload<'a> {
    pub to_sign: &'a [u8],
    pub domain: &'a [u8],
    pub json: &'a [u8],
}

impl<'a> ArbitraryPayload<'a> {
    pub const fn empty() -> Self {
        ArbitraryPayload {
            to_sign: &[],
            domain: &[],
            json: &[],
        }
    }
}

/// Transaction bytes handed to the structured parser, the 'TX' tag skipped.
pub fn split_transaction(buffer: &[u8]) -> &[u8] {
    buffer.get(TX_TAG_LEN..).unwrap_or(&[])
}

/// Splits an arbitrary-sign payload.
///
/// The domain runs up to the first NUL after the digests. The json object
/// starts right after that NUL and ends at the next NUL or at the end of the
/// buffer. A missing NUL leaves the json region empty.
#[inline(never)]
pub fn split_arbitrary(buffer: &[u8]) -> Result<ArbitraryPayload<'_>, AppSW> {
    let (rem, _tag) = take::<_, _, AppSW>(TX_TAG_LEN)(buffer)?;
    let (rem, to_sign) = take::<_, _, AppSW>(TO_SIGN_SIZE)(rem)?;
    let (rem, domain) = take_till::<_, _, AppSW>(|c| c == 0)(rem)?;

    let json = rem.get(1..).unwrap_or(&[]);
    let json = json.split(|&c| c == 0).next().unwrap_or(json);

    Ok(ArbitraryPayload {
        to_sign,
        domain,
        json,
    })
}

#[cfg(test)]
mod payload_test {
    use super::*;
    use std::vec::Vec;

    // sha256 of the empty string and of "abc"
    const TO_SIGN_HEX: &str = concat!(
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
    );

    fn payload(domain: &str, json: &str) -> Vec<u8> {
        let mut data = b"TX".to_vec();
        data.extend_from_slice(&hex::decode(TO_SIGN_HEX).unwrap());
        data.extend_from_slice(domain.as_bytes());
        data.push(0);
        data.extend_from_slice(json.as_bytes());
        data
    }

    #[test]
    fn split_domain_and_json() {
        let data = payload("arc60.io", r#"{"type":"arc60.create"}"#);
        let parsed = split_arbitrary(&data).unwrap();

        assert_eq!(parsed.to_sign.len(), TO_SIGN_SIZE);
        assert_eq!(hex::encode(parsed.to_sign), TO_SIGN_HEX);
        assert_eq!(parsed.domain, b"arc60.io");
        assert_eq!(parsed.json, br#"{"type":"arc60.create"}"#);
    }

    #[test]
    fn json_stops_at_nul() {
        let mut data = payload("a.io", r#"{"a":1}"#);
        data.extend_from_slice(b"\0garbage");

        let parsed = split_arbitrary(&data).unwrap();
        assert_eq!(parsed.json, br#"{"a":1}"#);
    }

    #[test]
    fn missing_nul_leaves_json_empty() {
        let mut data = b"TX".to_vec();
        data.extend_from_slice(&[0u8; TO_SIGN_SIZE]);
        data.extend_from_slice(b"no-terminator");

        let parsed = split_arbitrary(&data).unwrap();
        assert_eq!(parsed.domain, b"no-terminator");
        assert!(parsed.json.is_empty());
    }

    #[test]
    fn short_buffer_is_out_of_bounds() {
        let data = [b'T', b'X', 1, 2, 3];
        assert_eq!(split_arbitrary(&data), Err(AppSW::BufferOutOfBounds));
    }

    #[test]
    fn transaction_skips_tag() {
        assert_eq!(split_transaction(b"TX\x81\xa3"), b"\x81\xa3");
        assert!(split_transaction(b"T").is_empty());
        assert!(split_transaction(b"").is_empty());
    }
}
