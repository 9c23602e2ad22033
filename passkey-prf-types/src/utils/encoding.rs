//! Byte to text codecs used when byte buffers cross an interchange boundary, such as a
//! configuration file or a JSON request. None of these are part of the derivation itself.

use data_encoding::{Specification, BASE64URL, BASE64URL_NOPAD, BASE64_NOPAD};

const PADDING: char = '=';

/// Convert bytes to base64 without padding
pub fn base64(data: &[u8]) -> String {
    BASE64_NOPAD.encode(data)
}

/// Convert bytes to base64url without padding
pub fn base64url(data: &[u8]) -> String {
    BASE64URL_NOPAD.encode(data)
}

/// Try parsing from base64 with or without padding
pub fn try_from_base64(input: &str) -> Option<Vec<u8>> {
    let sane_string = input.trim_end_matches(PADDING);
    BASE64_NOPAD.decode(sane_string.as_bytes()).ok()
}

/// Try parsing from base64url with or without padding
pub fn try_from_base64url(input: &str) -> Option<Vec<u8>> {
    let specs = Specification {
        check_trailing_bits: false,
        padding: None,
        ..BASE64URL.specification()
    };
    let encoding = specs.encoding().ok()?;
    let sane_string = input.trim_end_matches(PADDING);
    encoding.decode(sane_string.as_bytes()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_and_unpadded_inputs_decode_the_same() {
        let data = [0xfb, 0xff, 0x01, 0x02];

        let padded = format!("{}==", base64(&data));
        assert_eq!(try_from_base64(&padded).as_deref(), Some(&data[..]));
        assert_eq!(try_from_base64(&base64(&data)).as_deref(), Some(&data[..]));
        assert_eq!(
            try_from_base64url(&base64url(&data)).as_deref(),
            Some(&data[..])
        );
    }

    #[test]
    fn alphabets_are_not_mixed() {
        // '-' and '_' only exist in the url safe alphabet
        assert!(try_from_base64("-_8").is_none());
        assert!(try_from_base64url("+/8").is_none());
    }
}
