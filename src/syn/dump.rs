//! Best effort JSON rendering of decoded values for logs and diagnostics. This is not a wire
//! format and there is no way back.

use serde::Serialize;
use serde_json::Value;

/// `Value::Null` if `value` cannot be rendered.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(&to_json(value)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syn::bitstring::BitString;
    use crate::syn::extension::ExtensionGroups;
    use crate::syn::octetstring::OctetString;
    use serde_json::json;
    use std::str::FromStr;

    #[derive(Serialize)]
    struct Setup {
        id: u32,
        mask: BitString,
        payload: OctetString,
        groups: ExtensionGroups,
    }

    #[test]
    fn test_value_types_render_as_text() {
        let mut groups = ExtensionGroups::new(1);
        groups.set_present(0, true);
        let value = Setup {
            id: 7,
            mask: BitString::from_str("1011").unwrap(),
            payload: OctetString::new(vec![0xDE, 0xAD]),
            groups,
        };
        assert_eq!(
            json!({
                "id": 7,
                "mask": "1011",
                "payload": "dead",
                "groups": { "present": [true] },
            }),
            to_json(&value)
        );
        assert!(to_json_pretty(&value).contains("\"mask\": \"1011\""));
    }
}
