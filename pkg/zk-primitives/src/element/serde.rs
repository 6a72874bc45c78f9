use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Element;

/// Elements are serialized as decimal strings, matching snarkjs
impl Serialize for Element {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Element::from_dec_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use test_strategy::proptest;

    use crate::Element;

    #[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
    struct Example {
        element: Element,
    }

    #[proptest]
    fn element_serialize_bijection(element: Element) {
        let value = serde_json::to_value(element).unwrap();
        let element_again: Element = serde_json::from_value(value).unwrap();

        assert_eq!(element, element_again);
    }

    #[test]
    fn serializes_as_decimal_string() {
        let example = Example {
            element: Element::new(1234),
        };

        let json = serde_json::to_string(&example).unwrap();
        assert_eq!(json, r#"{"element":"1234"}"#);
    }

    #[test]
    fn rejects_out_of_field_values() {
        let json = format!(r#"{{"element":"{}"}}"#, Element::MODULUS);
        assert!(serde_json::from_str::<Example>(&json).is_err());
    }
}
