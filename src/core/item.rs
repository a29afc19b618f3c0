//! Purpose: Define the cart line-item type and its stored JSON encoding.
//! Exports: `CartItem`, `encode_items`, `decode_items`.
//! Role: The one place that knows the serialized cart shape.
//! Invariants: A stored cart is a JSON array of `{name, price}` objects.
//! Invariants: Items pass through untouched; price is an opaque display string.

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, ErrorKind};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    pub price: String,
}

impl CartItem {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }
}

pub fn encode_items(items: &[CartItem]) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(items).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("cart encode failed")
            .with_source(err)
    })
}

pub fn decode_items(bytes: &[u8]) -> Result<Vec<CartItem>, Error> {
    serde_json::from_slice(bytes).map_err(|err| {
        Error::new(ErrorKind::Corrupt)
            .with_message("stored cart is not an item array")
            .with_source(err)
    })
}

#[cfg(test)]
mod tests {
    use super::{CartItem, decode_items, encode_items};
    use crate::core::error::ErrorKind;

    #[test]
    fn encode_decode_preserves_order_and_duplicates() {
        let items = vec![
            CartItem::new("Shirt", "$20"),
            CartItem::new("Hat", "$10"),
            CartItem::new("Hat", "$10"),
        ];
        let encoded = encode_items(&items).expect("encode");
        let decoded = decode_items(&encoded).expect("decode");
        assert_eq!(decoded, items);
    }

    #[test]
    fn decode_empty_array_is_empty_cart() {
        let decoded = decode_items(b"[]").expect("decode");
        assert!(decoded.is_empty());
    }

    #[test]
    fn decode_garbage_is_corrupt() {
        let err = decode_items(b"not json").expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Corrupt);
    }

    #[test]
    fn decode_wrong_shape_is_corrupt() {
        let err = decode_items(br#"{"name":"Shirt","price":"$20"}"#).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Corrupt);
    }

    #[test]
    fn price_is_passed_through_verbatim() {
        let items = vec![CartItem::new("Mystery", "not a number")];
        let encoded = encode_items(&items).expect("encode");
        let decoded = decode_items(&encoded).expect("decode");
        assert_eq!(decoded[0].price, "not a number");
    }
}
