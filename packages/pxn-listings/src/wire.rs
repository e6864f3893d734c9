//! JSON request bodies for `/listings` and their decoding into [`Command`]s.
//!
//! Field names match the browser client: `desc`, `image`, `creator` for the
//! listing payload and `msg`, `address` for delete/favorite actions.

use pxn_types::{Command, CommandError, CreateListing, DeleteListing, ToggleFavorite, UpdateListing};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `POST /listings`.
#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub name: String,
    pub desc: String,
    pub image: String,
    #[serde(deserialize_with = "price_text")]
    pub price: String,
    pub creator: String,
    pub signature: String,
}

/// `PUT /listings` without `isFavorite`.
#[derive(Debug, Deserialize)]
pub struct UpdateListingRequest {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub image: String,
    #[serde(deserialize_with = "price_text")]
    pub price: String,
    pub creator: String,
    pub signature: String,
}

/// `DELETE /listings` and `PUT /listings` with `isFavorite: true`.
#[derive(Debug, Deserialize)]
pub struct ListingActionRequest {
    pub id: String,
    pub msg: String,
    pub address: String,
    pub signature: String,
}

impl From<CreateListingRequest> for Command {
    fn from(r: CreateListingRequest) -> Self {
        Command::Create(CreateListing {
            name: r.name,
            description: r.desc,
            image_ref: r.image,
            price: r.price,
            claimed_owner: r.creator,
            signature: r.signature,
        })
    }
}

impl From<UpdateListingRequest> for Command {
    fn from(r: UpdateListingRequest) -> Self {
        Command::Update(UpdateListing {
            id: r.id,
            name: r.name,
            description: r.desc,
            image_ref: r.image,
            price: r.price,
            claimed_owner: r.creator,
            signature: r.signature,
        })
    }
}

pub fn decode_create(body: &[u8]) -> Result<Command, CommandError> {
    Ok(from_body::<CreateListingRequest>(parse_body(body)?)?.into())
}

/// `isFavorite: true` selects a favorite toggle, anything else an update.
pub fn decode_put(body: &[u8]) -> Result<Command, CommandError> {
    let value = parse_body(body)?;
    let is_favorite = value
        .get("isFavorite")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if is_favorite {
        let r: ListingActionRequest = from_body(value)?;
        Ok(Command::ToggleFavorite(ToggleFavorite {
            id: r.id,
            reason_message: r.msg,
            claimed_actor: r.address,
            signature: r.signature,
        }))
    } else {
        Ok(from_body::<UpdateListingRequest>(value)?.into())
    }
}

pub fn decode_delete(body: &[u8]) -> Result<Command, CommandError> {
    let r: ListingActionRequest = from_body(parse_body(body)?)?;
    Ok(Command::Delete(DeleteListing {
        id: r.id,
        reason_message: r.msg,
        claimed_actor: r.address,
        signature: r.signature,
    }))
}

fn parse_body(body: &[u8]) -> Result<Value, CommandError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| CommandError::malformed(format!("invalid JSON body: {e}")))?;
    if !value.is_object() {
        return Err(CommandError::malformed("request must be a JSON object"));
    }
    Ok(value)
}

fn from_body<T: for<'de> Deserialize<'de>>(value: Value) -> Result<T, CommandError> {
    serde_json::from_value(value).map_err(|e| CommandError::malformed(e.to_string()))
}

/// Price arrives as a JSON number from wallets and as a string from forms.
fn price_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "price must be a number or numeric string, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pxn_types::CommandKind;
    use serde_json::json;

    fn bytes(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn test_create_accepts_numeric_price() {
        let body = bytes(json!({
            "name": "n", "desc": "d", "image": "i", "price": 10,
            "creator": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "signature": "0x"
        }));
        let Command::Create(c) = decode_create(&body).unwrap() else {
            panic!("expected create")
        };
        assert_eq!(c.price, "10");
        assert_eq!(c.description, "d");
        assert_eq!(c.image_ref, "i");
    }

    #[test]
    fn test_create_keeps_string_price_raw() {
        let body = bytes(json!({
            "name": "n", "desc": "d", "image": "i", "price": "abc",
            "creator": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "signature": "0x"
        }));
        let Command::Create(c) = decode_create(&body).unwrap() else {
            panic!("expected create")
        };
        assert_eq!(c.price, "abc");
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let body = bytes(json!({"name": "n", "desc": "d", "image": "i", "price": 1}));
        let err = decode_create(&body).unwrap_err();
        assert!(matches!(err, CommandError::MalformedCommand(ref m) if m.contains("creator")));
    }

    #[test]
    fn test_non_object_body() {
        assert!(decode_delete(b"[1,2]").is_err());
        assert!(decode_delete(b"{not json").is_err());
        assert!(decode_delete(b"").is_err());
    }

    #[test]
    fn test_put_dispatch() {
        let toggle = bytes(json!({
            "isFavorite": true, "id": "l-1", "msg": "Update favorite for n",
            "address": "0xcccccccccccccccccccccccccccccccccccccccc", "signature": "0x"
        }));
        assert_eq!(decode_put(&toggle).unwrap().kind(), CommandKind::ToggleFavorite);

        let update = bytes(json!({
            "isFavorite": false, "id": "l-1", "name": "n", "desc": "d", "image": "i",
            "price": "20", "creator": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "signature": "0x"
        }));
        assert_eq!(decode_put(&update).unwrap().kind(), CommandKind::Update);
    }

    #[test]
    fn test_price_must_be_scalar() {
        let body = bytes(json!({
            "name": "n", "desc": "d", "image": "i", "price": [1],
            "creator": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "signature": "0x"
        }));
        assert!(matches!(
            decode_create(&body),
            Err(CommandError::MalformedCommand(_))
        ));
    }
}
