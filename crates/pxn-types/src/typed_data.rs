//! Typed structured-data messages (EIP-712) for listing commands.
//!
//! The domain, primary type and per-command schemas below are the wire
//! contract with every signing client. Changing a field name, its order or the
//! domain invalidates all previously issued signatures.

use serde_json::{Map, Value, json};

use crate::{Command, CommandError, keccak256, parse_price};

pub const DOMAIN_NAME: &str = "PXN";
pub const DOMAIN_VERSION: &str = "test";
pub const PRIMARY_TYPE: &str = "Product";

const DOMAIN_SCHEMA: &[(&str, FieldType)] =
    &[("name", FieldType::String), ("version", FieldType::String)];

const LISTING_SCHEMA: &[(&str, FieldType)] = &[
    ("name", FieldType::String),
    ("desc", FieldType::String),
    ("image", FieldType::String),
    ("price", FieldType::Uint256),
];

const LISTING_UPDATE_SCHEMA: &[(&str, FieldType)] = &[
    ("id", FieldType::String),
    ("name", FieldType::String),
    ("desc", FieldType::String),
    ("image", FieldType::String),
    ("price", FieldType::Uint256),
];

const LISTING_ACTION_SCHEMA: &[(&str, FieldType)] =
    &[("id", FieldType::String), ("msg", FieldType::String)];

/// Application scope of every signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Domain {
    pub name: &'static str,
    pub version: &'static str,
}

impl Domain {
    pub const PXN: Self = Self {
        name: DOMAIN_NAME,
        version: DOMAIN_VERSION,
    };

    pub fn type_string() -> String {
        type_string("EIP712Domain", DOMAIN_SCHEMA)
    }

    /// `keccak256(typeHash ‖ keccak256(name) ‖ keccak256(version))`.
    pub fn separator(&self) -> [u8; 32] {
        let values = [
            FieldValue::String(self.name.to_string()),
            FieldValue::String(self.version.to_string()),
        ];
        hash_struct(&Self::type_string(), &values)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Uint256,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Uint256 => "uint256",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    String(String),
    Uint256(u64),
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::String(_) => FieldType::String,
            Self::Uint256(_) => FieldType::Uint256,
        }
    }

    /// One 32-byte word of `encodeData`.
    fn encode(&self) -> [u8; 32] {
        match self {
            Self::String(s) => keccak256(s.as_bytes()),
            Self::Uint256(v) => {
                let mut word = [0u8; 32];
                word[24..].copy_from_slice(&v.to_be_bytes());
                word
            }
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::String(s) => json!(s),
            Self::Uint256(v) => json!(v),
        }
    }
}

/// Fixed per-kind message payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    /// Signed by `CreateListing`.
    Listing {
        name: String,
        desc: String,
        image: String,
        price: u64,
    },
    /// Signed by `UpdateListing`; `id` leads so an update is bound to one listing.
    ListingUpdate {
        id: String,
        name: String,
        desc: String,
        image: String,
        price: u64,
    },
    /// Signed by `DeleteListing` and `ToggleFavorite`.
    ListingAction { id: String, msg: String },
}

impl MessageBody {
    pub fn schema(&self) -> &'static [(&'static str, FieldType)] {
        match self {
            Self::Listing { .. } => LISTING_SCHEMA,
            Self::ListingUpdate { .. } => LISTING_UPDATE_SCHEMA,
            Self::ListingAction { .. } => LISTING_ACTION_SCHEMA,
        }
    }

    /// Field values in schema order.
    pub fn values(&self) -> Vec<FieldValue> {
        match self {
            Self::Listing {
                name,
                desc,
                image,
                price,
            } => vec![
                FieldValue::String(name.clone()),
                FieldValue::String(desc.clone()),
                FieldValue::String(image.clone()),
                FieldValue::Uint256(*price),
            ],
            Self::ListingUpdate {
                id,
                name,
                desc,
                image,
                price,
            } => vec![
                FieldValue::String(id.clone()),
                FieldValue::String(name.clone()),
                FieldValue::String(desc.clone()),
                FieldValue::String(image.clone()),
                FieldValue::Uint256(*price),
            ],
            Self::ListingAction { id, msg } => vec![
                FieldValue::String(id.clone()),
                FieldValue::String(msg.clone()),
            ],
        }
    }
}

/// Domain plus typed payload; what the signer saw and what the server hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalMessage {
    domain: Domain,
    body: MessageBody,
}

impl CanonicalMessage {
    pub fn new(body: MessageBody) -> Self {
        Self {
            domain: Domain::PXN,
            body,
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn body(&self) -> &MessageBody {
        &self.body
    }

    /// The signed `uint256` price, for the kinds that carry one.
    pub fn price(&self) -> Option<u64> {
        match self.body {
            MessageBody::Listing { price, .. } | MessageBody::ListingUpdate { price, .. } => {
                Some(price)
            }
            MessageBody::ListingAction { .. } => None,
        }
    }

    /// e.g. `Product(string id,string msg)`.
    pub fn type_string(&self) -> String {
        type_string(PRIMARY_TYPE, self.body.schema())
    }

    pub fn struct_hash(&self) -> [u8; 32] {
        hash_struct(&self.type_string(), &self.body.values())
    }

    /// Pre-hash layout: `0x19 ‖ 0x01 ‖ domainSeparator ‖ hashStruct(message)`.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(66);
        out.extend_from_slice(&[0x19, 0x01]);
        out.extend_from_slice(&self.domain.separator());
        out.extend_from_slice(&self.struct_hash());
        out
    }

    /// The 32-byte digest that is signed and recovered against.
    pub fn digest(&self) -> [u8; 32] {
        keccak256(&self.encode())
    }

    /// The `eth_signTypedData_v4` document a wallet is asked to sign.
    pub fn to_json(&self) -> Value {
        let mut message = Map::new();
        for ((name, _), value) in self.body.schema().iter().zip(self.body.values()) {
            message.insert((*name).to_string(), value.to_json());
        }
        let mut types = Map::new();
        types.insert("EIP712Domain".into(), schema_json(DOMAIN_SCHEMA));
        types.insert(PRIMARY_TYPE.into(), schema_json(self.body.schema()));
        json!({
            "domain": {
                "name": self.domain.name,
                "version": self.domain.version,
            },
            "message": message,
            "primaryType": PRIMARY_TYPE,
            "types": types,
        })
    }
}

/// Build the canonical message a command's signature must cover.
///
/// Pure; fails only on malformed input (unparsable price, empty listing id).
pub fn build_message(command: &Command) -> Result<CanonicalMessage, CommandError> {
    let body = match command {
        Command::Create(c) => MessageBody::Listing {
            name: c.name.clone(),
            desc: c.description.clone(),
            image: c.image_ref.clone(),
            price: parse_price(&c.price)?,
        },
        Command::Update(c) => MessageBody::ListingUpdate {
            id: require_id(&c.id)?,
            name: c.name.clone(),
            desc: c.description.clone(),
            image: c.image_ref.clone(),
            price: parse_price(&c.price)?,
        },
        Command::Delete(c) => MessageBody::ListingAction {
            id: require_id(&c.id)?,
            msg: c.reason_message.clone(),
        },
        Command::ToggleFavorite(c) => MessageBody::ListingAction {
            id: require_id(&c.id)?,
            msg: c.reason_message.clone(),
        },
    };
    Ok(CanonicalMessage::new(body))
}

fn require_id(id: &str) -> Result<String, CommandError> {
    if id.trim().is_empty() {
        return Err(CommandError::malformed("listing id is required"));
    }
    Ok(id.to_string())
}

fn type_string(name: &str, schema: &[(&str, FieldType)]) -> String {
    let fields: Vec<String> = schema
        .iter()
        .map(|(field, ty)| format!("{} {field}", ty.as_str()))
        .collect();
    format!("{name}({})", fields.join(","))
}

fn hash_struct(type_string: &str, values: &[FieldValue]) -> [u8; 32] {
    let mut buf = Vec::with_capacity(32 * (values.len() + 1));
    buf.extend_from_slice(&keccak256(type_string.as_bytes()));
    for value in values {
        buf.extend_from_slice(&value.encode());
    }
    keccak256(&buf)
}

fn schema_json(schema: &[(&str, FieldType)]) -> Value {
    Value::Array(
        schema
            .iter()
            .map(|(name, ty)| json!({ "name": name, "type": ty.as_str() }))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CreateListing, DeleteListing, ToggleFavorite, UpdateListing};

    fn create(price: &str) -> Command {
        Command::Create(CreateListing {
            name: "ShogunSamurai".into(),
            description: "This is ShogunSamurai NFT".into(),
            image_ref: "https://example.com/a.png".into(),
            price: price.into(),
            claimed_owner: "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".into(),
            signature: String::new(),
        })
    }

    fn update(id: &str) -> Command {
        Command::Update(UpdateListing {
            id: id.into(),
            name: "ShogunSamurai".into(),
            description: "This is ShogunSamurai NFT".into(),
            image_ref: "https://example.com/a.png".into(),
            price: "10".into(),
            claimed_owner: "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".into(),
            signature: String::new(),
        })
    }

    #[test]
    fn test_type_strings() {
        assert_eq!(
            Domain::type_string(),
            "EIP712Domain(string name,string version)"
        );
        assert_eq!(
            build_message(&create("10")).unwrap().type_string(),
            "Product(string name,string desc,string image,uint256 price)"
        );
        assert_eq!(
            build_message(&update("l-1")).unwrap().type_string(),
            "Product(string id,string name,string desc,string image,uint256 price)"
        );
        let delete = Command::Delete(DeleteListing {
            id: "l-1".into(),
            reason_message: "Delete ShogunSamurai".into(),
            claimed_actor: String::new(),
            signature: String::new(),
        });
        assert_eq!(
            build_message(&delete).unwrap().type_string(),
            "Product(string id,string msg)"
        );
    }

    #[test]
    fn test_schema_matches_values() {
        for cmd in [create("1"), update("l-1")] {
            let msg = build_message(&cmd).unwrap();
            let schema = msg.body().schema();
            let values = msg.body().values();
            assert_eq!(schema.len(), values.len());
            for ((_, ty), value) in schema.iter().zip(&values) {
                assert_eq!(*ty, value.field_type());
            }
        }
    }

    #[test]
    fn test_known_digests() {
        assert_eq!(
            hex::encode(Domain::PXN.separator()),
            "f11a13e22de0ed76877b7ad64840b0782dbdb3004171cae3cc8dff0a37494006"
        );
        assert_eq!(
            hex::encode(build_message(&create("10")).unwrap().digest()),
            "45bcdea5a25c20b50a32eadb43cce0b7234e7400df21564fcc05291642c6bec0"
        );
        assert_eq!(
            hex::encode(build_message(&update("l-1")).unwrap().digest()),
            "0b8248ae1e003e39af478a719859eb2246c930720b1bb0cb0790f1d0d3f017d9"
        );
        let delete = Command::Delete(DeleteListing {
            id: "l-1".into(),
            reason_message: "Delete ShogunSamurai".into(),
            claimed_actor: String::new(),
            signature: String::new(),
        });
        assert_eq!(
            hex::encode(build_message(&delete).unwrap().digest()),
            "f9a6fd85f6258bd0d23418d04844426abba30c79ec0e2140c01366dd22401b9f"
        );
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let a = build_message(&create("10")).unwrap();
        let b = build_message(&create("10")).unwrap();
        assert_eq!(a.encode(), b.encode());
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn test_encode_layout() {
        let msg = build_message(&create("10")).unwrap();
        let encoded = msg.encode();
        assert_eq!(encoded.len(), 66);
        assert_eq!(&encoded[..2], &[0x19, 0x01]);
        assert_eq!(&encoded[2..34], &Domain::PXN.separator());
        assert_eq!(&encoded[34..], &msg.struct_hash());
    }

    #[test]
    fn test_integral_price_spellings_agree() {
        let a = build_message(&create("10")).unwrap();
        let b = build_message(&create("10.0")).unwrap();
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn test_any_field_change_changes_digest() {
        let base = build_message(&create("10")).unwrap().digest();
        assert_ne!(build_message(&create("11")).unwrap().digest(), base);

        let Command::Create(mut c) = create("10") else {
            unreachable!()
        };
        c.image_ref.push('x');
        assert_ne!(build_message(&Command::Create(c)).unwrap().digest(), base);
    }

    #[test]
    fn test_update_bound_to_listing_id() {
        let a = build_message(&update("l-1")).unwrap().digest();
        let b = build_message(&update("l-2")).unwrap().digest();
        assert_ne!(a, b);
        assert_ne!(a, build_message(&create("10")).unwrap().digest());
    }

    #[test]
    fn test_signed_price_exposed() {
        assert_eq!(build_message(&create("1e3")).unwrap().price(), Some(1000));
        assert_eq!(build_message(&update("l-1")).unwrap().price(), Some(10));
        let toggle = Command::ToggleFavorite(ToggleFavorite {
            id: "l-1".into(),
            reason_message: "Update favorite for X".into(),
            claimed_actor: String::new(),
            signature: String::new(),
        });
        assert_eq!(build_message(&toggle).unwrap().price(), None);
    }

    #[test]
    fn test_malformed_price() {
        assert!(matches!(
            build_message(&create("ten")),
            Err(CommandError::MalformedCommand(_))
        ));
    }

    #[test]
    fn test_empty_id_rejected() {
        let toggle = Command::ToggleFavorite(ToggleFavorite {
            id: " ".into(),
            reason_message: "Update favorite for X".into(),
            claimed_actor: String::new(),
            signature: String::new(),
        });
        assert!(matches!(
            build_message(&toggle),
            Err(CommandError::MalformedCommand(_))
        ));
    }

    #[test]
    fn test_wallet_document_shape() {
        let doc = build_message(&create("10")).unwrap().to_json();
        assert_eq!(doc["primaryType"], json!("Product"));
        assert_eq!(doc["domain"], json!({"name": "PXN", "version": "test"}));
        assert_eq!(doc["message"]["price"], json!(10));
        assert_eq!(
            doc["types"]["EIP712Domain"],
            json!([
                {"name": "name", "type": "string"},
                {"name": "version", "type": "string"}
            ])
        );
        let keys: Vec<&String> = doc["message"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["name", "desc", "image", "price"]);
    }
}
