//! Serde helpers for the backend's flag encodings

/// Boolean carried as the strings `"0"` / `"1"`
pub mod string_flag {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "1" } else { "0" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Str(String),
            Int(i64),
            Bool(bool),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Str(s) => match s.as_str() {
                "1" | "true" => Ok(true),
                "0" | "false" | "" => Ok(false),
                other => Err(de::Error::custom(format!("invalid flag: {other}"))),
            },
            Raw::Int(i) => Ok(i != 0),
            Raw::Bool(b) => Ok(b),
        }
    }
}

/// Boolean carried as the integers `0` / `1`
pub mod int_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Bool(bool),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(i) => i != 0,
            Raw::Bool(b) => b,
        })
    }
}
