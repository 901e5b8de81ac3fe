//! This module provides custom serde implementations.

/// Serialize bytes as a standard base64 string.
pub mod base64 {
    use base64::prelude::*;
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Implements the serde `serialize` function for bytes.
    /// # Errors
    /// Returns an error if the serializer fails.
    pub fn serialize<S, T: AsRef<[u8]>>(data: T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&BASE64_STANDARD.encode(data))
    }

    /// Implements the serde `deserialize` function for bytes.
    /// # Errors
    /// Returns an error if the input is not valid base64.
    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<Vec<u8>>,
    {
        let s = String::deserialize(deserializer)?;
        let decoded = BASE64_STANDARD
            .decode(s.as_bytes())
            .map_err(de::Error::custom)?;
        T::try_from(decoded).map_err(|_| de::Error::custom("Invalid base64 data"))
    }

    /// Serialize a list of byte strings as a list of base64 strings.
    pub mod vec {
        use base64::prelude::*;
        use serde::{de, Deserialize, Deserializer, Serializer};

        /// Implements the serde `serialize` function for a list of byte strings.
        /// # Errors
        /// Returns an error if the serializer fails.
        pub fn serialize<S: Serializer, T: AsRef<[u8]>>(
            #[allow(clippy::ptr_arg)] // required by serde
            bytes: &Vec<T>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(bytes.iter().map(|b| BASE64_STANDARD.encode(b)))
        }

        /// Implements the serde `deserialize` function for a list of byte strings.
        /// # Errors
        /// Returns an error if any element is not valid base64.
        pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
        where
            D: Deserializer<'de>,
            T: TryFrom<Vec<u8>>,
        {
            let vec = Vec::<String>::deserialize(deserializer)?;
            vec.into_iter()
                .map(|s| {
                    let decoded = BASE64_STANDARD
                        .decode(s.as_bytes())
                        .map_err(de::Error::custom)?;
                    T::try_from(decoded).map_err(|_| de::Error::custom("Invalid base64 data"))
                })
                .collect()
        }
    }
}
