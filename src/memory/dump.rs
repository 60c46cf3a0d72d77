// Thu Feb 05 2026 - Alex

use crate::memory::{
    EqEntry, HashSlot, ImageArrays, ImageBounds, IndexedArray, MemNode, MemoryError,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// JSON form of an engine image, captured once and replayed offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDump {
    pub hash_origin: i32,
    pub hash: Vec<HashSlot>,
    pub str_start: Vec<i32>,
    #[serde(with = "pool_bytes")]
    pub str_pool: Vec<u8>,
    pub eqtb_origin: i32,
    pub eqtb: Vec<EqEntry>,
    pub mem_origin: i32,
    pub mem: Vec<MemNode>,
    pub bounds: ImageBounds,
}

impl ImageDump {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MemoryError> {
        let file = File::open(path.as_ref())?;
        let dump = serde_json::from_reader(BufReader::new(file))?;
        Ok(dump)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), MemoryError> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, MemoryError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, MemoryError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_arrays(image: &ImageArrays) -> Self {
        use crate::memory::ImageReader;

        Self {
            hash_origin: image.hash().origin(),
            hash: image.hash().items().to_vec(),
            str_start: image.str_start_table().to_vec(),
            str_pool: image.str_pool_bytes().to_vec(),
            eqtb_origin: image.eqtb().origin(),
            eqtb: image.eqtb().items().to_vec(),
            mem_origin: image.mem().origin(),
            mem: image.mem().items().to_vec(),
            bounds: image.bounds(),
        }
    }

    pub fn into_arrays(self) -> ImageArrays {
        ImageArrays::new(
            IndexedArray::new(self.hash_origin, self.hash),
            self.str_start,
            self.str_pool,
            IndexedArray::new(self.eqtb_origin, self.eqtb),
            IndexedArray::new(self.mem_origin, self.mem),
            self.bounds,
        )
    }
}

/// The pool is stored as a Latin-1 string so dumps stay readable.
mod pool_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let text: String = bytes.iter().map(|&b| char::from(b)).collect();
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.chars()
            .map(|ch| {
                u8::try_from(u32::from(ch)).map_err(|_| {
                    serde::de::Error::custom(format!("pool character {:?} outside Latin-1", ch))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{ImageBuilder, ImageReader};

    #[test]
    fn test_dump_preserves_image() {
        let mut builder = ImageBuilder::new();
        builder.define_macro("newcommand", 2);
        builder.define_bytes(b"caf\xe9", 111, 0);
        let image = builder.build();

        let json = ImageDump::from_arrays(&image).to_json().unwrap();
        let replayed = ImageDump::from_json(&json).unwrap().into_arrays();
        assert_eq!(replayed, image);
        assert_eq!(replayed.bounds(), image.bounds());
    }

    #[test]
    fn test_pool_rejects_wide_characters() {
        let json = r#"{"hash_origin":514,"hash":[],"str_start":[0],"str_pool":"ā",
            "eqtb_origin":514,"eqtb":[],"mem_origin":0,"mem":[],
            "bounds":{"slot_top":513,"next_free_string":0,"arena_min":0,"arena_max":-1}}"#;
        assert!(matches!(
            ImageDump::from_json(json),
            Err(MemoryError::DumpParse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageDump::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, MemoryError::Io(_)));
    }
}
