//! Texture and model assets
//!
//! Only the container signature is checked; pixel and mesh data are kept as
//! raw bytes for the renderer.

use std::fs;
use std::path::Path;

use crate::asset_cache::{Asset, AssetCache, AssetHandle};
use crate::asset_error::AssetError;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];
const HDR_SIGNATURES: [&[u8]; 2] = [b"#?RADIANCE", b"#?RGBE"];
const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_VERSION: u32 = 2;
const GLB_HEADER_LEN: usize = 12;

/// Image container of a texture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureFormat {
    Png,
    Jpeg,
    /// Radiance RGBE, used for environment maps
    Hdr,
}

impl TextureFormat {
    /// Detect the format from the leading bytes
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&PNG_SIGNATURE) {
            Some(TextureFormat::Png)
        } else if bytes.starts_with(&JPEG_SIGNATURE) {
            Some(TextureFormat::Jpeg)
        } else if HDR_SIGNATURES.iter().any(|sig| bytes.starts_with(sig)) {
            Some(TextureFormat::Hdr)
        } else {
            None
        }
    }
}

/// An encoded image
#[derive(Clone, Debug, PartialEq)]
pub struct TextureAsset {
    pub format: TextureFormat,
    pub bytes: Vec<u8>,
}

impl TextureAsset {
    /// Validate `bytes` as a supported image container
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, AssetError> {
        let format = TextureFormat::detect(&bytes)
            .ok_or_else(|| AssetError::Parse("unrecognized image signature".to_string()))?;
        Ok(Self { format, bytes })
    }
}

impl Asset for TextureAsset {
    fn load_from_file(path: &Path) -> Result<Self, AssetError> {
        Self::from_bytes(fs::read(path)?)
    }
}

/// A binary glTF model
#[derive(Clone, Debug, PartialEq)]
pub struct ModelAsset {
    /// Length declared in the GLB header
    pub declared_length: u32,
    pub bytes: Vec<u8>,
}

impl ModelAsset {
    /// Validate the 12-byte GLB header of `bytes`
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, AssetError> {
        if bytes.len() < GLB_HEADER_LEN || &bytes[0..4] != GLB_MAGIC {
            return Err(AssetError::Parse("missing glTF binary header".to_string()));
        }

        let version = read_u32_le(&bytes[4..8]);
        if version != GLB_VERSION {
            return Err(AssetError::Parse(format!("unsupported glTF version {}", version)));
        }

        let declared_length = read_u32_le(&bytes[8..12]);
        if declared_length as usize > bytes.len() {
            return Err(AssetError::Parse(format!(
                "glTF header declares {} bytes but file has {}",
                declared_length,
                bytes.len()
            )));
        }

        Ok(Self { declared_length, bytes })
    }
}

impl Asset for ModelAsset {
    fn load_from_file(path: &Path) -> Result<Self, AssetError> {
        Self::from_bytes(fs::read(path)?)
    }
}

fn read_u32_le(bytes: &[u8]) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[..4]);
    u32::from_le_bytes(word)
}

/// Which kind of asset a path is expected to hold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Texture,
    Model,
}

impl AssetKind {
    /// Read and validate the file at `path` as this kind
    pub fn load(self, path: &Path) -> Result<LoadedAsset, AssetError> {
        match self {
            AssetKind::Texture => TextureAsset::load_from_file(path).map(LoadedAsset::Texture),
            AssetKind::Model => ModelAsset::load_from_file(path).map(LoadedAsset::Model),
        }
    }
}

/// A decoded asset of either kind
#[derive(Clone, Debug, PartialEq)]
pub enum LoadedAsset {
    Texture(TextureAsset),
    Model(ModelAsset),
}

impl LoadedAsset {
    pub fn kind(&self) -> AssetKind {
        match self {
            LoadedAsset::Texture(_) => AssetKind::Texture,
            LoadedAsset::Model(_) => AssetKind::Model,
        }
    }

    /// Store the asset in `cache` under `path`
    pub fn insert_into(self, cache: &mut AssetCache, path: &Path) -> AssetHandle {
        match self {
            LoadedAsset::Texture(texture) => cache.insert(path, texture),
            LoadedAsset::Model(model) => cache.insert(path, model),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glb(version: u32, declared: u32, total: usize) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(total);
        bytes.extend_from_slice(b"glTF");
        bytes.extend_from_slice(&version.to_le_bytes());
        bytes.extend_from_slice(&declared.to_le_bytes());
        bytes.resize(total, 0);
        bytes
    }

    #[test]
    fn test_detect_texture_formats() {
        let mut png = PNG_SIGNATURE.to_vec();
        png.extend_from_slice(&[0, 0, 0, 13]);
        assert_eq!(TextureFormat::detect(&png), Some(TextureFormat::Png));
        assert_eq!(TextureFormat::detect(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(TextureFormat::Jpeg));
        assert_eq!(TextureFormat::detect(b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n"), Some(TextureFormat::Hdr));
        assert_eq!(TextureFormat::detect(b"#?RGBE\n"), Some(TextureFormat::Hdr));
        assert_eq!(TextureFormat::detect(b"GIF89a"), None);
        assert_eq!(TextureFormat::detect(&[]), None);
    }

    #[test]
    fn test_texture_rejects_unknown_bytes() {
        let err = TextureAsset::from_bytes(b"plain text".to_vec()).unwrap_err();
        assert!(matches!(err, AssetError::Parse(_)));
    }

    #[test]
    fn test_model_accepts_valid_header() {
        let model = ModelAsset::from_bytes(glb(2, 20, 20)).unwrap();
        assert_eq!(model.declared_length, 20);
        assert_eq!(model.bytes.len(), 20);
    }

    #[test]
    fn test_model_rejects_bad_headers() {
        assert!(ModelAsset::from_bytes(b"glTF".to_vec()).is_err());
        assert!(ModelAsset::from_bytes(glb(1, 12, 12)).is_err());
        assert!(ModelAsset::from_bytes(glb(2, 64, 16)).is_err());

        let mut wrong_magic = glb(2, 12, 12);
        wrong_magic[0] = b'x';
        assert!(ModelAsset::from_bytes(wrong_magic).is_err());
    }

    #[test]
    fn test_kind_load_missing_file_is_io_error() {
        let err = AssetKind::Texture
            .load(Path::new("/nonexistent/blplanet/earth.png"))
            .unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }

    #[test]
    fn test_loaded_asset_kind_and_insert() {
        let mut cache = AssetCache::new();
        let loaded = LoadedAsset::Model(ModelAsset::from_bytes(glb(2, 12, 12)).unwrap());
        assert_eq!(loaded.kind(), AssetKind::Model);

        let handle = loaded.insert_into(&mut cache, Path::new("models/board.glb"));
        assert!(cache.get::<ModelAsset>(&handle).is_some());
        assert!(cache.get::<TextureAsset>(&handle).is_none());
    }
}
