use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::file_format::FileFormat;

pub type Result<T> = anyhow::Result<T>;

pub fn serialize<T: Serialize>(value: &T, format: FileFormat) -> Result<Vec<u8>> {
    let text = match format {
        FileFormat::Toml => toml::to_string_pretty(value)?,
        FileFormat::Yaml => serde_yml::to_string(value)?,
        FileFormat::Json => serde_json::to_string_pretty(value)?,
    };

    Ok(text.into_bytes())
}

pub fn deserialize<T: DeserializeOwned>(serialized: &[u8], format: FileFormat) -> Result<T> {
    let text = std::str::from_utf8(serialized)?;

    match format {
        FileFormat::Toml => Ok(toml::from_str(text)?),
        FileFormat::Yaml => Ok(serde_yml::from_str(text)?),
        FileFormat::Json => Ok(serde_json::from_str(text)?),
    }
}

/// Reads a file and deserializes it using the format implied by its extension.
pub fn load_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let format = FileFormat::from_file_name(path)?;
    let serialized = std::fs::read(path)?;

    deserialize(&serialized, format)
}

/// Serializes `value` using the format implied by the extension of `path`.
pub fn save_file<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = FileFormat::from_file_name(path)?;
    let serialized = serialize(value, format)?;
    std::fs::write(path, serialized)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Site {
        name: String,
        latitude: f64,
        longitude: f64,
        pivot: Option<(i32, i32)>,
    }

    fn site() -> Site {
        Site {
            name: "Acadia".to_string(),
            latitude: 44.5,
            longitude: -69.0,
            pivot: Some((512, -20)),
        }
    }

    #[test]
    fn roundtrip_all_formats() {
        for format in FileFormat::all_formats_for_testing() {
            let bytes = serialize(&site(), format).unwrap();
            let restored: Site = deserialize(&bytes, format).unwrap();
            assert_eq!(restored, site(), "format {:?}", format);
        }
    }

    #[test]
    fn deserialize_reports_malformed_input() {
        let result: Result<Site> = deserialize(b"latitude = [", FileFormat::Toml);
        assert!(result.is_err());
    }

    #[test]
    fn save_and_load_file_by_extension() {
        let path = crate::test_utils::test_output_path("common_site.yaml");
        save_file(&site(), &path).unwrap();

        let restored: Site = load_file(&path).unwrap();
        assert_eq!(restored, site());
    }
}
