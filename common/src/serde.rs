use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::file_format::FileFormat;

pub type Result<T> = anyhow::Result<T>;

pub fn serialize<T: Serialize>(value: &T, format: FileFormat) -> Result<String> {
    let text = match format {
        FileFormat::Yaml => serde_yml::to_string(value)?,
        FileFormat::Json => serde_json::to_string_pretty(value)?,
    };
    Ok(text)
}

pub fn deserialize<T: DeserializeOwned>(serialized: &str, format: FileFormat) -> Result<T> {
    match format {
        FileFormat::Yaml => Ok(serde_yml::from_str(serialized)?),
        FileFormat::Json => Ok(serde_json::from_str(serialized)?),
    }
}

/// Reads `path`, picking the format from its extension.
pub fn read_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = FileFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    deserialize(&text, format)
}

/// Writes `value` to `path`, picking the format from its extension.
pub fn write_file<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let format = FileFormat::from_path(path)?;
    std::fs::write(path, serialize(value, format)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Sample {
        name: String,
        value: f64,
    }

    #[test]
    fn file_round_trip_in_both_formats() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let sample = Sample {
            name: "scale".to_string(),
            value: 1.5,
        };

        for file_name in ["sample.yaml", "sample.json"] {
            let path = dir.path().join(file_name);
            write_file(&sample, &path)?;
            let loaded: Sample = read_file(&path)?;
            assert_eq!(loaded, sample, "round trip through {}", file_name);
        }

        Ok(())
    }

    #[test]
    fn unknown_extension_is_an_error() {
        let result: Result<Sample> = read_file(Path::new("sample.txt"));
        assert!(result.is_err());
    }
}
