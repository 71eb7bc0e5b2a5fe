//! Encoding and decoding of fragments and bundled documents.

use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CodecError;

/// Extensions recognised for fragment files, without the dot.
pub const FRAGMENT_EXTENSIONS: [&str; 3] = ["yml", "yaml", "json"];

/// Structured text formats a fragment or bundle can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

impl Format {
    /// Pick the format from a file extension. `None` for anything other
    /// than `yml`, `yaml` or `json`.
    pub fn from_path(path: &Path) -> Option<Format> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => Some(Format::Yaml),
            Some("json") => Some(Format::Json),
            _ => None,
        }
    }
}

/// Decode one value of type `T` from a reader.
///
/// The input is read in full first, so a failing reader surfaces as
/// [`CodecError::Io`] rather than a parse error.
pub fn decode<T, R>(mut reader: R, format: Format) -> Result<T, CodecError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    let value = match format {
        Format::Yaml => serde_yaml_ng::from_slice(&buf)?,
        Format::Json => serde_json::from_slice(&buf)?,
    };
    Ok(value)
}

/// Encode `value` to a writer. JSON output is pretty-printed and ends with
/// a newline.
pub fn encode<T, W>(mut writer: W, value: &T, format: Format) -> Result<(), CodecError>
where
    T: Serialize + ?Sized,
    W: Write,
{
    match format {
        Format::Yaml => serde_yaml_ng::to_writer(&mut writer, value)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Encode `value` into an in-memory buffer.
pub fn encode_to_vec<T>(value: &T, format: Format) -> Result<Vec<u8>, CodecError>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    encode(&mut buf, value, format)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::model::{Server, Tag};

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a/b.yml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("b.yaml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("b.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("b.txt")), None);
        assert_eq!(Format::from_path(Path::new("openapi_version")), None);
    }

    #[test]
    fn test_decode_yaml_list() {
        let yaml = "- url: https://api.example.com\n  description: Production\n";
        let servers: Vec<Server> = decode(yaml.as_bytes(), Format::Yaml).unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].url, "https://api.example.com");
    }

    #[test]
    fn test_decode_json() {
        let json = r#"[{"name": "pets", "description": "Everything about pets"}]"#;
        let tags: Vec<Tag> = decode(json.as_bytes(), Format::Json).unwrap();
        assert_eq!(tags[0].name, "pets");
    }

    #[test]
    fn test_decode_type_mismatch_is_error() {
        let result: Result<Vec<Tag>, _> = decode("name: pets\n".as_bytes(), Format::Yaml);
        assert!(matches!(result, Err(CodecError::Yaml(_))));
    }

    struct FailingReader(io::ErrorKind);

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::from(self.0))
        }
    }

    #[test]
    fn test_decode_read_failure_is_io_error() {
        let result: Result<Vec<Tag>, _> =
            decode(FailingReader(io::ErrorKind::PermissionDenied), Format::Yaml);
        match result {
            Err(CodecError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            other => panic!("expected I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_omits_absent_fields() {
        let server = Server::new("https://api.example.com");
        let yaml = String::from_utf8(encode_to_vec(&server, Format::Yaml).unwrap()).unwrap();
        assert_eq!(yaml, "url: https://api.example.com\n");

        let json = String::from_utf8(encode_to_vec(&server, Format::Json).unwrap()).unwrap();
        assert_eq!(json, "{\n  \"url\": \"https://api.example.com\"\n}\n");
    }
}
