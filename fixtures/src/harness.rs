//! Encode, render and write fixtures.

use crate::{tables, Config, Error};
use amino_codec::{util::hex, varint::SVar, Encode, EncodeExt, Registry};
use amino_cryptography::PublicKey;
use amino_types::canonicalize;
use serde::Serialize;
use std::{
    fmt, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// A value paired with its canonical encoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Fixture<V> {
    pub value: V,
    pub encoding: String,
}

impl<V> Fixture<V> {
    /// Pairs a value with an encoding (rendered as lowercase hexadecimal).
    pub fn new(value: V, encoding: &[u8]) -> Self {
        Self {
            value,
            encoding: hex(encoding),
        }
    }

    /// Pairs a value with its own bare encoding.
    pub fn encode<Cx>(value: V, cx: &Cx) -> Self
    where
        V: Encode<Cx>,
    {
        let encoding = value.encode_cx(cx);
        Self::new(value, &encoding)
    }
}

/// A kind of record with its own fixture file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Version,
    Varint,
    Vote,
    Time,
    BlockId,
    PubKey,
    ValidatorHashInput,
}

impl Category {
    /// Every category, in generation order.
    pub const ALL: [Category; 7] = [
        Category::Version,
        Category::Varint,
        Category::Vote,
        Category::Time,
        Category::BlockId,
        Category::PubKey,
        Category::ValidatorHashInput,
    ];

    /// Returns the name of the category's fixture file.
    pub fn file(&self) -> &'static str {
        match self {
            Category::Version => "version.json",
            Category::Varint => "varint.json",
            Category::Vote => "vote.json",
            Category::Time => "time.json",
            Category::BlockId => "block_id.json",
            Category::PubKey => "pubkey.json",
            Category::ValidatorHashInput => "validator_hash_input.json",
        }
    }

    /// Returns the path of the category's fixture file in `dir`.
    pub fn path(&self, dir: &Path) -> PathBuf {
        dir.join(self.file())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Version => "version",
            Category::Varint => "varint",
            Category::Vote => "vote",
            Category::Time => "time",
            Category::BlockId => "block_id",
            Category::PubKey => "pubkey",
            Category::ValidatorHashInput => "validator_hash_input",
        };
        f.write_str(name)
    }
}

fn to_json<T: Serialize + ?Sized>(category: Category, value: &T) -> Result<String, Error> {
    serde_json::to_string_pretty(value).map_err(|source| Error::Render { category, source })
}

/// Renders the fixture file of a category.
///
/// Nothing is written: the returned string is the complete contents of the file.
pub fn render(
    category: Category,
    config: &Config,
    registry: &Registry<PublicKey>,
) -> Result<String, Error> {
    match category {
        Category::Version => {
            let fixtures: Vec<_> = tables::versions()
                .into_iter()
                .map(|version| Fixture::encode(version, &()))
                .collect();
            to_json(category, &fixtures)
        }
        Category::Varint => {
            let fixtures: Vec<_> = tables::varints()
                .into_iter()
                .map(|value| Fixture::new(value, &SVar(value).encode()))
                .collect();
            to_json(category, &fixtures)
        }
        Category::Vote => {
            let fixtures: Vec<_> = tables::votes()?
                .into_iter()
                .map(|vote| {
                    let canonical = canonicalize(&vote, &config.chain_id).encode_cx(&());
                    Fixture::new(vote, &canonical)
                })
                .collect();
            to_json(category, &fixtures)
        }
        Category::Time => {
            let fixtures: Vec<_> = tables::times(&config.zone()?)?
                .into_iter()
                .map(|time| Fixture::encode(time, &()))
                .collect();
            to_json(category, &fixtures)
        }
        Category::BlockId => {
            let fixtures: Vec<_> = tables::block_ids()
                .into_iter()
                .map(|block_id| Fixture::encode(block_id, &()))
                .collect();
            to_json(category, &fixtures)
        }
        Category::PubKey => to_json(category, &Fixture::encode(tables::pubkey(), registry)),
        Category::ValidatorHashInput => {
            let fixtures: Vec<_> = tables::validator_hash_inputs()
                .into_iter()
                .map(|input| Fixture::encode(input, registry))
                .collect();
            to_json(category, &fixtures)
        }
    }
}

fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Replaces the file at `path` with `contents`.
///
/// The contents are written to a sibling file first and renamed into place, so readers observe
/// either the previous file or the complete new one.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), Error> {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    let temp = path.with_file_name(name);
    if let Err(err) = fs::write(&temp, contents) {
        let _ = fs::remove_file(&temp);
        return Err(io(&temp)(err));
    }
    if let Err(err) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(io(path)(err));
    }
    Ok(())
}

/// Renders every category and writes its fixture file.
///
/// Categories are processed in [Category::ALL] order and the first error aborts the run. Files
/// of categories that completed before the error are kept.
pub fn generate(config: &Config) -> Result<(), Error> {
    let registry = Registry::<PublicKey>::new().map_err(Error::Registry)?;
    fs::create_dir_all(&config.output).map_err(io(&config.output))?;
    for category in Category::ALL {
        let contents = render(category, config, &registry)?;
        let path = category.path(&config.output);
        write_atomic(&path, &contents)?;
        info!(%category, path = %path.display(), bytes = contents.len(), "wrote fixtures");
    }
    Ok(())
}

/// Renders every category and compares it with the existing fixture file.
///
/// Every stale (or missing) file is reported, and the first one is returned as an error.
pub fn check(config: &Config) -> Result<(), Error> {
    let registry = Registry::<PublicKey>::new().map_err(Error::Registry)?;
    let mut stale = None;
    for category in Category::ALL {
        let contents = render(category, config, &registry)?;
        let path = category.path(&config.output);
        let current = match fs::read_to_string(&path) {
            Ok(existing) => existing == contents,
            Err(err) if err.kind() == ErrorKind::NotFound => false,
            Err(err) => return Err(io(&path)(err)),
        };
        if current {
            debug!(%category, path = %path.display(), "fixtures up to date");
            continue;
        }
        warn!(%category, path = %path.display(), "fixtures stale");
        stale.get_or_insert(Error::Stale { category, path });
    }
    match stale {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn render_json(category: Category) -> Value {
        let registry = Registry::<PublicKey>::new().unwrap();
        let contents = render(category, &Config::default(), &registry).unwrap();
        serde_json::from_str(&contents).unwrap()
    }

    fn encodings(category: Category) -> Vec<String> {
        render_json(category)
            .as_array()
            .unwrap()
            .iter()
            .map(|fixture| fixture["encoding"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_fixture_field_order() {
        let fixture = Fixture::new(1u64, &[0xab]);
        assert_eq!(
            serde_json::to_string(&fixture).unwrap(),
            r#"{"value":1,"encoding":"ab"}"#
        );
    }

    #[test]
    fn test_files() {
        let mut files: Vec<_> = Category::ALL.iter().map(|c| c.file()).collect();
        files.sort_unstable();
        files.dedup();
        assert_eq!(files.len(), 7);
        assert_eq!(Category::BlockId.to_string(), "block_id");
    }

    #[test]
    fn test_render_version() {
        assert_eq!(
            encodings(Category::Version),
            vec!["08d20910ae2c", "0801", "1001", ""]
        );
        let json = render_json(Category::Version);
        assert_eq!(json[0]["value"]["block"], 1234);
        assert_eq!(json[0]["value"]["app"], 5678);
    }

    #[test]
    fn test_render_varint() {
        let encodings = encodings(Category::Varint);
        assert_eq!(
            &encodings[..6],
            &["00", "02", "fe03", "8004", "a413", "c09a0c"]
        );
        assert_eq!(encodings[8], "01");
        assert_eq!(encodings[17], "ffffffffffffffffff01");
        let json = render_json(Category::Varint);
        assert_eq!(json[17]["value"], i64::MIN);
    }

    #[test]
    fn test_render_vote() {
        let encodings = encodings(Category::Vote);
        assert_eq!(
            encodings[0],
            "1101000000000000001902000000000000002a0a08959aef3a10959aef3a3208636861696e2d6964"
        );
        // Canonical encodings differ only where the votes do
        assert_ne!(encodings[1], encodings[2]);
        assert_ne!(encodings[2], encodings[3]);
        let json = render_json(Category::Vote);
        assert_eq!(json[0]["value"]["type"], 0);
        assert_eq!(json[1]["value"]["height"], 1234567890);
        assert!(json[0]["value"]["signature"].is_null());
    }

    #[test]
    fn test_render_vote_chain_id() {
        let registry = Registry::<PublicKey>::new().unwrap();
        let config = Config {
            chain_id: "other".to_string(),
            ..Config::default()
        };
        let a = render(Category::Vote, &config, &registry).unwrap();
        let b = render(Category::Vote, &Config::default(), &registry).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_render_time() {
        let encodings = encodings(Category::Time);
        assert_eq!(encodings.len(), 4);
        assert_eq!(encodings[0], "08959aef3a10959aef3a");
        assert_eq!(encodings[1], "08959aef3a");
        assert_eq!(encodings[2], "10959aef3a");
        let json = render_json(Category::Time);
        assert_eq!(json[2]["value"], "1970-01-01T00:00:00.123456789Z");
    }

    #[test]
    fn test_render_block_id() {
        let encodings = encodings(Category::BlockId);
        assert_eq!(encodings[0], "");
        assert!(encodings[1].starts_with("0a20"));
        assert!(encodings[2].ends_with(&format!("087b1220{}", hex(tables::HASH))));
    }

    #[test]
    fn test_render_pubkey() {
        let json = render_json(Category::PubKey);
        assert_eq!(json["value"]["type"], "tendermint/PubKeyEd25519");
        assert_eq!(
            json["value"]["value"],
            "NNJledu0Vmk+VAZyz5IvUt3g1lMuNb8GvgE6fFMvIOA="
        );
        assert_eq!(
            json["encoding"],
            "1624de642034d26579dbb456693e540672cf922f52dde0d6532e35bf06be013a7c532f20e0"
        );
    }

    #[test]
    fn test_render_validator_hash_input() {
        let encodings = encodings(Category::ValidatorHashInput);
        assert!(encodings[0].starts_with("0a251624de642034d26579"));
        assert!(encodings[0].ends_with("10d209"));
        assert!(encodings[1].ends_with("1080897a"));
        let json = render_json(Category::ValidatorHashInput);
        assert_eq!(json[0]["value"]["pub_key"][0], 0x34);
        assert_eq!(json[1]["value"]["voting_power"], 2000000);
    }

    #[test]
    fn test_render_pretty() {
        let registry = Registry::<PublicKey>::new().unwrap();
        let contents = render(Category::Version, &Config::default(), &registry).unwrap();
        assert!(contents.starts_with("[\n  {\n    \"value\": {\n      \"block\": 1234,"));
        assert!(!contents.ends_with('\n'));
    }
}
