//! Contract manifests.
//!
//! A manifest names the directory holding the rendered sections and the order
//! they are assembled in:
//!
//! ```toml
//! sections_dir = "sections"
//! sections = ["partijen", "overwegingen", "ondertekening"]
//! unknown_tokens = "ignore"
//! ```
//!
//! Each section is read from `<sections_dir>/<name>.md`, relative to the
//! manifest.

use std::path::{Path, PathBuf};

use ecow::EcoString;
use serde::Deserialize;

use crate::assemble::Section;
use crate::convert::UnknownTokenPolicy;
use crate::{Error, Result, markdown};

/// The sections of a contract, in the order they are printed.
pub const DEFAULT_SECTIONS: [&str; 12] = [
    "partijen",
    "overwegingen",
    "definities",
    "deel_1",
    "deel_3_1",
    "deel_3_2",
    "deel_3_3",
    "deel_3_4",
    "deel_3_5",
    "deel_3_6",
    "deel_3_7",
    "ondertekening",
];

/// A parsed manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// The directory holding the rendered `.md` sections.
    #[serde(default = "default_sections_dir")]
    pub sections_dir: PathBuf,
    /// The section names in order.
    #[serde(default = "default_sections")]
    pub sections: Vec<EcoString>,
    /// What to do with tokens outside the template vocabulary.
    #[serde(default)]
    pub unknown_tokens: UnknownTokenPolicy,
}

fn default_sections_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_sections() -> Vec<EcoString> {
    DEFAULT_SECTIONS.iter().map(|name| (*name).into()).collect()
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            sections_dir: default_sections_dir(),
            sections: default_sections(),
            unknown_tokens: UnknownTokenPolicy::default(),
        }
    }
}

impl Manifest {
    /// Parses a manifest from TOML.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a manifest, resolving `sections_dir` against its location.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        let mut manifest = Self::parse(&text)?;

        if manifest.sections_dir.is_relative() {
            let base = path.parent().unwrap_or(Path::new("."));
            manifest.sections_dir = base.join(&manifest.sections_dir);
        }

        Ok(manifest)
    }

    /// The path of a section file.
    pub fn section_path(&self, name: &str) -> PathBuf {
        self.sections_dir.join(format!("{name}.md"))
    }

    /// Reads and lexes every section, in order.
    pub fn read_sections(&self) -> Result<Vec<Section>> {
        self.sections
            .iter()
            .map(|name| -> Result<Section> {
                let path = self.section_path(name);
                let text = std::fs::read_to_string(&path).map_err(|err| Error::io(&path, err))?;
                log::debug!("read section {name:?} from {path:?}");
                Ok(Section::new(name.clone(), markdown::lex(&text)))
            })
            .collect()
    }
}
