//! Reads an unpacked operator bundle: the ClusterServiceVersion, the CRDs it
//! owns, any other manifests, and the bundle metadata annotations.

use serde::Deserialize;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

mod error;
mod object;

pub use error::BundleError;
pub use object::*;

pub type Result<T> = std::result::Result<T, BundleError>;

/// CSV annotation holding example custom resources as a JSON array.
pub const ALM_EXAMPLES_ANNOTATION: &str = "alm-examples";

const ANNOTATIONS_FILE: &str = "metadata/annotations.yaml";
const PACKAGE_ANNOTATION: &str = "operators.operatorframework.io.bundle.package.v1";
const CHANNELS_ANNOTATION: &str = "operators.operatorframework.io.bundle.channels.v1";
const DEFAULT_CHANNEL_ANNOTATION: &str = "operators.operatorframework.io.bundle.channel.default.v1";
const MANIFEST_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

#[derive(Deserialize, Debug, Default)]
struct AnnotationsFile {
    #[serde(default)]
    annotations: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    /// Name of the bundle, which is the name of its CSV
    pub name: String,
    /// Directory the bundle was read from
    pub dir: PathBuf,
    pub package: Option<String>,
    pub channels: Vec<String>,
    pub default_channel: Option<String>,
    pub csv: ClusterServiceVersion,
    pub crds: Vec<Object>,
    /// Every manifest that is neither the CSV nor a CRD
    pub objects: Vec<Object>,
}

impl Bundle {
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut files = Vec::new();
        collect_manifest_files(dir, &mut files)?;
        files.sort();

        let mut csv: Option<ClusterServiceVersion> = None;
        let mut crds = Vec::new();
        let mut objects = Vec::new();

        for path in files {
            for obj in decode_file(&path)? {
                match obj.kind.as_str() {
                    CSV_KIND => {
                        if let Some(first) = &csv {
                            return Err(BundleError::MultipleCsvs {
                                dir: dir.to_owned(),
                                first: first.name().to_owned(),
                                second: obj.name().to_owned(),
                            });
                        }
                        let parsed = ClusterServiceVersion::try_from(obj).map_err(|source| {
                            BundleError::InvalidCsv {
                                path: path.clone(),
                                source,
                            }
                        })?;
                        log::debug!("found csv {} in {:?}", parsed.name(), path);
                        csv = Some(parsed);
                    }
                    CRD_KIND => crds.push(obj),
                    _ => objects.push(obj),
                }
            }
        }

        let csv = csv.ok_or_else(|| BundleError::MissingCsv(dir.to_owned()))?;
        let annotations = load_annotations(dir)?;
        let channels: Vec<String> = annotations
            .get(CHANNELS_ANNOTATION)
            .map(|c| {
                c.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Bundle {
            name: csv.name().to_owned(),
            dir: dir.to_owned(),
            package: annotations.get(PACKAGE_ANNOTATION).cloned(),
            channels,
            default_channel: annotations.get(DEFAULT_CHANNEL_ANNOTATION).cloned(),
            csv,
            crds,
            objects,
        })
    }

    /// Raw `alm-examples` annotation of the CSV, if set and non-empty.
    pub fn alm_examples(&self) -> Option<&str> {
        self.csv.annotation(ALM_EXAMPLES_ANNOTATION)
    }

    /// First custom resource listed in `alm-examples`.
    pub fn first_alm_example(&self) -> std::result::Result<Option<Object>, serde_json::Error> {
        match self.alm_examples() {
            Some(raw) => {
                let examples: Vec<Object> = serde_json::from_str(raw)?;
                Ok(examples.into_iter().next())
            }
            None => Ok(None),
        }
    }
}

fn collect_manifest_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|source| BundleError::Io {
        path: dir.to_owned(),
        source,
    })?;
    for entry in entries {
        let path = entry
            .map_err(|source| BundleError::Io {
                path: dir.to_owned(),
                source,
            })?
            .path();
        if is_hidden(&path) {
            log::debug!("skipping hidden entry {:?}", path);
        } else if path.is_dir() {
            collect_manifest_files(&path, files)?;
        } else if is_manifest(&path) && !path.ends_with(ANNOTATIONS_FILE) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn is_manifest(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| MANIFEST_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

// documents that are empty, have no kind, or fail to decode are skipped
fn decode_file(path: &Path) -> Result<Vec<Object>> {
    let content = fs::read_to_string(path).map_err(|source| BundleError::Io {
        path: path.to_owned(),
        source,
    })?;

    let mut objects = Vec::new();
    for document in serde_yaml::Deserializer::from_str(&content) {
        let value = match serde_yaml::Value::deserialize(document) {
            Ok(serde_yaml::Value::Null) => continue,
            Ok(value) => value,
            Err(e) => {
                log::warn!("skipping undecodable document in {:?}: {}", path, e);
                continue;
            }
        };
        if value.get("kind").is_none() {
            log::debug!("skipping document without kind in {:?}", path);
            continue;
        }
        match serde_yaml::from_value::<Object>(value) {
            Ok(obj) => objects.push(obj),
            Err(e) => log::warn!("skipping invalid object in {:?}: {}", path, e),
        }
    }
    Ok(objects)
}

fn load_annotations(dir: &Path) -> Result<HashMap<String, String>> {
    let path = dir.join(ANNOTATIONS_FILE);
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let content = fs::read_to_string(&path).map_err(|source| BundleError::Io {
        path: path.clone(),
        source,
    })?;
    let file: AnnotationsFile = serde_yaml::from_str(&content)
        .map_err(|source| BundleError::Annotations { path, source })?;
    Ok(file.annotations)
}
