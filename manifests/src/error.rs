use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum BundleError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse bundle annotations {}: {source}", path.display())]
    Annotations {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid ClusterServiceVersion in {}: {source}", path.display())]
    InvalidCsv {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("no ClusterServiceVersion found in bundle directory {}", .0.display())]
    MissingCsv(PathBuf),
    #[error(
        "bundle directory {} contains more than one ClusterServiceVersion: {first} and {second}",
        dir.display()
    )]
    MultipleCsvs {
        dir: PathBuf,
        first: String,
        second: String,
    },
}
