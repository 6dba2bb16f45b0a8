//! One-shot startup loading of the frozen model artifacts.
//!
//! Every failure here is fatal: callers must not serve requests with a
//! partially loaded model.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{error, info};

use crate::{
    domain::CategorySet,
    errors::ModelError,
    model::{
        extractor::{Norm, TfidfExtractor, TfidfOptions},
        CategoryClassifier, LinearClassifier,
    },
    normalizer::{DictionaryCorrector, Normalizer},
    pipeline::Categorizer,
};

pub const MODEL_SCHEMA_VERSION: u32 = 1;
const EXTRACTOR_KIND: &str = "tfidf";
const CLASSIFIER_KIND: &str = "linear";

/// On-disk layout of the feature extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorArtifact {
    pub schema_version: u32,
    pub kind: String,
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: [usize; 2],
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
}

fn default_ngram_range() -> [usize; 2] {
    [1, 1]
}

fn default_min_token_len() -> usize {
    1
}

/// On-disk layout of the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub schema_version: u32,
    pub kind: String,
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

/// On-disk layout of the spelling dictionary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryArtifact {
    pub schema_version: u32,
    pub words: HashMap<String, u64>,
}

/// Locations of the artifacts that make up one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    pub extractor: PathBuf,
    pub classifier: PathBuf,
    pub dictionary: Option<PathBuf>,
}

pub fn load_extractor(path: &Path) -> Result<TfidfExtractor, ModelError> {
    let artifact: ExtractorArtifact = read_artifact(path, "feature extractor")?;
    check_header(path, artifact.schema_version, &artifact.kind, EXTRACTOR_KIND)?;
    let options = TfidfOptions {
        ngram_range: (artifact.ngram_range[0], artifact.ngram_range[1]),
        min_token_len: artifact.min_token_len,
        sublinear_tf: artifact.sublinear_tf,
        norm: artifact.norm,
    };
    let extractor = TfidfExtractor::new(artifact.vocabulary, artifact.idf, options)
        .map_err(|reason| schema_error(path, reason))?;
    info!(
        path = %path.display(),
        terms = extractor.terms().count(),
        "Feature extractor ready"
    );
    Ok(extractor)
}

pub fn load_classifier(path: &Path) -> Result<LinearClassifier, ModelError> {
    let artifact: ClassifierArtifact = read_artifact(path, "classifier")?;
    check_header(path, artifact.schema_version, &artifact.kind, CLASSIFIER_KIND)?;
    let categories =
        CategorySet::new(artifact.classes).map_err(|reason| schema_error(path, reason))?;
    let classifier = LinearClassifier::new(categories, artifact.coef, artifact.intercept)
        .map_err(|reason| schema_error(path, reason))?;
    info!(
        path = %path.display(),
        categories = %classifier.categories(),
        "Classifier ready"
    );
    Ok(classifier)
}

pub fn load_dictionary(path: &Path, max_distance: usize) -> Result<DictionaryCorrector, ModelError> {
    let artifact: DictionaryArtifact = read_artifact(path, "spelling dictionary")?;
    if artifact.schema_version != MODEL_SCHEMA_VERSION {
        return Err(version_error(path, artifact.schema_version));
    }
    let dictionary = DictionaryCorrector::new(artifact.words, max_distance)
        .map_err(|reason| schema_error(path, reason))?;
    info!(path = %path.display(), words = dictionary.len(), "Spelling dictionary ready");
    Ok(dictionary)
}

/// Loads every artifact and wires them into a shared [`Categorizer`].
///
/// Without a dictionary file, spelling correction uses the extractor's
/// single-word vocabulary.
pub fn load_categorizer(paths: &ModelPaths, max_distance: usize) -> Result<Categorizer, ModelError> {
    let extractor = load_extractor(&paths.extractor)?;
    let classifier = load_classifier(&paths.classifier)?;
    let dictionary = match &paths.dictionary {
        Some(path) => load_dictionary(path, max_distance)?,
        None => DictionaryCorrector::from_terms(extractor.terms(), max_distance),
    };
    let normalizer = Normalizer::new(Arc::new(dictionary));
    Categorizer::new(normalizer, Arc::new(extractor), Arc::new(classifier))
}

fn read_artifact<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, ModelError> {
    info!(path = %path.display(), "Loading {what}");
    let data = fs::read_to_string(path).map_err(|source| {
        error!(path = %path.display(), %source, "Loading {what} failed");
        if source.kind() == io::ErrorKind::NotFound {
            ModelError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            ModelError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_str(&data).map_err(|source| {
        error!(path = %path.display(), %source, "Loading {what} failed");
        ModelError::Corrupt {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn check_header(path: &Path, version: u32, kind: &str, expected: &str) -> Result<(), ModelError> {
    if version != MODEL_SCHEMA_VERSION {
        return Err(version_error(path, version));
    }
    if kind != expected {
        return Err(schema_error(
            path,
            format!("expected a `{expected}` artifact, found `{kind}`"),
        ));
    }
    Ok(())
}

fn version_error(path: &Path, version: u32) -> ModelError {
    schema_error(
        path,
        format!("schema version {version}, this build reads version {MODEL_SCHEMA_VERSION}"),
    )
}

fn schema_error(path: &Path, reason: impl Into<String>) -> ModelError {
    let reason = reason.into();
    error!(path = %path.display(), %reason, "Model artifact rejected");
    ModelError::Schema {
        path: path.to_path_buf(),
        reason,
    }
}
