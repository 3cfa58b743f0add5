use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use rust_embed::Embed;
use serde::Deserialize;
use thiserror::Error;

use crate::content::model::{ConceptDetail, ConfigurationOptions, Syllabus, SyllabusKey, Unit};

#[derive(Embed)]
#[folder = "assets/content/"]
struct ContentAssets;

const OPTIONS_FILE: &str = "options.json";
const SYLLABI_DIR: &str = "syllabi";
const CONCEPTS_DIR: &str = "concepts";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed content in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("content pack has no options.json")]
    MissingOptions,
    #[error("syllabus for {0} is registered more than once")]
    DuplicateSyllabus(SyllabusKey),
    #[error("concept id '{id}' appears more than once in syllabus {key}")]
    DuplicateConceptInSyllabus { key: SyllabusKey, id: String },
    #[error("concept detail '{0}' is defined more than once")]
    DuplicateConceptDetail(String),
}

/// On-disk shape of one syllabus document.
#[derive(Deserialize)]
struct SyllabusDocument {
    subject: String,
    course: String,
    textbook: String,
    units: Vec<Unit>,
}

/// Static study content: option lists, syllabi keyed by
/// (subject, course, textbook) and concept details keyed by concept id.
///
/// Built once at startup and read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct ContentRepository {
    pub(crate) options: ConfigurationOptions,
    pub(crate) syllabi: HashMap<SyllabusKey, Syllabus>,
    pub(crate) details: HashMap<String, ConceptDetail>,
}

impl ContentRepository {
    /// Load the content pack compiled into the binary.
    pub fn embedded() -> Result<Self, ContentError> {
        let mut paths: Vec<String> = ContentAssets::iter().map(|p| p.to_string()).collect();
        paths.sort();
        let documents = paths.into_iter().filter_map(|path| {
            ContentAssets::get(&path).map(|file| (path, file.data.into_owned()))
        });
        Self::from_documents(documents)
    }

    /// Load a content pack laid out like `assets/content/` from a directory.
    pub fn from_dir(dir: &Path) -> Result<Self, ContentError> {
        let mut documents = Vec::new();

        let options_path = dir.join(OPTIONS_FILE);
        if options_path.exists() {
            documents.push((OPTIONS_FILE.to_string(), read_file(&options_path)?));
        }

        for sub in [SYLLABI_DIR, CONCEPTS_DIR] {
            let sub_dir = dir.join(sub);
            if !sub_dir.is_dir() {
                continue;
            }
            let entries = fs::read_dir(&sub_dir).map_err(|source| ContentError::Io {
                path: sub_dir.to_string_lossy().to_string(),
                source,
            })?;
            let mut names: Vec<String> = entries
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_file())
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect();
            names.sort();
            for name in names {
                let bytes = read_file(&sub_dir.join(&name))?;
                documents.push((format!("{sub}/{name}"), bytes));
            }
        }

        Self::from_documents(documents)
    }

    /// Build the repository from `(relative path, bytes)` pairs. Paths are
    /// routed by their directory: `options.json`, `syllabi/*.json`,
    /// `concepts/*.json`. Anything else is ignored.
    pub fn from_documents<I>(documents: I) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = (String, Vec<u8>)>,
    {
        let mut options = None;
        let mut syllabi = HashMap::new();
        let mut details = HashMap::new();

        for (path, bytes) in documents {
            if !path.ends_with(".json") {
                log::debug!("skipping non-json content file {path}");
                continue;
            }

            if path == OPTIONS_FILE {
                options = Some(parse::<ConfigurationOptions>(&path, &bytes)?);
            } else if path.starts_with(&format!("{SYLLABI_DIR}/")) {
                let doc: SyllabusDocument = parse(&path, &bytes)?;
                let key = SyllabusKey::new(&doc.subject, &doc.course, &doc.textbook);
                let syllabus = Syllabus { units: doc.units };
                check_unique_concepts(&key, &syllabus)?;
                if syllabi.contains_key(&key) {
                    return Err(ContentError::DuplicateSyllabus(key));
                }
                syllabi.insert(key, syllabus);
            } else if path.starts_with(&format!("{CONCEPTS_DIR}/")) {
                let detail: ConceptDetail = parse(&path, &bytes)?;
                if details.contains_key(&detail.id) {
                    return Err(ContentError::DuplicateConceptDetail(detail.id));
                }
                details.insert(detail.id.clone(), detail);
            } else {
                log::debug!("skipping unrecognised content file {path}");
            }
        }

        let repo = Self {
            options: options.ok_or(ContentError::MissingOptions)?,
            syllabi,
            details,
        };
        repo.log_missing_details();
        Ok(repo)
    }

    pub fn syllabus_count(&self) -> usize {
        self.syllabi.len()
    }

    pub fn detail_count(&self) -> usize {
        self.details.len()
    }

    /// Registered syllabus keys in sorted order.
    pub fn syllabus_keys(&self) -> Vec<&SyllabusKey> {
        let mut keys: Vec<&SyllabusKey> = self.syllabi.keys().collect();
        keys.sort();
        keys
    }

    /// Concept ids referenced by a syllabus but lacking a detail record.
    pub fn concepts_without_details(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = self
            .syllabi
            .values()
            .flat_map(|s| s.concepts())
            .filter(|c| !self.details.contains_key(&c.id))
            .map(|c| c.id.as_str())
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    fn log_missing_details(&self) {
        for id in self.concepts_without_details() {
            log::debug!("concept '{id}' has no detail record");
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, ContentError> {
    fs::read(path).map_err(|source| ContentError::Io {
        path: path.to_string_lossy().to_string(),
        source,
    })
}

fn parse<T: serde::de::DeserializeOwned>(path: &str, bytes: &[u8]) -> Result<T, ContentError> {
    serde_json::from_slice(bytes).map_err(|source| ContentError::Parse {
        path: path.to_string(),
        source,
    })
}

fn check_unique_concepts(key: &SyllabusKey, syllabus: &Syllabus) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for concept in syllabus.concepts() {
        if !seen.insert(concept.id.as_str()) {
            return Err(ContentError::DuplicateConceptInSyllabus {
                key: key.clone(),
                id: concept.id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: &str = r#"{
        "subjects": ["Physics"],
        "courses": ["B.Sc"],
        "textbooks": ["Book"],
        "preparationGoals": ["Revision"]
    }"#;

    fn syllabus_doc(textbook: &str, concept_ids: &[&str]) -> String {
        let concepts: Vec<String> = concept_ids
            .iter()
            .map(|id| format!(r#"{{"id": "{id}", "name": "{id}", "description": ""}}"#))
            .collect();
        format!(
            r#"{{
                "subject": "Physics", "course": "B.Sc", "textbook": "{textbook}",
                "units": [{{"id": "u1", "name": "Unit", "topics": [
                    {{"id": "t1", "name": "Topic", "concepts": [{}]}}
                ]}}]
            }}"#,
            concepts.join(",")
        )
    }

    fn detail_doc(id: &str) -> String {
        format!(
            r#"{{"id": "{id}", "understanding": "u",
                "examinerAlignment": {{}}, "revisionNotes": {{}}}}"#
        )
    }

    fn doc(path: &str, body: &str) -> (String, Vec<u8>) {
        (path.to_string(), body.as_bytes().to_vec())
    }

    #[test]
    fn embedded_pack_loads() {
        let repo = ContentRepository::embedded().unwrap();
        assert_eq!(repo.syllabus_count(), 1);
        assert_eq!(repo.detail_count(), 2);
        assert_eq!(repo.options.subjects.len(), 5);
        assert_eq!(repo.options.preparation_goals, vec!["Revision", "Conceptual", "Exam-oriented"]);
        assert_eq!(
            repo.concepts_without_details(),
            vec!["concept3", "concept4", "concept5"]
        );
    }

    #[test]
    fn missing_options_is_an_error() {
        let err = ContentRepository::from_documents(vec![doc("concepts/a.json", &detail_doc("a"))])
            .unwrap_err();
        assert!(matches!(err, ContentError::MissingOptions));
    }

    #[test]
    fn parse_error_names_the_file() {
        let err = ContentRepository::from_documents(vec![
            doc("options.json", OPTIONS),
            doc("concepts/broken.json", "{ not json"),
        ])
        .unwrap_err();
        match err {
            ContentError::Parse { path, .. } => assert_eq!(path, "concepts/broken.json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_syllabus_triple_rejected() {
        let err = ContentRepository::from_documents(vec![
            doc("options.json", OPTIONS),
            doc("syllabi/a.json", &syllabus_doc("Book", &["c1"])),
            doc("syllabi/b.json", &syllabus_doc("Book", &["c2"])),
        ])
        .unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSyllabus(_)));
    }

    #[test]
    fn duplicate_concept_within_syllabus_rejected() {
        let err = ContentRepository::from_documents(vec![
            doc("options.json", OPTIONS),
            doc("syllabi/a.json", &syllabus_doc("Book", &["c1", "c1"])),
        ])
        .unwrap_err();
        match err {
            ContentError::DuplicateConceptInSyllabus { id, .. } => assert_eq!(id, "c1"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn same_concept_id_in_different_syllabi_is_fine() {
        let repo = ContentRepository::from_documents(vec![
            doc("options.json", OPTIONS),
            doc("syllabi/a.json", &syllabus_doc("Book", &["c1"])),
            doc("syllabi/b.json", &syllabus_doc("Other Book", &["c1"])),
        ])
        .unwrap();
        assert_eq!(repo.syllabus_count(), 2);
    }

    #[test]
    fn duplicate_detail_rejected() {
        let err = ContentRepository::from_documents(vec![
            doc("options.json", OPTIONS),
            doc("concepts/a.json", &detail_doc("c1")),
            doc("concepts/b.json", &detail_doc("c1")),
        ])
        .unwrap_err();
        assert!(matches!(err, ContentError::DuplicateConceptDetail(id) if id == "c1"));
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let repo = ContentRepository::from_documents(vec![
            doc("options.json", OPTIONS),
            doc("README.md", "# notes"),
            doc("drafts/x.json", "{}"),
        ])
        .unwrap();
        assert_eq!(repo.syllabus_count(), 0);
        assert_eq!(repo.detail_count(), 0);
    }

    #[test]
    fn from_dir_reads_same_layout() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("options.json"), OPTIONS).unwrap();
        fs::create_dir_all(dir.path().join("syllabi")).unwrap();
        fs::create_dir_all(dir.path().join("concepts")).unwrap();
        fs::write(
            dir.path().join("syllabi").join("book.json"),
            syllabus_doc("Book", &["c1", "c2"]),
        )
        .unwrap();
        fs::write(dir.path().join("concepts").join("c1.json"), detail_doc("c1")).unwrap();

        let repo = ContentRepository::from_dir(dir.path()).unwrap();
        assert_eq!(repo.syllabus_count(), 1);
        assert_eq!(repo.detail_count(), 1);
        assert_eq!(repo.concepts_without_details(), vec!["c2"]);
        assert_eq!(
            repo.syllabus_keys(),
            vec![&SyllabusKey::new("Physics", "B.Sc", "Book")]
        );
    }

    #[test]
    fn from_dir_without_options_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentRepository::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ContentError::MissingOptions));
    }
}
