//! Resume Analyzer — drives one analysis request end to end.
//!
//! job description → normalize → chunk → embed → persist
//! uploads → screen → extract → normalize → chunk → embed → persist
//! reload both stores → score → map back to accepted uploads
//!
//! Each request writes to its own run directory, so concurrent requests never share
//! vector files. The directory is deleted once the request has been scored. Structural failures abort the request and are reported as a single
//! synthetic result; per-item failures are logged and skipped.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::embedding_client::{preview, Embedder, MIN_TEXT_LENGTH};
use crate::errors::AppError;
use crate::extraction::{extract_email, screen_upload, TextExtractor, UploadedResume};
use crate::jobs::JobCatalog;
use crate::matching::chunker::{chunk_text, Chunk, JOB_CHUNK_SIZE, RESUME_CHUNK_SIZE};
use crate::matching::normalizer::normalize_text;
use crate::matching::scorer::{is_selected, score_resumes};
use crate::matching::store::{Document, VectorStore};
use crate::matching::vectors::{prepare_embedding, EMBEDDING_DIM};
use crate::models::analysis::{ResumeAnalysisResult, SimilarityResult};

/// Source label of job description chunks.
pub const JOB_SOURCE_LABEL: &str = "job_description";
const RESUME_VECTOR_FILENAME: &str = "resume_vectors.json";
const RESUME_TEXT_FILENAME: &str = "resumes.txt";

#[derive(Debug, Clone)]
pub struct MatchSettings {
    pub vector_dir: PathBuf,
    pub resume_chunk_size: usize,
    pub job_chunk_size: usize,
    pub min_text_length: usize,
    pub embedding_dim: usize,
    pub max_upload_bytes: usize,
}

impl MatchSettings {
    pub fn new(vector_dir: impl Into<PathBuf>, max_upload_bytes: usize) -> Self {
        Self {
            vector_dir: vector_dir.into(),
            resume_chunk_size: RESUME_CHUNK_SIZE,
            job_chunk_size: JOB_CHUNK_SIZE,
            min_text_length: MIN_TEXT_LENGTH,
            embedding_dim: EMBEDDING_DIM,
            max_upload_bytes,
        }
    }
}

/// Result of the job description step, handed to the rest of the request.
#[derive(Debug, Clone)]
pub struct PreparedJob {
    pub job_id: i64,
    pub vector_file: PathBuf,
    pub chunk_count: usize,
}

/// An upload that passed screening and extraction.
#[derive(Debug, Clone)]
struct AcceptedResume {
    text: String,
    email: Option<String>,
}

/// Files written by one analysis run. The whole directory is removed when the run ends.
#[derive(Debug, Clone)]
struct RunPaths {
    dir: PathBuf,
    job_vectors: PathBuf,
    resume_vectors: PathBuf,
    transcript: PathBuf,
}

impl RunPaths {
    fn new(vector_dir: &Path, run_id: Uuid, job_id: i64) -> Self {
        let dir = vector_dir.join("runs").join(run_id.to_string());
        Self {
            job_vectors: dir.join(format!("job_{job_id}_vectors.json")),
            resume_vectors: dir.join(RESUME_VECTOR_FILENAME),
            transcript: dir.join(RESUME_TEXT_FILENAME),
            dir,
        }
    }

    async fn remove(&self) {
        match tokio::fs::remove_dir_all(&self.dir).await {
            Ok(()) => debug!("Removed run directory {}", self.dir.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove run directory {}: {e}", self.dir.display()),
        }
    }
}

pub struct ResumeAnalyzer {
    embedder: Arc<dyn Embedder>,
    extractor: Arc<dyn TextExtractor>,
    jobs: Arc<JobCatalog>,
    settings: MatchSettings,
}

impl ResumeAnalyzer {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        extractor: Arc<dyn TextExtractor>,
        jobs: Arc<JobCatalog>,
        settings: MatchSettings,
    ) -> Self {
        Self {
            embedder,
            extractor,
            jobs,
            settings,
        }
    }

    /// Scores every acceptable upload against job `job_id`.
    ///
    /// Never fails: an aborted request yields exactly one `ResumeAnalysisResult::failure`.
    pub async fn analyze(
        &self,
        job_id: i64,
        uploads: Vec<UploadedResume>,
    ) -> Vec<ResumeAnalysisResult> {
        let run_id = Uuid::new_v4();
        info!(
            "Analysis run {run_id}: job {job_id}, {} uploaded files",
            uploads.len()
        );

        let paths = RunPaths::new(&self.settings.vector_dir, run_id, job_id);
        let outcome = self.run(&paths, job_id, uploads).await;
        paths.remove().await;

        match outcome {
            Ok(results) => results,
            Err(e) => {
                error!("Analysis run {run_id} aborted: {e}");
                vec![ResumeAnalysisResult::failure(e.to_string())]
            }
        }
    }

    async fn run(
        &self,
        paths: &RunPaths,
        job_id: i64,
        uploads: Vec<UploadedResume>,
    ) -> Result<Vec<ResumeAnalysisResult>, AppError> {
        let mut summary: Vec<String> = Vec::new();

        let prepared = self.prepare_job_vectors(job_id, &paths.job_vectors).await?;
        info!(
            "Job {} prepared with {} embedded chunks",
            prepared.job_id, prepared.chunk_count
        );

        let accepted = self.screen_uploads(uploads, &mut summary).await;
        if accepted.is_empty() {
            return Err(AppError::NoValidDocuments(
                "No valid text extracted from any uploaded resume".to_string(),
            ));
        }

        save_transcript(&accepted, &paths.transcript).await?;
        self.prepare_resume_vectors(&accepted, &paths.resume_vectors)
            .await?;

        let resume_store = VectorStore::load(&paths.resume_vectors).await?;
        let job_store = VectorStore::load(&prepared.vector_file).await?;
        info!(
            "Loaded {} resume documents and {} job documents",
            resume_store.len(),
            job_store.len()
        );
        if resume_store.is_empty() || job_store.is_empty() {
            return Err(AppError::NoValidDocuments(
                "No valid documents loaded for similarity scoring".to_string(),
            ));
        }
        let resume_docs = resume_store.sorted_documents();
        let job_docs = job_store.sorted_documents();

        let scores = score_resumes(&resume_docs, &job_docs);
        if scores.is_empty() {
            warn!("No similarity scores generated");
            summary.push("No similarity scores generated".to_string());
        }

        let results = map_results(scores, &accepted);
        for result in &results {
            summary.push(format!(
                "Similarity score between resume [{}] and job description: {}",
                result.resume_name, result.score
            ));
        }
        info!("Processing summary:\n{}", summary.join("\n"));

        Ok(results)
    }

    /// Embeds the job description into a fresh store at `vector_file`.
    /// Always recomputes; an earlier file for the same job is never reused.
    pub async fn prepare_job_vectors(
        &self,
        job_id: i64,
        vector_file: &Path,
    ) -> Result<PreparedJob, AppError> {
        let job = self
            .jobs
            .get_job_by_id(job_id)
            .ok_or_else(|| AppError::NotFound(format!("No job found for ID: {job_id}")))?;

        if job.description.trim().chars().count() < self.settings.min_text_length {
            return Err(AppError::NoValidDocuments(
                "Job description is empty or too short".to_string(),
            ));
        }

        let normalized = normalize_text(&job.description);
        let chunks: Vec<Chunk> =
            chunk_text(&normalized, self.settings.job_chunk_size, JOB_SOURCE_LABEL).collect();
        if chunks.is_empty() {
            return Err(AppError::NoValidDocuments(
                "No documents generated from job description".to_string(),
            ));
        }

        let docs = self.embed_chunks(chunks).await;
        if docs.is_empty() {
            return Err(AppError::NoValidDocuments(
                "No job description documents with valid embeddings".to_string(),
            ));
        }

        let chunk_count = docs.len();
        let mut store = VectorStore::new();
        store.add(docs);
        store.save(vector_file).await?;

        Ok(PreparedJob {
            job_id,
            vector_file: vector_file.to_path_buf(),
            chunk_count,
        })
    }

    async fn screen_uploads(
        &self,
        uploads: Vec<UploadedResume>,
        summary: &mut Vec<String>,
    ) -> BTreeMap<String, AcceptedResume> {
        let mut accepted = BTreeMap::new();

        for upload in uploads {
            let name = upload.file_name.clone();
            info!(
                "Processing file: {name}, size: {} bytes, content-type: {}",
                upload.bytes.len(),
                upload.content_type.as_deref().unwrap_or("<none>")
            );

            if let Err(reason) = screen_upload(&upload, self.settings.max_upload_bytes) {
                warn!("Skipping upload {name}: {reason}");
                summary.push(format!("Skipped {name}: {reason}"));
                continue;
            }

            let extractor = Arc::clone(&self.extractor);
            let bytes = upload.bytes.clone();
            let text = match tokio::task::spawn_blocking(move || extractor.extract(&bytes)).await {
                Ok(Ok(text)) => text,
                Ok(Err(e)) => {
                    warn!("Failed to process {name}: {e}");
                    summary.push(format!("Failed to process {name}: {e}"));
                    continue;
                }
                Err(e) => {
                    warn!("Extraction task for {name} did not complete: {e}");
                    summary.push(format!("Failed to process {name}: extraction aborted"));
                    continue;
                }
            };

            if text.trim().chars().count() < self.settings.min_text_length {
                warn!(
                    "Extracted text is empty or too short (<{} characters) for {name}",
                    self.settings.min_text_length
                );
                summary.push(format!("No valid text extracted from: {name}"));
                continue;
            }

            let email = extract_email(&text);
            if accepted
                .insert(name.clone(), AcceptedResume { text, email })
                .is_some()
            {
                warn!("Duplicate upload name {name}; keeping the later file");
            }
            summary.push(format!("Successfully extracted text from: {name}"));
        }

        accepted
    }

    async fn prepare_resume_vectors(
        &self,
        accepted: &BTreeMap<String, AcceptedResume>,
        vector_file: &Path,
    ) -> Result<usize, AppError> {
        let mut docs = Vec::new();
        for (name, resume) in accepted {
            let normalized = normalize_text(&resume.text);
            let chunks: Vec<Chunk> =
                chunk_text(&normalized, self.settings.resume_chunk_size, name).collect();
            let embedded = self.embed_chunks(chunks).await;
            if embedded.is_empty() {
                warn!("No chunk of {name} could be embedded");
            }
            docs.extend(embedded);
        }

        if docs.is_empty() {
            return Err(AppError::NoValidDocuments(
                "No valid resume documents for vectorization".to_string(),
            ));
        }

        let count = docs.len();
        let mut store = VectorStore::new();
        store.add(docs);
        store.save(vector_file).await?;
        Ok(count)
    }

    /// Embeds chunks one at a time. Chunks that are too short or whose embedding
    /// fails are dropped; the rest come back with fixed-size, unit-length vectors.
    async fn embed_chunks(&self, chunks: Vec<Chunk>) -> Vec<Document> {
        let mut docs = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            if chunk.text.chars().count() < self.settings.min_text_length {
                warn!("Chunk {} has insufficient text, skipped", chunk.id);
                continue;
            }

            match self.embedder.embed(&chunk.text).await {
                Ok(raw) if !raw.is_empty() => {
                    let embedding = prepare_embedding(raw, self.settings.embedding_dim);
                    debug!(
                        "Chunk {}: {:?}, embedding head {:?}",
                        chunk.id,
                        preview(&chunk.text),
                        &embedding[..embedding.len().min(5)]
                    );
                    docs.push(Document::from_chunk(chunk, Some(embedding)));
                }
                Ok(_) => warn!("Empty embedding for chunk {}, skipped", chunk.id),
                Err(e) => warn!("Embedding failed for chunk {}: {e}", chunk.id),
            }
        }

        docs
    }
}

async fn save_transcript(
    accepted: &BTreeMap<String, AcceptedResume>,
    path: &Path,
) -> Result<(), AppError> {
    let combined = accepted
        .iter()
        .map(|(name, resume)| format!("=== Resume: {name} ===\n{}", resume.text))
        .collect::<Vec<_>>()
        .join("\n\n");

    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::Persistence(format!("{}: {e}", dir.display())))?;
    }
    tokio::fs::write(path, combined)
        .await
        .map_err(|e| AppError::Persistence(format!("{}: {e}", path.display())))?;
    debug!("Saved resume transcript to {}", path.display());
    Ok(())
}

/// Attaches selection and contact details to each score. Scores for names that are
/// not among the accepted uploads are dropped. Highest score first.
fn map_results(
    scores: Vec<SimilarityResult>,
    accepted: &BTreeMap<String, AcceptedResume>,
) -> Vec<ResumeAnalysisResult> {
    let mut results: Vec<ResumeAnalysisResult> = scores
        .into_iter()
        .filter_map(|score| {
            let resume = accepted.get(&score.resume_name)?;
            Some(ResumeAnalysisResult {
                selected: is_selected(score.score),
                score: score.score,
                resume_name: score.resume_name,
                email: resume.email.clone(),
                error: None,
            })
        })
        .collect();

    results.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.resume_name.cmp(&b.resume_name))
    });
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::embedding_client::EmbeddingError;
    use crate::extraction::ExtractionError;
    use crate::models::job::Job;

    const DIM: usize = 64;

    /// Bag-of-words embedder: each distinct word gets its own dimension.
    /// Texts containing `fail_marker` fail as if every retry was exhausted.
    struct VocabularyEmbedder {
        vocabulary: Mutex<HashMap<String, usize>>,
        fail_marker: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl VocabularyEmbedder {
        fn new(fail_marker: Option<&'static str>) -> Self {
            Self {
                vocabulary: Mutex::new(HashMap::new()),
                fail_marker,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Embedder for VocabularyEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(marker) = self.fail_marker {
                if text.contains(marker) {
                    return Err(EmbeddingError::Exhausted {
                        attempts: 3,
                        last: "API error (status 503): unavailable".to_string(),
                    });
                }
            }

            let mut vocabulary = self.vocabulary.lock().unwrap();
            let mut vector = vec![0.0_f32; DIM];
            for word in text.split_whitespace() {
                let next = vocabulary.len();
                let slot = *vocabulary.entry(word.to_string()).or_insert(next);
                vector[slot % DIM] += 1.0;
            }
            Ok(vector)
        }
    }

    /// Treats upload bytes as UTF-8 text. Bytes starting with `%CORRUPT` fail.
    struct PlainTextExtractor {
        calls: AtomicUsize,
    }

    impl TextExtractor for PlainTextExtractor {
        fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if bytes.starts_with(b"%CORRUPT") {
                return Err(ExtractionError("broken xref table".to_string()));
            }
            String::from_utf8(bytes.to_vec()).map_err(|e| ExtractionError(e.to_string()))
        }
    }

    struct Harness {
        analyzer: ResumeAnalyzer,
        embedder: Arc<VocabularyEmbedder>,
        extractor: Arc<PlainTextExtractor>,
        dir: tempfile::TempDir,
    }

    fn harness(job_description: &str, fail_marker: Option<&'static str>) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let embedder = Arc::new(VocabularyEmbedder::new(fail_marker));
        let extractor = Arc::new(PlainTextExtractor {
            calls: AtomicUsize::new(0),
        });
        let jobs = Arc::new(JobCatalog::new(vec![Job {
            id: 1,
            title: "Test role".to_string(),
            description: job_description.to_string(),
            requirements: String::new(),
        }]));
        let analyzer = ResumeAnalyzer::new(
            embedder.clone(),
            extractor.clone(),
            jobs,
            MatchSettings::new(dir.path(), 1024 * 1024),
        );
        Harness {
            analyzer,
            embedder,
            extractor,
            dir,
        }
    }

    fn pdf(name: &str, text: &str) -> UploadedResume {
        UploadedResume::new(name, Some("application/pdf"), text.as_bytes().to_vec())
    }

    fn run_dirs(root: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(root.join("runs"))
            .map(|entries| entries.map(|e| e.unwrap().path()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_matching_resume_scores_high_and_is_selected() {
        let h = harness("Experience in Java and Spring Boot required", None);
        let results = h
            .analyzer
            .analyze(1, vec![pdf("java_dev.pdf", "5 years Java Spring Boot developer")])
            .await;

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.resume_name, "java_dev.pdf");
        assert!(result.score > 40, "score was {}", result.score);
        assert!(result.selected);
        assert!(!result.is_failure());
    }

    #[tokio::test]
    async fn test_unrelated_resume_scores_floor() {
        let h = harness("Plan marketing campaigns to grow brand awareness", None);
        let results = h
            .analyzer
            .analyze(
                1,
                vec![pdf("plumber.pdf", "Licensed plumber repairing leaking pipes drains boilers")],
            )
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 1);
        assert!(!results[0].selected);
    }

    #[tokio::test]
    async fn test_non_pdf_upload_is_skipped_before_extraction() {
        let h = harness("Experience in Java and Spring Boot required", None);
        let results = h
            .analyzer
            .analyze(
                1,
                vec![
                    pdf("java_dev.pdf", "5 years Java Spring Boot developer"),
                    UploadedResume::new("photo.png", Some("image/png"), b"java spring boot".to_vec()),
                ],
            )
            .await;

        let names: Vec<&str> = results.iter().map(|r| r.resume_name.as_str()).collect();
        assert_eq!(names, vec!["java_dev.pdf"]);
        assert_eq!(h.extractor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resume_with_failed_embeddings_is_omitted() {
        let h = harness("Experience in Java and Spring Boot required", Some("unreachable"));
        let results = h
            .analyzer
            .analyze(
                1,
                vec![
                    pdf("good.pdf", "5 years Java Spring Boot developer"),
                    pdf("broken.pdf", "Resume text that hits an unreachable embedding service"),
                ],
            )
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].resume_name, "good.pdf");
    }

    #[tokio::test]
    async fn test_rejected_and_failed_uploads_are_not_scored() {
        let h = harness("Experience in Java and Spring Boot required", None);
        let results = h
            .analyzer
            .analyze(
                1,
                vec![
                    pdf("good.pdf", "Java Spring Boot engineer"),
                    pdf("empty.pdf", ""),
                    pdf("tiny.pdf", "java"),
                    pdf("corrupt.pdf", "%CORRUPT java spring boot"),
                ],
            )
            .await;

        let names: Vec<&str> = results.iter().map(|r| r.resume_name.as_str()).collect();
        assert_eq!(names, vec!["good.pdf"]);
    }

    #[tokio::test]
    async fn test_results_carry_contact_email_and_rank_by_score() {
        let h = harness("Experience in Java and Spring Boot required", None);
        let results = h
            .analyzer
            .analyze(
                1,
                vec![
                    pdf("weak.pdf", "Barista making coffee with Java beans"),
                    pdf(
                        "strong.pdf",
                        "Java Spring Boot experience required skills met\nmail: Dev@Example.com",
                    ),
                ],
            )
            .await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].resume_name, "strong.pdf");
        assert!(results[0].score >= results[1].score);
        assert_eq!(results[0].email.as_deref(), Some("dev@example.com"));
        assert_eq!(results[1].email, None);
    }

    #[tokio::test]
    async fn test_unknown_job_reports_single_failure() {
        let h = harness("Experience in Java and Spring Boot required", None);
        let results = h
            .analyzer
            .analyze(99, vec![pdf("java_dev.pdf", "5 years Java Spring Boot developer")])
            .await;

        assert_eq!(results.len(), 1);
        assert!(results[0].is_failure());
        assert!(results[0].error.as_deref().unwrap().contains("No job found for ID: 99"));
        assert_eq!(h.embedder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_job_without_embeddings_reports_single_failure() {
        let h = harness("Experience in unreachable technologies", Some("unreachable"));
        let results = h
            .analyzer
            .analyze(1, vec![pdf("java_dev.pdf", "5 years Java Spring Boot developer")])
            .await;

        assert_eq!(results.len(), 1);
        assert!(results[0].is_failure());
    }

    #[tokio::test]
    async fn test_no_valid_uploads_reports_single_failure() {
        let h = harness("Experience in Java and Spring Boot required", None);
        let results = h
            .analyzer
            .analyze(
                1,
                vec![UploadedResume::new("photo.png", Some("image/png"), vec![1, 2, 3])],
            )
            .await;

        assert_eq!(results.len(), 1);
        assert!(results[0].is_failure());
    }

    #[tokio::test]
    async fn test_every_resume_failing_reports_single_failure() {
        let h = harness("Experience in Java and Spring Boot required", Some("unreachable"));
        let results = h
            .analyzer
            .analyze(1, vec![pdf("broken.pdf", "unreachable service for every chunk")])
            .await;

        assert_eq!(results.len(), 1);
        assert!(results[0].is_failure());
    }

    #[tokio::test]
    async fn test_run_persists_vector_files_with_deterministic_ids() {
        let h = harness("Experience in Java and Spring Boot required", None);
        let paths = RunPaths::new(h.dir.path(), Uuid::new_v4(), 1);
        let results = h
            .analyzer
            .run(
                &paths,
                1,
                vec![pdf("java_dev.pdf", "5 years Java Spring Boot developer")],
            )
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        let run = &paths.dir;

        let jobs = VectorStore::load(&run.join("job_1_vectors.json")).await.unwrap();
        let job_doc = jobs.get("job_description_chunk_0").unwrap();
        assert_eq!(job_doc.text, "experience in java and spring boot required");
        assert_eq!(job_doc.embedding.as_ref().unwrap().len(), EMBEDDING_DIM);

        let resumes = VectorStore::load(&run.join(RESUME_VECTOR_FILENAME)).await.unwrap();
        let resume_doc = resumes.get("java_dev.pdf_chunk_0").unwrap();
        assert_eq!(resume_doc.source_label(), Some("java_dev.pdf"));

        let transcript = std::fs::read_to_string(run.join(RESUME_TEXT_FILENAME)).unwrap();
        assert!(transcript.starts_with("=== Resume: java_dev.pdf ===\n"));
    }

    #[tokio::test]
    async fn test_run_directories_are_removed_after_each_request() {
        let h = harness("Experience in Java and Spring Boot required", None);
        let upload = pdf("java_dev.pdf", "5 years Java Spring Boot developer");
        let mut previous = None;
        for _ in 0..5 {
            let results = h.analyzer.analyze(1, vec![upload.clone()]).await;
            assert!(!results[0].is_failure());
            assert!(run_dirs(h.dir.path()).is_empty());
            if let Some(previous) = previous.replace(results.clone()) {
                assert_eq!(previous, results);
            }
        }
    }

    #[tokio::test]
    async fn test_aborted_request_removes_its_run_directory() {
        let h = harness("Experience in Java and Spring Boot required", None);
        let results = h
            .analyzer
            .analyze(
                1,
                vec![UploadedResume::new("photo.png", Some("image/png"), vec![1, 2, 3])],
            )
            .await;

        assert!(results[0].is_failure());
        assert!(run_dirs(h.dir.path()).is_empty());
    }

    #[test]
    fn test_map_results_drops_scores_for_unaccepted_resumes() {
        let mut accepted = BTreeMap::new();
        accepted.insert(
            "kept.pdf".to_string(),
            AcceptedResume {
                text: "java developer".to_string(),
                email: None,
            },
        );
        let scores = vec![
            SimilarityResult {
                resume_name: "stale.pdf".to_string(),
                score: 90,
            },
            SimilarityResult {
                resume_name: "kept.pdf".to_string(),
                score: 40,
            },
        ];

        let results = map_results(scores, &accepted);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].resume_name, "kept.pdf");
        assert!(!results[0].selected);
    }
}
