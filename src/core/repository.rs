//! JSON-backed case repository
//!
//! The whole case collection lives in a single JSON file. Every mutation
//! reads the full list, changes it in memory and writes the full list back.
//!
//! # Concurrency
//!
//! There is no locking. Two processes adding cases against the same file
//! can load the same snapshot, compute the same next ID, and the later
//! save silently replaces the earlier one. Treat the file as single-writer.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::error::StoreError;
use crate::entities::service_case::{NewCase, ServiceCase};

/// Default data file name, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "sav_cases.json";

/// Result of initializing a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// A new empty store was written
    Created,
    /// The file was already there and was left untouched
    AlreadyExists,
}

/// Case store bound to one backing file
#[derive(Debug, Clone)]
pub struct CaseRepository {
    path: PathBuf,
}

impl CaseRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load every case in file order
    ///
    /// A missing file is an empty store, not an error.
    pub fn load(&self) -> Result<Vec<ServiceCase>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "data file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let cases: Vec<ServiceCase> =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::data_format(&self.path, e))?;
        debug!(path = %self.path.display(), count = cases.len(), "loaded cases");
        Ok(cases)
    }

    /// Replace the backing file with the given cases
    ///
    /// The list is written to a temporary file next to the real target and
    /// then renamed over it, so readers never observe a half-written file.
    /// Symlinks are followed and an existing file keeps its permissions.
    pub fn save(&self, cases: &[ServiceCase]) -> Result<(), StoreError> {
        let target = self.resolve_target()?;
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let existing = fs::metadata(&target).ok().map(|m| m.permissions());

        let mut tmp = temp_file_builder()
            .tempfile_in(dir)
            .map_err(|e| StoreError::io(&self.path, e))?;
        serde_json::to_writer_pretty(&mut tmp, cases)
            .map_err(|e| StoreError::io(&self.path, e.into()))?;
        tmp.write_all(b"\n")
            .and_then(|_| tmp.flush())
            .map_err(|e| StoreError::io(&self.path, e))?;
        if let Some(permissions) = existing {
            tmp.as_file()
                .set_permissions(permissions)
                .map_err(|e| StoreError::io(&self.path, e))?;
        }
        tmp.persist(&target)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        debug!(path = %target.display(), count = cases.len(), "saved cases");
        Ok(())
    }

    /// The file a save actually replaces: the configured path with any
    /// symlinks resolved, including a link whose target does not exist yet
    fn resolve_target(&self) -> Result<PathBuf, StoreError> {
        match fs::canonicalize(&self.path) {
            Ok(real) => Ok(real),
            Err(e) if e.kind() == ErrorKind::NotFound => match fs::read_link(&self.path) {
                Ok(link) => Ok(self
                    .path
                    .parent()
                    .map_or_else(|| link.clone(), |parent| parent.join(&link))),
                Err(_) => Ok(self.path.clone()),
            },
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    /// Create an empty store unless the file already exists
    pub fn init(&self) -> Result<InitOutcome, StoreError> {
        if self.exists() {
            return Ok(InitOutcome::AlreadyExists);
        }
        self.save(&[])?;
        info!(path = %self.path.display(), "initialized case store");
        Ok(InitOutcome::Created)
    }

    /// Open a new case with the next free ID and persist it
    pub fn add(&self, details: NewCase) -> Result<ServiceCase, StoreError> {
        let mut cases = self.load()?;
        let case_id = next_case_id(&cases).ok_or_else(|| StoreError::IdExhausted {
            path: self.path.clone(),
        })?;
        let case = ServiceCase::new(case_id, details);
        cases.push(case.clone());
        self.save(&cases)?;

        info!(case_id = case.case_id(), "created case");
        Ok(case)
    }

    /// Update the status (and optionally notes) of one case
    ///
    /// Returns `None` without touching the file when no case has that ID.
    pub fn update_status(
        &self,
        case_id: u64,
        status: &str,
        notes: Option<String>,
    ) -> Result<Option<ServiceCase>, StoreError> {
        let mut cases = self.load()?;
        let Some(case) = cases.iter_mut().find(|c| c.case_id() == case_id) else {
            debug!(case_id, "no case to update");
            return Ok(None);
        };

        case.update_status(status, notes);
        let updated = case.clone();
        self.save(&cases)?;

        info!(case_id, status, "updated case");
        Ok(Some(updated))
    }

    /// Load cases, keeping only those with the given status when one is set
    pub fn list(&self, status: Option<&str>) -> Result<Vec<ServiceCase>, StoreError> {
        let cases = self.load()?;
        Ok(filter_by_status(&cases, status).into_iter().cloned().collect())
    }
}

/// Next case ID: one past the highest existing ID, or 1 for an empty list
///
/// Gaps are never reused. Returns `None` once the highest ID is `u64::MAX`.
pub fn next_case_id(cases: &[ServiceCase]) -> Option<u64> {
    match cases.iter().map(ServiceCase::case_id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

/// Temp file builder; new files get the usual 0666-minus-umask mode on unix
fn temp_file_builder() -> tempfile::Builder<'static, 'static> {
    #[allow(unused_mut)]
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder
}

/// Cases matching `status` in their original order; all cases when `None`
pub fn filter_by_status<'a>(cases: &'a [ServiceCase], status: Option<&str>) -> Vec<&'a ServiceCase> {
    cases
        .iter()
        .filter(|c| status.map_or(true, |s| c.status() == s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn details(name: &str) -> NewCase {
        NewCase {
            customer_name: name.to_string(),
            contact_email: format!("{}@example.com", name.to_lowercase()),
            product_model: "TD-50".to_string(),
            serial_number: "SN123".to_string(),
            issue_description: "No sound from pads".to_string(),
        }
    }

    fn with_ids(ids: &[u64]) -> Vec<ServiceCase> {
        ids.iter()
            .map(|&id| ServiceCase::new(id, details("Test")))
            .collect()
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let repo = CaseRepository::new(dir.path().join("cases.json"));

        assert!(repo.load().unwrap().is_empty());
        assert!(!repo.exists());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let dir = tempdir().unwrap();
        let repo = CaseRepository::new(dir.path().join("cases.json"));
        let cases = with_ids(&[3, 1, 2]);

        repo.save(&cases).unwrap();

        assert_eq!(repo.load().unwrap(), cases);
    }

    #[test]
    fn test_save_replaces_previous_content() {
        let dir = tempdir().unwrap();
        let repo = CaseRepository::new(dir.path().join("cases.json"));

        repo.save(&with_ids(&[1, 2, 3])).unwrap();
        repo.save(&with_ids(&[9])).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].case_id(), 9);
    }

    #[test]
    fn test_save_writes_indented_utf8() {
        let dir = tempdir().unwrap();
        let repo = CaseRepository::new(dir.path().join("cases.json"));
        let mut d = details("Test");
        d.customer_name = "Jürgen Müller".to_string();

        repo.save(&[ServiceCase::new(1, d)]).unwrap();

        let content = fs::read_to_string(repo.path()).unwrap();
        assert!(content.starts_with("[\n  {"));
        assert!(content.contains("Jürgen Müller"));
    }

    #[test]
    fn test_load_invalid_json_is_data_format_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cases.json");
        fs::write(&path, "{ not json").unwrap();

        let err = CaseRepository::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::DataFormat { .. }));
    }

    #[test]
    fn test_load_record_missing_field_is_data_format_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cases.json");
        fs::write(&path, r#"[{"case_id": 1, "customer_name": "Jane"}]"#).unwrap();

        let err = CaseRepository::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::DataFormat { .. }));
    }

    #[test]
    fn test_save_into_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let repo = CaseRepository::new(dir.path().join("nope/cases.json"));

        let err = repo.save(&[]).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_init_creates_empty_store_once() {
        let dir = tempdir().unwrap();
        let repo = CaseRepository::new(dir.path().join("cases.json"));

        assert_eq!(repo.init().unwrap(), InitOutcome::Created);
        assert!(repo.load().unwrap().is_empty());

        repo.add(details("Jane")).unwrap();
        assert_eq!(repo.init().unwrap(), InitOutcome::AlreadyExists);
        assert_eq!(repo.load().unwrap().len(), 1);
    }

    #[test]
    fn test_next_case_id() {
        assert_eq!(next_case_id(&[]), Some(1));
        assert_eq!(next_case_id(&with_ids(&[3, 1, 4])), Some(5));
    }

    #[test]
    fn test_next_case_id_at_max_is_none() {
        assert_eq!(next_case_id(&with_ids(&[1, u64::MAX])), None);
    }

    #[test]
    fn test_add_after_max_id_fails_without_writing() {
        let dir = tempdir().unwrap();
        let repo = CaseRepository::new(dir.path().join("cases.json"));
        repo.save(&with_ids(&[u64::MAX])).unwrap();
        let before = fs::read(repo.path()).unwrap();

        let err = repo.add(details("Jane")).unwrap_err();

        assert!(matches!(err, StoreError::IdExhausted { .. }));
        assert_eq!(fs::read(repo.path()).unwrap(), before);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let repo = CaseRepository::new(dir.path().join("cases.json"));
        repo.init().unwrap();
        fs::set_permissions(repo.path(), fs::Permissions::from_mode(0o644)).unwrap();

        repo.add(details("Jane")).unwrap();

        let mode = fs::metadata(repo.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_through_symlink_updates_target() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real.json");
        let link = dir.path().join("cases.json");
        fs::write(&real, "[]").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();
        let repo = CaseRepository::new(&link);

        repo.add(details("Jane")).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        let through_target = CaseRepository::new(&real).load().unwrap();
        assert_eq!(through_target.len(), 1);
        assert_eq!(through_target[0].customer_name(), "Jane");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_through_dangling_symlink_creates_target() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real.json");
        let link = dir.path().join("cases.json");
        std::os::unix::fs::symlink("real.json", &link).unwrap();
        let repo = CaseRepository::new(&link);

        assert_eq!(repo.init().unwrap(), InitOutcome::Created);

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(real.exists());
    }

    #[test]
    fn test_sequential_adds_get_sequential_ids() {
        let dir = tempdir().unwrap();
        let repo = CaseRepository::new(dir.path().join("cases.json"));
        repo.init().unwrap();

        let ids: Vec<u64> = (0..5)
            .map(|i| repo.add(details(&format!("Customer{}", i))).unwrap().case_id())
            .collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_add_after_gap_does_not_reuse_ids() {
        let dir = tempdir().unwrap();
        let repo = CaseRepository::new(dir.path().join("cases.json"));
        repo.save(&with_ids(&[1, 7])).unwrap();

        assert_eq!(repo.add(details("Jane")).unwrap().case_id(), 8);
    }

    #[test]
    fn test_update_status_persists() {
        let dir = tempdir().unwrap();
        let repo = CaseRepository::new(dir.path().join("cases.json"));
        repo.add(details("Jane")).unwrap();
        repo.add(details("John")).unwrap();

        let updated = repo
            .update_status(1, "closed", Some("Replaced cable".to_string()))
            .unwrap()
            .unwrap();
        assert_eq!(updated.status(), "closed");

        let cases = repo.load().unwrap();
        assert_eq!(cases[0].status(), "closed");
        assert_eq!(cases[0].resolution_notes(), "Replaced cable");
        assert_eq!(cases[1].status(), "open");
        assert_eq!(cases[1].resolution_notes(), "");
    }

    #[test]
    fn test_update_missing_case_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let repo = CaseRepository::new(dir.path().join("cases.json"));
        repo.add(details("Jane")).unwrap();
        let before = fs::read(repo.path()).unwrap();

        let result = repo.update_status(42, "closed", None).unwrap();

        assert!(result.is_none());
        assert_eq!(fs::read(repo.path()).unwrap(), before);
    }

    #[test]
    fn test_filter_by_status() {
        let mut cases = with_ids(&[1, 2, 3]);
        cases[1].update_status("closed", None);

        let open: Vec<u64> = filter_by_status(&cases, Some("open"))
            .iter()
            .map(|c| c.case_id())
            .collect();
        assert_eq!(open, vec![1, 3]);
        assert_eq!(filter_by_status(&cases, None).len(), 3);
        assert!(filter_by_status(&cases, Some("in_progress")).is_empty());
    }

    #[test]
    fn test_list_filters_by_status() {
        let dir = tempdir().unwrap();
        let repo = CaseRepository::new(dir.path().join("cases.json"));
        for name in ["A", "B", "C"] {
            repo.add(details(name)).unwrap();
        }
        repo.update_status(2, "closed", None).unwrap();

        let open = repo.list(Some("open")).unwrap();
        assert_eq!(
            open.iter().map(|c| c.case_id()).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(repo.list(None).unwrap().len(), 3);
    }
}
