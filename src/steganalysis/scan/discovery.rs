use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use crate::steganalysis::common::error::AnalysisError;
use crate::steganalysis::scan::types::{ScanConfig, IMAGE_EXTENSIONS};

/// Candidate files found under a root, plus the entries that had to be skipped
#[derive(Debug, Default)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    pub errors: Vec<String>,
}

pub fn is_candidate(path: &Path, case_sensitive: bool) -> bool {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    if case_sensitive {
        IMAGE_EXTENSIONS.contains(&extension)
    } else {
        IMAGE_EXTENSIONS
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(extension))
    }
}

/// Recursively collects candidate image files under `root`.
///
/// Entries that cannot be read are logged and listed in
/// [`Discovery::errors`]; the walk carries on with their siblings.
#[instrument(skip(root, config), fields(root = %root.display()))]
pub fn discover(root: &Path, config: &ScanConfig) -> Discovery {
    let mut discovery = Discovery::default();

    let walker = WalkDir::new(root)
        .follow_links(config.follow_links)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let error = AnalysisError::DiscoveryError(e.to_string());
                warn!("{}", error);
                discovery.errors.push(error.to_string());
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if is_candidate(entry.path(), config.case_sensitive_extensions) {
            discovery.files.push(entry.into_path());
        }
    }

    debug!(
        files = discovery.files.len(),
        skipped = discovery.errors.len(),
        "Discovery complete"
    );
    discovery
}
