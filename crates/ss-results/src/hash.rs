//! Content-based hashing for batch IDs.

use sha2::{Digest, Sha256};
use ss_project::schema::Declaration;

/// Hash of everything that shapes a batch's results.
///
/// The `save` section only decides what is written, so it is left out: the
/// same sweep saved to a different directory keeps its id.
pub fn compute_batch_id(declaration: &Declaration, engine_version: &str) -> String {
    let mut hasher = Sha256::new();

    for part in [
        serde_json::to_string(&declaration.analysis),
        serde_json::to_string(&declaration.post),
        serde_json::to_string(&declaration.batch),
    ] {
        hasher.update(part.unwrap_or_default().as_bytes());
    }

    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
