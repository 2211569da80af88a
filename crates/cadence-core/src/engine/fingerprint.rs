//! Content fingerprints used to spot duplicate goals on bulk import.

use sha2::{Digest, Sha256};

use crate::models::{GoalType, TaxonomyRef};

/// SHA-256 over discipline, subject, topic, type and planned duration.
///
/// Guidance text and dates do not take part, so two goals that differ only
/// there are treated as the same content.
pub fn content_hash(taxonomy: &TaxonomyRef, goal_type: GoalType, planned_minutes: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(taxonomy.discipline_id.to_string().as_bytes());
    hasher.update(b"|");
    hasher.update(taxonomy.subject_id.to_string().as_bytes());
    hasher.update(b"|");
    match taxonomy.topic_id {
        Some(topic) => hasher.update(topic.to_string().as_bytes()),
        None => hasher.update(b"-"),
    }
    hasher.update(b"|");
    hasher.update(goal_type.as_str().as_bytes());
    hasher.update(b"|");
    hasher.update(planned_minutes.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}
