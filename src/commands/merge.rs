use crate::core::repository::{MergeOutcome, Repository};

pub fn execute_merge(repo: &mut Repository, source: &str) -> MergeOutcome {
    let outcome = repo.merge(source);
    if outcome.conflict {
        log::warn!("Merge of '{source}' reported conflicts");
    }
    outcome
}
