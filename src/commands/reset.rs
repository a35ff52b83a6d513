use crate::core::repository::{Repository, ResetMode};

pub fn execute_reset(repo: &mut Repository, mode: ResetMode, reference: Option<&str>) {
    repo.reset(mode, reference);
}
