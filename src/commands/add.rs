use crate::core::repository::{AddTarget, Repository};

pub fn execute_init(repo: &mut Repository) {
    repo.init();
}

pub fn execute_add(repo: &mut Repository, target: AddTarget) {
    repo.add(target);
}
