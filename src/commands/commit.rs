use crate::core::repository::Repository;

pub fn execute_commit(repo: &mut Repository, message: &str) {
    repo.commit(message);
}
