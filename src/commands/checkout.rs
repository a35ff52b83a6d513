use crate::core::repository::Repository;

/// `git checkout [-b] <ref>`. With `-b` the branch is created first; the checkout
/// runs either way, so an existing branch is simply switched to.
pub fn execute_checkout(repo: &mut Repository, reference: &str, create_branch: bool) {
    if create_branch {
        repo.branch(reference);
    }
    repo.checkout(reference);
}
