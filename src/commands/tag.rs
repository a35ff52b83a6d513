use crate::core::repository::Repository;

/// `git tag [name]`: tag the checked-out commit, or list tags
pub fn execute_tag(repo: &mut Repository, name: Option<&str>) {
    match name {
        Some(name) => {
            repo.tag(name);
        }
        None => {
            repo.list_tags();
        }
    }
}
