use crate::core::repository::Repository;

/// `git branch [name]`: create a branch, or list them with the current one starred
pub fn execute_branch(repo: &mut Repository, name: Option<&str>) {
    match name {
        Some(name) => {
            repo.branch(name);
        }
        None => {
            let listing = format_branch_list(repo);
            repo.report(listing);
        }
    }
}

pub fn format_branch_list(repo: &Repository) -> String {
    let current = repo.current_branch();
    repo.state()
        .branches
        .keys()
        .map(|name| {
            if Some(name.as_str()) == current {
                format!("* {name}")
            } else {
                format!("  {name}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
