//! Grouping and filtering operations over resources, used symmetrically by
//! the import and export flows.

use crate::types::Resource;

/// One project's worth of resources, keyed by project name.
pub type ProjectGroup = (String, Vec<Resource>);

/// Groups resources by the name of their owning project.
///
/// Grouping is stable: projects appear in first-seen order and resources
/// keep their relative order within each group.
pub fn group_by_project(resources: Vec<Resource>) -> Vec<ProjectGroup> {
    let mut groups: Vec<ProjectGroup> = Vec::new();
    for resource in resources {
        let name = resource.project_name();
        match groups.iter_mut().find(|(group_name, _)| group_name == name) {
            Some((_, members)) => members.push(resource),
            None => groups.push((name.to_string(), vec![resource])),
        }
    }
    groups
}

/// Keeps only the groups whose project name equals `name` exactly
/// (case-sensitive). An empty result is a normal outcome meaning "nothing
/// to do", never an error.
pub fn filter_by_project(groups: Vec<ProjectGroup>, name: &str) -> Vec<ProjectGroup> {
    groups
        .into_iter()
        .filter(|(group_name, _)| group_name == name)
        .collect()
}
