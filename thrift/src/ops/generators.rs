//! Generators operation - list backends and their options.

use crate::{
    language::Backend,
    reports::{BackendInfo, GeneratorsReport},
};

pub fn generators() -> GeneratorsReport {
    let backends = Backend::ALL
        .into_iter()
        .map(|backend| BackendInfo {
            name: backend.name(),
            description: backend.description(),
            options: backend.options(),
        })
        .collect();

    GeneratorsReport { backends }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_backend() {
        let report = generators();
        let names: Vec<&str> = report.backends.iter().map(|b| b.name).collect();
        assert_eq!(names, ["go", "js", "json", "graphviz"]);
        assert!(report.backends[0].options.find("package").is_some());
    }
}
